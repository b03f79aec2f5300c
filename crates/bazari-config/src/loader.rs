// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./bazari.toml` > `~/.config/bazari/bazari.toml` >
//! `/etc/bazari/bazari.toml` with environment variable overrides via the
//! `BAZARI_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BazariConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/bazari/bazari.toml` (system-wide)
/// 3. `~/.config/bazari/bazari.toml` (user XDG config)
/// 4. `./bazari.toml` (local directory)
/// 5. `BAZARI_*` environment variables
pub fn load_config() -> Result<BazariConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BazariConfig::default()))
        .merge(Toml::file("/etc/bazari/bazari.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("bazari/bazari.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("bazari.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BazariConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BazariConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BazariConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BazariConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BAZARI_LIMITS_AD_COOLDOWN_SECS` must map
/// to `limits.ad_cooldown_secs`, not `limits.ad.cooldown.secs`.
fn env_provider() -> Env {
    Env::prefixed("BAZARI_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BAZARI_BOT_TOKEN -> "bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("bot_", "bot.", 1)
            .replacen("admins_", "admins.", 1)
            .replacen("channel_", "channel.", 1)
            .replacen("payment_", "payment.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("limits_", "limits.", 1);
        mapped.into()
    })
}
