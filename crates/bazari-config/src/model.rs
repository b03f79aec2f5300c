// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Bazari bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Bazari configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values, but
/// `bot.token`, `admins.primary`, and `channel.id` must be set before the
/// bot can serve.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BazariConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Operator role assignments.
    #[serde(default)]
    pub admins: AdminsConfig,

    /// Publication channel settings.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Listing-fee payment settings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rate-limit policy settings.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Messaging platform bot token. `None` only works for offline tooling.
    #[serde(default)]
    pub token: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Operator role assignments.
///
/// The primary operator moderates ads and receives audit copies; the
/// secondary operator handles support and can also moderate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminsConfig {
    /// Platform user id of the primary operator. `0` means unset.
    #[serde(default)]
    pub primary: i64,

    /// Platform user id of the secondary (support) operator, if any.
    #[serde(default)]
    pub secondary: Option<i64>,
}

/// Publication channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Channel identifier approved ads are published to (e.g. `@giftsmarket`).
    #[serde(default)]
    pub id: String,

    /// Human-readable channel name used in post footers.
    #[serde(default = "default_channel_name")]
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: default_channel_name(),
        }
    }
}

fn default_channel_name() -> String {
    "Gifts Market".to_string()
}

/// Listing-fee payment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentConfig {
    /// Listing fee in stars charged per ad.
    #[serde(default = "default_stars_amount")]
    pub stars_amount: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stars_amount: default_stars_amount(),
        }
    }
}

fn default_stars_amount() -> u32 {
    2
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "bazari.db".to_string()
}

/// Rate-limit policy configuration.
///
/// Cooldowns are seconds since the user's previous action of the same kind;
/// window limits cap actions inside a rolling window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Minimum seconds between starting two ad submissions.
    #[serde(default = "default_ad_cooldown_secs")]
    pub ad_cooldown_secs: u64,

    /// Maximum ad submissions per rolling 24 hours.
    #[serde(default = "default_ads_per_day")]
    pub ads_per_day: u32,

    /// Minimum seconds between two support requests.
    #[serde(default = "default_support_cooldown_secs")]
    pub support_cooldown_secs: u64,

    /// Maximum support requests per rolling hour.
    #[serde(default = "default_support_per_hour")]
    pub support_per_hour: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            ad_cooldown_secs: default_ad_cooldown_secs(),
            ads_per_day: default_ads_per_day(),
            support_cooldown_secs: default_support_cooldown_secs(),
            support_per_hour: default_support_per_hour(),
        }
    }
}

fn default_ad_cooldown_secs() -> u64 {
    60
}

fn default_ads_per_day() -> u32 {
    10
}

fn default_support_cooldown_secs() -> u64 {
    120
}

fn default_support_per_hour() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = BazariConfig::default();
        assert_eq!(config.bot.log_level, "info");
        assert_eq!(config.payment.stars_amount, 2);
        assert_eq!(config.storage.database_path, "bazari.db");
        assert_eq!(config.limits.ad_cooldown_secs, 60);
        assert_eq!(config.limits.ads_per_day, 10);
        assert_eq!(config.limits.support_cooldown_secs, 120);
        assert_eq!(config.limits.support_per_hour, 5);
        assert!(config.bot.token.is_none());
        assert!(config.admins.secondary.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
            [bot]
            token = "123:abc"
            not_a_key = true
        "#;
        let result: Result<BazariConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let toml = r#"
            [payment]
            stars_amount = 5
        "#;
        let config: BazariConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.payment.stars_amount, 5);
        assert_eq!(config.channel.name, "Gifts Market");
    }
}
