// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Bazari marketplace bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `BAZARI_` prefix.
//!
//! # Usage
//!
//! ```no_run
//! let config = bazari_config::load_and_validate().expect("config errors");
//! println!("Channel: {}", config.channel.id);
//! ```

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

pub mod loader;
pub mod model;
pub mod validation;

use thiserror::Error;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::BazariConfig;

/// A configuration parse or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment failed to parse or merge the configuration sources.
    #[error("config parse error: {0}")]
    Parse(#[from] figment::Error),

    /// A semantic constraint failed after deserialization.
    #[error("config validation error: {message}")]
    Validation { message: String },
}

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`BazariConfig`] or every collected error, so an
/// operator can fix all problems in one pass.
pub fn load_and_validate() -> Result<BazariConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Load configuration from an explicit file and validate it, bypassing
/// the XDG hierarchy.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<BazariConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<BazariConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_toml_string_loads() {
        let config = load_and_validate_str(
            r#"
            [bot]
            token = "123:abc"

            [admins]
            primary = 111

            [channel]
            id = "@giftsmarket"
        "#,
        )
        .unwrap();
        assert_eq!(config.admins.primary, 111);
    }

    #[test]
    fn unknown_key_surfaces_as_parse_error() {
        let errors = load_and_validate_str("[bot]\nbogus = 1\n").unwrap_err();
        assert!(matches!(errors[0], ConfigError::Parse(_)));
    }

    #[test]
    fn missing_required_fields_surface_as_validation_errors() {
        let errors = load_and_validate_str("[payment]\nstars_amount = 3\n").unwrap_err();
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ConfigError::Validation { .. }))
        );
    }
}
