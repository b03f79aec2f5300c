// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as required identifiers and positive limits.

use crate::ConfigError;
use crate::model::BazariConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BazariConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match &config.bot.token {
        Some(token) if !token.trim().is_empty() => {}
        _ => errors.push(ConfigError::Validation {
            message: "bot.token must be set".to_string(),
        }),
    }

    if config.admins.primary == 0 {
        errors.push(ConfigError::Validation {
            message: "admins.primary must be set to a platform user id".to_string(),
        });
    }

    if let Some(secondary) = config.admins.secondary
        && secondary == config.admins.primary
    {
        errors.push(ConfigError::Validation {
            message: "admins.secondary must differ from admins.primary".to_string(),
        });
    }

    if config.channel.id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "channel.id must not be empty".to_string(),
        });
    }

    if config.payment.stars_amount == 0 {
        errors.push(ConfigError::Validation {
            message: "payment.stars_amount must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.limits.ads_per_day == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.ads_per_day must be at least 1".to_string(),
        });
    }

    if config.limits.support_per_hour == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.support_per_hour must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> BazariConfig {
        let mut config = BazariConfig::default();
        config.bot.token = Some("123:abc".to_string());
        config.admins.primary = 111;
        config.admins.secondary = Some(222);
        config.channel.id = "@giftsmarket".to_string();
        config
    }

    #[test]
    fn complete_config_passes() {
        assert!(validate_config(&complete_config()).is_ok());
    }

    #[test]
    fn defaults_alone_are_rejected() {
        let errors = validate_config(&BazariConfig::default()).unwrap_err();
        // Missing token, primary admin, and channel id are all reported.
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn duplicate_admin_ids_are_rejected() {
        let mut config = complete_config();
        config.admins.secondary = Some(config.admins.primary);
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("admins.secondary"))
        );
    }

    #[test]
    fn zero_limits_are_rejected() {
        let mut config = complete_config();
        config.payment.stars_amount = 0;
        config.limits.ads_per_day = 0;
        config.limits.support_per_hour = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
