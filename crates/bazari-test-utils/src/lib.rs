// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Bazari integration tests: mock adapters with
//! injectable inbound events and captured outbound traffic, plus small
//! fixture constructors.

pub mod mock_billing;
pub mod mock_gateway;

pub use mock_billing::MockBilling;
pub use mock_gateway::{MockGateway, SentMessage};

use bazari_config::BazariConfig;
use bazari_core::types::{UserId, UserProfile};

/// A complete, valid configuration for tests.
pub fn test_config() -> BazariConfig {
    let mut config = BazariConfig::default();
    config.bot.token = Some("123456:TEST".to_string());
    config.admins.primary = 1000;
    config.admins.secondary = Some(2000);
    config.channel.id = "@test_channel".to_string();
    config.channel.name = "Test Market".to_string();
    config.payment.stars_amount = 2;
    config
}

/// A platform profile with a username, as most flows require.
pub fn profile(id: i64, username: &str) -> UserProfile {
    UserProfile {
        id: UserId(id),
        username: Some(username.to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
        language_code: Some("en".to_string()),
        is_bot: false,
        is_premium: false,
    }
}

/// A profile without a username, for the username-gate paths.
pub fn anonymous_profile(id: i64) -> UserProfile {
    UserProfile {
        id: UserId(id),
        username: None,
        first_name: Some("Anon".to_string()),
        last_name: None,
        language_code: None,
        is_bot: false,
        is_premium: false,
    }
}
