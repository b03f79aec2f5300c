// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Bazari marketplace bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Bazari workspace. The messaging gateway,
//! billing provider, and repository adapters all implement traits defined
//! here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BazariError, LimitReason, ValidationKind};
pub use types::{AdId, AdStatus, ChargeId, MessageRef, PaymentStatus, SoldStatus, UserId};

// Re-export all adapter traits at crate root.
pub use traits::{BillingProvider, MessagingGateway, Repository, RoleResolver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_cover_the_taxonomy() {
        let _validation = BazariError::Validation(ValidationKind::InvalidLink);
        let _rate = BazariError::RateLimited {
            reason: LimitReason::Cooldown,
            retry_after: Some(20),
        };
        let _permission = BazariError::Permission;
        let _not_found = BazariError::NotFound("ad");
        let _state = BazariError::State;
        let _gateway = BazariError::gateway("send failed");
        let _billing = BazariError::Billing("reversal rejected".into());
        let _storage = BazariError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _config = BazariError::Config("missing token".into());
        let _internal = BazariError::Internal("test".into());
    }

    #[test]
    fn all_trait_seams_are_exported() {
        fn _assert_gateway<T: MessagingGateway>() {}
        fn _assert_billing<T: BillingProvider>() {}
        fn _assert_repository<T: Repository>() {}
        fn _assert_roles<T: RoleResolver>() {}
    }
}
