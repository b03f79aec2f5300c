// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Bazari marketplace bot.

use thiserror::Error;

/// The primary error type used across all Bazari adapter traits and core operations.
///
/// Validation, permission, rate-limit, not-found, and flow-state errors are
/// recoverable: the dispatcher answers them with a localized re-prompt and the
/// event loop continues. Gateway and billing errors are caught at the call
/// site; storage errors propagate.
#[derive(Debug, Error)]
pub enum BazariError {
    /// Bad user input. Always recoverable; the current prompt is re-rendered.
    #[error("invalid input: {0}")]
    Validation(ValidationKind),

    /// The caller exceeded a cooldown or a rolling-window action limit.
    #[error("rate limited: {reason}")]
    RateLimited {
        reason: LimitReason,
        /// Seconds until the action is allowed again (cooldown denials only).
        retry_after: Option<u64>,
    },

    /// The caller lacks the required admin role or does not own the resource.
    #[error("permission denied")]
    Permission,

    /// Lookup miss for an ad, support request, or user.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Operation attempted with no corresponding open flow
    /// (e.g. a payment completed with no draft awaiting it).
    #[error("no active flow for this operation")]
    State,

    /// Outbound messaging call failed (send, edit, publish).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Billing adapter failure (invoice issue or charge reversal).
    #[error("billing error: {0}")]
    Billing(String),

    /// Storage backend errors (connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// What exactly was wrong with the user's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Ad submission requires a username on the platform identity.
    UsernameRequired,
    /// The text is neither a gift link nor an acceptable channel link.
    InvalidLink,
    /// The price is not a finite non-negative number.
    InvalidPrice,
    /// Expected a photo or an explicit skip.
    InvalidPhoto,
    /// Expected one of the offered preview choices.
    InvalidChoice,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationKind::UsernameRequired => "username_required",
            ValidationKind::InvalidLink => "invalid_link",
            ValidationKind::InvalidPrice => "invalid_price",
            ValidationKind::InvalidPhoto => "invalid_photo",
            ValidationKind::InvalidChoice => "invalid_choice",
        };
        f.write_str(s)
    }
}

/// Why a rate-limited action was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitReason {
    /// The per-action cooldown has not elapsed yet.
    Cooldown,
    /// The rolling-window action count is exhausted.
    WindowLimit,
}

impl std::fmt::Display for LimitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitReason::Cooldown => f.write_str("cooldown"),
            LimitReason::WindowLimit => f.write_str("window_limit"),
        }
    }
}

impl BazariError {
    /// Shorthand for a gateway failure without an underlying source.
    pub fn gateway(message: impl Into<String>) -> Self {
        BazariError::Gateway {
            message: message.into(),
            source: None,
        }
    }

    /// True for errors the dispatcher answers with a re-prompt instead of logging.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BazariError::Validation(_)
                | BazariError::RateLimited { .. }
                | BazariError::Permission
                | BazariError::NotFound(_)
                | BazariError::State
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_render_stable_tags() {
        assert_eq!(ValidationKind::InvalidLink.to_string(), "invalid_link");
        assert_eq!(ValidationKind::InvalidPrice.to_string(), "invalid_price");
        assert_eq!(
            ValidationKind::UsernameRequired.to_string(),
            "username_required"
        );
    }

    #[test]
    fn recoverable_classification() {
        assert!(BazariError::Validation(ValidationKind::InvalidLink).is_recoverable());
        assert!(BazariError::Permission.is_recoverable());
        assert!(BazariError::State.is_recoverable());
        assert!(!BazariError::gateway("boom").is_recoverable());
        assert!(
            !BazariError::Internal("x".into()).is_recoverable()
        );
    }
}
