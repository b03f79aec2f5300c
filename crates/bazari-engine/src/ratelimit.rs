// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rate limiting over the durable action log.
//!
//! The decision itself is a pure function of (now, last action, window
//! count, policy) so it can be tested without a database; the async facade
//! reads the counters from the repository.

use std::sync::Arc;

use bazari_config::model::LimitsConfig;
use bazari_core::error::{BazariError, LimitReason};
use bazari_core::traits::Repository;
use bazari_core::types::{ActionKind, UserId};

/// Policy for one throttled action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    /// Minimum seconds since the user's previous action of this kind.
    pub cooldown_secs: u64,
    /// Rolling window length in seconds.
    pub window_secs: u64,
    /// Maximum actions inside the window.
    pub max_in_window: u32,
}

impl LimitPolicy {
    /// Ad-submission policy from configuration (24h window).
    pub fn for_ads(limits: &LimitsConfig) -> Self {
        Self {
            cooldown_secs: limits.ad_cooldown_secs,
            window_secs: 24 * 60 * 60,
            max_in_window: limits.ads_per_day,
        }
    }

    /// Support-request policy from configuration (1h window).
    pub fn for_support(limits: &LimitsConfig) -> Self {
        Self {
            cooldown_secs: limits.support_cooldown_secs,
            window_secs: 60 * 60,
            max_in_window: limits.support_per_hour,
        }
    }
}

/// Decide whether an action at `now` (unix seconds) is allowed.
///
/// The cooldown is checked before the window limit so the user gets the
/// shorter, actionable wait time first.
pub fn decide(
    now: i64,
    last_action_at: Option<i64>,
    count_in_window: u32,
    policy: LimitPolicy,
) -> Result<(), BazariError> {
    if let Some(last) = last_action_at {
        // Clamp to zero so clock skew cannot make elapsed negative.
        let elapsed = now.saturating_sub(last).max(0) as u64;
        if elapsed < policy.cooldown_secs {
            return Err(BazariError::RateLimited {
                reason: LimitReason::Cooldown,
                retry_after: Some(policy.cooldown_secs - elapsed),
            });
        }
    }

    if count_in_window >= policy.max_in_window {
        return Err(BazariError::RateLimited {
            reason: LimitReason::WindowLimit,
            retry_after: None,
        });
    }

    Ok(())
}

/// Check the policy for (user, kind) against the action log at `now`.
pub async fn check(
    repo: &Arc<dyn Repository>,
    user: UserId,
    kind: ActionKind,
    policy: LimitPolicy,
    now: i64,
) -> Result<(), BazariError> {
    let last = repo.last_action_at(user, kind).await?;
    let since = now.saturating_sub(policy.window_secs as i64);
    let count = repo.count_actions_since(user, kind, since).await?;
    decide(now, last, count, policy)
}
