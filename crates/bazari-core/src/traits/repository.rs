// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository trait: the persistence facade over users, ads, support
//! requests, and the rate-limiting action log.

use async_trait::async_trait;

use crate::error::BazariError;
use crate::types::{
    ActionKind, Ad, AdId, AdStatus, AdWithOwner, BotStats, ChargeId, MessageRef, NewAd,
    PaymentRecord, PaymentStatus, RequestId, SoldStatus, SupportRequestWithUser, User, UserId,
    UserProfile, UserWithStats,
};

/// The single source of truth for all durable state.
///
/// Status and refund-flag transitions are compare-and-set: the update is one
/// atomic statement guarded by the current value, and the `bool` return says
/// whether a row actually changed. Callers treat a `false` as "already
/// decided" and never repeat side effects.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---

    /// Inserts or refreshes the user from their platform profile, updating
    /// `last_seen`. The stored locale preference is only set on first insert.
    async fn upsert_user(&self, profile: &UserProfile, locale: &str) -> Result<(), BazariError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, BazariError>;

    async fn set_user_locale(&self, id: UserId, locale: &str) -> Result<(), BazariError>;

    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, BazariError>;

    /// A user joined with their ad/support counters.
    async fn user_with_stats(&self, id: UserId) -> Result<Option<UserWithStats>, BazariError>;

    // --- Ads ---

    /// Persists a new ad (status `pending`, payment `unpaid`) and returns its id.
    async fn create_ad(&self, ad: &NewAd) -> Result<AdId, BazariError>;

    /// An ad joined with its owner's public fields.
    async fn get_ad(&self, id: AdId) -> Result<Option<AdWithOwner>, BazariError>;

    /// All ads owned by a user, newest first.
    async fn list_ads_by_owner(&self, owner: UserId) -> Result<Vec<Ad>, BazariError>;

    /// Ads visible to moderators: `status = pending AND payment_status = paid`,
    /// oldest first.
    async fn list_pending_paid_ads(&self) -> Result<Vec<AdWithOwner>, BazariError>;

    /// Compare-and-set moderation transition `from -> to`, stamping
    /// `approved_at`. Returns whether a row changed.
    async fn update_ad_status(
        &self,
        id: AdId,
        from: AdStatus,
        to: AdStatus,
    ) -> Result<bool, BazariError>;

    async fn update_payment_status(
        &self,
        id: AdId,
        status: PaymentStatus,
    ) -> Result<(), BazariError>;

    async fn set_sold_status(&self, id: AdId, status: SoldStatus) -> Result<(), BazariError>;

    /// Records the published channel message id for later edits.
    async fn set_channel_message(&self, id: AdId, message: MessageRef)
    -> Result<(), BazariError>;

    // --- Payments ---

    /// Every paid ad whose charge has not been refunded yet, oldest first.
    async fn list_unrefunded_payments(&self) -> Result<Vec<PaymentRecord>, BazariError>;

    /// The user's most recent paid charge, if any.
    async fn latest_paid_charge_for_user(
        &self,
        user: UserId,
    ) -> Result<Option<PaymentRecord>, BazariError>;

    async fn payment_by_charge(
        &self,
        charge: &ChargeId,
    ) -> Result<Option<PaymentRecord>, BazariError>;

    /// Compare-and-set `refunded = 0 -> 1` for a charge. Returns whether a
    /// row changed, i.e. whether this call won the flag.
    async fn mark_payment_refunded(&self, charge: &ChargeId) -> Result<bool, BazariError>;

    // --- Support requests ---

    async fn create_support_request(
        &self,
        user: UserId,
        message: &str,
    ) -> Result<RequestId, BazariError>;

    async fn get_support_request(
        &self,
        id: RequestId,
    ) -> Result<Option<SupportRequestWithUser>, BazariError>;

    /// Pending requests joined with requester fields, oldest first.
    async fn list_pending_support_requests(
        &self,
    ) -> Result<Vec<SupportRequestWithUser>, BazariError>;

    /// Marks the request responded and stores the admin's reply.
    async fn respond_to_support_request(
        &self,
        id: RequestId,
        response: &str,
    ) -> Result<(), BazariError>;

    // --- Action log (rate limiting) ---

    /// Appends one action-log entry at `at` (unix seconds).
    async fn record_action(
        &self,
        user: UserId,
        kind: ActionKind,
        at: i64,
    ) -> Result<(), BazariError>;

    /// Number of entries for (user, kind) at or after `since` (unix seconds).
    async fn count_actions_since(
        &self,
        user: UserId,
        kind: ActionKind,
        since: i64,
    ) -> Result<u32, BazariError>;

    /// Timestamp of the user's most recent action of this kind, if any.
    async fn last_action_at(
        &self,
        user: UserId,
        kind: ActionKind,
    ) -> Result<Option<i64>, BazariError>;

    // --- Statistics ---

    async fn bot_stats(&self) -> Result<BotStats, BazariError>;
}
