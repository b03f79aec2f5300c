// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Bazari crates.
//!
//! The status enums persist as exact lowercase strings (`pending`, `paid`,
//! `sold`, ...) for compatibility with the existing database contents; do not
//! change their string forms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BazariError;

/// Platform-assigned user identifier (immutable, primary key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Repository-assigned ad identifier (monotonic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdId(pub i64);

/// Repository-assigned support request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub i64);

/// Identifier of a message already delivered by the gateway, used for edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef(pub i64);

/// Opaque charge identifier issued by the billing provider on a completed
/// payment; required to reverse the charge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChargeId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for AdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for ChargeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination for an outbound gateway message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// A user's private chat.
    User(UserId),
    /// The public channel, addressed as `@name` or a numeric chat id.
    Channel(String),
}

/// Moderation state of an ad. Transitions out of `Pending` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Pending,
    Approved,
    Rejected,
}

/// Billing state of an ad, independent of moderation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

/// Post-publication lifecycle flag; toggles freely on approved ads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SoldStatus {
    Available,
    Sold,
}

/// State of a support request; `Pending -> Responded` happens exactly once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    Pending,
    Responded,
}

/// Throttled action kinds recorded in the action log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AdCreation,
    SupportRequest,
}

/// Privileged operator roles.
///
/// `Primary` is the super admin (user directory, statistics, refund
/// operations, moderation); `Secondary` is the support admin (moderation and
/// support responses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
}

/// Snapshot of the platform identity attached to every incoming event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: bool,
}

impl UserProfile {
    /// "First Last" with missing parts dropped; falls back to the user id.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.id.to_string()
        } else {
            name
        }
    }
}

// --- Durable entities ---

/// A registered bot user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: bool,
    /// Preferred locale code (`fa`, `ru`, `en`); defaults to `fa`.
    pub language: String,
    pub created_at: String,
    pub last_seen: String,
}

/// A paid classified listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    pub id: AdId,
    pub owner: UserId,
    /// Gift or channel reference, as submitted.
    pub link: String,
    /// Decimal-as-text, validated non-negative on submission.
    pub price: String,
    pub description: String,
    pub status: AdStatus,
    pub payment_status: PaymentStatus,
    pub sold_status: SoldStatus,
    pub payment_charge_id: Option<ChargeId>,
    /// Price paid in platform currency units (stars).
    pub stars_amount: i64,
    /// Opaque media reference for the optional channel photo.
    pub channel_photo: Option<String>,
    /// Set when published; required to edit the channel post later.
    pub channel_message_id: Option<MessageRef>,
    pub refunded: bool,
    pub created_at: String,
    pub approved_at: Option<String>,
}

/// An ad joined with its owner's public fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdWithOwner {
    pub ad: Ad,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Fields needed to persist a new ad at payment completion time.
#[derive(Debug, Clone)]
pub struct NewAd {
    pub owner: UserId,
    pub link: String,
    pub price: String,
    pub description: String,
    pub payment_charge_id: ChargeId,
    pub stars_amount: i64,
    pub channel_photo: Option<String>,
}

/// A user's request to support staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub message: String,
    pub status: SupportStatus,
    pub admin_response: Option<String>,
    pub created_at: String,
    pub responded_at: Option<String>,
}

/// A support request joined with the requester's public fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRequestWithUser {
    pub request: SupportRequest,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Payment bookkeeping view of a paid ad, used by the refund service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub ad_id: AdId,
    pub owner: UserId,
    pub charge_id: ChargeId,
    pub stars_amount: i64,
    pub refunded: bool,
}

/// Per-user aggregate counters shown in the admin user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total_ads: i64,
    pub approved_ads: i64,
    pub support_requests: i64,
}

/// A user joined with their aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithStats {
    pub user: User,
    pub stats: UserStats,
}

/// Bot-wide aggregate statistics for the super admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotStats {
    pub total_users: i64,
    pub total_ads: i64,
    pub approved_ads: i64,
    pub pending_ads: i64,
    pub total_support_requests: i64,
    pub pending_support_requests: i64,
}

// --- Incoming events ---

/// Slash commands the gateway recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    SupportAdmin,
    SuperAdmin,
}

/// Where a callback originated, so the workflow can edit the source message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOrigin {
    pub chat: ChatTarget,
    pub message: MessageRef,
}

/// An event surfaced by the messaging gateway to the engine.
#[derive(Debug, Clone)]
pub enum IncomingEvent {
    Command {
        user: UserProfile,
        command: Command,
    },
    Text {
        user: UserProfile,
        text: String,
    },
    Photo {
        user: UserProfile,
        /// Opaque media reference usable with `send_photo`.
        photo: String,
        caption: Option<String>,
    },
    Callback {
        user: UserProfile,
        /// Acknowledgement id for `answer_callback`.
        ack_id: String,
        action: CallbackAction,
        origin: Option<MessageOrigin>,
    },
    PaymentSucceeded {
        user: UserProfile,
        charge_id: ChargeId,
        amount: i64,
    },
    PreCheckout {
        user: UserProfile,
        query_id: String,
    },
}

impl IncomingEvent {
    /// The identity the event is attributed to.
    pub fn user(&self) -> &UserProfile {
        match self {
            IncomingEvent::Command { user, .. }
            | IncomingEvent::Text { user, .. }
            | IncomingEvent::Photo { user, .. }
            | IncomingEvent::Callback { user, .. }
            | IncomingEvent::PaymentSucceeded { user, .. }
            | IncomingEvent::PreCheckout { user, .. } => user,
        }
    }
}

// --- Callback actions ---

/// Main-menu entries, carried as callback tags instead of localized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MenuAction {
    NewAd,
    MyAds,
    Support,
    Language,
    Back,
}

/// Locale-independent action tag carried in a button's callback payload.
///
/// Control flow dispatches on these tags only; localized button labels are
/// pure presentation. Encoded as `tag` or `tag:arg` strings that must fit the
/// platform's 64-byte callback-data budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Menu(MenuAction),
    /// Locale code chosen from the language picker.
    SetLocale(String),
    SkipPhoto,
    PreviewConfirm,
    PreviewEdit,
    PreviewCancel,
    Approve(AdId),
    Reject(AdId),
    RejectRefund(AdId),
    RejectNoRefund(AdId),
    MarkSold(AdId),
    MarkAvailable(AdId),
    RespondSupport(RequestId),
    ViewPendingAds,
    ViewSupportRequests,
    ListUsers,
    SearchUser,
    UserDirectory,
    UserInfo(UserId),
    RefundUser,
    RefundCharge,
    RefundSweep,
}

impl std::fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallbackAction::Menu(m) => write!(f, "menu:{m}"),
            CallbackAction::SetLocale(code) => write!(f, "lang:{code}"),
            CallbackAction::SkipPhoto => f.write_str("skip_photo"),
            CallbackAction::PreviewConfirm => f.write_str("preview:confirm"),
            CallbackAction::PreviewEdit => f.write_str("preview:edit"),
            CallbackAction::PreviewCancel => f.write_str("preview:cancel"),
            CallbackAction::Approve(id) => write!(f, "approve:{id}"),
            CallbackAction::Reject(id) => write!(f, "reject:{id}"),
            CallbackAction::RejectRefund(id) => write!(f, "reject_refund:{id}"),
            CallbackAction::RejectNoRefund(id) => write!(f, "reject_no_refund:{id}"),
            CallbackAction::MarkSold(id) => write!(f, "mark_sold:{id}"),
            CallbackAction::MarkAvailable(id) => write!(f, "mark_available:{id}"),
            CallbackAction::RespondSupport(id) => write!(f, "respond:{id}"),
            CallbackAction::ViewPendingAds => f.write_str("view_pending_ads"),
            CallbackAction::ViewSupportRequests => f.write_str("view_support_requests"),
            CallbackAction::ListUsers => f.write_str("list_users"),
            CallbackAction::SearchUser => f.write_str("search_user"),
            CallbackAction::UserDirectory => f.write_str("user_directory"),
            CallbackAction::UserInfo(id) => write!(f, "user_info:{id}"),
            CallbackAction::RefundUser => f.write_str("refund_user"),
            CallbackAction::RefundCharge => f.write_str("refund_charge"),
            CallbackAction::RefundSweep => f.write_str("refund_sweep"),
        }
    }
}

impl std::str::FromStr for CallbackAction {
    type Err = BazariError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, arg) = match s.split_once(':') {
            Some((tag, arg)) => (tag, Some(arg)),
            None => (s, None),
        };
        let id = |arg: Option<&str>| -> Result<i64, BazariError> {
            arg.and_then(|a| a.parse::<i64>().ok())
                .ok_or_else(|| BazariError::Internal(format!("bad callback payload: {s}")))
        };
        let action = match (tag, arg) {
            ("menu", Some(m)) => CallbackAction::Menu(
                m.parse()
                    .map_err(|_| BazariError::Internal(format!("bad menu tag: {s}")))?,
            ),
            ("lang", Some(code)) => CallbackAction::SetLocale(code.to_string()),
            ("skip_photo", None) => CallbackAction::SkipPhoto,
            ("preview", Some("confirm")) => CallbackAction::PreviewConfirm,
            ("preview", Some("edit")) => CallbackAction::PreviewEdit,
            ("preview", Some("cancel")) => CallbackAction::PreviewCancel,
            ("approve", a) => CallbackAction::Approve(AdId(id(a)?)),
            ("reject", a) => CallbackAction::Reject(AdId(id(a)?)),
            ("reject_refund", a) => CallbackAction::RejectRefund(AdId(id(a)?)),
            ("reject_no_refund", a) => CallbackAction::RejectNoRefund(AdId(id(a)?)),
            ("mark_sold", a) => CallbackAction::MarkSold(AdId(id(a)?)),
            ("mark_available", a) => CallbackAction::MarkAvailable(AdId(id(a)?)),
            ("respond", a) => CallbackAction::RespondSupport(RequestId(id(a)?)),
            ("view_pending_ads", None) => CallbackAction::ViewPendingAds,
            ("view_support_requests", None) => CallbackAction::ViewSupportRequests,
            ("list_users", None) => CallbackAction::ListUsers,
            ("search_user", None) => CallbackAction::SearchUser,
            ("user_directory", None) => CallbackAction::UserDirectory,
            ("user_info", a) => CallbackAction::UserInfo(UserId(id(a)?)),
            ("refund_user", None) => CallbackAction::RefundUser,
            ("refund_charge", None) => CallbackAction::RefundCharge,
            ("refund_sweep", None) => CallbackAction::RefundSweep,
            _ => {
                return Err(BazariError::Internal(format!(
                    "unknown callback payload: {s}"
                )));
            }
        };
        Ok(action)
    }
}

// --- Outbound presentation ---

/// A single inline button: localized label plus the action tag it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Presentation-agnostic inline keyboard, rendered by the gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Single-column keyboard, one button per row.
    pub fn column(buttons: Vec<Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    /// Single-row keyboard.
    pub fn row(buttons: Vec<Button>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }
}

/// An invoice issued through the billing provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub title: String,
    pub description: String,
    /// Opaque payload echoed back on the successful-payment event.
    pub payload: String,
    /// Platform currency code; stars payments use `XTR`.
    pub currency: String,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_strings_are_bit_exact() {
        assert_eq!(AdStatus::Pending.to_string(), "pending");
        assert_eq!(AdStatus::Approved.to_string(), "approved");
        assert_eq!(AdStatus::Rejected.to_string(), "rejected");
        assert_eq!(PaymentStatus::Unpaid.to_string(), "unpaid");
        assert_eq!(PaymentStatus::Paid.to_string(), "paid");
        assert_eq!(SoldStatus::Available.to_string(), "available");
        assert_eq!(SoldStatus::Sold.to_string(), "sold");
        assert_eq!(ActionKind::AdCreation.to_string(), "ad_creation");
        assert_eq!(ActionKind::SupportRequest.to_string(), "support_request");
    }

    #[test]
    fn status_strings_parse_back() {
        assert_eq!(AdStatus::from_str("approved").unwrap(), AdStatus::Approved);
        assert_eq!(SoldStatus::from_str("sold").unwrap(), SoldStatus::Sold);
        assert!(AdStatus::from_str("APPROVED").is_err());
    }

    #[test]
    fn callback_actions_round_trip() {
        let cases = [
            CallbackAction::Menu(MenuAction::NewAd),
            CallbackAction::Menu(MenuAction::Back),
            CallbackAction::SetLocale("ru".into()),
            CallbackAction::SkipPhoto,
            CallbackAction::PreviewConfirm,
            CallbackAction::PreviewEdit,
            CallbackAction::PreviewCancel,
            CallbackAction::Approve(AdId(42)),
            CallbackAction::Reject(AdId(7)),
            CallbackAction::RejectRefund(AdId(7)),
            CallbackAction::RejectNoRefund(AdId(7)),
            CallbackAction::MarkSold(AdId(9)),
            CallbackAction::MarkAvailable(AdId(9)),
            CallbackAction::RespondSupport(RequestId(3)),
            CallbackAction::ViewPendingAds,
            CallbackAction::ViewSupportRequests,
            CallbackAction::ListUsers,
            CallbackAction::SearchUser,
            CallbackAction::UserDirectory,
            CallbackAction::UserInfo(UserId(195742142)),
            CallbackAction::RefundUser,
            CallbackAction::RefundCharge,
            CallbackAction::RefundSweep,
        ];
        for action in cases {
            let encoded = action.to_string();
            assert!(encoded.len() <= 64, "payload too long: {encoded}");
            let decoded = CallbackAction::from_str(&encoded).unwrap();
            assert_eq!(decoded, action);
        }
    }

    #[test]
    fn callback_parse_rejects_garbage() {
        assert!(CallbackAction::from_str("").is_err());
        assert!(CallbackAction::from_str("approve").is_err());
        assert!(CallbackAction::from_str("approve:abc").is_err());
        assert!(CallbackAction::from_str("frobnicate:1").is_err());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut profile = UserProfile {
            id: UserId(5),
            username: None,
            first_name: None,
            last_name: None,
            language_code: None,
            is_bot: false,
            is_premium: false,
        };
        assert_eq!(profile.display_name(), "5");
        profile.first_name = Some("Ada".into());
        profile.last_name = Some("Lovelace".into());
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }
}
