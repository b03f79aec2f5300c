// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end workflow tests for the Bazari engine.
//!
//! Each test builds an isolated harness with a temp SQLite database and
//! mock gateway/billing adapters, then drives complete conversations
//! through `handle_event` exactly as the gateway would.

use std::sync::Arc;

use bazari_core::types::{
    AdId, AdStatus, CallbackAction, ChargeId, ChatTarget, Command, IncomingEvent, MenuAction,
    PaymentStatus, SoldStatus, UserId, UserProfile,
};
use bazari_engine::{ConfigRoles, Engine};
use bazari_i18n::{Key, Locale, NO_DESCRIPTION_SENTINEL, text};
use bazari_storage::{Database, SqliteRepository};
use bazari_test_utils::{MockBilling, MockGateway, anonymous_profile, profile, test_config};

struct Harness {
    engine: Engine,
    gateway: Arc<MockGateway>,
    billing: Arc<MockBilling>,
    repo: Arc<SqliteRepository>,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("bazari.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let repo = Arc::new(SqliteRepository::new(db));
        let gateway = Arc::new(MockGateway::new());
        let billing = Arc::new(MockBilling::new());
        let config = test_config();
        let roles = Arc::new(ConfigRoles::new(&config.admins));
        let engine = Engine::new(&config, repo.clone(), gateway.clone(), billing.clone(), roles);
        Self {
            engine,
            gateway,
            billing,
            repo,
            _dir: dir,
        }
    }

    async fn handle(&self, event: IncomingEvent) {
        self.engine.handle_event(event).await.unwrap();
    }

    async fn text(&self, user: &UserProfile, input: &str) {
        self.handle(IncomingEvent::Text {
            user: user.clone(),
            text: input.to_string(),
        })
        .await;
    }

    async fn callback(&self, user: &UserProfile, action: CallbackAction) {
        self.handle(IncomingEvent::Callback {
            user: user.clone(),
            ack_id: format!("ack-{action}"),
            action,
            origin: None,
        })
        .await;
    }

    async fn pay(&self, user: &UserProfile, charge: &str) {
        self.handle(IncomingEvent::PaymentSucceeded {
            user: user.clone(),
            charge_id: ChargeId(charge.to_string()),
            amount: 2,
        })
        .await;
    }

    /// Drive a complete paid gift-ad submission and return the ad id.
    async fn submit_paid_gift_ad(&self, seller: &UserProfile, charge: &str) -> AdId {
        self.handle(IncomingEvent::Command {
            user: seller.clone(),
            command: Command::Start,
        })
        .await;
        self.callback(seller, CallbackAction::Menu(MenuAction::NewAd))
            .await;
        self.text(seller, "https://t.me/nft/SwissWatch-1234").await;
        self.text(seller, "mint condition").await;
        self.text(seller, "12.5").await;
        self.callback(seller, CallbackAction::SkipPhoto).await;
        self.callback(seller, CallbackAction::PreviewConfirm).await;
        self.pay(seller, charge).await;

        use bazari_core::traits::Repository;
        let ads = self.repo.list_ads_by_owner(seller.id).await.unwrap();
        ads.first().map(|ad| ad.id).unwrap()
    }

    fn channel(&self) -> ChatTarget {
        ChatTarget::Channel("@test_channel".to_string())
    }
}

fn admin() -> UserProfile {
    profile(1000, "boss")
}

fn support_admin() -> UserProfile {
    profile(2000, "helper")
}

#[tokio::test]
async fn first_start_offers_language_picker_then_menu() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");

    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, text(Key::SelectLanguage, Locale::En));
    assert!(sent[0].keyboard.is_some());

    h.callback(&seller, CallbackAction::SetLocale("ru".to_string()))
        .await;
    h.gateway.clear_sent().await;

    // Second /start goes straight to the menu, in the stored locale.
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, text(Key::WelcomeMessage, Locale::Ru));
}

#[tokio::test]
async fn gift_ad_flow_persists_paid_pending_ad_and_notifies_admins() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Pending);
    assert_eq!(ad.ad.payment_status, PaymentStatus::Paid);
    assert_eq!(ad.ad.link, "https://t.me/nft/SwissWatch-1234");
    assert_eq!(ad.ad.price, "12.5");
    assert_eq!(ad.ad.description, "mint condition");
    assert_eq!(ad.ad.payment_charge_id, Some(ChargeId("ch_1".to_string())));

    // One invoice was issued for the listing fee.
    let invoices = h.billing.issued_invoices().await;
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].1.currency, "XTR");
    assert_eq!(invoices[0].1.amount, 2);

    // Both operators got the review notification with decision buttons.
    for operator in [support_admin().id, admin().id] {
        let sent = h.gateway.sent_to(&ChatTarget::User(operator)).await;
        assert_eq!(sent.len(), 1, "operator {operator} not notified");
        assert!(sent[0].body.contains(&format!("#{ad_id}")));
        assert!(sent[0].keyboard.is_some());
    }
}

#[tokio::test]
async fn ad_without_username_is_refused() {
    let h = Harness::new().await;
    let seller = anonymous_profile(7);

    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;
    let acks = h.gateway.acks().await;
    let alert = acks.iter().find(|a| a.alert).expect("no alert ack");
    assert_eq!(
        alert.text.as_deref(),
        Some(text(Key::UsernameRequired, Locale::Fa))
    );
}

#[tokio::test]
async fn invalid_link_and_price_reprompt_without_advancing() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    h.callback(&seller, CallbackAction::SetLocale("en".to_string()))
        .await;
    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;

    h.text(&seller, "https://example.com/not-telegram").await;
    h.text(&seller, "https://t.me/some_bot").await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    let invalid = text(Key::InvalidLink, Locale::En);
    assert_eq!(sent.iter().filter(|m| m.body == invalid).count(), 2);

    // A valid link still advances afterwards.
    h.text(&seller, "@fine_channel").await;
    h.text(&seller, "desc").await;
    h.text(&seller, "not-a-number").await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert!(
        sent.iter()
            .any(|m| m.body == text(Key::InvalidPrice, Locale::En))
    );
}

#[tokio::test]
async fn second_ad_within_cooldown_is_rate_limited() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;

    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;
    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;

    let acks = h.gateway.acks().await;
    let alert = acks.iter().find(|a| a.alert).expect("no rate-limit alert");
    let body = alert.text.as_deref().unwrap();
    assert!(body.contains(text(Key::AdCooldownActive, Locale::En).split("{}").next().unwrap()));
}

#[tokio::test]
async fn approval_publishes_channel_post_and_notifies_seller() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.gateway.clear_sent().await;

    h.callback(&admin(), CallbackAction::Approve(ad_id)).await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Approved);
    assert!(ad.ad.channel_message_id.is_some());

    let posts = h.gateway.sent_to(&h.channel()).await;
    assert_eq!(posts.len(), 1);
    assert!(posts[0].body.contains("🎁 https://t.me/nft/SwissWatch-1234"));
    assert!(posts[0].body.contains("💰 Price: 12.5 TON"));
    assert!(posts[0].body.contains("👤 Seller: @seller"));
    assert!(posts[0].body.contains("Test Market"));

    let seller_msgs = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert_eq!(seller_msgs.len(), 1);
}

#[tokio::test]
async fn duplicate_approval_is_a_no_op() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.gateway.clear_sent().await;

    h.callback(&admin(), CallbackAction::Approve(ad_id)).await;
    h.callback(&support_admin(), CallbackAction::Approve(ad_id))
        .await;

    // Exactly one channel post; the loser only got an alert toast.
    assert_eq!(h.gateway.sent_to(&h.channel()).await.len(), 1);
    let acks = h.gateway.acks().await;
    assert!(
        acks.iter()
            .any(|a| a.alert && a.text.as_deref() == Some(text(Key::AlreadyDecided, Locale::En)))
    );
}

#[tokio::test]
async fn moderation_requires_an_operator_role() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;

    h.callback(&profile(3, "rando"), CallbackAction::Approve(ad_id))
        .await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Pending);
    assert!(h.gateway.sent_to(&h.channel()).await.is_empty());
}

#[tokio::test]
async fn reject_with_refund_reverses_the_charge_once() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.gateway.clear_sent().await;

    let moderator = support_admin();
    h.callback(&moderator, CallbackAction::Reject(ad_id)).await;
    h.callback(&moderator, CallbackAction::RejectRefund(ad_id))
        .await;
    h.text(&moderator, "counterfeit listing").await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Rejected);
    assert!(ad.ad.refunded);
    assert_eq!(h.billing.reversal_attempts().await.len(), 1);

    // Seller sees the rejection, the reason, and the refund confirmation.
    let seller_msgs = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    let body = &seller_msgs.last().unwrap().body;
    assert!(body.contains("counterfeit listing"));
    assert!(body.contains(text(Key::RefundSuccessLine, Locale::En)));

    // The secondary admin's decision is mirrored to the super admin.
    let audit = h.gateway.sent_to(&ChatTarget::User(admin().id)).await;
    assert!(audit.iter().any(|m| m.body.contains("rejected")));

    // A later sweep finds nothing left to refund.
    h.callback(&admin(), CallbackAction::RefundSweep).await;
    assert_eq!(h.billing.reversal_attempts().await.len(), 1);
}

#[tokio::test]
async fn failed_reversal_still_rejects_but_keeps_charge_refundable() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.billing.script_reversal(false).await;

    let moderator = admin();
    h.callback(&moderator, CallbackAction::Reject(ad_id)).await;
    h.callback(&moderator, CallbackAction::RejectRefund(ad_id))
        .await;
    h.text(&moderator, "spam").await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Rejected);
    assert!(!ad.ad.refunded);

    let seller_msgs = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert!(
        seller_msgs
            .last()
            .unwrap()
            .body
            .contains(text(Key::RefundFailureLine, Locale::En))
    );

    // The sweep can pick the charge up later.
    h.gateway.clear_sent().await;
    h.callback(&admin(), CallbackAction::RefundSweep).await;
    assert_eq!(h.billing.reversal_attempts().await.len(), 2);
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert!(ad.ad.refunded);

    // The summary comes from the catalog in the admin's locale.
    let expected = text(Key::RefundSweepSummary, Locale::En)
        .replacen("{}", "1", 1)
        .replacen("{}", "1", 1)
        .replacen("{}", "0", 1);
    let to_admin = h.gateway.sent_to(&ChatTarget::User(admin().id)).await;
    assert!(to_admin.iter().any(|m| m.body == expected));
}

#[tokio::test]
async fn failed_channel_publish_keeps_the_approval() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.gateway.fail_channel_sends(true);

    h.callback(&admin(), CallbackAction::Approve(ad_id)).await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Approved);
    assert!(ad.ad.channel_message_id.is_none());
}

#[tokio::test]
async fn sold_toggle_rewrites_the_channel_post() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.callback(&admin(), CallbackAction::Approve(ad_id)).await;

    h.callback(&seller, CallbackAction::MarkSold(ad_id)).await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.sold_status, SoldStatus::Sold);
    let edits = h.gateway.edits().await;
    assert_eq!(edits.len(), 1);
    assert!(edits[0].body.ends_with("\n\n🔴 SOLD"));

    // Only the owner can toggle.
    h.callback(&profile(3, "rando"), CallbackAction::MarkAvailable(ad_id))
        .await;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.sold_status, SoldStatus::Sold);
}

#[tokio::test]
async fn support_request_reaches_support_admin_and_reply_reaches_user() {
    let h = Harness::new().await;
    let user = profile(1, "asker");
    h.handle(IncomingEvent::Command {
        user: user.clone(),
        command: Command::Start,
    })
    .await;

    h.callback(&user, CallbackAction::Menu(MenuAction::Support))
        .await;
    h.text(&user, "my ad vanished?").await;

    use bazari_core::traits::Repository;
    let pending = h.repo.list_pending_support_requests().await.unwrap();
    assert_eq!(pending.len(), 1);
    let request_id = pending[0].request.id;

    // The secondary admin (not the primary) received it.
    let to_support = h.gateway.sent_to(&ChatTarget::User(support_admin().id)).await;
    assert!(to_support.iter().any(|m| m.body.contains("my ad vanished?")));
    assert!(h.gateway.sent_to(&ChatTarget::User(admin().id)).await.is_empty());

    let responder = support_admin();
    h.callback(&responder, CallbackAction::RespondSupport(request_id))
        .await;
    h.text(&responder, "it is pending review").await;

    let pending = h.repo.list_pending_support_requests().await.unwrap();
    assert!(pending.is_empty());
    let to_user = h.gateway.sent_to(&ChatTarget::User(user.id)).await;
    assert!(to_user.iter().any(|m| m.body.contains("it is pending review")));
}

#[tokio::test]
async fn pre_checkout_is_denied_without_a_pending_invoice() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");

    h.handle(IncomingEvent::PreCheckout {
        user: seller.clone(),
        query_id: "q1".to_string(),
    })
    .await;
    assert_eq!(
        h.gateway.pre_checkout_answers().await,
        vec![("q1".to_string(), false)]
    );
}

#[tokio::test]
async fn blank_rejection_reason_becomes_the_sentinel() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    let ad_id = h.submit_paid_gift_ad(&seller, "ch_1").await;
    h.gateway.clear_sent().await;

    let moderator = admin();
    h.callback(&moderator, CallbackAction::Reject(ad_id)).await;
    h.callback(&moderator, CallbackAction::RejectNoRefund(ad_id))
        .await;
    h.text(&moderator, "بدون توضیح").await;

    use bazari_core::traits::Repository;
    let ad = h.repo.get_ad(ad_id).await.unwrap().unwrap();
    assert_eq!(ad.ad.status, AdStatus::Rejected);

    let seller_msgs = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    let body = &seller_msgs.last().unwrap().body;
    assert!(body.contains(NO_DESCRIPTION_SENTINEL));
    assert!(!body.contains("بدون توضیح"));
}

#[tokio::test]
async fn every_ad_kind_gets_the_photo_step() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;
    h.text(&seller, "https://t.me/nft/SwissWatch-1234").await;
    h.text(&seller, "mint condition").await;
    h.text(&seller, "12.5").await;

    // A gift ad still lands on the photo prompt, with a skip button.
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    let last = sent.last().unwrap();
    assert_eq!(last.body, text(Key::PhotoRequest, Locale::En));
    let keyboard = last.keyboard.as_ref().unwrap();
    assert!(
        keyboard
            .rows
            .iter()
            .flatten()
            .any(|b| b.action == CallbackAction::SkipPhoto)
    );

    // Skipping moves on to the preview.
    h.callback(&seller, CallbackAction::SkipPhoto).await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert!(
        sent.last()
            .unwrap()
            .body
            .contains(text(Key::PreviewHeader, Locale::En))
    );
}

#[tokio::test]
async fn back_button_abandons_the_flow() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    h.callback(&seller, CallbackAction::Menu(MenuAction::NewAd))
        .await;

    // The link prompt carries a way back to the menu.
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    let keyboard = sent.last().unwrap().keyboard.as_ref().unwrap();
    assert!(
        keyboard
            .rows
            .iter()
            .flatten()
            .any(|b| b.action == CallbackAction::Menu(MenuAction::Back))
    );

    h.callback(&seller, CallbackAction::Menu(MenuAction::Back))
        .await;
    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert_eq!(sent.last().unwrap().body, text(Key::WelcomeMessage, Locale::En));

    // The draft is gone: a link no longer advances any flow.
    h.text(&seller, "https://t.me/nft/SwissWatch-1234").await;
    use bazari_core::traits::Repository;
    assert!(h.repo.list_ads_by_owner(seller.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn payment_without_a_draft_reports_a_payment_error() {
    let h = Harness::new().await;
    let seller = profile(1, "seller");
    h.handle(IncomingEvent::Command {
        user: seller.clone(),
        command: Command::Start,
    })
    .await;
    h.gateway.clear_sent().await;

    h.pay(&seller, "ch_orphan").await;

    let sent = h.gateway.sent_to(&ChatTarget::User(seller.id)).await;
    assert_eq!(sent.last().unwrap().body, text(Key::PaymentError, Locale::En));
    use bazari_core::traits::Repository;
    assert!(h.repo.list_ads_by_owner(seller.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn super_admin_panel_is_primary_only() {
    let h = Harness::new().await;
    h.handle(IncomingEvent::Command {
        user: support_admin(),
        command: Command::SuperAdmin,
    })
    .await;
    let sent = h.gateway.sent_to(&ChatTarget::User(support_admin().id)).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, text(Key::NoPermission, Locale::En));

    h.handle(IncomingEvent::Command {
        user: admin(),
        command: Command::SuperAdmin,
    })
    .await;
    let sent = h.gateway.sent_to(&ChatTarget::User(admin().id)).await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].keyboard.is_some());
}
