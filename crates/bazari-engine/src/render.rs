// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and keyboard rendering.
//!
//! Channel posts keep the exact layout users of the published channel
//! already know: type emoji + link, price in TON, seller handle, optional
//! description, channel footer, and a trust warning that differs between
//! gift and channel listings. Admin-facing operational text is rendered
//! through the catalog in the admin's own locale.

use bazari_core::types::{
    Ad, AdId, AdWithOwner, BotStats, Button, CallbackAction, Keyboard, MenuAction, RequestId,
    SoldStatus, SupportRequestWithUser, User, UserProfile, UserWithStats,
};
use bazari_i18n::{Key, Locale, NO_DESCRIPTION_SENTINEL, text};

use crate::flow::Flow;

const GIFT_TRUST_LINE: &str = "⚠️ Only trade on trusted marketplaces like \
    <a href=\"https://t.me/portals/market?startapp=d15jj7\">Portals</a>, \
    <a href=\"https://t.me/tonnel_network_bot/gifts?startapp=ref_195742142\">Tonnel</a>, \
    and <a href=\"https://t.me/mrkt/app?startapp=195742142\">Mrkt</a>!";

const CHANNEL_TRUST_LINE: &str = "⚠️ Please verify the channel before joining!";

/// Substitute the first `{}` placeholder in a catalog string.
pub(crate) fn fill(template: &str, value: &str) -> String {
    template.replacen("{}", value, 1)
}

fn is_gift(link: &str) -> bool {
    link.contains("/nft/")
}

fn description_line(description: &str) -> String {
    if description == NO_DESCRIPTION_SENTINEL {
        String::new()
    } else {
        format!("\n📝 {description}")
    }
}

/// The public channel post for an approved ad.
pub fn channel_post(ad: &AdWithOwner, channel_name: &str) -> String {
    let (emoji, trust) = if is_gift(&ad.ad.link) {
        ("🎁", GIFT_TRUST_LINE)
    } else {
        ("📺", CHANNEL_TRUST_LINE)
    };
    let seller = ad.username.as_deref().unwrap_or("unknown");
    let description = description_line(&ad.ad.description);

    let mut post = format!(
        "{emoji} {link}\n💰 Price: {price} TON\n👤 Seller: @{seller}{description}\n\n\
         📢 Ad posted on {channel_name}\n\n{trust}",
        link = ad.ad.link,
        price = ad.ad.price,
    );
    if ad.ad.sold_status == SoldStatus::Sold {
        post.push_str("\n\n🔴 SOLD");
    }
    post
}

/// Draft preview shown to the seller before payment.
pub fn preview(flow: &Flow, locale: Locale) -> String {
    let link = flow.link.as_deref().unwrap_or_default();
    let price = flow.price.as_deref().unwrap_or_default();
    let emoji = if is_gift(link) { "🎁" } else { "📺" };
    let description = flow
        .description
        .as_deref()
        .map(description_line)
        .unwrap_or_default();

    format!(
        "{header}\n\n{emoji} {link}\n💰 Price: {price} TON{description}",
        header = text(Key::PreviewHeader, locale),
    )
}

/// The moderation notification sent to both operators on a paid submission.
pub fn admin_notification(ad: &AdWithOwner) -> String {
    let mut seller = [ad.first_name.as_deref(), ad.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(username) = &ad.username {
        seller = format!("{seller} (@{username})").trim().to_string();
    }
    let emoji = if is_gift(&ad.ad.link) { "🎁" } else { "📺" };

    format!(
        "🆕 Ad #{id} awaiting review:\n\n👤 {seller}\n🆔 ID: {owner}\n{emoji} {link}\n\
         💰 {price} TON\n📝 {description}\n📅 {created_at}",
        id = ad.ad.id,
        owner = ad.ad.owner,
        link = ad.ad.link,
        price = ad.ad.price,
        description = ad.ad.description,
        created_at = ad.ad.created_at,
    )
}

/// The support notification sent to the support admin on a new request.
pub fn support_notification(id: RequestId, from: &UserProfile, message: &str) -> String {
    let handle = from
        .username
        .as_deref()
        .map(|u| format!(" (@{u})"))
        .unwrap_or_default();
    format!(
        "📨 Support request #{id}:\n\n👤 {name}{handle}\n🆔 ID: {user}\n\n{message}",
        name = from.display_name(),
        user = from.id,
    )
}

/// Admin view of one pending support request in the review queue.
pub fn support_request_line(entry: &SupportRequestWithUser) -> String {
    let handle = entry
        .username
        .as_deref()
        .map(|u| format!(" (@{u})"))
        .unwrap_or_default();
    format!(
        "📨 #{id} · {user}{handle} · {created_at}\n{message}",
        id = entry.request.id,
        user = entry.request.user_id,
        created_at = entry.request.created_at,
        message = entry.request.message,
    )
}

/// One line per ad in the seller's "my ads" listing.
pub fn my_ad_line(ad: &Ad) -> String {
    let emoji = if is_gift(&ad.link) { "🎁" } else { "📺" };
    let sold = if ad.sold_status == SoldStatus::Sold {
        " · 🔴"
    } else {
        ""
    };
    format!(
        "{emoji} {link}\n💰 {price} TON · {status}{sold}",
        link = ad.link,
        price = ad.price,
        status = ad.status,
    )
}

/// Admin view of one user row in the directory.
pub fn user_line(user: &User) -> String {
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let handle = user
        .username
        .as_deref()
        .map(|u| format!(" (@{u})"))
        .unwrap_or_default();
    format!("👤 {id} · {name}{handle}", id = user.id)
}

/// Full user card with counters, for the search/info panel.
pub fn user_info(entry: &UserWithStats, locale: Locale) -> String {
    let mut out = format!("{}\n\n{}\n", text(Key::UserInfoHeader, locale), user_line(&entry.user));
    out.push_str(&format!(
        "🌐 {lang}\n📅 {created}\n\n{total_label}: {total}\n✅ {approved}\n{support_label}: {support}",
        lang = entry.user.language,
        created = entry.user.created_at,
        total_label = text(Key::TotalAds, locale),
        total = entry.stats.total_ads,
        approved = entry.stats.approved_ads,
        support_label = text(Key::TotalSupportRequests, locale),
        support = entry.stats.support_requests,
    ));
    out
}

/// The super admin statistics panel body.
pub fn stats_panel(stats: &BotStats, locale: Locale) -> String {
    format!(
        "{title}\n\n{users_label}: {users}\n{ads_label}: {ads} (✅ {approved})\n\
         {pending_ads_label}: {pending_ads}\n{support_label}: {support} \
         ({pending_support_label}: {pending_support})",
        title = text(Key::StatisticsLabel, locale),
        users_label = text(Key::TotalUsers, locale),
        users = stats.total_users,
        ads_label = text(Key::TotalAds, locale),
        ads = stats.total_ads,
        approved = stats.approved_ads,
        pending_ads_label = text(Key::PendingAdsCount, locale),
        pending_ads = stats.pending_ads,
        support_label = text(Key::TotalSupportRequests, locale),
        support = stats.total_support_requests,
        pending_support_label = text(Key::PendingSupportCount, locale),
        pending_support = stats.pending_support_requests,
    )
}

// --- Keyboards ---

/// The main menu shown after /start and at the end of flows.
pub fn main_menu(locale: Locale) -> Keyboard {
    Keyboard::column(vec![
        Button::new(
            text(Key::NewAdButton, locale),
            CallbackAction::Menu(MenuAction::NewAd),
        ),
        Button::new(
            text(Key::MyAdsButton, locale),
            CallbackAction::Menu(MenuAction::MyAds),
        ),
        Button::new(
            text(Key::SupportButton, locale),
            CallbackAction::Menu(MenuAction::Support),
        ),
        Button::new(
            text(Key::ChangeLanguageButton, locale),
            CallbackAction::Menu(MenuAction::Language),
        ),
    ])
}

/// The three-locale language picker.
pub fn language_keyboard(locale: Locale) -> Keyboard {
    Keyboard::new(vec![
        vec![
            Button::new(
                text(Key::LanguagePersian, locale),
                CallbackAction::SetLocale("fa".to_string()),
            ),
            Button::new(
                text(Key::LanguageRussian, locale),
                CallbackAction::SetLocale("ru".to_string()),
            ),
        ],
        vec![Button::new(
            text(Key::LanguageEnglish, locale),
            CallbackAction::SetLocale("en".to_string()),
        )],
    ])
}

/// Skip button under the photo prompt, with a way out of the flow.
pub fn photo_keyboard(locale: Locale) -> Keyboard {
    Keyboard::new(vec![
        vec![Button::new(
            text(Key::SkipPhotoButton, locale),
            CallbackAction::SkipPhoto,
        )],
        vec![Button::new(
            text(Key::BackToMenuButton, locale),
            CallbackAction::Menu(MenuAction::Back),
        )],
    ])
}

/// Escape hatch shown under every flow prompt.
pub fn back_keyboard(locale: Locale) -> Keyboard {
    Keyboard::row(vec![Button::new(
        text(Key::BackToMenuButton, locale),
        CallbackAction::Menu(MenuAction::Back),
    )])
}

/// Confirm / edit / cancel under the draft preview.
pub fn preview_keyboard(locale: Locale) -> Keyboard {
    Keyboard::new(vec![
        vec![Button::new(
            text(Key::ConfirmButton, locale),
            CallbackAction::PreviewConfirm,
        )],
        vec![
            Button::new(text(Key::EditButton, locale), CallbackAction::PreviewEdit),
            Button::new(
                text(Key::CancelButton, locale),
                CallbackAction::PreviewCancel,
            ),
        ],
    ])
}

/// Approve / reject under a moderation notification.
pub fn moderation_keyboard(ad: AdId, locale: Locale) -> Keyboard {
    Keyboard::row(vec![
        Button::new(text(Key::ApproveButton, locale), CallbackAction::Approve(ad)),
        Button::new(text(Key::RejectButton, locale), CallbackAction::Reject(ad)),
    ])
}

/// Refund choice presented after an admin picks "reject".
pub fn reject_options_keyboard(ad: AdId, locale: Locale) -> Keyboard {
    Keyboard::column(vec![
        Button::new(
            text(Key::RejectWithRefundButton, locale),
            CallbackAction::RejectRefund(ad),
        ),
        Button::new(
            text(Key::RejectWithoutRefundButton, locale),
            CallbackAction::RejectNoRefund(ad),
        ),
    ])
}

/// Sold toggle under a "my ads" entry; only approved ads get one.
pub fn sold_toggle_keyboard(ad: &Ad, locale: Locale) -> Keyboard {
    let button = match ad.sold_status {
        SoldStatus::Available => Button::new(
            text(Key::MarkSoldButton, locale),
            CallbackAction::MarkSold(ad.id),
        ),
        SoldStatus::Sold => Button::new(
            text(Key::MarkAvailableButton, locale),
            CallbackAction::MarkAvailable(ad.id),
        ),
    };
    Keyboard::row(vec![button])
}

/// The support admin panel keyboard.
pub fn support_admin_keyboard(locale: Locale) -> Keyboard {
    Keyboard::column(vec![
        Button::new(
            text(Key::ViewPendingAds, locale),
            CallbackAction::ViewPendingAds,
        ),
        Button::new(
            text(Key::ViewSupportRequests, locale),
            CallbackAction::ViewSupportRequests,
        ),
    ])
}

/// The super admin panel keyboard.
pub fn super_admin_keyboard(locale: Locale) -> Keyboard {
    Keyboard::column(vec![
        Button::new(
            text(Key::ViewPendingAds, locale),
            CallbackAction::ViewPendingAds,
        ),
        Button::new(
            text(Key::ViewSupportRequests, locale),
            CallbackAction::ViewSupportRequests,
        ),
        Button::new(text(Key::ListUsersButton, locale), CallbackAction::ListUsers),
        Button::new(
            text(Key::SearchUserButton, locale),
            CallbackAction::SearchUser,
        ),
        Button::new(
            text(Key::RefundUserButton, locale),
            CallbackAction::RefundUser,
        ),
        Button::new(
            text(Key::RefundChargeButton, locale),
            CallbackAction::RefundCharge,
        ),
        Button::new(
            text(Key::RefundSweepButton, locale),
            CallbackAction::RefundSweep,
        ),
    ])
}
