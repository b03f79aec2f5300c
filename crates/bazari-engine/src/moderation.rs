// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moderation and admin panels: approval, rejection, sold toggles, the
//! review queues, and the user directory.
//!
//! Every decision races against the other operator. The repository's
//! compare-and-set transition is the arbiter: the loser sees "already
//! decided" and causes no side effects. Side effects (channel publish,
//! seller notification, refund) run only on the winning path, after the
//! transition has committed.

use bazari_core::error::BazariError;
use bazari_core::types::{
    AdId, AdStatus, AdWithOwner, MessageRef, Role, SoldStatus, UserId, UserProfile,
};
use bazari_i18n::{Key, NO_DESCRIPTION_SENTINEL, is_no_description, text};
use tracing::{info, warn};

use crate::flow::{Flow, FlowState};
use crate::render::{self, fill};
use crate::Engine;

impl Engine {
    /// Authorize any operator role, returning it for audit decisions.
    pub(crate) fn require_operator(&self, user: UserId) -> Result<Role, BazariError> {
        self.roles.role_of(user).ok_or(BazariError::Permission)
    }

    /// Authorize the super admin only.
    pub(crate) fn require_primary(&self, user: UserId) -> Result<(), BazariError> {
        match self.roles.role_of(user) {
            Some(Role::Primary) => Ok(()),
            _ => Err(BazariError::Permission),
        }
    }

    /// Mirror a privileged action to the super admin when the secondary
    /// admin performed it. Best-effort.
    pub(crate) async fn audit(&self, actor_role: Role, line: &str) {
        if actor_role != Role::Secondary {
            return;
        }
        if let Some(primary) = self.roles.user_for(Role::Primary) {
            self.notify(primary, &format!("📋 {line}"), None).await;
        }
    }

    /// Approve button: publish the ad to the channel and notify the seller.
    pub(crate) async fn handle_approve(
        &self,
        profile: &UserProfile,
        ad_id: AdId,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        let role = self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;

        let Some(ad) = self.repo.get_ad(ad_id).await? else {
            self.ack(ack_id, Some(text(Key::AdNotFound, locale)), true)
                .await;
            return Ok(());
        };

        let won = self
            .repo
            .update_ad_status(ad_id, AdStatus::Pending, AdStatus::Approved)
            .await?;
        if !won {
            self.ack(ack_id, Some(text(Key::AlreadyDecided, locale)), true)
                .await;
            return Ok(());
        }
        info!(ad = %ad_id, admin = %profile.id, "ad approved");

        match self.publish_ad(&ad).await {
            Ok(message) => {
                self.repo.set_channel_message(ad_id, message).await?;
            }
            Err(e) => {
                // The decision stands; publication can be retried by hand.
                warn!(ad = %ad_id, error = %e, "channel publish failed");
                self.notify(profile.id, text(Key::ErrorChannelSend, locale), None)
                    .await;
            }
        }

        let owner_locale = self.locale_of_id(ad.ad.owner).await;
        self.notify(ad.ad.owner, text(Key::AdApproved, owner_locale), None)
            .await;
        self.ack(ack_id, Some(text(Key::AdApprovedAdmin, locale)), false)
            .await;
        self.audit(role, &format!("Ad #{ad_id} approved")).await;
        Ok(())
    }

    /// Publish an approved ad to the public channel.
    async fn publish_ad(&self, ad: &AdWithOwner) -> Result<MessageRef, BazariError> {
        let body = render::channel_post(ad, &self.channel.name);
        let target = self.channel_target();
        match &ad.ad.channel_photo {
            Some(photo) => self.gateway.send_photo(&target, photo, &body, None).await,
            None => self.gateway.send_text(&target, &body, None).await,
        }
    }

    /// Reject button: offer the refund choice before collecting a reason.
    pub(crate) async fn handle_reject(
        &self,
        profile: &UserProfile,
        ad_id: AdId,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;

        let Some(ad) = self.repo.get_ad(ad_id).await? else {
            self.ack(ack_id, Some(text(Key::AdNotFound, locale)), true)
                .await;
            return Ok(());
        };
        if ad.ad.status != AdStatus::Pending {
            self.ack(ack_id, Some(text(Key::AlreadyDecided, locale)), true)
                .await;
            return Ok(());
        }

        self.ack(ack_id, None, false).await;
        self.notify(
            profile.id,
            &format!("❌ Ad #{ad_id}"),
            Some(&render::reject_options_keyboard(ad_id, locale)),
        )
        .await;
        Ok(())
    }

    /// Refund-choice button: start collecting the rejection reason.
    pub(crate) async fn begin_rejection(
        &self,
        profile: &UserProfile,
        ad_id: AdId,
        with_refund: bool,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;

        let Some(ad) = self.repo.get_ad(ad_id).await? else {
            self.ack(ack_id, Some(text(Key::AdNotFound, locale)), true)
                .await;
            return Ok(());
        };
        if ad.ad.status != AdStatus::Pending {
            self.ack(ack_id, Some(text(Key::AlreadyDecided, locale)), true)
                .await;
            return Ok(());
        }

        self.ack(ack_id, None, false).await;
        self.flows.set(
            profile.id,
            Flow::new(
                FlowState::AwaitingRejectionReason {
                    ad: ad_id,
                    with_refund,
                },
                locale,
            ),
        );
        self.notify(profile.id, text(Key::RejectionReasonPrompt, locale), None)
            .await;
        Ok(())
    }

    /// Reason text received while `AwaitingRejectionReason`.
    pub(crate) async fn submit_rejection_reason(
        &self,
        profile: &UserProfile,
        ad_id: AdId,
        with_refund: bool,
        reason: &str,
    ) -> Result<(), BazariError> {
        let role = self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.flows.remove(profile.id);

        let Some(ad) = self.repo.get_ad(ad_id).await? else {
            self.notify(profile.id, text(Key::AdNotFound, locale), None)
                .await;
            return Ok(());
        };

        let won = self
            .repo
            .update_ad_status(ad_id, AdStatus::Pending, AdStatus::Rejected)
            .await?;
        if !won {
            self.notify(profile.id, text(Key::AlreadyDecided, locale), None)
                .await;
            return Ok(());
        }
        info!(ad = %ad_id, admin = %profile.id, with_refund, "ad rejected");

        // Blank or "no reason" phrases collapse to the canonical sentinel.
        let reason = if is_no_description(reason) {
            NO_DESCRIPTION_SENTINEL
        } else {
            reason.trim()
        };
        let owner_locale = self.locale_of_id(ad.ad.owner).await;
        let mut body = format!(
            "{}\n\n{} {}",
            text(Key::AdRejected, owner_locale),
            text(Key::RejectionReasonLabel, owner_locale),
            reason,
        );
        if with_refund {
            let refunded = self.refund_ad(&ad.ad).await.is_refunded();
            let line = if refunded {
                text(Key::RefundSuccessLine, owner_locale)
            } else {
                text(Key::RefundFailureLine, owner_locale)
            };
            body.push_str("\n\n");
            body.push_str(line);
        }
        self.notify(ad.ad.owner, &body, None).await;

        self.notify(
            profile.id,
            text(Key::AdRejectedAdmin, locale),
            Some(&render::main_menu(locale)),
        )
        .await;
        self.audit(role, &format!("Ad #{ad_id} rejected (refund: {with_refund})"))
            .await;
        Ok(())
    }

    /// Owner toggling an approved ad's sold flag.
    pub(crate) async fn set_ad_sold_status(
        &self,
        profile: &UserProfile,
        ad_id: AdId,
        status: SoldStatus,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;

        let Some(ad) = self.repo.get_ad(ad_id).await? else {
            self.ack(ack_id, Some(text(Key::AdNotFound, locale)), true)
                .await;
            return Ok(());
        };
        if ad.ad.owner != profile.id {
            return Err(BazariError::Permission);
        }
        if ad.ad.status != AdStatus::Approved {
            return Err(BazariError::State);
        }

        self.repo.set_sold_status(ad_id, status).await?;
        self.refresh_channel_post(ad_id).await;

        let key = match status {
            SoldStatus::Sold => Key::AdMarkedSold,
            SoldStatus::Available => Key::AdMarkedAvailable,
        };
        self.ack(ack_id, Some(text(key, locale)), false).await;
        Ok(())
    }

    /// Re-render the published channel post after a sold-status change.
    /// Best-effort; a failed edit leaves the post stale, not the database.
    async fn refresh_channel_post(&self, ad_id: AdId) {
        let ad = match self.repo.get_ad(ad_id).await {
            Ok(Some(ad)) => ad,
            _ => return,
        };
        let Some(message) = ad.ad.channel_message_id else {
            return;
        };
        let body = render::channel_post(&ad, &self.channel.name);
        let target = self.channel_target();
        let result = if ad.ad.channel_photo.is_some() {
            self.gateway.edit_caption(&target, message, &body).await
        } else {
            self.gateway.edit_text(&target, message, &body).await
        };
        if let Err(e) = result {
            warn!(ad = %ad_id, error = %e, "channel post refresh failed");
        }
    }

    /// `/supportadmin`: pending counts plus the review-queue buttons.
    pub(crate) async fn show_support_admin_panel(
        &self,
        profile: &UserProfile,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;

        let pending_ads = self.repo.list_pending_paid_ads().await?.len();
        let pending_support = self.repo.list_pending_support_requests().await?.len();
        let body = format!(
            "{}\n\n{}\n{}",
            text(Key::SupportAdminPanel, locale),
            fill(text(Key::PendingAdsCount, locale), &pending_ads.to_string()),
            fill(
                text(Key::PendingSupportCount, locale),
                &pending_support.to_string()
            ),
        );
        self.notify(
            profile.id,
            &body,
            Some(&render::support_admin_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// `/superadmin`: bot-wide statistics plus the full admin keyboard.
    pub(crate) async fn show_super_admin_panel(
        &self,
        profile: &UserProfile,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;

        let stats = self.repo.bot_stats().await?;
        let body = format!(
            "{}\n\n{}",
            text(Key::SuperAdminPanel, locale),
            render::stats_panel(&stats, locale),
        );
        self.notify(
            profile.id,
            &body,
            Some(&render::super_admin_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// Review queue: every pending paid ad, each with its decision buttons.
    pub(crate) async fn view_pending_ads(
        &self,
        profile: &UserProfile,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        let ads = self.repo.list_pending_paid_ads().await?;
        if ads.is_empty() {
            self.notify(profile.id, text(Key::NoPendingAds, locale), None)
                .await;
            return Ok(());
        }
        for ad in &ads {
            self.notify(
                profile.id,
                &render::admin_notification(ad),
                Some(&render::moderation_keyboard(ad.ad.id, locale)),
            )
            .await;
        }
        Ok(())
    }

    /// Review queue: every pending support request, each with a respond button.
    pub(crate) async fn view_support_requests(
        &self,
        profile: &UserProfile,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        let requests = self.repo.list_pending_support_requests().await?;
        if requests.is_empty() {
            self.notify(profile.id, text(Key::NoPendingSupport, locale), None)
                .await;
            return Ok(());
        }
        for entry in &requests {
            let keyboard = bazari_core::types::Keyboard::row(vec![
                bazari_core::types::Button::new(
                    text(Key::RespondButton, locale),
                    bazari_core::types::CallbackAction::RespondSupport(entry.request.id),
                ),
            ]);
            self.notify(
                profile.id,
                &render::support_request_line(entry),
                Some(&keyboard),
            )
            .await;
        }
        Ok(())
    }

    /// User directory, newest first.
    pub(crate) async fn list_users(
        &self,
        profile: &UserProfile,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        let users = self.repo.list_users().await?;
        let body = format!(
            "{}\n\n{}",
            fill(text(Key::TotalUsers, locale), &users.len().to_string()),
            users
                .iter()
                .map(render::user_line)
                .collect::<Vec<_>>()
                .join("\n"),
        );
        self.notify(profile.id, &body, None).await;
        Ok(())
    }

    /// Search-user button: prompt for a numeric user id.
    pub(crate) async fn begin_user_search(
        &self,
        profile: &UserProfile,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        self.flows
            .set(profile.id, Flow::new(FlowState::AwaitingUserSearch, locale));
        self.notify(profile.id, text(Key::EnterUserId, locale), None)
            .await;
        Ok(())
    }

    /// Id text received while `AwaitingUserSearch`.
    pub(crate) async fn submit_user_search(
        &self,
        profile: &UserProfile,
        input: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;

        let Ok(id) = input.trim().parse::<i64>() else {
            // Keep the prompt open for another try.
            self.notify(profile.id, text(Key::InvalidUserId, locale), None)
                .await;
            return Ok(());
        };
        self.flows.remove(profile.id);

        match self.repo.user_with_stats(UserId(id)).await? {
            Some(entry) => {
                self.notify(profile.id, &render::user_info(&entry, locale), None)
                    .await;
            }
            None => {
                self.notify(profile.id, text(Key::UserNotFound, locale), None)
                    .await;
            }
        }
        Ok(())
    }

    /// Inline user-info button from a directory listing.
    pub(crate) async fn show_user_info(
        &self,
        profile: &UserProfile,
        user: UserId,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        match self.repo.user_with_stats(user).await? {
            Some(entry) => {
                self.notify(profile.id, &render::user_info(&entry, locale), None)
                    .await;
            }
            None => {
                self.notify(profile.id, text(Key::UserNotFound, locale), None)
                    .await;
            }
        }
        Ok(())
    }
}
