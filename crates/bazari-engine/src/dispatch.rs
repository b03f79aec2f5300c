// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch: routes gateway events to workflows by event kind and
//! the user's current flow state.
//!
//! Recoverable errors (bad input, rate limits, permissions, stale flows)
//! are answered in the user's locale and never abort the event loop;
//! everything else propagates to the spawn wrapper, which logs it.

use bazari_core::error::BazariError;
use bazari_core::types::{
    CallbackAction, Command, IncomingEvent, MenuAction, SoldStatus, UserProfile,
};
use bazari_i18n::{Key, Locale, text};

use crate::flow::FlowState;
use crate::render;
use crate::Engine;

impl Engine {
    /// Handle one gateway event end to end.
    pub async fn handle_event(&self, event: IncomingEvent) -> Result<(), BazariError> {
        let profile = event.user().clone();
        if profile.is_bot {
            return Ok(());
        }

        // /start registers the user itself (it must see whether they were
        // known beforehand); every other event refreshes the profile here.
        if !matches!(
            event,
            IncomingEvent::Command {
                command: Command::Start,
                ..
            }
        ) {
            let hinted = profile
                .language_code
                .as_deref()
                .map(Locale::from_code)
                .unwrap_or(Locale::DEFAULT);
            self.repo.upsert_user(&profile, hinted.code()).await?;
        }

        match event {
            IncomingEvent::Command { command, .. } => self.handle_command(&profile, command).await,
            IncomingEvent::Text { text, .. } => self.handle_text(&profile, &text).await,
            IncomingEvent::Photo { photo, .. } => {
                let locale = self.locale_for(&profile).await;
                match self.submit_photo(&profile, &photo).await {
                    Err(e) => self.surface_error(&profile, locale, e).await,
                    ok => ok,
                }
            }
            IncomingEvent::Callback { ack_id, action, .. } => {
                self.handle_callback(&profile, &ack_id, action).await
            }
            IncomingEvent::PaymentSucceeded {
                charge_id, amount, ..
            } => self.complete_payment(&profile, &charge_id, amount).await,
            IncomingEvent::PreCheckout { query_id, .. } => {
                self.handle_pre_checkout(&profile, &query_id).await
            }
        }
    }

    async fn handle_command(
        &self,
        profile: &UserProfile,
        command: Command,
    ) -> Result<(), BazariError> {
        let result = match command {
            Command::Start => self.handle_start(profile).await,
            Command::SupportAdmin => self.show_support_admin_panel(profile).await,
            Command::SuperAdmin => self.show_super_admin_panel(profile).await,
        };
        match result {
            Err(e) => {
                let locale = self.locale_for(profile).await;
                self.surface_error(profile, locale, e).await
            }
            ok => ok,
        }
    }

    /// Free text is meaningful only inside a flow; route it by state.
    async fn handle_text(&self, profile: &UserProfile, input: &str) -> Result<(), BazariError> {
        let Some(flow) = self.flows.get(profile.id) else {
            let locale = self.locale_for(profile).await;
            self.notify(
                profile.id,
                text(Key::WelcomeMessage, locale),
                Some(&render::main_menu(locale)),
            )
            .await;
            return Ok(());
        };
        let locale = flow.locale;

        let result = match flow.state.clone() {
            FlowState::AwaitingSupportMessage => {
                self.submit_support_message(profile, flow, input).await
            }
            FlowState::AwaitingRejectionReason { ad, with_refund } => {
                self.submit_rejection_reason(profile, ad, with_refund, input)
                    .await
            }
            FlowState::AwaitingSupportResponse { request } => {
                self.submit_support_response(profile, request, input).await
            }
            FlowState::AwaitingUserSearch => self.submit_user_search(profile, input).await,
            FlowState::AwaitingRefundTarget { by_charge } => {
                self.submit_refund_target(profile, by_charge, input).await
            }
            _ => self.continue_ad_flow(profile, flow, input).await,
        };
        match result {
            Err(e) => self.surface_error(profile, locale, e).await,
            ok => ok,
        }
    }

    async fn handle_callback(
        &self,
        profile: &UserProfile,
        ack_id: &str,
        action: CallbackAction,
    ) -> Result<(), BazariError> {
        // Moderation and panel actions acknowledge with their own toasts;
        // everything else gets a plain ack up front.
        let result = match action {
            CallbackAction::Menu(menu) => {
                self.ack(ack_id, None, false).await;
                match menu {
                    MenuAction::NewAd => self.start_ad_flow(profile).await,
                    MenuAction::MyAds => self.show_my_ads(profile).await,
                    MenuAction::Support => self.start_support_flow(profile).await,
                    MenuAction::Language => self.show_language_picker(profile).await,
                    MenuAction::Back => self.back_to_menu(profile).await,
                }
            }
            CallbackAction::SetLocale(code) => {
                self.ack(ack_id, None, false).await;
                self.set_locale(profile, &code).await
            }
            CallbackAction::SkipPhoto => {
                self.ack(ack_id, None, false).await;
                self.skip_photo(profile).await
            }
            CallbackAction::PreviewConfirm => {
                self.ack(ack_id, None, false).await;
                self.confirm_preview(profile).await
            }
            CallbackAction::PreviewEdit => {
                self.ack(ack_id, None, false).await;
                self.edit_preview(profile).await
            }
            CallbackAction::PreviewCancel => {
                self.ack(ack_id, None, false).await;
                self.cancel_preview(profile).await
            }
            CallbackAction::Approve(id) => self.handle_approve(profile, id, ack_id).await,
            CallbackAction::Reject(id) => self.handle_reject(profile, id, ack_id).await,
            CallbackAction::RejectRefund(id) => {
                self.begin_rejection(profile, id, true, ack_id).await
            }
            CallbackAction::RejectNoRefund(id) => {
                self.begin_rejection(profile, id, false, ack_id).await
            }
            CallbackAction::MarkSold(id) => {
                self.set_ad_sold_status(profile, id, SoldStatus::Sold, ack_id)
                    .await
            }
            CallbackAction::MarkAvailable(id) => {
                self.set_ad_sold_status(profile, id, SoldStatus::Available, ack_id)
                    .await
            }
            CallbackAction::RespondSupport(id) => {
                self.begin_support_response(profile, id, ack_id).await
            }
            CallbackAction::ViewPendingAds => self.view_pending_ads(profile, ack_id).await,
            CallbackAction::ViewSupportRequests => {
                self.view_support_requests(profile, ack_id).await
            }
            CallbackAction::ListUsers | CallbackAction::UserDirectory => {
                self.list_users(profile, ack_id).await
            }
            CallbackAction::SearchUser => self.begin_user_search(profile, ack_id).await,
            CallbackAction::UserInfo(id) => self.show_user_info(profile, id, ack_id).await,
            CallbackAction::RefundUser => self.begin_refund_target(profile, false, ack_id).await,
            CallbackAction::RefundCharge => self.begin_refund_target(profile, true, ack_id).await,
            CallbackAction::RefundSweep => self.refund_sweep(profile, ack_id).await,
        };

        match result {
            Err(e) => {
                let locale = self.locale_for(profile).await;
                match self.error_text(locale, &e) {
                    Some(body) => {
                        self.ack(ack_id, Some(&body), true).await;
                        Ok(())
                    }
                    None => Err(e),
                }
            }
            ok => ok,
        }
    }
}
