// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support requests: user submission and the admin response loop.
//!
//! Requests go to the secondary (support) admin when one is configured,
//! falling back to the primary. A request is answered exactly once; the
//! reply is both persisted and delivered to the requester.

use bazari_core::error::BazariError;
use bazari_core::types::{ActionKind, Keyboard, RequestId, Role, UserProfile};
use bazari_i18n::{Key, text};
use tracing::{info, warn};

use crate::flow::{Flow, FlowState};
use crate::render;
use crate::Engine;

impl Engine {
    /// Message text received while `AwaitingSupportMessage`.
    pub(crate) async fn submit_support_message(
        &self,
        profile: &UserProfile,
        flow: Flow,
        message: &str,
    ) -> Result<(), BazariError> {
        let locale = flow.locale;
        let request_id = self
            .repo
            .create_support_request(profile.id, message.trim())
            .await?;
        self.repo
            .record_action(profile.id, ActionKind::SupportRequest, self.now_unix())
            .await?;
        self.flows.remove(profile.id);
        info!(user = %profile.id, request = %request_id, "support request filed");

        self.notify(
            profile.id,
            text(Key::SupportSent, locale),
            Some(&render::main_menu(locale)),
        )
        .await;

        let admin = self
            .roles
            .user_for(Role::Secondary)
            .or_else(|| self.roles.user_for(Role::Primary));
        if let Some(admin) = admin {
            let admin_locale = self.locale_of_id(admin).await;
            let body = render::support_notification(request_id, profile, message.trim());
            let keyboard = Keyboard::row(vec![bazari_core::types::Button::new(
                text(Key::RespondButton, admin_locale),
                bazari_core::types::CallbackAction::RespondSupport(request_id),
            )]);
            self.notify(admin, &body, Some(&keyboard)).await;
        } else {
            warn!(request = %request_id, "no admin configured to receive support requests");
        }
        Ok(())
    }

    /// Respond button on a support notification.
    pub(crate) async fn begin_support_response(
        &self,
        profile: &UserProfile,
        request: RequestId,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;

        if self.repo.get_support_request(request).await?.is_none() {
            self.ack(ack_id, Some(text(Key::ErrorSendingResponse, locale)), true)
                .await;
            return Ok(());
        }

        self.ack(ack_id, None, false).await;
        self.flows.set(
            profile.id,
            Flow::new(FlowState::AwaitingSupportResponse { request }, locale),
        );
        self.notify(profile.id, text(Key::AdminResponseRequest, locale), None)
            .await;
        Ok(())
    }

    /// Reply text received while `AwaitingSupportResponse`.
    pub(crate) async fn submit_support_response(
        &self,
        profile: &UserProfile,
        request: RequestId,
        response: &str,
    ) -> Result<(), BazariError> {
        let role = self.require_operator(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.flows.remove(profile.id);

        let Some(entry) = self.repo.get_support_request(request).await? else {
            self.notify(profile.id, text(Key::ErrorSendingResponse, locale), None)
                .await;
            return Ok(());
        };

        let response = response.trim();
        self.repo
            .respond_to_support_request(request, response)
            .await?;
        info!(request = %request, admin = %profile.id, "support request answered");

        let requester = entry.request.user_id;
        let requester_locale = self.locale_of_id(requester).await;
        let body = format!(
            "{}\n\n{}",
            text(Key::AdminResponseTitle, requester_locale),
            response
        );
        self.notify(requester, &body, None).await;

        self.notify(
            profile.id,
            text(Key::ResponseSent, locale),
            Some(&render::main_menu(locale)),
        )
        .await;
        self.audit(
            role,
            &format!(
                "Support request #{request} answered by @{}",
                profile.username.as_deref().unwrap_or("-")
            ),
        )
        .await;
        Ok(())
    }
}
