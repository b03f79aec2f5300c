// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation, moderation, and refund workflows for the Bazari bot.
//!
//! The [`Engine`] owns the per-user flow state and drives every workflow
//! against the adapter seams defined in `bazari-core`: the messaging
//! gateway, the billing provider, the repository, and the role resolver.
//! Events are handled concurrently, one task per event; durable state is
//! guarded by compare-and-set transitions in the repository, so concurrent
//! handlers cannot double-apply a decision.

pub mod dispatch;
pub mod flow;
pub mod links;
pub mod moderation;
pub mod ratelimit;
pub mod refund;
pub mod render;
pub mod roles;
pub mod support;
pub mod user_flow;

use std::sync::Arc;

use bazari_config::BazariConfig;
use bazari_config::model::{ChannelConfig, LimitsConfig, PaymentConfig};
use bazari_core::error::BazariError;
use bazari_core::traits::{BillingProvider, MessagingGateway, Repository, RoleResolver};
use bazari_core::types::{ChatTarget, UserId, UserProfile};
use bazari_i18n::Locale;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::flow::FlowStore;

pub use crate::refund::RefundOutcome;
pub use crate::roles::ConfigRoles;

/// The bot's workflow engine. Cheap to clone; all fields are shared.
#[derive(Clone)]
pub struct Engine {
    repo: Arc<dyn Repository>,
    gateway: Arc<dyn MessagingGateway>,
    billing: Arc<dyn BillingProvider>,
    roles: Arc<dyn RoleResolver>,
    channel: ChannelConfig,
    payment: PaymentConfig,
    limits: LimitsConfig,
    flows: FlowStore,
}

impl Engine {
    pub fn new(
        config: &BazariConfig,
        repo: Arc<dyn Repository>,
        gateway: Arc<dyn MessagingGateway>,
        billing: Arc<dyn BillingProvider>,
        roles: Arc<dyn RoleResolver>,
    ) -> Self {
        Self {
            repo,
            gateway,
            billing,
            roles,
            channel: config.channel.clone(),
            payment: config.payment.clone(),
            limits: config.limits.clone(),
            flows: FlowStore::new(),
        }
    }

    /// Pull events from the gateway until cancelled, handling each in its
    /// own task.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!("engine started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("engine shutting down");
                    break;
                }
                event = self.gateway.next_event() => {
                    let event = match event {
                        Ok(event) => event,
                        Err(e) => {
                            error!(error = %e, "gateway stream failed");
                            break;
                        }
                    };
                    let engine = self.clone();
                    tokio::spawn(async move {
                        let user = event.user().id;
                        if let Err(e) = engine.handle_event(event).await {
                            warn!(%user, error = %e, "event handling failed");
                        }
                    });
                }
            }
        }
    }

    /// Current unix time in seconds; the engine's single clock read point.
    pub(crate) fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Resolve the locale to answer a user in: an in-flight flow's locale,
    /// else the stored preference, else the profile hint, else the default.
    pub(crate) async fn locale_for(&self, profile: &UserProfile) -> Locale {
        if let Some(flow) = self.flows.get(profile.id) {
            return flow.locale;
        }
        match self.repo.get_user(profile.id).await {
            Ok(Some(user)) => Locale::from_code(&user.language),
            Ok(None) => profile
                .language_code
                .as_deref()
                .map(Locale::from_code)
                .unwrap_or(Locale::DEFAULT),
            Err(e) => {
                warn!(user = %profile.id, error = %e, "locale lookup failed");
                Locale::DEFAULT
            }
        }
    }

    /// Send a text to a user's private chat, logging (not propagating) a
    /// delivery failure. Used for notifications that must not abort the
    /// surrounding workflow.
    pub(crate) async fn notify(
        &self,
        user: UserId,
        body: &str,
        keyboard: Option<&bazari_core::types::Keyboard>,
    ) {
        if let Err(e) = self
            .gateway
            .send_text(&ChatTarget::User(user), body, keyboard)
            .await
        {
            warn!(%user, error = %e, "notification delivery failed");
        }
    }

    /// Best-effort callback acknowledgement.
    pub(crate) async fn ack(&self, ack_id: &str, toast: Option<&str>, alert: bool) {
        if let Err(e) = self.gateway.answer_callback(ack_id, toast, alert).await {
            warn!(error = %e, "callback acknowledgement failed");
        }
    }

    pub(crate) fn channel_target(&self) -> ChatTarget {
        ChatTarget::Channel(self.channel.id.clone())
    }

    /// Localized user-facing text for a recoverable error, `None` for
    /// errors that should propagate instead.
    pub(crate) fn error_text(&self, locale: Locale, err: &BazariError) -> Option<String> {
        use bazari_core::error::{LimitReason, ValidationKind};
        use bazari_i18n::{Key, text};

        let body = match err {
            BazariError::Validation(kind) => match kind {
                ValidationKind::UsernameRequired => text(Key::UsernameRequired, locale).to_string(),
                ValidationKind::InvalidLink => text(Key::InvalidLink, locale).to_string(),
                ValidationKind::InvalidPrice => text(Key::InvalidPrice, locale).to_string(),
                ValidationKind::InvalidPhoto => text(Key::InvalidPhoto, locale).to_string(),
                ValidationKind::InvalidChoice => text(Key::InvalidChoice, locale).to_string(),
            },
            BazariError::RateLimited {
                reason,
                retry_after,
            } => match reason {
                LimitReason::Cooldown => render::fill(
                    text(Key::AdCooldownActive, locale),
                    &retry_after.unwrap_or_default().to_string(),
                ),
                LimitReason::WindowLimit => text(Key::AdDailyLimitReached, locale).to_string(),
            },
            BazariError::Permission => text(Key::NoPermission, locale).to_string(),
            BazariError::NotFound(_) => text(Key::AdNotFound, locale).to_string(),
            BazariError::State => text(Key::ErrorRestart, locale).to_string(),
            _ => return None,
        };
        Some(body)
    }

    /// Deliver an error as a localized message instead of propagating it.
    /// Returns `Ok(())` for recoverable errors, `Err` otherwise.
    pub(crate) async fn surface_error(
        &self,
        user: &UserProfile,
        locale: Locale,
        err: BazariError,
    ) -> Result<(), BazariError> {
        match self.error_text(locale, &err) {
            Some(body) => {
                self.notify(user.id, &body, None).await;
                Ok(())
            }
            None => Err(err),
        }
    }
}
