// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seller-facing conversation: /start, the main menu, the ad submission
//! flow, and payment completion.
//!
//! The flow is link -> description -> price -> photo (or skip) ->
//! preview -> invoice -> payment. The ad only becomes durable when the
//! payment succeeds; abandoning the flow costs nothing but the rate-limit
//! slot taken at flow start.

use bazari_core::error::{BazariError, LimitReason, ValidationKind};
use bazari_core::types::{AdStatus, ChargeId, Invoice, NewAd, Role, UserId, UserProfile};
use bazari_i18n::{Key, Locale, NO_DESCRIPTION_SENTINEL, is_no_description, text};
use tracing::{info, warn};

use crate::flow::{Flow, FlowState};
use crate::links;
use crate::ratelimit::{self, LimitPolicy};
use crate::render;
use crate::Engine;

impl Engine {
    /// Handle /start: register or refresh the user, then greet them.
    ///
    /// First-time users get the language picker; returning users go straight
    /// to the main menu in their stored locale.
    pub(crate) async fn handle_start(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let known = self.repo.get_user(profile.id).await?.is_some();
        let hinted = profile
            .language_code
            .as_deref()
            .map(Locale::from_code)
            .unwrap_or(Locale::DEFAULT);
        self.repo.upsert_user(profile, hinted.code()).await?;
        self.flows.remove(profile.id);

        if known {
            let locale = self.locale_for(profile).await;
            self.notify(
                profile.id,
                text(Key::WelcomeMessage, locale),
                Some(&render::main_menu(locale)),
            )
            .await;
        } else {
            info!(user = %profile.id, "new user registered");
            self.notify(
                profile.id,
                text(Key::SelectLanguage, hinted),
                Some(&render::language_keyboard(hinted)),
            )
            .await;
        }
        Ok(())
    }

    /// Persist a locale choice from the language picker.
    pub(crate) async fn set_locale(
        &self,
        profile: &UserProfile,
        code: &str,
    ) -> Result<(), BazariError> {
        let locale = Locale::from_code(code);
        self.repo.set_user_locale(profile.id, locale.code()).await?;
        if let Some(mut flow) = self.flows.get(profile.id) {
            flow.locale = locale;
            self.flows.set(profile.id, flow);
        }

        let body = format!(
            "{}\n\n{}",
            text(Key::LanguageSelected, locale),
            text(Key::WelcomeMessage, locale)
        );
        self.notify(profile.id, &body, Some(&render::main_menu(locale)))
            .await;
        Ok(())
    }

    /// Abandon any in-flight flow and show the main menu.
    pub(crate) async fn back_to_menu(&self, profile: &UserProfile) -> Result<(), BazariError> {
        self.flows.remove(profile.id);
        let locale = self.locale_for(profile).await;
        self.notify(
            profile.id,
            text(Key::WelcomeMessage, locale),
            Some(&render::main_menu(locale)),
        )
        .await;
        Ok(())
    }

    /// Show the language picker.
    pub(crate) async fn show_language_picker(
        &self,
        profile: &UserProfile,
    ) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;
        self.notify(
            profile.id,
            text(Key::SelectLanguage, locale),
            Some(&render::language_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// Begin the ad submission flow.
    ///
    /// Gates: the seller must have a public username (buyers contact them
    /// through it), and must pass the ad-creation rate limit. The limit slot
    /// is consumed here, when the flow starts.
    pub(crate) async fn start_ad_flow(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;

        if profile.username.is_none() {
            return Err(BazariError::Validation(ValidationKind::UsernameRequired));
        }

        let now = self.now_unix();
        ratelimit::check(
            &self.repo,
            profile.id,
            bazari_core::types::ActionKind::AdCreation,
            LimitPolicy::for_ads(&self.limits),
            now,
        )
        .await?;
        self.repo
            .record_action(profile.id, bazari_core::types::ActionKind::AdCreation, now)
            .await?;

        self.flows
            .set(profile.id, Flow::new(FlowState::AwaitingLink, locale));
        self.notify(profile.id, text(Key::AdPostingGuide, locale), None)
            .await;
        self.notify(
            profile.id,
            text(Key::GiftLinkRequest, locale),
            Some(&render::back_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// Text received while a seller flow is active.
    pub(crate) async fn continue_ad_flow(
        &self,
        profile: &UserProfile,
        flow: Flow,
        input: &str,
    ) -> Result<(), BazariError> {
        match flow.state {
            FlowState::AwaitingLink => self.submit_link(profile, flow, input).await,
            FlowState::AwaitingDescription => self.submit_description(profile, flow, input).await,
            FlowState::AwaitingPrice => self.submit_price(profile, flow, input).await,
            FlowState::AwaitingChannelPhoto => {
                Err(BazariError::Validation(ValidationKind::InvalidPhoto))
            }
            // Buttons drive the preview and payment steps.
            FlowState::AwaitingPreview | FlowState::AwaitingPayment => {
                Err(BazariError::Validation(ValidationKind::InvalidChoice))
            }
            _ => Err(BazariError::State),
        }
    }

    async fn submit_link(
        &self,
        profile: &UserProfile,
        mut flow: Flow,
        input: &str,
    ) -> Result<(), BazariError> {
        let link = input.trim();
        links::classify(link).ok_or(BazariError::Validation(ValidationKind::InvalidLink))?;

        flow.link = Some(link.to_string());
        flow.state = FlowState::AwaitingDescription;
        let locale = flow.locale;
        self.flows.set(profile.id, flow);

        self.notify(
            profile.id,
            text(Key::DescriptionRequest, locale),
            Some(&render::back_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    async fn submit_description(
        &self,
        profile: &UserProfile,
        mut flow: Flow,
        input: &str,
    ) -> Result<(), BazariError> {
        let description = if is_no_description(input) {
            NO_DESCRIPTION_SENTINEL.to_string()
        } else {
            input.trim().to_string()
        };

        flow.description = Some(description);
        flow.state = FlowState::AwaitingPrice;
        let locale = flow.locale;
        self.flows.set(profile.id, flow);

        self.notify(
            profile.id,
            text(Key::PriceRequest, locale),
            Some(&render::back_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    async fn submit_price(
        &self,
        profile: &UserProfile,
        mut flow: Flow,
        input: &str,
    ) -> Result<(), BazariError> {
        let price = input.trim();
        let value: f64 = price
            .parse()
            .map_err(|_| BazariError::Validation(ValidationKind::InvalidPrice))?;
        if !value.is_finite() || value < 0.0 {
            return Err(BazariError::Validation(ValidationKind::InvalidPrice));
        }

        flow.price = Some(price.to_string());
        let locale = flow.locale;

        // Every listing gets the photo step; the skip button covers ads
        // without one.
        flow.state = FlowState::AwaitingChannelPhoto;
        self.flows.set(profile.id, flow);
        self.notify(
            profile.id,
            text(Key::PhotoRequest, locale),
            Some(&render::photo_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// Photo received while the flow awaits one.
    pub(crate) async fn submit_photo(
        &self,
        profile: &UserProfile,
        photo: &str,
    ) -> Result<(), BazariError> {
        let Some(mut flow) = self.flows.get(profile.id) else {
            return Err(BazariError::State);
        };
        if flow.state != FlowState::AwaitingChannelPhoto {
            return Err(BazariError::State);
        }

        flow.photo = Some(photo.to_string());
        flow.state = FlowState::AwaitingPreview;
        let locale = flow.locale;
        let body = render::preview(&flow, locale);
        self.flows.set(profile.id, flow);

        self.notify(profile.id, &body, Some(&render::preview_keyboard(locale)))
            .await;
        Ok(())
    }

    /// Skip button under the photo prompt.
    pub(crate) async fn skip_photo(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let Some(mut flow) = self.flows.get(profile.id) else {
            return Err(BazariError::State);
        };
        if flow.state != FlowState::AwaitingChannelPhoto {
            return Err(BazariError::State);
        }

        flow.state = FlowState::AwaitingPreview;
        let locale = flow.locale;
        let body = render::preview(&flow, locale);
        self.flows.set(profile.id, flow);

        self.notify(profile.id, &body, Some(&render::preview_keyboard(locale)))
            .await;
        Ok(())
    }

    /// Confirm button under the preview: issue the listing-fee invoice.
    pub(crate) async fn confirm_preview(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let Some(flow) = self.flows.get(profile.id) else {
            return Err(BazariError::State);
        };
        if flow.state != FlowState::AwaitingPreview {
            return Err(BazariError::State);
        }

        let locale = flow.locale;
        let stars = i64::from(self.payment.stars_amount);
        let invoice = Invoice {
            title: text(Key::PaymentTitle, locale).to_string(),
            description: render::fill(text(Key::PaymentDescription, locale), &stars.to_string()),
            payload: "ad_payment".to_string(),
            currency: "XTR".to_string(),
            amount: stars,
        };

        self.billing.issue_invoice(profile.id, &invoice).await?;
        self.flows.set_state(profile.id, FlowState::AwaitingPayment);
        self.notify(
            profile.id,
            &render::fill(text(Key::PaymentMessage, locale), &stars.to_string()),
            None,
        )
        .await;
        Ok(())
    }

    /// Edit button under the preview: restart from the link step, keeping
    /// the flow's rate-limit slot.
    pub(crate) async fn edit_preview(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let Some(flow) = self.flows.get(profile.id) else {
            return Err(BazariError::State);
        };
        let locale = flow.locale;
        self.flows
            .set(profile.id, Flow::new(FlowState::AwaitingLink, locale));
        self.notify(
            profile.id,
            text(Key::GiftLinkRequest, locale),
            Some(&render::back_keyboard(locale)),
        )
        .await;
        Ok(())
    }

    /// Cancel button under the preview.
    pub(crate) async fn cancel_preview(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;
        self.flows.remove(profile.id);
        self.notify(
            profile.id,
            text(Key::AdCancelled, locale),
            Some(&render::main_menu(locale)),
        )
        .await;
        Ok(())
    }

    /// Pre-checkout confirmation: approve only when the user is actually
    /// mid-payment; anything else is a stale invoice.
    pub(crate) async fn handle_pre_checkout(
        &self,
        profile: &UserProfile,
        query_id: &str,
    ) -> Result<(), BazariError> {
        let ok = matches!(
            self.flows.get(profile.id).map(|f| f.state),
            Some(FlowState::AwaitingPayment)
        );
        self.gateway.answer_pre_checkout(query_id, ok).await
    }

    /// A successful payment: persist the ad and hand it to moderation.
    pub(crate) async fn complete_payment(
        &self,
        profile: &UserProfile,
        charge_id: &ChargeId,
        amount: i64,
    ) -> Result<(), BazariError> {
        let Some(flow) = self.flows.remove(profile.id) else {
            // Payment arrived without a draft (e.g. bot restarted mid-flow).
            warn!(user = %profile.id, "payment without an active draft");
            let locale = self.locale_for(profile).await;
            self.notify(profile.id, text(Key::PaymentError, locale), None)
                .await;
            return Ok(());
        };
        if flow.state != FlowState::AwaitingPayment {
            warn!(user = %profile.id, "payment arrived outside the payment step");
            self.notify(profile.id, text(Key::PaymentError, flow.locale), None)
                .await;
            return Ok(());
        }

        let (Some(link), Some(price)) = (flow.link.clone(), flow.price.clone()) else {
            return Err(BazariError::State);
        };
        let locale = flow.locale;
        let new_ad = NewAd {
            owner: profile.id,
            link,
            price,
            description: flow
                .description
                .unwrap_or_else(|| NO_DESCRIPTION_SENTINEL.to_string()),
            payment_charge_id: charge_id.clone(),
            stars_amount: amount,
            channel_photo: flow.photo,
        };

        let ad_id = self.repo.create_ad(&new_ad).await?;
        self.repo
            .update_payment_status(ad_id, bazari_core::types::PaymentStatus::Paid)
            .await?;
        info!(user = %profile.id, ad = %ad_id, "ad paid and submitted");

        self.notify(
            profile.id,
            text(Key::AdSubmitted, locale),
            Some(&render::main_menu(locale)),
        )
        .await;
        self.notify_moderators(ad_id).await;
        Ok(())
    }

    /// Send the moderation notification to both operators, best-effort.
    pub(crate) async fn notify_moderators(&self, ad_id: bazari_core::types::AdId) {
        let ad = match self.repo.get_ad(ad_id).await {
            Ok(Some(ad)) => ad,
            Ok(None) => {
                warn!(ad = %ad_id, "submitted ad vanished before notification");
                return;
            }
            Err(e) => {
                warn!(ad = %ad_id, error = %e, "ad lookup failed");
                return;
            }
        };
        let body = render::admin_notification(&ad);
        for role in [Role::Secondary, Role::Primary] {
            let Some(admin) = self.roles.user_for(role) else {
                continue;
            };
            let locale = self.locale_of_id(admin).await;
            self.notify(admin, &body, Some(&render::moderation_keyboard(ad_id, locale)))
                .await;
        }
    }

    /// Stored locale for a bare user id (admins, ad owners).
    pub(crate) async fn locale_of_id(&self, user: UserId) -> Locale {
        match self.repo.get_user(user).await {
            Ok(Some(user)) => Locale::from_code(&user.language),
            _ => Locale::DEFAULT,
        }
    }

    /// The seller's own ads, with sold toggles on published ones.
    pub(crate) async fn show_my_ads(&self, profile: &UserProfile) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;
        let ads = self.repo.list_ads_by_owner(profile.id).await?;

        if ads.is_empty() {
            self.notify(
                profile.id,
                text(Key::MyAdsEmpty, locale),
                Some(&render::main_menu(locale)),
            )
            .await;
            return Ok(());
        }

        self.notify(profile.id, text(Key::MyAdsHeader, locale), None)
            .await;
        for ad in &ads {
            let keyboard = (ad.status == AdStatus::Approved)
                .then(|| render::sold_toggle_keyboard(ad, locale));
            self.notify(profile.id, &render::my_ad_line(ad), keyboard.as_ref())
                .await;
        }
        Ok(())
    }

    /// Begin the support flow, enforcing the support rate limit with its
    /// own messages.
    pub(crate) async fn start_support_flow(
        &self,
        profile: &UserProfile,
    ) -> Result<(), BazariError> {
        let locale = self.locale_for(profile).await;
        let now = self.now_unix();
        let check = ratelimit::check(
            &self.repo,
            profile.id,
            bazari_core::types::ActionKind::SupportRequest,
            LimitPolicy::for_support(&self.limits),
            now,
        )
        .await;

        match check {
            Ok(()) => {}
            Err(BazariError::RateLimited {
                reason,
                retry_after,
            }) => {
                let body = match reason {
                    LimitReason::Cooldown => render::fill(
                        text(Key::SupportCooldownActive, locale),
                        &retry_after.unwrap_or_default().to_string(),
                    ),
                    LimitReason::WindowLimit => {
                        text(Key::SupportHourlyLimitReached, locale).to_string()
                    }
                };
                self.notify(profile.id, &body, None).await;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        self.flows
            .set(profile.id, Flow::new(FlowState::AwaitingSupportMessage, locale));
        self.notify(
            profile.id,
            text(Key::SupportMessage, locale),
            Some(&render::back_keyboard(locale)),
        )
        .await;
        Ok(())
    }
}
