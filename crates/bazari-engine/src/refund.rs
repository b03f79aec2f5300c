// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Refunds of listing-fee charges.
//!
//! Order of operations is fixed: check the stored refund flag, reverse the
//! charge at the provider, then compare-and-set the flag. Losing the
//! flag race after a successful reversal is reported as already-refunded;
//! the provider deduplicates by charge id, so the double reversal attempt
//! is harmless while a double *payout* is impossible.

use bazari_core::error::BazariError;
use bazari_core::types::{Ad, ChargeId, PaymentRecord, UserId, UserProfile};
use bazari_i18n::{Key, Locale, text};
use tracing::{info, warn};

use crate::flow::{Flow, FlowState};
use crate::render;
use crate::Engine;

/// What happened to a single refund attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundOutcome {
    /// Charge reversed and the flag set by this call.
    Refunded,
    /// The flag was already set, here or concurrently.
    AlreadyRefunded,
    /// The ad carries no charge id to reverse.
    NoCharge,
    /// The provider declined the reversal; the flag stays clear.
    Failed,
}

impl RefundOutcome {
    pub fn is_refunded(self) -> bool {
        matches!(self, RefundOutcome::Refunded)
    }

    fn describe(self, locale: Locale) -> &'static str {
        let key = match self {
            RefundOutcome::Refunded => Key::RefundIssued,
            RefundOutcome::AlreadyRefunded => Key::RefundAlreadyDone,
            RefundOutcome::NoCharge => Key::RefundNoCharge,
            RefundOutcome::Failed => Key::RefundDeclined,
        };
        text(key, locale)
    }
}

impl Engine {
    /// Refund one payment record. Adapter errors degrade to `Failed`.
    pub(crate) async fn refund_payment(&self, payment: &PaymentRecord) -> RefundOutcome {
        if payment.refunded {
            return RefundOutcome::AlreadyRefunded;
        }
        let accepted = match self
            .billing
            .reverse_charge(payment.owner, &payment.charge_id)
            .await
        {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(charge = %payment.charge_id, error = %e, "charge reversal failed");
                false
            }
        };
        if !accepted {
            return RefundOutcome::Failed;
        }
        match self.repo.mark_payment_refunded(&payment.charge_id).await {
            Ok(true) => {
                info!(charge = %payment.charge_id, user = %payment.owner, "refund issued");
                RefundOutcome::Refunded
            }
            Ok(false) => RefundOutcome::AlreadyRefunded,
            Err(e) => {
                // The reversal went through; the flag will be fixed by the
                // next sweep, which re-checks the provider's dedup.
                warn!(charge = %payment.charge_id, error = %e, "refund flag update failed");
                RefundOutcome::AlreadyRefunded
            }
        }
    }

    /// Refund the charge attached to an ad, during reject-with-refund.
    pub(crate) async fn refund_ad(&self, ad: &Ad) -> RefundOutcome {
        let Some(charge_id) = &ad.payment_charge_id else {
            return RefundOutcome::NoCharge;
        };
        if ad.refunded {
            return RefundOutcome::AlreadyRefunded;
        }
        self.refund_payment(&PaymentRecord {
            ad_id: ad.id,
            owner: ad.owner,
            charge_id: charge_id.clone(),
            stars_amount: ad.stars_amount,
            refunded: ad.refunded,
        })
        .await
    }

    /// Refund-panel button: prompt for a user id or a charge id.
    pub(crate) async fn begin_refund_target(
        &self,
        profile: &UserProfile,
        by_charge: bool,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        self.flows.set(
            profile.id,
            Flow::new(FlowState::AwaitingRefundTarget { by_charge }, locale),
        );
        let key = if by_charge {
            Key::EnterChargeId
        } else {
            Key::EnterUserId
        };
        self.notify(profile.id, text(key, locale), None).await;
        Ok(())
    }

    /// Target text received while `AwaitingRefundTarget`.
    pub(crate) async fn submit_refund_target(
        &self,
        profile: &UserProfile,
        by_charge: bool,
        input: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        let input = input.trim();

        let payment = if by_charge {
            self.repo
                .payment_by_charge(&ChargeId(input.to_string()))
                .await?
        } else {
            let Ok(id) = input.parse::<i64>() else {
                self.notify(profile.id, text(Key::InvalidUserId, locale), None)
                    .await;
                return Ok(());
            };
            self.repo.latest_paid_charge_for_user(UserId(id)).await?
        };
        self.flows.remove(profile.id);

        let Some(payment) = payment else {
            self.notify(profile.id, text(Key::NoMatchingCharge, locale), None)
                .await;
            return Ok(());
        };
        let outcome = self.refund_payment(&payment).await;
        self.notify(
            profile.id,
            &format!(
                "{} (charge {}, user {})",
                outcome.describe(locale),
                payment.charge_id,
                payment.owner
            ),
            None,
        )
        .await;
        Ok(())
    }

    /// Refund every unrefunded charge, oldest first. Reports counts.
    pub(crate) async fn refund_sweep(
        &self,
        profile: &UserProfile,
        ack_id: &str,
    ) -> Result<(), BazariError> {
        self.require_primary(profile.id)?;
        let locale = self.locale_for(profile).await;
        self.ack(ack_id, None, false).await;

        let payments = self.repo.list_unrefunded_payments().await?;
        let total = payments.len();
        let mut refunded = 0usize;
        let mut failed = 0usize;
        for payment in &payments {
            match self.refund_payment(payment).await {
                RefundOutcome::Refunded => refunded += 1,
                RefundOutcome::Failed => failed += 1,
                RefundOutcome::AlreadyRefunded | RefundOutcome::NoCharge => {}
            }
        }
        info!(total, refunded, failed, "refund sweep finished");

        let summary = render::fill(text(Key::RefundSweepSummary, locale), &refunded.to_string());
        let summary = render::fill(&summary, &total.to_string());
        let summary = render::fill(&summary, &failed.to_string());
        self.notify(profile.id, &summary, None).await;
        Ok(())
    }
}
