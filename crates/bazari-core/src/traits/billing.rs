// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Billing provider trait for invoices and charge reversals.

use async_trait::async_trait;

use crate::error::BazariError;
use crate::types::{ChargeId, Invoice, UserId};

/// Adapter for the platform's payment processor.
///
/// Invoices are fire-and-forget: the successful payment arrives later as an
/// [`crate::types::IncomingEvent::PaymentSucceeded`] carrying the charge id.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Issues an invoice to the user.
    async fn issue_invoice(&self, user: UserId, invoice: &Invoice) -> Result<(), BazariError>;

    /// Reverses a completed charge. Returns whether the provider accepted
    /// the reversal; provider-side rejection is a `false`, not an error.
    async fn reverse_charge(&self, user: UserId, charge: &ChargeId)
    -> Result<bool, BazariError>;
}
