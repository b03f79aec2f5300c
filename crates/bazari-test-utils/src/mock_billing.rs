// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock billing provider for deterministic testing.
//!
//! Issued invoices and reversal attempts are recorded; reversal results
//! can be scripted per call, defaulting to accepted.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bazari_core::error::BazariError;
use bazari_core::traits::BillingProvider;
use bazari_core::types::{ChargeId, Invoice, UserId};

pub struct MockBilling {
    invoices: Arc<Mutex<Vec<(UserId, Invoice)>>>,
    reversals: Arc<Mutex<Vec<(UserId, ChargeId)>>>,
    scripted: Arc<Mutex<VecDeque<bool>>>,
}

impl MockBilling {
    pub fn new() -> Self {
        Self {
            invoices: Arc::new(Mutex::new(Vec::new())),
            reversals: Arc::new(Mutex::new(Vec::new())),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Script the result of the next `reverse_charge` call. Unscripted
    /// calls are accepted.
    pub async fn script_reversal(&self, accepted: bool) {
        self.scripted.lock().await.push_back(accepted);
    }

    pub async fn issued_invoices(&self) -> Vec<(UserId, Invoice)> {
        self.invoices.lock().await.clone()
    }

    pub async fn reversal_attempts(&self) -> Vec<(UserId, ChargeId)> {
        self.reversals.lock().await.clone()
    }
}

impl Default for MockBilling {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingProvider for MockBilling {
    async fn issue_invoice(&self, user: UserId, invoice: &Invoice) -> Result<(), BazariError> {
        self.invoices.lock().await.push((user, invoice.clone()));
        Ok(())
    }

    async fn reverse_charge(
        &self,
        user: UserId,
        charge: &ChargeId,
    ) -> Result<bool, BazariError> {
        self.reversals.lock().await.push((user, charge.clone()));
        Ok(self.scripted.lock().await.pop_front().unwrap_or(true))
    }
}
