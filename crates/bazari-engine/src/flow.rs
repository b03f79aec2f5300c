// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state.
//!
//! Drafts live in memory only; a restart drops in-progress flows and the
//! user starts over from the menu. Everything durable (ads, payments,
//! support requests) is persisted the moment it matters.

use std::sync::Arc;

use bazari_core::types::{AdId, RequestId, UserId};
use bazari_i18n::Locale;
use dashmap::DashMap;

/// Where a user currently is in their conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    AwaitingLink,
    AwaitingDescription,
    AwaitingPrice,
    AwaitingChannelPhoto,
    AwaitingPreview,
    AwaitingPayment,
    AwaitingSupportMessage,
    /// Admin: collecting the rejection reason for an ad.
    AwaitingRejectionReason { ad: AdId, with_refund: bool },
    /// Admin: collecting the reply to a support request.
    AwaitingSupportResponse { request: RequestId },
    /// Admin: collecting a user id to look up.
    AwaitingUserSearch,
    /// Admin: collecting a refund target (user id or charge id).
    AwaitingRefundTarget { by_charge: bool },
}

/// In-progress conversation data for one user.
#[derive(Debug, Clone)]
pub struct Flow {
    pub state: FlowState,
    /// Locale resolved when the flow started; overrides the stored
    /// preference for the duration of the flow.
    pub locale: Locale,
    pub link: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub photo: Option<String>,
}

impl Flow {
    pub fn new(state: FlowState, locale: Locale) -> Self {
        Self {
            state,
            locale,
            link: None,
            description: None,
            price: None,
            photo: None,
        }
    }
}

/// Shared map of in-progress flows, keyed by user.
#[derive(Clone, Default)]
pub struct FlowStore {
    flows: Arc<DashMap<UserId, Flow>>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserId) -> Option<Flow> {
        self.flows.get(&user).map(|f| f.clone())
    }

    pub fn set(&self, user: UserId, flow: Flow) {
        self.flows.insert(user, flow);
    }

    /// Update the state of an existing flow, keeping collected data.
    pub fn set_state(&self, user: UserId, state: FlowState) {
        if let Some(mut flow) = self.flows.get_mut(&user) {
            flow.state = state;
        }
    }

    pub fn remove(&self, user: UserId) -> Option<Flow> {
        self.flows.remove(&user).map(|(_, f)| f)
    }
}
