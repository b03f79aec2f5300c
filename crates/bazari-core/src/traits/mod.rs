// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Bazari bot.
//!
//! The engine only ever talks to the messaging platform, the billing
//! provider, and the database through these seams, and all of them use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod billing;
pub mod gateway;
pub mod repository;
pub mod roles;

pub use billing::BillingProvider;
pub use gateway::MessagingGateway;
pub use repository::Repository;
pub use roles::RoleResolver;
