// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging gateway trait for the bot's platform integration.

use async_trait::async_trait;

use crate::error::BazariError;
use crate::types::{ChatTarget, IncomingEvent, Keyboard, MessageRef};

/// Adapter for the messaging platform the bot lives on.
///
/// The gateway delivers and edits rich messages (text, keyboard, photo) to
/// users, admins, and the public channel, and surfaces incoming platform
/// events to the engine. All failures map to [`BazariError::Gateway`]; the
/// caller decides whether a failed send is critical or best-effort.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Blocks until the next inbound event is available.
    async fn next_event(&self) -> Result<IncomingEvent, BazariError>;

    /// Sends a text message, returning the delivered message's id.
    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError>;

    /// Sends a photo with a caption, returning the delivered message's id.
    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError>;

    /// Replaces the text of an already delivered text message.
    async fn edit_text(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        text: &str,
    ) -> Result<(), BazariError>;

    /// Replaces the caption of an already delivered photo message.
    async fn edit_caption(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        caption: &str,
    ) -> Result<(), BazariError>;

    /// Acknowledges a button callback, optionally with a toast or alert.
    async fn answer_callback(
        &self,
        ack_id: &str,
        text: Option<&str>,
        alert: bool,
    ) -> Result<(), BazariError>;

    /// Confirms or denies a pre-checkout query.
    async fn answer_pre_checkout(&self, query_id: &str, ok: bool) -> Result<(), BazariError>;
}
