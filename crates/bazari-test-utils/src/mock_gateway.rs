// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging gateway for deterministic testing.
//!
//! `MockGateway` implements `MessagingGateway` with injectable inbound
//! events and captured outbound messages, edits, and acknowledgements for
//! assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use bazari_core::error::BazariError;
use bazari_core::traits::MessagingGateway;
use bazari_core::types::{ChatTarget, IncomingEvent, Keyboard, MessageRef};

/// One captured outbound message.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub target: ChatTarget,
    pub body: String,
    pub keyboard: Option<Keyboard>,
    /// Media reference when the message was a photo.
    pub photo: Option<String>,
    pub message: MessageRef,
}

/// One captured message edit.
#[derive(Debug, Clone)]
pub struct EditedMessage {
    pub target: ChatTarget,
    pub message: MessageRef,
    pub body: String,
    pub caption: bool,
}

/// One captured callback acknowledgement.
#[derive(Debug, Clone)]
pub struct Ack {
    pub ack_id: String,
    pub text: Option<String>,
    pub alert: bool,
}

/// A mock messaging gateway for testing.
///
/// Events injected via `inject()` are returned by `next_event()` in order;
/// everything the engine sends is captured for assertion.
pub struct MockGateway {
    inbound: Arc<Mutex<VecDeque<IncomingEvent>>>,
    sent: Arc<Mutex<Vec<SentMessage>>>,
    edits: Arc<Mutex<Vec<EditedMessage>>>,
    acks: Arc<Mutex<Vec<Ack>>>,
    pre_checkout_answers: Arc<Mutex<Vec<(String, bool)>>>,
    notify: Arc<Notify>,
    next_id: AtomicI64,
    fail_channel_sends: AtomicBool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            edits: Arc::new(Mutex::new(Vec::new())),
            acks: Arc::new(Mutex::new(Vec::new())),
            pre_checkout_answers: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            next_id: AtomicI64::new(1),
            fail_channel_sends: AtomicBool::new(false),
        }
    }

    /// Inject an inbound event; the next `next_event()` call returns it.
    pub async fn inject(&self, event: IncomingEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Make every send to a channel target fail, to exercise the
    /// publish-failure paths.
    pub fn fail_channel_sends(&self, fail: bool) {
        self.fail_channel_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Captured messages delivered to the given target.
    pub async fn sent_to(&self, target: &ChatTarget) -> Vec<SentMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| &m.target == target)
            .cloned()
            .collect()
    }

    pub async fn edits(&self) -> Vec<EditedMessage> {
        self.edits.lock().await.clone()
    }

    pub async fn acks(&self) -> Vec<Ack> {
        self.acks.lock().await.clone()
    }

    pub async fn pre_checkout_answers(&self) -> Vec<(String, bool)> {
        self.pre_checkout_answers.lock().await.clone()
    }

    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    fn allocate_id(&self) -> MessageRef {
        MessageRef(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn check_target(&self, target: &ChatTarget) -> Result<(), BazariError> {
        if matches!(target, ChatTarget::Channel(_))
            && self.fail_channel_sends.load(Ordering::SeqCst)
        {
            return Err(BazariError::gateway("channel send failed (scripted)"));
        }
        Ok(())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn next_event(&self) -> Result<IncomingEvent, BazariError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            self.notify.notified().await;
        }
    }

    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError> {
        self.check_target(target)?;
        let message = self.allocate_id();
        self.sent.lock().await.push(SentMessage {
            target: target.clone(),
            body: text.to_string(),
            keyboard: keyboard.cloned(),
            photo: None,
            message,
        });
        Ok(message)
    }

    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError> {
        self.check_target(target)?;
        let message = self.allocate_id();
        self.sent.lock().await.push(SentMessage {
            target: target.clone(),
            body: caption.to_string(),
            keyboard: keyboard.cloned(),
            photo: Some(photo.to_string()),
            message,
        });
        Ok(message)
    }

    async fn edit_text(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        text: &str,
    ) -> Result<(), BazariError> {
        self.check_target(target)?;
        self.edits.lock().await.push(EditedMessage {
            target: target.clone(),
            message,
            body: text.to_string(),
            caption: false,
        });
        Ok(())
    }

    async fn edit_caption(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        caption: &str,
    ) -> Result<(), BazariError> {
        self.check_target(target)?;
        self.edits.lock().await.push(EditedMessage {
            target: target.clone(),
            message,
            body: caption.to_string(),
            caption: true,
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        ack_id: &str,
        text: Option<&str>,
        alert: bool,
    ) -> Result<(), BazariError> {
        self.acks.lock().await.push(Ack {
            ack_id: ack_id.to_string(),
            text: text.map(str::to_string),
            alert,
        });
        Ok(())
    }

    async fn answer_pre_checkout(&self, query_id: &str, ok: bool) -> Result<(), BazariError> {
        self.pre_checkout_answers
            .lock()
            .await
            .push((query_id.to_string(), ok));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazari_core::types::UserId;

    #[tokio::test]
    async fn next_event_returns_injected_in_order() {
        let gateway = MockGateway::new();
        gateway
            .inject(IncomingEvent::Text {
                user: crate::profile(1, "a"),
                text: "first".to_string(),
            })
            .await;
        gateway
            .inject(IncomingEvent::Text {
                user: crate::profile(1, "a"),
                text: "second".to_string(),
            })
            .await;

        let first = gateway.next_event().await.unwrap();
        let second = gateway.next_event().await.unwrap();
        match (first, second) {
            (IncomingEvent::Text { text: t1, .. }, IncomingEvent::Text { text: t2, .. }) => {
                assert_eq!(t1, "first");
                assert_eq!(t2, "second");
            }
            _ => panic!("expected text events"),
        }
    }

    #[tokio::test]
    async fn sends_are_captured_with_fresh_ids() {
        let gateway = MockGateway::new();
        let target = ChatTarget::User(UserId(5));
        let a = gateway.send_text(&target, "one", None).await.unwrap();
        let b = gateway.send_text(&target, "two", None).await.unwrap();
        assert_ne!(a, b);

        let sent = gateway.sent_to(&target).await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, "one");
        assert!(sent[0].photo.is_none());
    }

    #[tokio::test]
    async fn scripted_channel_failure_only_hits_channels() {
        let gateway = MockGateway::new();
        gateway.fail_channel_sends(true);

        let channel = ChatTarget::Channel("@c".to_string());
        assert!(gateway.send_text(&channel, "x", None).await.is_err());
        assert!(
            gateway
                .send_text(&ChatTarget::User(UserId(1)), "x", None)
                .await
                .is_ok()
        );
    }
}
