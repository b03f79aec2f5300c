// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from Telegram updates to gateway-agnostic [`IncomingEvent`]s.
//!
//! Only private-chat traffic is mapped; group and channel messages are
//! dropped at this boundary. Unknown callback payloads and unsupported
//! message types map to `None` and are ignored upstream.

use std::str::FromStr;

use bazari_core::types::{
    CallbackAction, ChargeId, ChatTarget, Command, IncomingEvent, MessageOrigin, MessageRef,
    UserId, UserProfile,
};
use teloxide::types::{CallbackQuery, ChatKind, Message, PreCheckoutQuery, User};
use tracing::debug;

/// Snapshot the platform identity attached to an update.
pub fn profile_from(user: &User) -> UserProfile {
    UserProfile {
        id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        language_code: user.language_code.clone(),
        is_bot: user.is_bot,
        is_premium: user.is_premium,
    }
}

fn command_from(text: &str) -> Option<Command> {
    // Commands may carry a bot-name suffix ("/start@SomeBot").
    let head = text.split_whitespace().next()?;
    let head = head.split('@').next()?;
    match head {
        "/start" => Some(Command::Start),
        "/supportadmin" => Some(Command::SupportAdmin),
        "/superadmin" => Some(Command::SuperAdmin),
        _ => None,
    }
}

/// Map a private-chat message to an event. Returns `None` for group
/// traffic, messages without a sender, and unsupported content.
pub fn message_event(msg: &Message) -> Option<IncomingEvent> {
    if !matches!(msg.chat.kind, ChatKind::Private(_)) {
        return None;
    }
    let user = profile_from(msg.from.as_ref()?);

    if let Some(payment) = msg.successful_payment() {
        return Some(IncomingEvent::PaymentSucceeded {
            user,
            charge_id: ChargeId(payment.telegram_payment_charge_id.to_string()),
            amount: i64::from(payment.total_amount),
        });
    }

    if let Some(text) = msg.text() {
        return Some(match command_from(text) {
            Some(command) => IncomingEvent::Command { user, command },
            None => IncomingEvent::Text {
                user,
                text: text.to_string(),
            },
        });
    }

    if let Some(photos) = msg.photo() {
        // Telegram sends multiple sizes; the last one is the largest.
        let photo = photos.last()?;
        return Some(IncomingEvent::Photo {
            user,
            photo: photo.file.id.to_string(),
            caption: msg.caption().map(str::to_string),
        });
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
    None
}

/// Map a button press to an event. Unknown payloads return `None`.
pub fn callback_event(query: &CallbackQuery) -> Option<IncomingEvent> {
    let data = query.data.as_deref()?;
    let action = match CallbackAction::from_str(data) {
        Ok(action) => action,
        Err(_) => {
            debug!(data, "ignoring unknown callback payload");
            return None;
        }
    };
    let origin = query.message.as_ref().map(|message| MessageOrigin {
        chat: ChatTarget::Channel(message.chat().id.0.to_string()),
        message: MessageRef(i64::from(message.id().0)),
    });
    Some(IncomingEvent::Callback {
        user: profile_from(&query.from),
        ack_id: query.id.to_string(),
        action,
        origin,
    })
}

pub fn pre_checkout_event(query: &PreCheckoutQuery) -> IncomingEvent {
    IncomingEvent::PreCheckout {
        user: profile_from(&query.from),
        query_id: query.id.to_string(),
    }
}
