// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram gateway for the Bazari marketplace bot.
//!
//! Implements [`MessagingGateway`] over the Bot API via teloxide long
//! polling, and [`BillingProvider`] over Telegram Stars (XTR invoices and
//! `refundStarPayment`). Messages are sent with HTML parse mode; the
//! channel-post templates carry HTML anchors.

pub mod events;

use async_trait::async_trait;
use bazari_config::model::BotConfig;
use bazari_core::error::BazariError;
use bazari_core::traits::{BillingProvider, MessagingGateway};
use bazari_core::types::{
    ChargeId, ChatTarget, IncomingEvent, Invoice, Keyboard, MessageRef, UserId,
};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
    LabeledPrice, Message, MessageId, ParseMode, PreCheckoutQuery, Recipient,
};
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

/// Telegram gateway implementing [`MessagingGateway`] and [`BillingProvider`].
pub struct TelegramGateway {
    bot: Bot,
    inbound_rx: Mutex<mpsc::Receiver<IncomingEvent>>,
    inbound_tx: mpsc::Sender<IncomingEvent>,
    polling_handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl TelegramGateway {
    /// Creates the gateway. Requires `bot.token` to be set.
    pub fn new(config: &BotConfig) -> Result<Self, BazariError> {
        let token = config
            .token
            .as_deref()
            .ok_or_else(|| BazariError::Config("bot.token is required".into()))?;
        if token.is_empty() {
            return Err(BazariError::Config("bot.token cannot be empty".into()));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);
        Ok(Self {
            bot,
            inbound_rx: Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: Mutex::new(None),
        })
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Starts long polling; idempotent.
    pub async fn connect(&self) {
        let mut handle = self.polling_handle.lock().await;
        if handle.is_some() {
            return;
        }

        info!("starting Telegram long polling");
        let bot = self.bot.clone();
        let message_tx = self.inbound_tx.clone();
        let callback_tx = self.inbound_tx.clone();
        let checkout_tx = self.inbound_tx.clone();

        *handle = Some(tokio::spawn(async move {
            let handler = dptree::entry()
                .branch(Update::filter_message().endpoint(move |msg: Message| {
                    let tx = message_tx.clone();
                    async move {
                        if let Some(event) = events::message_event(&msg)
                            && tx.send(event).await.is_err()
                        {
                            warn!("inbound channel closed, dropping message");
                        }
                        respond(())
                    }
                }))
                .branch(
                    Update::filter_callback_query().endpoint(move |query: CallbackQuery| {
                        let tx = callback_tx.clone();
                        async move {
                            if let Some(event) = events::callback_event(&query)
                                && tx.send(event).await.is_err()
                            {
                                warn!("inbound channel closed, dropping callback");
                            }
                            respond(())
                        }
                    }),
                )
                .branch(Update::filter_pre_checkout_query().endpoint(
                    move |query: PreCheckoutQuery| {
                        let tx = checkout_tx.clone();
                        async move {
                            if tx.send(events::pre_checkout_event(&query)).await.is_err() {
                                warn!("inbound channel closed, dropping pre-checkout");
                            }
                            respond(())
                        }
                    },
                ));

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        }));
    }
}

fn recipient(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::User(user) => Recipient::Id(ChatId(user.0)),
        ChatTarget::Channel(id) => match id.parse::<i64>() {
            Ok(numeric) => Recipient::Id(ChatId(numeric)),
            Err(_) => Recipient::ChannelUsername(id.clone()),
        },
    }
}

fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.to_string()))
            .collect::<Vec<_>>()
    }))
}

fn gateway_err(context: &str, e: teloxide::RequestError) -> BazariError {
    BazariError::Gateway {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn next_event(&self) -> Result<IncomingEvent, BazariError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| BazariError::gateway("Telegram inbound channel closed"))
    }

    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError> {
        let mut request = self
            .bot
            .send_message(recipient(target), text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(markup(keyboard));
        }
        let sent = request
            .await
            .map_err(|e| gateway_err("failed to send message", e))?;
        Ok(MessageRef(i64::from(sent.id.0)))
    }

    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, BazariError> {
        let mut request = self
            .bot
            .send_photo(recipient(target), InputFile::file_id(FileId(photo.to_string())))
            .caption(caption)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(markup(keyboard));
        }
        let sent = request
            .await
            .map_err(|e| gateway_err("failed to send photo", e))?;
        Ok(MessageRef(i64::from(sent.id.0)))
    }

    async fn edit_text(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        text: &str,
    ) -> Result<(), BazariError> {
        let message = MessageId(message.0 as i32);
        let result = self
            .bot
            .edit_message_text(recipient(target), message, text)
            .parse_mode(ParseMode::Html)
            .await;
        match result {
            Ok(_) => Ok(()),
            // An identical body is not an error worth surfacing.
            Err(e) if e.to_string().contains("message is not modified") => Ok(()),
            Err(e) => Err(gateway_err("failed to edit message", e)),
        }
    }

    async fn edit_caption(
        &self,
        target: &ChatTarget,
        message: MessageRef,
        caption: &str,
    ) -> Result<(), BazariError> {
        let message = MessageId(message.0 as i32);
        let result = self
            .bot
            .edit_message_caption(recipient(target), message)
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("message is not modified") => Ok(()),
            Err(e) => Err(gateway_err("failed to edit caption", e)),
        }
    }

    async fn answer_callback(
        &self,
        ack_id: &str,
        text: Option<&str>,
        alert: bool,
    ) -> Result<(), BazariError> {
        let mut request = self
            .bot
            .answer_callback_query(teloxide::types::CallbackQueryId(ack_id.to_string()));
        if let Some(text) = text {
            request = request.text(text);
        }
        if alert {
            request = request.show_alert(true);
        }
        request
            .await
            .map_err(|e| gateway_err("failed to answer callback", e))?;
        Ok(())
    }

    async fn answer_pre_checkout(&self, query_id: &str, ok: bool) -> Result<(), BazariError> {
        self.bot
            .answer_pre_checkout_query(teloxide::types::PreCheckoutQueryId(query_id.to_string()), ok)
            .await
            .map_err(|e| gateway_err("failed to answer pre-checkout", e))?;
        Ok(())
    }
}

#[async_trait]
impl BillingProvider for TelegramGateway {
    async fn issue_invoice(&self, user: UserId, invoice: &Invoice) -> Result<(), BazariError> {
        // Stars invoices use XTR with an empty provider token and a single
        // price row.
        let prices = vec![LabeledPrice {
            label: invoice.title.clone(),
            amount: invoice.amount as u32,
        }];
        self.bot
            .send_invoice(
                Recipient::Id(ChatId(user.0)),
                invoice.title.clone(),
                invoice.description.clone(),
                invoice.payload.clone(),
                invoice.currency.clone(),
                prices,
            )
            .await
            .map_err(|e| BazariError::Billing(format!("failed to send invoice: {e}")))?;
        Ok(())
    }

    async fn reverse_charge(
        &self,
        user: UserId,
        charge: &ChargeId,
    ) -> Result<bool, BazariError> {
        let result = self
            .bot
            .refund_star_payment(
                teloxide::types::UserId(user.0 as u64),
                teloxide::types::TelegramTransactionId(charge.0.clone()),
            )
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                // Telegram rejects refunds of already-refunded or expired
                // charges with a client error; report as declined.
                warn!(charge = %charge, error = %e, "refund declined by Telegram");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazari_core::types::{Button, CallbackAction, MenuAction};

    fn bot_config(token: Option<&str>) -> BotConfig {
        BotConfig {
            token: token.map(str::to_string),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramGateway::new(&bot_config(None)).is_err());
        assert!(TelegramGateway::new(&bot_config(Some(""))).is_err());
        assert!(TelegramGateway::new(&bot_config(Some("123456:ABC"))).is_ok());
    }

    #[test]
    fn channel_targets_map_to_username_or_id() {
        assert_eq!(
            recipient(&ChatTarget::Channel("@gifts".to_string())),
            Recipient::ChannelUsername("@gifts".to_string())
        );
        assert_eq!(
            recipient(&ChatTarget::Channel("-1001234".to_string())),
            Recipient::Id(ChatId(-1001234))
        );
        assert_eq!(
            recipient(&ChatTarget::User(UserId(7))),
            Recipient::Id(ChatId(7))
        );
    }

    #[test]
    fn keyboards_carry_action_payloads() {
        let keyboard = Keyboard::row(vec![Button::new(
            "🛍 New ad",
            CallbackAction::Menu(MenuAction::NewAd),
        )]);
        let markup = markup(&keyboard);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].text, "🛍 New ad");
    }
}
