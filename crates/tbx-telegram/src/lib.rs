//! Telegram adapter (teloxide).
//!
//! Implements the `tbx-core` messaging and membership ports over the Telegram
//! Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        ChatMemberKind, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode,
        Recipient,
    },
};

use tokio::time::sleep;
use url::Url;

pub mod handlers;
pub mod router;

use tbx_core::{
    domain::{ChatId, MemberStatus, MessageId, MessageRef, UserId},
    errors::Error,
    ports::{InlineKeyboard, MembershipPort, MessagingPort},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    /// `@username` channels are addressed by name, numeric ids directly.
    fn recipient(channel: &str) -> Recipient {
        match channel.parse::<i64>() {
            Ok(id) => Recipient::Id(teloxide::types::ChatId(id)),
            Err(_) => Recipient::ChannelUsername(channel.to_string()),
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Messaging(format!("telegram error: {e}"))
    }

    fn parse_url(raw: &str) -> Result<Url> {
        Url::parse(raw).map_err(|e| Error::Messaging(format!("invalid url {raw}: {e}")))
    }

    fn markup(keyboard: InlineKeyboard) -> Result<InlineKeyboardMarkup> {
        let mut rows = Vec::new();
        for row in keyboard.rows {
            let mut buttons = Vec::new();
            for b in row {
                buttons.push(InlineKeyboardButton::url(b.label, Self::parse_url(&b.url)?));
            }
            rows.push(buttons);
        }
        Ok(InlineKeyboardMarkup::new(rows))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef> {
        let markup = keyboard.map(Self::markup).transpose()?;
        let msg = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html);
                if let Some(m) = markup.clone() {
                    req = req.reply_markup(m);
                }
                req
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_photo_url(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef> {
        let photo = Self::parse_url(photo_url)?;
        let markup = keyboard.map(Self::markup).transpose()?;
        let msg = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_photo(Self::tg_chat(chat_id), InputFile::url(photo.clone()));
                if !caption.is_empty() {
                    req = req.caption(caption.to_string()).parse_mode(ParseMode::Html);
                }
                if let Some(m) = markup.clone() {
                    req = req.reply_markup(m);
                }
                req
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_sticker(&self, chat_id: ChatId, file_id: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot.send_sticker(
                    Self::tg_chat(chat_id),
                    InputFile::file_id(file_id.to_string()),
                )
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()> {
        let markup = keyboard.map(Self::markup).transpose()?;
        self.with_retry(|| {
            let mut req = self
                .bot
                .edit_message_text(
                    Self::tg_chat(msg.chat_id),
                    Self::tg_msg_id(msg.message_id),
                    html.to_string(),
                )
                .parse_mode(ParseMode::Html);
            if let Some(m) = markup.clone() {
                req = req.reply_markup(m);
            }
            req
        })
        .await?;
        Ok(())
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
        })
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MembershipPort for TelegramMessenger {
    async fn member_status(&self, channel: &str, user: UserId) -> Result<MemberStatus> {
        let member = self
            .with_retry(|| {
                self.bot.get_chat_member(
                    Self::recipient(channel),
                    teloxide::types::UserId(user.0 as u64),
                )
            })
            .await?;

        Ok(match member.kind {
            ChatMemberKind::Owner(_) => MemberStatus::Creator,
            ChatMemberKind::Administrator(_) => MemberStatus::Administrator,
            ChatMemberKind::Member => MemberStatus::Member,
            ChatMemberKind::Restricted(_) => MemberStatus::Restricted,
            ChatMemberKind::Left => MemberStatus::Left,
            ChatMemberKind::Banned(_) => MemberStatus::Banned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_handles_usernames_and_numeric_ids() {
        match TelegramMessenger::recipient("@Opleech_WD") {
            Recipient::ChannelUsername(u) => assert_eq!(u, "@Opleech_WD"),
            other => panic!("expected username recipient, got {other:?}"),
        }
        match TelegramMessenger::recipient("-1001234567890") {
            Recipient::Id(id) => assert_eq!(id.0, -1001234567890),
            other => panic!("expected id recipient, got {other:?}"),
        }
    }

    #[test]
    fn markup_rejects_malformed_button_urls() {
        let kb = InlineKeyboard::one_per_row([("label", "not a url")]);
        assert!(TelegramMessenger::markup(kb).is_err());

        let kb = InlineKeyboard::one_per_row([("label", "tg://settings")]);
        assert!(TelegramMessenger::markup(kb).is_ok());
    }
}
