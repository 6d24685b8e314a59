//! Outbound replies
//!
//! The notifier owns every message the bot sends. With `less_bot_spam`
//! enabled, replies and the commands that triggered them are deleted after
//! a short delay to keep group chats readable.

use std::time::Duration;

use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, MessageId, ParseMode, User};
use tracing::debug;

use crate::config::NotifierConfig;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;

/// Formatting switches for a single send.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    pub parse_mode: Option<ParseMode>,
    pub silent: bool,
}

impl SendOptions {
    /// Legacy Markdown without a notification ping.
    pub fn silent_markdown() -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            silent: true,
        }
    }
}

/// Reply service passed explicitly to handlers
#[derive(Clone)]
pub struct Notifier {
    bot: Bot,
    config: NotifierConfig,
}

impl Notifier {
    /// Create a new Notifier instance
    pub fn new(bot: Bot, config: NotifierConfig) -> Self {
        Self { bot, config }
    }

    /// Send a reply; with `less_bot_spam` on, the reply and (if given) the
    /// triggering message are deleted after the configured delay.
    pub async fn send_ephemeral(
        &self,
        chat: ChatId,
        text: String,
        options: SendOptions,
        trigger: Option<&Message>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(chat, text);
        if let Some(parse_mode) = options.parse_mode {
            request = request.parse_mode(parse_mode);
        }
        if options.silent {
            request = request.disable_notification(true);
        }
        let sent = request.await?;

        if self.config.less_bot_spam {
            let bot = self.bot.clone();
            let delay = Duration::from_secs(self.config.expiration_seconds);
            let trigger = trigger.map(|msg| (msg.chat.id, msg.id));
            let reply = (sent.chat.id, sent.id);

            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some((chat, id)) = trigger {
                    delete_quietly(&bot, chat, id).await;
                }
                delete_quietly(&bot, reply.0, reply.1).await;
            });
        }

        Ok(())
    }

    /// Prefix an escaped display name and send silently with Markdown.
    pub async fn mention(
        &self,
        chat: ChatId,
        user: &User,
        text: &str,
        trigger: Option<&Message>,
    ) -> Result<()> {
        let text = format!("{}{}", escape_markdown(&user.first_name), text);
        self.send_ephemeral(chat, text, SendOptions::silent_markdown(), trigger)
            .await
    }
}

/// Cleanup deletions are logged and dropped, never propagated.
async fn delete_quietly(bot: &Bot, chat: ChatId, message: MessageId) {
    if let Err(e) = bot.delete_message(chat, message).await {
        debug!(chat_id = chat.0, error = %e, "Failed to delete ephemeral message");
    }
}
