//! Moderation gate
//!
//! Media from users below the XP threshold is deleted; the sender is told
//! privately, their score entry is removed and the group's deleted-message
//! counter is incremented. The same check suppresses XP for link-bearing
//! text.

use teloxide::prelude::*;
use teloxide::types::{ChatId, Message};

use crate::services::ledger::XpLedger;
use crate::services::notifier::{Notifier, SendOptions};
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;
use crate::utils::logging;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// Media permission gate
#[derive(Clone)]
pub struct ModerationGate {
    bot: Bot,
    ledger: XpLedger,
    notifier: Notifier,
    min_xp: i64,
}

impl ModerationGate {
    /// Create a new ModerationGate instance
    pub fn new(bot: Bot, ledger: XpLedger, notifier: Notifier, min_xp: i64) -> Self {
        Self {
            bot,
            ledger,
            notifier,
            min_xp,
        }
    }

    /// Check the sender's score against the threshold and enforce it.
    ///
    /// Private chats and senderless messages are always accepted. An
    /// unranked sender counts as score 0.
    pub async fn check_and_enforce(&self, msg: &Message) -> Result<Verdict> {
        if msg.chat.is_private() {
            return Ok(Verdict::Accepted);
        }
        let Some(user) = msg.from.as_ref() else {
            return Ok(Verdict::Accepted);
        };

        let score = self.ledger.score(msg.chat.id, user.id).await?.unwrap_or(0);
        if score >= self.min_xp {
            return Ok(Verdict::Accepted);
        }

        self.bot.delete_message(msg.chat.id, msg.id).await?;
        self.notifier
            .send_ephemeral(
                ChatId(user.id.0 as i64),
                denial_notice(msg.chat.title()),
                SendOptions::default(),
                None,
            )
            .await?;
        self.ledger.remove(msg.chat.id, user.id).await?;
        let deleted_total = self.ledger.bump_deleted_count(msg.chat.id).await?;
        logging::log_moderation_removal(msg.chat.id.0, user.id.0, deleted_total);

        Ok(Verdict::Rejected)
    }
}

fn denial_notice(chat_title: Option<&str>) -> String {
    let destination = match chat_title {
        Some(title) => format!(" to {}", escape_markdown(title)),
        None => String::new(),
    };
    format!(
        "Sorry, but you don't have enough XP to send that{}. Earn more XP by talking😉",
        destination
    )
}
