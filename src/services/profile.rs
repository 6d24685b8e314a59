//! Best-effort profile lookups
//!
//! Rival and leaderboard lines show display names resolved through
//! `getChatMember`; a failed lookup is substituted with a placeholder
//! identity and never surfaced to the user.

use teloxide::prelude::*;
use teloxide::types::{ChatId, UserId};
use tracing::debug;

/// Display identity for leaderboard and rival lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUser {
    pub id: UserId,
    pub first_name: String,
}

/// Chat member lookup service
#[derive(Clone)]
pub struct ProfileResolver {
    bot: Bot,
}

impl ProfileResolver {
    /// Create a new ProfileResolver instance
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Resolve a group member's display identity, substituting `fallback`
    /// (with the placeholder id 0) when the lookup fails.
    pub async fn resolve_or(&self, chat: ChatId, user: UserId, fallback: &str) -> DisplayUser {
        match self.bot.get_chat_member(chat, user).await {
            Ok(member) => DisplayUser {
                id: member.user.id,
                first_name: member.user.first_name,
            },
            Err(e) => {
                debug!(
                    chat_id = chat.0,
                    user_id = user.0,
                    error = %e,
                    "Profile lookup failed"
                );
                DisplayUser {
                    id: UserId(0),
                    first_name: fallback.to_string(),
                }
            }
        }
    }
}
