//! Start/help command handler

use teloxide::types::Message;

use crate::services::{SendOptions, ServiceFactory};
use crate::utils::errors::Result;

const HELP_TEXT: &str = "Hi, I'm XP Bot. Add me to a group and I will track users' message count (XP). Available commands:\n - /xp displays the XP count and rank of the user\n - /ranks displays the top 3";

/// Handle /start: the greeting only makes sense in a private chat.
pub async fn handle_start(msg: Message, services: &ServiceFactory) -> Result<()> {
    if !msg.chat.is_private() {
        return Ok(());
    }

    services
        .notifier
        .send_ephemeral(msg.chat.id, HELP_TEXT.to_string(), SendOptions::default(), None)
        .await
}
