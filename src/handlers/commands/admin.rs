//! Admin command handlers
//!
//! `/givexp` grants XP to the author of the replied-to message; `/stats`
//! reports the group's counters. Both are limited to configured admin ids.

use teloxide::types::Message;

use crate::services::{SendOptions, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::logging;

const GRANT_USAGE: &str = "Usage: reply to a message with /givexp <amount>";

/// Handle /givexp.
pub async fn handle_grant(msg: Message, services: &ServiceFactory) -> Result<()> {
    let Some(admin) = msg.from.clone() else {
        return Ok(());
    };
    let chat = msg.chat.id;

    if msg.chat.is_private() {
        return services
            .notifier
            .send_ephemeral(
                chat,
                "Please add me to a group.".to_string(),
                SendOptions::default(),
                None,
            )
            .await;
    }
    if !services.settings.bot.admin_ids.contains(&admin.id.0) {
        return services
            .notifier
            .mention(chat, &admin, ", you're not allowed to grant XP.", Some(&msg))
            .await;
    }

    let amount = msg.text().and_then(parse_amount);
    let target = msg.reply_to_message().and_then(|reply| reply.from.clone());
    let (Some(amount), Some(target)) = (amount, target) else {
        return services
            .notifier
            .send_ephemeral(chat, GRANT_USAGE.to_string(), SendOptions::default(), Some(&msg))
            .await;
    };

    let score = services.ledger.grant(chat, target.id, amount).await?;
    logging::log_grant(chat.0, admin.id.0, target.id.0, amount);

    services
        .notifier
        .mention(
            chat,
            &target,
            &format!(", you have been granted {} XP  ◎  now {} XP", amount, score),
            Some(&msg),
        )
        .await
}

/// Handle /stats: ranked-user and deleted-message counters for the group.
pub async fn handle_stats(msg: Message, services: &ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let chat = msg.chat.id;

    if msg.chat.is_private() || !services.settings.bot.admin_ids.contains(&user.id.0) {
        return Ok(());
    }

    let ranked = services.ledger.total_ranked(chat).await?;
    let deleted = services.ledger.deleted_count(chat).await?;

    services
        .notifier
        .send_ephemeral(
            chat,
            format!("Ranked users: {}\nMessages deleted: {}", ranked, deleted),
            SendOptions {
                silent: true,
                ..Default::default()
            },
            Some(&msg),
        )
        .await
}

fn parse_amount(text: &str) -> Option<i64> {
    let mut parts = text.split_whitespace();
    let _command = parts.next()?;
    parts.next()?.parse().ok()
}
