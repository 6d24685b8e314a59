//! Top ranks handler

use teloxide::types::Message;

use crate::services::{DisplayUser, SendOptions, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;
use crate::utils::logging;

/// Handle /ranks: show the top 3, or nothing at all while the group has
/// fewer than 3 ranked users.
pub async fn handle_top_ranks(msg: Message, services: &ServiceFactory) -> Result<()> {
    let chat = msg.chat.id;
    if let Some(user) = msg.from.as_ref() {
        logging::log_command(chat.0, user.id.0, "/ranks");
    }

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

    if services.ledger.total_ranked(chat).await? < 3 {
        return Ok(());
    }

    let top = services.ledger.top(chat, 3).await?;
    let mut entries = Vec::with_capacity(top.len());
    for (user_id, score) in top {
        let user = services.profiles.resolve_or(chat, user_id, "A ghost").await;
        entries.push((user, score));
    }

    services
        .notifier
        .send_ephemeral(
            chat,
            format_leaderboard(&entries),
            SendOptions::silent_markdown(),
            Some(&msg),
        )
        .await
}

fn format_leaderboard(entries: &[(DisplayUser, i64)]) -> String {
    const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

    let lines: Vec<String> = entries
        .iter()
        .take(MEDALS.len())
        .enumerate()
        .map(|(i, (user, score))| {
            format!("{} {}: {} XP", MEDALS[i], escape_markdown(&user.first_name), score)
        })
        .collect();

    lines.join(" \n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn entry(id: u64, name: &str, score: i64) -> (DisplayUser, i64) {
        (
            DisplayUser {
                id: UserId(id),
                first_name: name.to_string(),
            },
            score,
        )
    }

    #[test]
    fn test_leaderboard_has_three_medal_lines_descending() {
        let entries = vec![entry(1, "Bea", 25), entry(2, "Alice", 20), entry(3, "Cid", 16)];
        assert_eq!(
            format_leaderboard(&entries),
            "🥇 Bea: 25 XP \n🥈 Alice: 20 XP \n🥉 Cid: 16 XP"
        );
    }

    #[test]
    fn test_leaderboard_escapes_ghost_names() {
        let entries = vec![entry(1, "A_ghost", 9), entry(2, "B", 8), entry(3, "C", 7)];
        assert!(format_leaderboard(&entries).starts_with("🥇 A\\_ghost: 9 XP"));
    }
}
