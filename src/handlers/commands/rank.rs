//! Rank query handler

use teloxide::types::Message;

use crate::services::{DisplayUser, SendOptions, ServiceFactory, Standing};
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;
use crate::utils::logging;

/// Handle /xp.
///
/// Users below the media threshold only see their rank; at or above it the
/// reply also shows the score and either a crown or the XP gap to the next
/// distinguishable rank.
pub async fn handle_rank(msg: Message, services: &ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let chat = msg.chat.id;
    logging::log_command(chat.0, user.id.0, "/xp");

    if msg.chat.is_private() {
        return services
            .notifier
            .send_ephemeral(
                chat,
                "Sorry, you can't gain XP in private chats.".to_string(),
                SendOptions::default(),
                Some(&msg),
            )
            .await;
    }

    let Some(standing) = services.ledger.standing(chat, user.id).await? else {
        return services
            .notifier
            .mention(chat, &user, ", you're not ranked yet 👶", Some(&msg))
            .await;
    };

    let reply = if standing.score >= services.settings.xp.min_xp {
        match services.ledger.next_milestone(chat, standing.score).await? {
            None => crowned_line(&standing),
            Some((rival_id, rival_score)) => {
                let rival = services
                    .profiles
                    .resolve_or(chat, rival_id, "an unknown user")
                    .await;
                chasing_line(&standing, rival_score - standing.score, &rival)
            }
        }
    } else {
        rank_only_line(&standing)
    };

    services.notifier.mention(chat, &user, &reply, Some(&msg)).await
}

fn crowned_line(standing: &Standing) -> String {
    format!(
        ", you have {} XP  ◎  Rank {} / {}  ◎  👑",
        standing.score, standing.rank, standing.total
    )
}

fn chasing_line(standing: &Standing, gap: i64, rival: &DisplayUser) -> String {
    format!(
        ", you have {} XP  ◎  Rank {} / {}  ◎  {} to beat {}",
        standing.score,
        standing.rank,
        standing.total,
        gap,
        escape_markdown(&rival.first_name)
    )
}

fn rank_only_line(standing: &Standing) -> String {
    format!(", your rank is {} / {}.", standing.rank, standing.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    #[test]
    fn test_crowned_line_at_threshold_with_no_rival() {
        let standing = Standing {
            score: 15,
            rank: 1,
            total: 1,
        };
        assert_eq!(
            crowned_line(&standing),
            ", you have 15 XP  ◎  Rank 1 / 1  ◎  👑"
        );
    }

    #[test]
    fn test_chasing_line_shows_gap_and_escaped_rival() {
        let standing = Standing {
            score: 20,
            rank: 2,
            total: 2,
        };
        let rival = DisplayUser {
            id: UserId(7),
            first_name: "B_ob".to_string(),
        };
        assert_eq!(
            chasing_line(&standing, 5, &rival),
            ", you have 20 XP  ◎  Rank 2 / 2  ◎  5 to beat B\\_ob"
        );
    }

    #[test]
    fn test_rank_only_line_below_threshold() {
        let standing = Standing {
            score: 3,
            rank: 4,
            total: 9,
        };
        assert_eq!(rank_only_line(&standing), ", your rank is 4 / 9.");
    }
}
