//! Activity and media handlers
//!
//! Qualifying activity (text, voice, stickers) earns XP; photos, videos and
//! documents go through the moderation gate instead.

use teloxide::types::{Message, MessageEntityKind};

use crate::handlers::classify::Classifier;
use crate::services::{ServiceFactory, Verdict};
use crate::utils::errors::Result;
use crate::utils::logging;

/// Handle a qualifying activity message.
///
/// No XP is awarded for private chats, XP-query texts, rate-limited users,
/// or link-bearing texts the moderation gate rejects.
pub async fn handle_activity(
    msg: Message,
    services: &ServiceFactory,
    classifier: &Classifier,
) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    if msg.chat.is_private() {
        return Ok(());
    }
    if msg
        .text()
        .map(|text| classifier.is_rank_query(text))
        .unwrap_or(false)
    {
        return Ok(());
    }

    if has_embedded_link(&msg)
        && services.moderation.check_and_enforce(&msg).await? == Verdict::Rejected
    {
        return Ok(());
    }

    if !services.rate_limiter.try_acquire(msg.chat.id, user.id).await? {
        return Ok(());
    }

    let score = services.ledger.increment(msg.chat.id, user.id).await?;
    logging::log_award(msg.chat.id.0, user.id.0, score);

    Ok(())
}

/// Run a media message through the moderation gate.
pub async fn handle_media(msg: Message, services: &ServiceFactory) -> Result<()> {
    services.moderation.check_and_enforce(&msg).await?;
    Ok(())
}

fn has_embedded_link(msg: &Message) -> bool {
    msg.entities()
        .map(|entities| {
            entities
                .iter()
                .any(|e| matches!(e.kind, MessageEntityKind::TextLink { .. }))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: serde_json::Value) -> Message {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_embedded_link_detection() {
        let linked = message(serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": -1001234, "type": "supergroup", "title": "Test Group"},
            "from": {"id": 42, "is_bot": false, "first_name": "Alice"},
            "text": "click here",
            "entities": [
                {"type": "text_link", "offset": 0, "length": 5, "url": "https://example.com/"}
            ]
        }));
        assert!(has_embedded_link(&linked));
    }

    #[test]
    fn test_other_entities_are_not_links() {
        let bold = message(serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": -1001234, "type": "supergroup", "title": "Test Group"},
            "from": {"id": 42, "is_bot": false, "first_name": "Alice"},
            "text": "loud text",
            "entities": [{"type": "bold", "offset": 0, "length": 4}]
        }));
        assert!(!has_embedded_link(&bold));
    }
}
