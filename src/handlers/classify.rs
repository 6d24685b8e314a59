//! Inbound event classification
//!
//! Every message is reduced to one `EventKind` before any handler runs, so
//! routing is a single match instead of scattered shape checks.

use regex::Regex;
use teloxide::types::Message;

use crate::utils::errors::Result;

/// What an inbound message is, as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TextActivity,
    VoiceActivity,
    StickerActivity,
    MediaForModeration,
    HelpCommand,
    RankCommand,
    TopRanksCommand,
    GrantCommand,
    StatsCommand,
    Unrecognized,
}

/// Compiled command patterns.
///
/// Commands may carry an `@botname` qualifier, which is ignored for
/// routing. The query commands match anywhere in the text; the admin
/// commands must lead it.
pub struct Classifier {
    start: Regex,
    xp: Regex,
    ranks: Regex,
    grant: Regex,
    stats: Regex,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            start: Regex::new(r"/start")?,
            xp: Regex::new(r"/xp(@\w+)?")?,
            ranks: Regex::new(r"/ranks(@\w+)?")?,
            grant: Regex::new(r"^/givexp(@\w+)?(\s|$)")?,
            stats: Regex::new(r"^/stats(@\w+)?(\s|$)")?,
        })
    }

    /// Classify one inbound message.
    pub fn classify(&self, msg: &Message) -> EventKind {
        if let Some(text) = msg.text() {
            return self.classify_text(text);
        }
        if msg.voice().is_some() {
            return EventKind::VoiceActivity;
        }
        if msg.sticker().is_some() {
            return EventKind::StickerActivity;
        }
        if msg.photo().is_some() || msg.video().is_some() || msg.document().is_some() {
            return EventKind::MediaForModeration;
        }

        EventKind::Unrecognized
    }

    fn classify_text(&self, text: &str) -> EventKind {
        if self.grant.is_match(text) {
            return EventKind::GrantCommand;
        }
        if self.stats.is_match(text) {
            return EventKind::StatsCommand;
        }
        if self.start.is_match(text) {
            return EventKind::HelpCommand;
        }
        if self.xp.is_match(text) {
            return EventKind::RankCommand;
        }
        if self.ranks.is_match(text) {
            return EventKind::TopRanksCommand;
        }

        EventKind::TextActivity
    }

    /// True when a text matches the XP query pattern; such messages never
    /// count as activity.
    pub fn is_rank_query(&self, text: &str) -> bool {
        self.xp.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    fn message(json: serde_json::Value) -> Message {
        serde_json::from_value(json).unwrap()
    }

    fn group_message(content: serde_json::Value) -> Message {
        let mut base = serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": -1001234, "type": "supergroup", "title": "Test Group"},
            "from": {"id": 42, "is_bot": false, "first_name": "Alice"}
        });
        base.as_object_mut()
            .unwrap()
            .extend(content.as_object().unwrap().clone());
        message(base)
    }

    fn group_text(text: &str) -> Message {
        group_message(serde_json::json!({ "text": text }))
    }

    #[test]
    fn test_plain_text_is_activity() {
        assert_matches!(
            classifier().classify(&group_text("hello there")),
            EventKind::TextActivity
        );
    }

    #[test]
    fn test_commands_take_precedence_over_activity() {
        let c = classifier();
        assert_matches!(c.classify(&group_text("/start")), EventKind::HelpCommand);
        assert_matches!(c.classify(&group_text("/xp")), EventKind::RankCommand);
        assert_matches!(c.classify(&group_text("/ranks")), EventKind::TopRanksCommand);
    }

    #[test]
    fn test_mention_qualifier_is_ignored() {
        let c = classifier();
        assert_matches!(c.classify(&group_text("/xp@xp_bot")), EventKind::RankCommand);
        assert_matches!(
            c.classify(&group_text("/ranks@xp_bot")),
            EventKind::TopRanksCommand
        );
        assert_matches!(
            c.classify(&group_text("/givexp@xp_bot 5")),
            EventKind::GrantCommand
        );
    }

    #[test]
    fn test_xp_query_matches_anywhere_in_text() {
        // Such messages route to the rank handler and never earn XP.
        let c = classifier();
        assert_matches!(
            c.classify(&group_text("what's my /xp?")),
            EventKind::RankCommand
        );
        assert!(c.is_rank_query("what's my /xp?"));
        assert!(!c.is_rank_query("an expedition"));
    }

    #[test]
    fn test_admin_commands_are_anchored() {
        let c = classifier();
        assert_matches!(c.classify(&group_text("/givexp 5")), EventKind::GrantCommand);
        assert_matches!(c.classify(&group_text("/stats")), EventKind::StatsCommand);
        assert_matches!(
            c.classify(&group_text("/givexpfoo")),
            EventKind::TextActivity
        );
        assert_matches!(
            c.classify(&group_text("please run /stats")),
            EventKind::TextActivity
        );
    }

    #[test]
    fn test_voice_and_sticker_are_activity() {
        let c = classifier();
        let voice = group_message(serde_json::json!({
            "voice": {"file_id": "v", "file_unique_id": "vu", "duration": 2, "mime_type": "audio/ogg"}
        }));
        assert_matches!(c.classify(&voice), EventKind::VoiceActivity);

        let sticker = group_message(serde_json::json!({
            "sticker": {
                "file_id": "s",
                "file_unique_id": "su",
                "type": "regular",
                "width": 512,
                "height": 512,
                "is_animated": false,
                "is_video": false
            }
        }));
        assert_matches!(c.classify(&sticker), EventKind::StickerActivity);
    }

    #[test]
    fn test_media_goes_to_moderation() {
        let c = classifier();
        let photo = group_message(serde_json::json!({
            "photo": [{"file_id": "p", "file_unique_id": "pu", "width": 90, "height": 90}]
        }));
        assert_matches!(c.classify(&photo), EventKind::MediaForModeration);

        let video = group_message(serde_json::json!({
            "video": {"file_id": "f", "file_unique_id": "fu", "width": 1, "height": 1, "duration": 1, "mime_type": "video/mp4"}
        }));
        assert_matches!(c.classify(&video), EventKind::MediaForModeration);

        let document = group_message(serde_json::json!({
            "document": {"file_id": "d", "file_unique_id": "du"}
        }));
        assert_matches!(c.classify(&document), EventKind::MediaForModeration);
    }

    #[test]
    fn test_other_content_is_unrecognized() {
        let location = group_message(serde_json::json!({
            "location": {"longitude": 0.0, "latitude": 0.0}
        }));
        assert_matches!(classifier().classify(&location), EventKind::Unrecognized);
    }
}
