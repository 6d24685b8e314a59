//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Classification of inbound messages into `EventKind` variants
//! - Command handlers for bot commands
//! - Message handlers for activity and media

pub mod classify;
pub mod commands;
pub mod messages;

pub use classify::{Classifier, EventKind};

use teloxide::types::Message;

use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Route one classified message to exactly one handler.
pub async fn route(msg: Message, classifier: &Classifier, services: &ServiceFactory) -> Result<()> {
    match classifier.classify(&msg) {
        EventKind::TextActivity | EventKind::VoiceActivity | EventKind::StickerActivity => {
            messages::handle_activity(msg, services, classifier).await
        }
        EventKind::MediaForModeration => messages::handle_media(msg, services).await,
        EventKind::HelpCommand => commands::help::handle_start(msg, services).await,
        EventKind::RankCommand => commands::rank::handle_rank(msg, services).await,
        EventKind::TopRanksCommand => commands::top::handle_top_ranks(msg, services).await,
        EventKind::GrantCommand => commands::admin::handle_grant(msg, services).await,
        EventKind::StatsCommand => commands::admin::handle_stats(msg, services).await,
        EventKind::Unrecognized => Ok(()),
    }
}
