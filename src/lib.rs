//! XP Bot
//!
//! A Telegram bot that tracks per-group chat activity as experience points
//! (XP) and gates media-sharing privileges on them. This library provides
//! the configuration, services and handlers; the binary wires them into a
//! polling dispatcher.

pub mod config;
pub mod handlers;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use services::ServiceFactory;
pub use utils::errors::{Result, XpBotError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
