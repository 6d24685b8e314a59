//! Error handling for the XP bot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the XP bot
#[derive(Error, Debug)]
pub enum XpBotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for XP bot operations
pub type Result<T> = std::result::Result<T, XpBotError>;
