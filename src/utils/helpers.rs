//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Escape the characters legacy Telegram Markdown treats as formatting.
///
/// Every message this bot sends with a parse mode uses legacy `Markdown`,
/// so only `_`, `*`, `` ` `` and `[` need escaping.
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', r"\_")
        .replace('*', r"\*")
        .replace('`', r"\`")
        .replace('[', r"\[")
}
