//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the XP bot.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize logging based on configuration.
///
/// With a `file_path` configured, a daily-rolling file layer is added next
/// to stdout; the returned guard must stay alive for the file writer to
/// flush.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::new(&config.level);

    if config.file_path.is_empty() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
            .init();
        info!("Logging initialized with level: {}", config.level);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&config.file_path, "xpbot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Some(guard)
}

/// Log an XP award with structured data
pub fn log_award(group_id: i64, user_id: u64, score: i64) {
    debug!(
        group_id = group_id,
        user_id = user_id,
        score = score,
        "XP awarded"
    );
}

/// Log a moderation removal
pub fn log_moderation_removal(group_id: i64, user_id: u64, deleted_total: i64) {
    info!(
        group_id = group_id,
        user_id = user_id,
        deleted_total = deleted_total,
        "Message removed for insufficient XP"
    );
}

/// Log a command invocation
pub fn log_command(group_id: i64, user_id: u64, command: &str) {
    debug!(
        group_id = group_id,
        user_id = user_id,
        command = command,
        "Command received"
    );
}

/// Log an admin XP grant
pub fn log_grant(group_id: i64, admin_id: u64, target_id: u64, amount: i64) {
    warn!(
        group_id = group_id,
        admin_id = admin_id,
        target_id = target_id,
        amount = amount,
        "XP granted by admin"
    );
}
