//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub redis: RedisConfig,
    pub xp: XpConfig,
    pub notifier: NotifierConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Users allowed to run /givexp and /stats.
    pub admin_ids: Vec<u64>,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// XP rules configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct XpConfig {
    /// Minimum XP required to share media in a group.
    pub min_xp: i64,
    /// Award cooldown window in seconds; 0 disables rate limiting.
    pub rate_limit_seconds: u64,
}

/// Reply behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Delete bot replies (and the commands that triggered them) after a delay.
    pub less_bot_spam: bool,
    /// Lifetime of an ephemeral reply in seconds.
    pub expiration_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files; empty logs to stdout only.
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("bot.token", "")?
            .set_default("bot.admin_ids", Vec::<i64>::new())?
            .set_default("redis.url", "redis://localhost:6379")?
            .set_default("redis.prefix", "XPBOT_")?
            .set_default("xp.min_xp", 15)?
            .set_default("xp.rate_limit_seconds", 15)?
            .set_default("notifier.less_bot_spam", false)?
            .set_default("notifier.expiration_seconds", 3)?
            .set_default("logging.level", "info")?
            .set_default("logging.file_path", "")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("XPBOT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::utils::errors::Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "XPBOT_".to_string(),
            },
            xp: XpConfig {
                min_xp: 15,
                rate_limit_seconds: 15,
            },
            notifier: NotifierConfig {
                less_bot_spam: false,
                expiration_seconds: 3,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_match_documented_values() {
        std::env::remove_var("XPBOT_BOT__TOKEN");
        let settings = Settings::new().unwrap();

        assert_eq!(settings.redis.prefix, "XPBOT_");
        assert_eq!(settings.xp.min_xp, 15);
        assert_eq!(settings.xp.rate_limit_seconds, 15);
        assert!(!settings.notifier.less_bot_spam);
        assert_eq!(settings.notifier.expiration_seconds, 3);
        assert_eq!(settings.logging.level, "info");

        // No token configured: startup must refuse to proceed.
        assert!(settings.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        std::env::set_var("XPBOT_BOT__TOKEN", "123:abc");
        std::env::set_var("XPBOT_XP__MIN_XP", "30");
        std::env::set_var("XPBOT_NOTIFIER__LESS_BOT_SPAM", "true");

        let settings = Settings::new().unwrap();

        std::env::remove_var("XPBOT_BOT__TOKEN");
        std::env::remove_var("XPBOT_XP__MIN_XP");
        std::env::remove_var("XPBOT_NOTIFIER__LESS_BOT_SPAM");

        assert_eq!(settings.bot.token, "123:abc");
        assert_eq!(settings.xp.min_xp, 30);
        assert!(settings.notifier.less_bot_spam);
        assert!(settings.validate().is_ok());
    }
}
