//! Award cooldown flags
//!
//! A short-lived Redis key per (group, user); while it exists, further XP
//! awards for that pair are blocked. The flag is written with a single
//! conditional `SET NX EX`, so two near-simultaneous awards cannot both
//! acquire it.

use redis::{AsyncCommands, ExistenceCheck, SetExpiry, SetOptions};
use teloxide::types::{ChatId, UserId};
use tracing::debug;

use crate::config::{RedisConfig, XpConfig};
use crate::utils::errors::Result;

/// Cooldown tracker for XP awards
#[derive(Clone)]
pub struct RateLimiter {
    client: redis::Client,
    prefix: String,
    window_seconds: u64,
}

impl RateLimiter {
    /// Create a new RateLimiter instance
    pub fn new(redis: &RedisConfig, xp: &XpConfig) -> Result<Self> {
        let client = redis::Client::open(redis.url.as_str())?;

        Ok(Self {
            client,
            prefix: redis.prefix.clone(),
            window_seconds: xp.rate_limit_seconds,
        })
    }

    fn flag_key(&self, group: ChatId, user: UserId) -> String {
        format!("{}{}_TGUSER_{}", self.prefix, group.0, user.0)
    }

    /// Try to take the award slot for (group, user).
    ///
    /// A window of zero disables limiting entirely. Returns `false` while a
    /// previous award's flag is still live.
    pub async fn try_acquire(&self, group: ChatId, user: UserId) -> Result<bool> {
        if self.window_seconds == 0 {
            return Ok(true);
        }

        let mut conn = self.client.get_async_connection().await?;
        let options = SetOptions::default()
            .conditional_set(ExistenceCheck::NX)
            .with_expiration(SetExpiry::EX(self.window_seconds as usize));

        let acquired: bool = conn.set_options(self.flag_key(group, user), 1, options).await?;
        if !acquired {
            debug!(
                group_id = group.0,
                user_id = user.0,
                "Award blocked by cooldown"
            );
        }

        Ok(acquired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_seconds: u64) -> RateLimiter {
        RateLimiter::new(
            &RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "XPBOT_".to_string(),
            },
            &XpConfig {
                min_xp: 15,
                rate_limit_seconds: window_seconds,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_flag_key_nests_user_under_group() {
        assert_eq!(
            limiter(15).flag_key(ChatId(-1001234), UserId(42)),
            "XPBOT_-1001234_TGUSER_42"
        );
    }

    #[tokio::test]
    async fn test_zero_window_disables_limiting() {
        // Never touches the connection, so no live Redis is needed.
        let limiter = limiter(0);
        assert!(limiter.try_acquire(ChatId(-1), UserId(1)).await.unwrap());
        assert!(limiter.try_acquire(ChatId(-1), UserId(1)).await.unwrap());
    }
}
