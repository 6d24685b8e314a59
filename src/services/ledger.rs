//! XP ledger backed by Redis sorted sets
//!
//! One sorted set per group, keyed by the configured prefix plus the chat
//! id; members are decimal user ids, scores are cumulative XP. A plain
//! integer counter per group tracks messages removed by the moderation gate.

use redis::AsyncCommands;
use teloxide::types::{ChatId, UserId};
use tracing::debug;

use crate::config::RedisConfig;
use crate::utils::errors::Result;

/// A user's position within a group's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub score: i64,
    /// 1-based, descending by score.
    pub rank: i64,
    pub total: i64,
}

/// Score ledger for all groups the bot is in
#[derive(Clone)]
pub struct XpLedger {
    client: redis::Client,
    prefix: String,
}

impl XpLedger {
    /// Create a new XpLedger instance
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;

        Ok(Self {
            client,
            prefix: config.prefix.clone(),
        })
    }

    /// Get Redis connection
    async fn connection(&self) -> Result<redis::aio::Connection> {
        Ok(self.client.get_async_connection().await?)
    }

    fn group_key(&self, group: ChatId) -> String {
        format!("{}{}", self.prefix, group.0)
    }

    fn deleted_count_key(&self, group: ChatId) -> String {
        format!("{}{}_DELETED_COUNT", self.prefix, group.0)
    }

    /// Verify the store is reachable.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    /// Award one XP for a qualifying activity; returns the new score.
    pub async fn increment(&self, group: ChatId, user: UserId) -> Result<i64> {
        self.grant(group, user, 1).await
    }

    /// Add an arbitrary amount of XP; returns the new score.
    pub async fn grant(&self, group: ChatId, user: UserId, amount: i64) -> Result<i64> {
        let mut conn = self.connection().await?;
        let score: i64 = conn.zincr(self.group_key(group), user.0, amount).await?;

        debug!(
            group_id = group.0,
            user_id = user.0,
            score = score,
            "Score incremented"
        );
        Ok(score)
    }

    /// Current score, `None` if the user is unranked.
    pub async fn score(&self, group: ChatId, user: UserId) -> Result<Option<i64>> {
        let mut conn = self.connection().await?;
        Ok(conn.zscore(self.group_key(group), user.0).await?)
    }

    /// Score, 1-based descending rank and total entry count, fetched in one
    /// pipeline. `None` if the user is unranked.
    pub async fn standing(&self, group: ChatId, user: UserId) -> Result<Option<Standing>> {
        let mut conn = self.connection().await?;
        let key = self.group_key(group);

        let (score, rank, total): (Option<i64>, Option<i64>, i64) = redis::pipe()
            .zscore(&key, user.0)
            .zrevrank(&key, user.0)
            .zcard(&key)
            .query_async(&mut conn)
            .await?;

        match (score, rank) {
            (Some(score), Some(rank)) => Ok(Some(Standing {
                score,
                rank: rank + 1,
                total,
            })),
            _ => Ok(None),
        }
    }

    /// Number of ranked users in a group.
    pub async fn total_ranked(&self, group: ChatId) -> Result<i64> {
        let mut conn = self.connection().await?;
        Ok(conn.zcard(self.group_key(group)).await?)
    }

    /// The entry with the smallest score strictly greater than `score + 1`,
    /// if any. Backs the "N to beat <user>" display.
    pub async fn next_milestone(
        &self,
        group: ChatId,
        score: i64,
    ) -> Result<Option<(UserId, i64)>> {
        let mut conn = self.connection().await?;
        let entries: Vec<(String, i64)> = conn
            .zrangebyscore_limit_withscores(self.group_key(group), score + 2, "+inf", 0, 1)
            .await?;

        Ok(entries
            .into_iter()
            .next()
            .map(|(member, score)| (parse_member(&member), score)))
    }

    /// Top `n` entries by score, descending.
    pub async fn top(&self, group: ChatId, n: isize) -> Result<Vec<(UserId, i64)>> {
        let mut conn = self.connection().await?;
        let entries: Vec<(String, i64)> = conn
            .zrevrange_withscores(self.group_key(group), 0, n - 1)
            .await?;

        Ok(entries
            .into_iter()
            .map(|(member, score)| (parse_member(&member), score))
            .collect())
    }

    /// Drop a user's score entry entirely.
    pub async fn remove(&self, group: ChatId, user: UserId) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: i64 = conn.zrem(self.group_key(group), user.0).await?;
        Ok(())
    }

    /// Count one moderation deletion; returns the group's running total.
    pub async fn bump_deleted_count(&self, group: ChatId) -> Result<i64> {
        let mut conn = self.connection().await?;
        Ok(conn.incr(self.deleted_count_key(group), 1).await?)
    }

    /// The group's running total of moderation deletions.
    pub async fn deleted_count(&self, group: ChatId) -> Result<i64> {
        let mut conn = self.connection().await?;
        let count: Option<i64> = conn.get(self.deleted_count_key(group)).await?;
        Ok(count.unwrap_or(0))
    }
}

/// Sorted-set members are decimal user ids; anything unparseable maps to the
/// placeholder id 0 and resolves as a ghost downstream.
fn parse_member(member: &str) -> UserId {
    UserId(member.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> XpLedger {
        XpLedger::new(&RedisConfig {
            url: "redis://localhost:6379".to_string(),
            prefix: "XPBOT_".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_group_key_includes_prefix_and_chat_id() {
        assert_eq!(ledger().group_key(ChatId(-1001234)), "XPBOT_-1001234");
    }

    #[test]
    fn test_deleted_count_key() {
        assert_eq!(
            ledger().deleted_count_key(ChatId(-42)),
            "XPBOT_-42_DELETED_COUNT"
        );
    }

    #[test]
    fn test_parse_member() {
        assert_eq!(parse_member("123456"), UserId(123456));
        assert_eq!(parse_member("not-a-user"), UserId(0));
    }
}
