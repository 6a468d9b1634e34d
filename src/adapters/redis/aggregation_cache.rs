//! Redis-backed aggregation cache for multi-process deployments.
//!
//! Results are stored as JSON strings with `SET .. EX`. Organization-wide
//! invalidation walks the key prefix with `SCAN`, never `KEYS`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::aggregation::AggregationResult;
use crate::domain::foundation::OrganizationId;
use crate::ports::{AggregationCache, AggregationCacheKey, CacheError};

/// Redis-backed aggregation cache.
#[derive(Clone)]
pub struct RedisAggregationCache {
    conn: MultiplexedConnection,
}

impl RedisAggregationCache {
    /// Create a new Redis aggregation cache.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

fn unavailable(e: redis::RedisError) -> CacheError {
    CacheError::Unavailable(e.to_string())
}

#[async_trait]
impl AggregationCache for RedisAggregationCache {
    async fn get(&self, key: &AggregationCacheKey) -> Result<Option<AggregationResult>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key.to_redis_key()).await.map_err(unavailable)?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &AggregationCacheKey,
        result: &AggregationResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(result)?;
        let mut conn = self.conn.clone();

        // EX rejects zero; round short TTLs up to one second.
        redis::cmd("SET")
            .arg(key.to_redis_key())
            .arg(json)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn invalidate(&self, key: &AggregationCacheKey) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key.to_redis_key()).await.map_err(unavailable)
    }

    async fn invalidate_organization(&self, organization_id: OrganizationId) -> Result<u64, CacheError> {
        let pattern = format!("{}*", AggregationCacheKey::organization_prefix(organization_id));
        let mut conn = self.conn.clone();

        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = conn
                .scan_match::<_, String>(&pattern)
                .await
                .map_err(unavailable)?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            return Ok(0);
        }

        conn.del::<_, u64>(keys).await.map_err(unavailable)
    }
}
