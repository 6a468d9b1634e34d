//! In-memory aggregation cache for testing and single-process use.
//!
//! Entries expire lazily on read. Not shared across processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::aggregation::AggregationResult;
use crate::domain::foundation::OrganizationId;
use crate::ports::{AggregationCache, AggregationCacheKey, CacheError};

/// In-memory cache keyed by the same strings the Redis adapter uses.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAggregationCache {
    entries: Arc<RwLock<HashMap<String, CachedEntry>>>,
}

#[derive(Debug, Clone)]
struct CachedEntry {
    result: AggregationResult,
    /// `None` when the TTL is too large to represent as an instant.
    expires_at: Option<Instant>,
}

impl CachedEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

impl InMemoryAggregationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AggregationCache for InMemoryAggregationCache {
    async fn get(&self, key: &AggregationCacheKey) -> Result<Option<AggregationResult>, CacheError> {
        let redis_key = key.to_redis_key();
        let now = Instant::now();

        let entries = self.entries.read().await;
        Ok(entries
            .get(&redis_key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.result.clone()))
    }

    async fn put(
        &self,
        key: &AggregationCacheKey,
        result: &AggregationResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_redis_key(),
            CachedEntry {
                result: result.clone(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn invalidate(&self, key: &AggregationCacheKey) -> Result<(), CacheError> {
        self.entries.write().await.remove(&key.to_redis_key());
        Ok(())
    }

    async fn invalidate_organization(&self, organization_id: OrganizationId) -> Result<u64, CacheError> {
        let prefix = AggregationCacheKey::organization_prefix(organization_id);
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(&prefix));
        Ok((before - entries.len()) as u64)
    }
}
