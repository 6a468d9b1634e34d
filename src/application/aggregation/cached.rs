//! Read-through cache around the aggregation service.
//!
//! The wrapped service never sees the cache. A broken cache degrades to
//! uncached answers; it never fails a read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::aggregation::{AggregationResult, OrgContext};
use crate::domain::hierarchy::HierarchyPath;
use crate::ports::{AggregationCache, AggregationCacheKey, CacheError};

use super::{AggregationError, AggregationProvider, AggregationService};

/// Aggregation service that memoizes results per organization and period.
#[derive(Clone)]
pub struct CachedAggregationService {
    inner: Arc<AggregationService>,
    cache: Arc<dyn AggregationCache>,
    ttl: Duration,
}

impl CachedAggregationService {
    pub fn new(inner: Arc<AggregationService>, cache: Arc<dyn AggregationCache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// The uncached service.
    pub fn inner(&self) -> &Arc<AggregationService> {
        &self.inner
    }

    /// Drops cached results a write at `owner_path` makes stale.
    ///
    /// That is the owning organization plus every ancestor, since each
    /// ancestor's roll-up includes the owner. Returns the number of entries
    /// removed.
    pub async fn invalidate_for_write(&self, owner_path: &HierarchyPath) -> Result<u64, CacheError> {
        let mut removed = self.cache.invalidate_organization(owner_path.leaf()).await?;
        for ancestor in owner_path.ancestors() {
            removed += self.cache.invalidate_organization(ancestor.leaf()).await?;
        }

        tracing::info!(
            path = %owner_path,
            removed,
            "Invalidated cached aggregations"
        );
        Ok(removed)
    }
}

#[async_trait]
impl AggregationProvider for CachedAggregationService {
    async fn compute_aggregation(
        &self,
        context: &OrgContext,
    ) -> Result<AggregationResult, AggregationError> {
        let key = AggregationCacheKey::from_context(context);

        match self.cache.get(&key).await {
            Ok(Some(hit)) => {
                tracing::debug!(key = %key.to_redis_key(), "Aggregation cache hit");
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Aggregation cache unavailable, computing uncached: {}", e),
        }

        let result = self.inner.compute_aggregation(context).await?;

        if let Err(e) = self.cache.put(&key, &result, self.ttl).await {
            tracing::warn!("Failed to store aggregation in cache: {}", e);
        }

        Ok(result)
    }
}
