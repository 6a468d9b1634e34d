//! Aggregation cache port.
//!
//! Optional memoization of aggregation results by organization, hierarchy
//! position and period.
//! The aggregation itself never consults the cache; a wrapping service does.
//! Implementations can use in-memory storage for testing or Redis for
//! production.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::aggregation::{AggregationResult, OrgContext, OrgRole};
use crate::domain::foundation::OrganizationId;
use crate::domain::hierarchy::HierarchyPath;

/// Port for caching aggregation results with a time-to-live.
///
/// Implementations should be thread-safe and support concurrent access.
#[async_trait]
pub trait AggregationCache: Send + Sync {
    /// Returns the cached result, or `None` on a miss or expiry.
    async fn get(&self, key: &AggregationCacheKey) -> Result<Option<AggregationResult>, CacheError>;

    /// Stores a result for `ttl`.
    async fn put(
        &self,
        key: &AggregationCacheKey,
        result: &AggregationResult,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    /// Drops one entry.
    async fn invalidate(&self, key: &AggregationCacheKey) -> Result<(), CacheError>;

    /// Drops every entry of an organization, whatever the period or role.
    ///
    /// Returns the number of entries removed.
    async fn invalidate_organization(&self, organization_id: OrganizationId) -> Result<u64, CacheError>;
}

/// Key identifying one cached aggregation.
///
/// The path is part of the key: the same partner reached through two paths
/// covers two different subtrees.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct AggregationCacheKey {
    pub organization_id: OrganizationId,
    pub role: OrgRole,
    pub hierarchy_path: HierarchyPath,
    pub year: i32,
    pub month: Option<u8>,
}

impl AggregationCacheKey {
    pub fn from_context(context: &OrgContext) -> Self {
        let period = context.period();
        Self {
            organization_id: context.organization_id(),
            role: context.role(),
            hierarchy_path: context.hierarchy_path().clone(),
            year: period.reporting_year(),
            month: period.reporting_month(),
        }
    }

    /// Returns the Redis key string for this cache key.
    pub fn to_redis_key(&self) -> String {
        let role = match self.role {
            OrgRole::Headquarters => "hq",
            OrgRole::Partner => "partner",
        };
        let month = match self.month {
            Some(m) => format!("{:02}", m),
            None => "all".to_string(),
        };
        format!(
            "{}{}:{}:{}:{}",
            Self::organization_prefix(self.organization_id),
            role,
            self.hierarchy_path,
            self.year,
            month
        )
    }

    /// Common prefix of every key belonging to one organization.
    pub fn organization_prefix(organization_id: OrganizationId) -> String {
        format!("aggregation:{}:", organization_id)
    }
}

/// Errors from the cache backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}
