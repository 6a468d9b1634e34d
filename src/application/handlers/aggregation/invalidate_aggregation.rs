//! InvalidateAggregationHandler - Command handler run after a record write.
//!
//! Drops the cached aggregations of the owning organization and of every
//! ancestor whose roll-up includes it.

use std::sync::Arc;

use crate::application::aggregation::{AggregationError, CachedAggregationService};
use crate::domain::hierarchy::HierarchyPath;

/// Command naming where a record was written.
#[derive(Debug, Clone)]
pub struct InvalidateAggregationCommand {
    /// Hierarchy path of the organization that owns the written record.
    pub hierarchy_path: String,
}

/// Outcome of an invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidateAggregationResult {
    /// Organizations whose entries were dropped, owner included.
    pub organizations: usize,
    pub entries_removed: u64,
}

/// Handler for write-side cache invalidation.
pub struct InvalidateAggregationHandler {
    service: Arc<CachedAggregationService>,
}

impl InvalidateAggregationHandler {
    pub fn new(service: Arc<CachedAggregationService>) -> Self {
        Self { service }
    }

    pub async fn handle(
        &self,
        cmd: InvalidateAggregationCommand,
    ) -> Result<InvalidateAggregationResult, AggregationError> {
        let path = HierarchyPath::parse(&cmd.hierarchy_path)?;
        let entries_removed = self.service.invalidate_for_write(&path).await?;

        Ok(InvalidateAggregationResult {
            organizations: path.depth(),
            entries_removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAggregationCache, InMemoryEmissionStore};
    use crate::application::aggregation::{AggregationProvider, AggregationService};
    use crate::domain::aggregation::OrgContext;
    use crate::domain::foundation::{OrganizationId, ReportingPeriod};
    use std::time::Duration;

    fn id(v: i64) -> OrganizationId {
        OrganizationId::new(v).unwrap()
    }

    async fn setup() -> (InvalidateAggregationHandler, Arc<CachedAggregationService>) {
        let store = Arc::new(InMemoryEmissionStore::new());
        store
            .register_partner(id(5), &HierarchyPath::parse("/1/5").unwrap())
            .await
            .unwrap();
        store
            .register_partner(id(6), &HierarchyPath::parse("/1/6").unwrap())
            .await
            .unwrap();
        let inner = Arc::new(AggregationService::new(store.clone(), store, 2));
        let cached = Arc::new(CachedAggregationService::new(
            inner,
            Arc::new(InMemoryAggregationCache::new()),
            Duration::from_secs(300),
        ));
        (InvalidateAggregationHandler::new(cached.clone()), cached)
    }

    fn partner(p: i64) -> OrgContext {
        OrgContext::partner(
            id(p),
            HierarchyPath::parse(&format!("/1/{}", p)).unwrap(),
            ReportingPeriod::year(2024).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sibling_entries_survive_invalidation() {
        let (handler, cached) = setup().await;
        cached
            .compute_aggregation(&OrgContext::headquarters(id(1), ReportingPeriod::year(2024).unwrap()))
            .await
            .unwrap();
        cached.compute_aggregation(&partner(5)).await.unwrap();
        cached.compute_aggregation(&partner(6)).await.unwrap();

        let result = handler
            .handle(InvalidateAggregationCommand {
                hierarchy_path: "/1/5".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.organizations, 2);
        assert_eq!(result.entries_removed, 2);
    }

    #[tokio::test]
    async fn test_malformed_path_is_validation_error() {
        let (handler, _) = setup().await;
        let err = handler
            .handle(InvalidateAggregationCommand {
                hierarchy_path: "1/five".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
