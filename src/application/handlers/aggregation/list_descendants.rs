//! ListDescendantsHandler - Query handler for the organizations under a path.

use std::sync::Arc;

use crate::application::aggregation::{AggregationError, HierarchyResolver};
use crate::domain::foundation::OrganizationId;

/// Query for every organization at or below a hierarchy path.
#[derive(Debug, Clone, Default)]
pub struct ListDescendantsQuery {
    pub hierarchy_path: String,
}

/// Organization ids in ascending order, each once.
pub type ListDescendantsResult = Vec<OrganizationId>;

/// Handler for descendant listing.
///
/// An empty or malformed path lists nothing rather than failing.
pub struct ListDescendantsHandler {
    resolver: Arc<HierarchyResolver>,
}

impl ListDescendantsHandler {
    pub fn new(resolver: Arc<HierarchyResolver>) -> Self {
        Self { resolver }
    }

    pub async fn handle(
        &self,
        query: ListDescendantsQuery,
    ) -> Result<ListDescendantsResult, AggregationError> {
        let ids = self.resolver.descendants_of_raw(&query.hierarchy_path).await?;
        Ok(ids.into_iter().collect())
    }
}
