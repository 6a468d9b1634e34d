//! Descendant lookup over the organization directory.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::foundation::OrganizationId;
use crate::domain::hierarchy::HierarchyPath;
use crate::ports::{EmissionSourceError, OrganizationDirectory};

/// Resolves which organizations sit at or below a hierarchy path.
///
/// The result is non-strict: an organization registered exactly at the
/// prefix is included. Each organization appears once.
#[derive(Clone)]
pub struct HierarchyResolver {
    directory: Arc<dyn OrganizationDirectory>,
}

impl HierarchyResolver {
    pub fn new(directory: Arc<dyn OrganizationDirectory>) -> Self {
        Self { directory }
    }

    pub async fn descendants(
        &self,
        prefix: &HierarchyPath,
    ) -> Result<BTreeSet<OrganizationId>, EmissionSourceError> {
        let ids = self.directory.list_descendant_organization_ids(prefix).await?;
        Ok(ids.into_iter().collect())
    }

    /// Same as [`descendants`](Self::descendants) for an unparsed path.
    ///
    /// Empty or malformed input yields an empty set.
    pub async fn descendants_of_raw(
        &self,
        raw: &str,
    ) -> Result<BTreeSet<OrganizationId>, EmissionSourceError> {
        match HierarchyPath::parse(raw) {
            Ok(prefix) => self.descendants(&prefix).await,
            Err(e) => {
                tracing::debug!(path = raw, "Unresolvable hierarchy path: {}", e);
                Ok(BTreeSet::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct FixedDirectory {
        ids: Vec<i64>,
    }

    #[async_trait]
    impl OrganizationDirectory for FixedDirectory {
        async fn list_descendant_organization_ids(
            &self,
            _prefix: &HierarchyPath,
        ) -> Result<Vec<OrganizationId>, EmissionSourceError> {
            Ok(self
                .ids
                .iter()
                .map(|v| OrganizationId::new(*v).unwrap())
                .collect())
        }
    }

    fn resolver(ids: Vec<i64>) -> HierarchyResolver {
        HierarchyResolver::new(Arc::new(FixedDirectory { ids }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn duplicates_collapse() {
        let set = resolver(vec![3, 2, 3, 2])
            .descendants(&HierarchyPath::parse("/1").unwrap())
            .await
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn malformed_raw_path_yields_empty_set() {
        let r = resolver(vec![2, 3]);
        assert!(r.descendants_of_raw("").await.unwrap().is_empty());
        assert!(r.descendants_of_raw("/1//x").await.unwrap().is_empty());
        assert_eq!(r.descendants_of_raw("/1").await.unwrap().len(), 2);
    }
}
