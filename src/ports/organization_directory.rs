//! Organization directory port.

use async_trait::async_trait;

use crate::domain::foundation::OrganizationId;
use crate::domain::hierarchy::HierarchyPath;

use super::EmissionSourceError;

/// Read-only port over the organization tree.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// Every organization whose stored path extends `prefix`, including the
    /// one sitting exactly at `prefix`. Order is unspecified.
    async fn list_descendant_organization_ids(
        &self,
        prefix: &HierarchyPath,
    ) -> Result<Vec<OrganizationId>, EmissionSourceError>;
}
