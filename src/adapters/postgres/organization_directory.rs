//! PostgreSQL implementation of OrganizationDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::OrganizationId;
use crate::domain::hierarchy::HierarchyPath;
use crate::ports::{EmissionSourceError, OrganizationDirectory};

/// Reads the `partner_organizations` registry.
#[derive(Clone)]
pub struct PostgresOrganizationDirectory {
    pool: PgPool,
}

impl PostgresOrganizationDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationDirectory for PostgresOrganizationDirectory {
    async fn list_descendant_organization_ids(
        &self,
        prefix: &HierarchyPath,
    ) -> Result<Vec<OrganizationId>, EmissionSourceError> {
        let raw: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM partner_organizations
            WHERE hierarchy_path = $1 OR hierarchy_path LIKE $2
            ORDER BY id
            "#,
        )
        .bind(prefix.to_string())
        .bind(prefix.descendant_like_pattern())
        .fetch_all(&self.pool)
        .await?;

        let mut ids = Vec::with_capacity(raw.len());
        for value in raw {
            match OrganizationId::new(value) {
                Ok(id) => ids.push(id),
                Err(e) => tracing::warn!("Skipping malformed organization id {}: {}", value, e),
            }
        }
        Ok(ids)
    }
}
