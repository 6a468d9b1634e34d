//! In-memory emission store.
//!
//! Implements both the `EmissionSumReader` and `OrganizationDirectory` ports
//! over plain vectors. Useful for:
//! - Unit and integration tests
//! - Local demos without a database
//!
//! Sums use the ports' default component and fan-out strategies, so this
//! adapter also exercises the per-descendant query path.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::aggregation::SumScope;
use crate::domain::emission::{EmissionClass, EmissionRecord, OtherIndirectCategory, ProcessGroup};
use crate::domain::foundation::{OrganizationId, ReportingPeriod, ValidationError};
use crate::domain::hierarchy::{HierarchyPath, OrgTree};
use crate::ports::{EmissionSourceError, EmissionSumReader, OrganizationDirectory};

/// Thread-safe in-memory store of partners and emission line items.
#[derive(Debug, Default)]
pub struct InMemoryEmissionStore {
    tree: RwLock<OrgTree>,
    records: RwLock<Vec<EmissionRecord>>,
    outage: RwLock<Option<String>>,
    queries: AtomicUsize,
}

impl InMemoryEmissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a partner at `path`.
    pub async fn register_partner(
        &self,
        id: OrganizationId,
        path: &HierarchyPath,
    ) -> Result<(), ValidationError> {
        self.tree.write().await.insert(id, path)
    }

    /// Adds a line item after checking its invariants.
    pub async fn insert_record(&self, record: EmissionRecord) -> Result<(), ValidationError> {
        record.validate()?;
        self.records.write().await.push(record);
        Ok(())
    }

    /// Makes every subsequent query fail until cleared with `None`.
    pub async fn set_outage(&self, reason: Option<String>) {
        *self.outage.write().await = reason;
    }

    /// Number of queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn ensure_available(&self) -> Result<(), EmissionSourceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.outage.read().await.as_ref() {
            Some(reason) => Err(EmissionSourceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    async fn sum_where<F>(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        predicate: F,
    ) -> Result<Decimal, EmissionSourceError>
    where
        F: Fn(&EmissionRecord) -> bool + Send,
    {
        self.ensure_available().await?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| scope.matches(r) && period.contains(r.year, r.month) && predicate(r))
            .map(|r| r.amount)
            .sum())
    }
}

#[async_trait]
impl EmissionSumReader for InMemoryEmissionStore {
    async fn sum_by_class(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
    ) -> Result<Decimal, EmissionSourceError> {
        self.sum_where(scope, period, |r| r.class == class).await
    }

    async fn sum_by_class_and_group_tag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        group: ProcessGroup,
    ) -> Result<Decimal, EmissionSourceError> {
        self.sum_where(scope, period, |r| {
            r.class == class && r.process_group == Some(group)
        })
        .await
    }

    async fn sum_by_class_and_facility_flag(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        class: EmissionClass,
        facility_tagged: bool,
    ) -> Result<Decimal, EmissionSourceError> {
        self.sum_where(scope, period, |r| {
            r.class == class && r.facility_tagged == facility_tagged
        })
        .await
    }

    async fn sum_by_other_indirect_category(
        &self,
        scope: &SumScope,
        period: &ReportingPeriod,
        category: OtherIndirectCategory,
    ) -> Result<Decimal, EmissionSourceError> {
        self.sum_where(scope, period, |r| r.other_indirect_category() == Some(category))
            .await
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryEmissionStore {
    async fn list_descendant_organization_ids(
        &self,
        prefix: &HierarchyPath,
    ) -> Result<Vec<OrganizationId>, EmissionSourceError> {
        self.ensure_available().await?;
        Ok(self.tree.read().await.descendants(prefix).into_iter().collect())
    }
}
