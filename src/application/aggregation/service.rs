//! The cache-unaware aggregation entry point.
//!
//! One call resolves the requester's descendants, recomposes the requester's
//! own buckets and each descendant's own buckets, rolls the descendants up
//! into the requester's view and attaches the per-class summary. All source
//! reads run concurrently; any failure fails the whole call.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::domain::aggregation::{
    recompose, roll_up, AggregationResult, CategoryBreakdown, ClassSummary, MonthlyClassSummary,
    OrgContext,
};
use crate::domain::emission::EmissionClass;
use crate::domain::foundation::{OrganizationId, ReportingPeriod};
use crate::ports::{EmissionSourceError, EmissionSumReader, OrganizationDirectory};

use super::{AggregationError, HierarchyResolver};

/// Anything able to answer an aggregation request.
///
/// Implemented by the plain and the cached service so callers can be wired
/// to either.
#[async_trait]
pub trait AggregationProvider: Send + Sync {
    async fn compute_aggregation(
        &self,
        context: &OrgContext,
    ) -> Result<AggregationResult, AggregationError>;
}

/// Pure aggregation over the raw aggregate source.
#[derive(Clone)]
pub struct AggregationService {
    reader: Arc<dyn EmissionSumReader>,
    resolver: HierarchyResolver,
    max_concurrency: usize,
}

impl AggregationService {
    pub fn new(
        reader: Arc<dyn EmissionSumReader>,
        directory: Arc<dyn OrganizationDirectory>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            reader,
            resolver: HierarchyResolver::new(directory),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Descendants whose totals roll into `context`, requester excluded.
    async fn children_of(
        &self,
        context: &OrgContext,
    ) -> Result<Vec<OrganizationId>, EmissionSourceError> {
        let mut descendants = self.resolver.descendants(context.hierarchy_path()).await?;
        descendants.remove(&context.organization_id());
        Ok(descendants.into_iter().collect())
    }

    /// Per-class totals over the requester's whole subtree.
    pub async fn class_summary(
        &self,
        context: &OrgContext,
    ) -> Result<ClassSummary, EmissionSourceError> {
        let scope = context.subtree_scope();
        let period = context.period();

        let (direct, indirect_energy, other_indirect) = futures::try_join!(
            self.reader.sum_by_class(&scope, &period, EmissionClass::Direct),
            self.reader.sum_by_class(&scope, &period, EmissionClass::IndirectEnergy),
            self.reader.sum_by_class(&scope, &period, EmissionClass::OtherIndirect),
        )?;

        Ok(ClassSummary {
            direct,
            indirect_energy,
            other_indirect,
        })
    }

    /// One class summary per month of the context's period.
    ///
    /// A full-year context yields twelve entries in calendar order; months
    /// without data are zero. At most `max_concurrency` months are in flight.
    pub async fn monthly_class_summary(
        &self,
        context: &OrgContext,
    ) -> Result<Vec<MonthlyClassSummary>, AggregationError> {
        let period = context.period();
        let contexts = period
            .months()
            .into_iter()
            .map(|month| {
                ReportingPeriod::month(period.reporting_year(), month)
                    .map(|p| (month, context.with_period(p)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let summaries = stream::iter(contexts)
            .map(|(month, ctx)| async move {
                self.class_summary(&ctx)
                    .await
                    .map(|summary| MonthlyClassSummary { month, summary })
            })
            .buffered(self.max_concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(summaries)
    }
}

#[async_trait]
impl AggregationProvider for AggregationService {
    async fn compute_aggregation(
        &self,
        context: &OrgContext,
    ) -> Result<AggregationResult, AggregationError> {
        let period = context.period();
        let own_scope = context.own_scope();
        let children = self.children_of(context).await?;

        let (own, grouped, class_summary) = futures::try_join!(
            self.reader.organization_components(&own_scope, &period),
            self.reader
                .grouped_partner_components(&children, &period, self.max_concurrency),
            self.class_summary(context),
        )?;

        let child_breakdowns: Vec<CategoryBreakdown> = grouped.values().map(recompose).collect();
        let rolled = roll_up(&recompose(&own), &child_breakdowns, context.is_headquarters());
        let result = AggregationResult::assemble(context.clone(), class_summary, rolled);

        tracing::debug!(
            organization_id = %context.organization_id(),
            period = %period,
            descendants = children.len(),
            grand_total = %result.grand_total,
            "Computed aggregation"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEmissionStore;
    use crate::domain::aggregation::SpecialCategory;
    use crate::domain::emission::{EmissionRecord, ProcessGroup, RecordOwner};
    use crate::domain::hierarchy::HierarchyPath;
    use rust_decimal::Decimal;

    fn id(v: i64) -> OrganizationId {
        OrganizationId::new(v).unwrap()
    }

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn line(
        owner: RecordOwner,
        path: &str,
        class: EmissionClass,
        category: u8,
        amount: i64,
    ) -> EmissionRecord {
        EmissionRecord {
            owner,
            hierarchy_path: HierarchyPath::parse(path).unwrap(),
            class,
            category,
            facility_tagged: false,
            process_group: None,
            year: 2024,
            month: 3,
            amount: dec(amount),
        }
    }

    fn partner(p: i64) -> RecordOwner {
        RecordOwner::Partner {
            headquarters: id(1),
            partner: id(p),
        }
    }

    fn service_with(store: Arc<InMemoryEmissionStore>) -> AggregationService {
        AggregationService::new(store.clone(), store, 4)
    }

    #[tokio::test]
    async fn partner_view_excludes_own_line_items() {
        let store = Arc::new(InMemoryEmissionStore::new());
        store
            .register_partner(id(2), &HierarchyPath::parse("/1/2").unwrap())
            .await
            .unwrap();
        store
            .insert_record(line(partner(2), "/1/2", EmissionClass::OtherIndirect, 2, 40))
            .await
            .unwrap();

        let service = service_with(store);
        let ctx = OrgContext::partner(
            id(2),
            HierarchyPath::parse("/1/2").unwrap(),
            ReportingPeriod::year(2024).unwrap(),
        )
        .unwrap();

        let result = service.compute_aggregation(&ctx).await.unwrap();

        assert_eq!(result.category_total(SpecialCategory::Category2), Decimal::ZERO);
        assert_eq!(result.rollup.category2.own_total, dec(40));
        // The class summary still covers the partner's own subtree.
        assert_eq!(result.class_summary.other_indirect, dec(40));
    }

    #[tokio::test]
    async fn headquarters_view_includes_everything() {
        let store = Arc::new(InMemoryEmissionStore::new());
        store
            .register_partner(id(2), &HierarchyPath::parse("/1/2").unwrap())
            .await
            .unwrap();
        let mut mobile = line(RecordOwner::Headquarters(id(1)), "/1", EmissionClass::Direct, 1, 15);
        mobile.process_group = Some(ProcessGroup::MobileCombustion);
        store.insert_record(mobile).await.unwrap();
        store
            .insert_record(line(partner(2), "/1/2", EmissionClass::OtherIndirect, 4, 5))
            .await
            .unwrap();

        let service = service_with(store);
        let ctx = OrgContext::headquarters(id(1), ReportingPeriod::year(2024).unwrap());
        let result = service.compute_aggregation(&ctx).await.unwrap();

        assert_eq!(result.category_total(SpecialCategory::Category4), dec(20));
        assert_eq!(result.descendant_count, 1);
        assert_eq!(result.grand_total, dec(20));
    }

    #[tokio::test]
    async fn full_year_monthly_summary_has_twelve_entries() {
        let store = Arc::new(InMemoryEmissionStore::new());
        store
            .insert_record(line(RecordOwner::Headquarters(id(1)), "/1", EmissionClass::Direct, 1, 9))
            .await
            .unwrap();

        let service = service_with(store);
        let ctx = OrgContext::headquarters(id(1), ReportingPeriod::year(2024).unwrap());
        let months = service.monthly_class_summary(&ctx).await.unwrap();

        assert_eq!(months.len(), 12);
        assert_eq!(months[2].month, 3);
        assert_eq!(months[2].summary.direct, dec(9));
        assert!(months
            .iter()
            .filter(|m| m.month != 3)
            .all(|m| m.summary.total().is_zero()));
    }

    #[tokio::test]
    async fn source_outage_fails_whole_call() {
        let store = Arc::new(InMemoryEmissionStore::new());
        store.set_outage(Some("connection refused".to_string())).await;

        let service = service_with(store);
        let ctx = OrgContext::headquarters(id(1), ReportingPeriod::year(2024).unwrap());
        let err = service.compute_aggregation(&ctx).await.unwrap_err();

        assert!(!err.is_validation());
        assert!(matches!(err, AggregationError::DependencyFailure(_)));
    }
}
