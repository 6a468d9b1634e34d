//! GetMonthlySummaryHandler - Query handler for per-month class totals.

use std::sync::Arc;

use crate::application::aggregation::{AggregationError, AggregationService};
use crate::domain::aggregation::MonthlyClassSummary;
use crate::domain::foundation::ReportingPeriod;

use super::parse_org_context;

/// Query for the per-month class totals of one reporting year.
#[derive(Debug, Clone, Default)]
pub struct GetMonthlySummaryQuery {
    pub is_headquarters: bool,
    pub organization_id: Option<String>,
    pub hierarchy_path: Option<String>,
    pub year: String,
}

/// One entry per calendar month.
pub type GetMonthlySummaryResult = Vec<MonthlyClassSummary>;

/// Handler for the monthly class summary.
pub struct GetMonthlySummaryHandler {
    service: Arc<AggregationService>,
}

impl GetMonthlySummaryHandler {
    pub fn new(service: Arc<AggregationService>) -> Self {
        Self { service }
    }

    pub async fn handle(
        &self,
        query: GetMonthlySummaryQuery,
    ) -> Result<GetMonthlySummaryResult, AggregationError> {
        let period = ReportingPeriod::parse(&query.year, None)?;
        let context = parse_org_context(
            query.is_headquarters,
            query.organization_id.as_deref(),
            query.hierarchy_path.as_deref(),
            period,
        )?;

        self.service.monthly_class_summary(&context).await
    }
}
