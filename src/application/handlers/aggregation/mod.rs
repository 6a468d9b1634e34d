//! Aggregation query and command handlers.
//!
//! Handlers accept raw request fields, validate them into an `OrgContext`
//! and delegate to the aggregation services.

mod compute_aggregation;
mod get_monthly_summary;
mod invalidate_aggregation;
mod list_descendants;

pub use compute_aggregation::{
    ComputeAggregationHandler, ComputeAggregationQuery, ComputeAggregationResult,
};
pub use get_monthly_summary::{
    GetMonthlySummaryHandler, GetMonthlySummaryQuery, GetMonthlySummaryResult,
};
pub use invalidate_aggregation::{
    InvalidateAggregationCommand, InvalidateAggregationHandler, InvalidateAggregationResult,
};
pub use list_descendants::{ListDescendantsHandler, ListDescendantsQuery, ListDescendantsResult};

use crate::domain::aggregation::OrgContext;
use crate::domain::foundation::{OrganizationId, ReportingPeriod, ValidationError};
use crate::domain::hierarchy::HierarchyPath;

/// Validates raw organization fields into a context.
///
/// Blank strings count as absent.
pub(crate) fn parse_org_context(
    is_headquarters: bool,
    organization_id: Option<&str>,
    hierarchy_path: Option<&str>,
    period: ReportingPeriod,
) -> Result<OrgContext, ValidationError> {
    let organization_id = non_blank(organization_id)
        .map(|raw| OrganizationId::parse_field("organization_id", raw))
        .transpose()?;
    let hierarchy_path = non_blank(hierarchy_path)
        .map(HierarchyPath::parse)
        .transpose()?;

    OrgContext::build(is_headquarters, organization_id, hierarchy_path, period)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
