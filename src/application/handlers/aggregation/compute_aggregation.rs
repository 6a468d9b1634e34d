//! ComputeAggregationHandler - Query handler for one aggregation.
//!
//! Validates the raw request and returns the rolled-up result for the
//! requesting organization and period.

use std::sync::Arc;

use crate::application::aggregation::{AggregationError, AggregationProvider};
use crate::domain::aggregation::AggregationResult;
use crate::domain::foundation::ReportingPeriod;

use super::parse_org_context;

/// Query to aggregate one organization's emissions for a period.
#[derive(Debug, Clone, Default)]
pub struct ComputeAggregationQuery {
    /// Whether the requester is the headquarters.
    pub is_headquarters: bool,
    /// Requesting organization, unparsed.
    pub organization_id: Option<String>,
    /// Requester's hierarchy path; required for partners.
    pub hierarchy_path: Option<String>,
    pub year: String,
    /// Absent or blank means the whole year.
    pub month: Option<String>,
}

/// Result of a successful aggregation query.
pub type ComputeAggregationResult = AggregationResult;

/// Handler for computing an aggregation.
pub struct ComputeAggregationHandler {
    provider: Arc<dyn AggregationProvider>,
}

impl ComputeAggregationHandler {
    pub fn new(provider: Arc<dyn AggregationProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        query: ComputeAggregationQuery,
    ) -> Result<ComputeAggregationResult, AggregationError> {
        let period = ReportingPeriod::parse(&query.year, query.month.as_deref())?;
        let context = parse_org_context(
            query.is_headquarters,
            query.organization_id.as_deref(),
            query.hierarchy_path.as_deref(),
            period,
        )?;

        self.provider.compute_aggregation(&context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::{
        recompose, roll_up, ClassSummary, ComponentSums, OrgContext, OrgRole,
    };
    use crate::domain::foundation::{ErrorCode, ValidationError};
    use crate::ports::EmissionSourceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct MockProvider {
        seen: Mutex<Vec<OrgContext>>,
        should_fail: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                should_fail: true,
            }
        }

        fn last_context(&self) -> Option<OrgContext> {
            self.seen.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl AggregationProvider for MockProvider {
        async fn compute_aggregation(
            &self,
            context: &OrgContext,
        ) -> Result<AggregationResult, AggregationError> {
            self.seen.lock().unwrap().push(context.clone());
            if self.should_fail {
                return Err(EmissionSourceError::Unavailable("Simulated failure".to_string()).into());
            }
            let rolled = roll_up(
                &recompose(&ComponentSums::zero()),
                &[],
                context.is_headquarters(),
            );
            Ok(AggregationResult::assemble(
                context.clone(),
                ClassSummary::default(),
                rolled,
            ))
        }
    }

    fn hq_query() -> ComputeAggregationQuery {
        ComputeAggregationQuery {
            is_headquarters: true,
            organization_id: Some("1".to_string()),
            hierarchy_path: None,
            year: "2024".to_string(),
            month: Some("05".to_string()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_headquarters_query_builds_context() {
        let provider = Arc::new(MockProvider::new());
        let handler = ComputeAggregationHandler::new(provider.clone());

        let result = handler.handle(hq_query()).await.unwrap();
        assert!(result.is_all_zero());

        let ctx = provider.last_context().unwrap();
        assert_eq!(ctx.role(), OrgRole::Headquarters);
        assert_eq!(ctx.period().to_string(), "2024-05");
    }

    #[tokio::test]
    async fn test_blank_month_means_full_year() {
        let provider = Arc::new(MockProvider::new());
        let handler = ComputeAggregationHandler::new(provider.clone());

        let query = ComputeAggregationQuery {
            month: Some("  ".to_string()),
            ..hq_query()
        };
        handler.handle(query).await.unwrap();

        assert!(provider.last_context().unwrap().period().is_full_year());
    }

    #[tokio::test]
    async fn test_missing_organization_is_validation_error() {
        let provider = Arc::new(MockProvider::new());
        let handler = ComputeAggregationHandler::new(provider.clone());

        let query = ComputeAggregationQuery {
            organization_id: None,
            ..hq_query()
        };
        let err = handler.handle(query).await.unwrap_err();

        assert!(err.is_validation());
        assert!(provider.last_context().is_none());
    }

    #[tokio::test]
    async fn test_partner_without_path_is_rejected() {
        let handler = ComputeAggregationHandler::new(Arc::new(MockProvider::new()));

        let query = ComputeAggregationQuery {
            is_headquarters: false,
            organization_id: Some("7".to_string()),
            ..hq_query()
        };
        let err = handler.handle(query).await.unwrap_err();

        assert!(matches!(
            err,
            AggregationError::Validation(ValidationError::EmptyField { ref field }) if field == "hierarchy_path"
        ));
    }

    #[tokio::test]
    async fn test_non_numeric_organization_is_rejected() {
        let handler = ComputeAggregationHandler::new(Arc::new(MockProvider::new()));

        let query = ComputeAggregationQuery {
            organization_id: Some("abc".to_string()),
            ..hq_query()
        };
        let err = handler.handle(query).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn test_out_of_range_month_is_rejected() {
        let handler = ComputeAggregationHandler::new(Arc::new(MockProvider::new()));

        let query = ComputeAggregationQuery {
            month: Some("13".to_string()),
            ..hq_query()
        };
        let err = handler.handle(query).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
    }

    #[tokio::test]
    async fn test_partner_query_passes_path() {
        let provider = Arc::new(MockProvider::new());
        let handler = ComputeAggregationHandler::new(provider.clone());

        let query = ComputeAggregationQuery {
            is_headquarters: false,
            organization_id: Some("7".to_string()),
            hierarchy_path: Some("/1/3/7".to_string()),
            year: "2023".to_string(),
            month: None,
        };
        handler.handle(query).await.unwrap();

        let ctx = provider.last_context().unwrap();
        assert_eq!(ctx.role(), OrgRole::Partner);
        assert_eq!(ctx.hierarchy_path().to_string(), "/1/3/7");
    }

    #[tokio::test]
    async fn test_source_failure_is_propagated() {
        let handler = ComputeAggregationHandler::new(Arc::new(MockProvider::failing()));

        let err = handler.handle(hq_query()).await.unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
    }
}
