//! Command and query handlers.

pub mod aggregation;

pub use aggregation::{
    ComputeAggregationHandler, ComputeAggregationQuery, ComputeAggregationResult,
    GetMonthlySummaryHandler, GetMonthlySummaryQuery, GetMonthlySummaryResult,
    InvalidateAggregationCommand, InvalidateAggregationHandler, InvalidateAggregationResult,
    ListDescendantsHandler, ListDescendantsQuery, ListDescendantsResult,
};
