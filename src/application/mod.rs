//! Application layer - Services, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, query handlers only read; the single command handler
//! only touches the cache.

pub mod aggregation;
pub mod handlers;

pub use aggregation::{
    AggregationError, AggregationProvider, AggregationService, CachedAggregationService,
    HierarchyResolver,
};
pub use handlers::{
    ComputeAggregationHandler, ComputeAggregationQuery, ComputeAggregationResult,
    GetMonthlySummaryHandler, GetMonthlySummaryQuery, GetMonthlySummaryResult,
    InvalidateAggregationCommand, InvalidateAggregationHandler, InvalidateAggregationResult,
    ListDescendantsHandler, ListDescendantsQuery, ListDescendantsResult,
};
