//! Aggregation services.
//!
//! - `HierarchyResolver` - Descendant lookup
//! - `AggregationService` - Cache-unaware computation
//! - `CachedAggregationService` - Read-through cache and write invalidation

mod cached;
mod error;
mod resolver;
mod service;

pub use cached::CachedAggregationService;
pub use error::AggregationError;
pub use resolver::HierarchyResolver;
pub use service::{AggregationProvider, AggregationService};
