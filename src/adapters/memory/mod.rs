//! In-memory adapters.
//!
//! - `InMemoryEmissionStore` - Records and partner tree for tests and demos
//! - `InMemoryAggregationCache` - Process-local TTL cache

mod aggregation_cache;
mod emission_store;

pub use aggregation_cache::InMemoryAggregationCache;
pub use emission_store::InMemoryEmissionStore;
