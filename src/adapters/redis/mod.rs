//! Redis adapters.

mod aggregation_cache;

pub use aggregation_cache::RedisAggregationCache;
