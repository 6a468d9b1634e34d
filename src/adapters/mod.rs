//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store and cache (tests, demos)
//! - `postgres` - PostgreSQL sum reader and organization directory
//! - `redis` - Redis aggregation cache

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{InMemoryAggregationCache, InMemoryEmissionStore};
pub use postgres::{PostgresEmissionSumReader, PostgresOrganizationDirectory};
pub use redis::RedisAggregationCache;
