//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the aggregation core and the outside world. Adapters implement these ports.
//!
//! - `EmissionSumReader` - Scoped decimal sums over emission line items
//! - `OrganizationDirectory` - Prefix-based descendant lookup
//! - `AggregationCache` - Optional TTL cache around aggregation results

mod aggregation_cache;
mod emission_sum_reader;
mod organization_directory;

pub use aggregation_cache::{AggregationCache, AggregationCacheKey, CacheError};
pub use emission_sum_reader::{EmissionSourceError, EmissionSumReader};
pub use organization_directory::OrganizationDirectory;
