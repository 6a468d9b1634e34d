//! PostgreSQL adapters - Database implementations for the read ports.
//!
//! This module provides adapters for PostgreSQL-backed sums:
//! - `PostgresEmissionSumReader` - Scoped sums over `emission_records`
//! - `PostgresOrganizationDirectory` - Subtree listing over `partner_organizations`

mod emission_sum_reader;
mod organization_directory;

pub use emission_sum_reader::PostgresEmissionSumReader;
pub use organization_directory::PostgresOrganizationDirectory;
