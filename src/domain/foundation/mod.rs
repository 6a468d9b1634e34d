//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the emission domain.

mod errors;
mod ids;
mod period;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::OrganizationId;
pub use period::{ReportingPeriod, MAX_REPORTING_YEAR, MIN_REPORTING_YEAR};
