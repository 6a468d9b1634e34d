//! Application-level aggregation errors.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{CacheError, EmissionSourceError};

/// Why an aggregation call failed.
///
/// Validation failures are the caller's fault and never worth retrying;
/// dependency failures come from the raw aggregate source and leave retry
/// policy to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AggregationError {
    #[error("Invalid aggregation request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Dependency failure: {0}")]
    DependencyFailure(#[from] EmissionSourceError),

    #[error("Cache failure: {0}")]
    Cache(#[from] CacheError),
}

impl AggregationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AggregationError::Validation(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AggregationError::Validation(e) => ErrorCode::from(e),
            AggregationError::DependencyFailure(EmissionSourceError::Unavailable(_)) => {
                ErrorCode::SourceUnavailable
            }
            AggregationError::DependencyFailure(EmissionSourceError::Database(_)) => {
                ErrorCode::DatabaseError
            }
            AggregationError::Cache(_) => ErrorCode::CacheError,
        }
    }
}

impl From<AggregationError> for DomainError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::Validation(e) => DomainError::from(e),
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
