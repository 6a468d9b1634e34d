//! Aggregation tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound accepted for `max_concurrent_queries`.
pub const MAX_CONCURRENT_QUERIES_LIMIT: usize = 256;

/// Tuning for the per-descendant query fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Descendants (or months, for the monthly summary) processed at the
    /// same time. Each one issues several sum queries of its own, so the
    /// number of open queries can be a multiple of this.
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
}

impl AggregationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_concurrent_queries == 0
            || self.max_concurrent_queries > MAX_CONCURRENT_QUERIES_LIMIT
        {
            return Err(ValidationError::InvalidConcurrency(MAX_CONCURRENT_QUERIES_LIMIT));
        }
        Ok(())
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_queries: default_max_concurrent_queries(),
        }
    }
}

fn default_max_concurrent_queries() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concurrency() {
        let config = AggregationConfig::default();
        assert_eq!(config.max_concurrent_queries, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = AggregationConfig {
            max_concurrent_queries: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let config = AggregationConfig {
            max_concurrent_queries: MAX_CONCURRENT_QUERIES_LIMIT + 1,
        };
        assert!(config.validate().is_err());
    }
}
