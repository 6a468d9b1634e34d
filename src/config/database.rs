//! Emission ledger connection pool

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool the aggregation fan-out is allowed to open.
pub const MAX_POOL_SIZE: u32 = 100;

/// Where the emission ledger lives and how many connections to hold.
///
/// Only `url` is required; the pool defaults suit a single aggregation
/// process with the default fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Should cover `aggregation.max_concurrent_queries`, or descendant
    /// lookups queue on the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Apply `migrations/` before serving any command.
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Pool builder for `PgPoolOptions::connect`.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        match (self.min_connections, self.max_connections) {
            (min, max) if min > max => Err(ValidationError::InvalidPoolSize),
            (_, max) if max > MAX_POOL_SIZE => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_idle_timeout_secs() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_pool_covers_default_fan_out() {
        let config = DatabaseConfig::default();
        let fan_out = crate::config::AggregationConfig::default().max_concurrent_queries;
        assert!(config.max_connections as usize >= fan_out);
        assert!(!config.run_migrations);
    }

    #[test]
    fn accepts_both_postgres_schemes() {
        assert!(ledger("postgres://u:p@db:5432/ledger").validate().is_ok());
        assert!(ledger("postgresql://db/ledger").validate().is_ok());
    }

    #[test]
    fn rejects_blank_or_foreign_urls() {
        assert!(matches!(
            ledger("  ").validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        ));
        assert!(matches!(
            ledger("mysql://db/ledger").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn rejects_inverted_or_oversized_pools() {
        let inverted = DatabaseConfig {
            min_connections: 12,
            max_connections: 4,
            ..ledger("postgres://db/ledger")
        };
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidPoolSize)));

        let oversized = DatabaseConfig {
            max_connections: MAX_POOL_SIZE + 1,
            ..ledger("postgres://db/ledger")
        };
        assert!(matches!(oversized.validate(), Err(ValidationError::PoolSizeTooLarge)));
    }
}
