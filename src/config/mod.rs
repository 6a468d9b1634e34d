//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `EMISSION_ROLLUP_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use emission_rollup::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Fan-out limit: {}", config.aggregation.max_concurrent_queries);
//! ```

mod aggregation;
mod cache;
mod database;
mod error;
mod runtime;

pub use aggregation::{AggregationConfig, MAX_CONCURRENT_QUERIES_LIMIT};
pub use cache::CacheConfig;
pub use database::{DatabaseConfig, MAX_POOL_SIZE};
pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, RuntimeConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Result cache (Redis, optional)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Aggregation fan-out tuning
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Environment and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EMISSION_ROLLUP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EMISSION_ROLLUP__DATABASE__URL=...` -> `database.url = ...`
    /// - `EMISSION_ROLLUP__CACHE__TTL_SECS=60` -> `cache.ttl_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EMISSION_ROLLUP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.database.validate()?;
        self.cache.validate()?;
        self.aggregation.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
