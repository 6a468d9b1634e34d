//! Aggregation cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Redis-backed result cache. Disabled unless turned on explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Redis connection URL, required when enabled
    #[serde(default)]
    pub redis_url: Option<String>,

    /// How long a cached aggregation stays valid, in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.ttl_secs > 86_400 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        if !self.enabled {
            return Ok(());
        }
        match self.redis_url.as_deref() {
            None | Some("") => Err(ValidationError::MissingRequired("CACHE__REDIS_URL")),
            Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                Err(ValidationError::InvalidRedisUrl)
            }
            Some(_) => Ok(()),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            redis_url: None,
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}
