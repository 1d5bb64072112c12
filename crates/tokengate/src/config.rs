//! Validator configuration

use serde::{Deserialize, Serialize};

/// Validation gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum number of validated token strings the cache will hold
    pub key_capacity: u64,

    /// Time to live in seconds for cached validation results
    pub ttl_seconds: u64,

    /// Allowed clock skew in seconds for exp/nbf checks
    pub clock_leeway_seconds: i64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            key_capacity: 1024,
            ttl_seconds: 300, // 5 minutes
            clock_leeway_seconds: 0,
        }
    }
}
