//! JWKS model and key-set fetching
//!
//! The key set is fetched fresh on every cache-miss validation. Skipping a
//! key cache trades extra fetches for never serving a rotated-out key.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{AuthError, Result};

/// JSON Web Key Set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: Option<String>,
    pub alg: Option<String>,
    pub r#use: Option<String>,
    /// RSA modulus
    pub n: Option<String>,
    /// RSA exponent
    pub e: Option<String>,
    /// EC curve name
    pub crv: Option<String>,
    /// EC x coordinate
    pub x: Option<String>,
    /// EC y coordinate
    pub y: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// Retrieves the verification key set published at a URL.
///
/// Failures are propagated verbatim to the caller; this layer does not
/// retry.
#[async_trait]
pub trait KeySetFetcher: Send + Sync {
    /// Fetch the key set for `url`, in the provider's published order.
    async fn fetch(&self, url: &str) -> Result<JwkSet>;
}

/// Key-set fetcher backed by a reqwest HTTP client with explicit timeouts
#[derive(Debug, Default, Clone)]
pub struct HttpKeySetFetcher;

#[async_trait]
impl KeySetFetcher for HttpKeySetFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<JwkSet> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::KeyFetch {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let response = client
            .get(url)
            .header("User-Agent", concat!("tokengate/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch {
                message: format!("failed to fetch key set: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::KeyFetch {
                message: format!("key set endpoint returned {}", response.status()),
            });
        }

        let jwks: JwkSet = response.json().await.map_err(|e| AuthError::KeyFetch {
            message: format!("failed to parse key set JSON: {e}"),
        })?;

        if jwks.keys.is_empty() {
            return Err(AuthError::KeyFetch {
                message: "key set contains no keys".to_string(),
            });
        }

        debug!(key_count = jwks.keys.len(), "fetched key set");
        Ok(jwks)
    }
}
