//! Orchestration of bearer extraction, signature verification, claim checks,
//! and the validation cache

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::bearer::extract_bearer;
use crate::cache::ValidationCache;
use crate::config::ValidatorConfig;
use crate::error::{AuthError, Result};
use crate::jwks::{HttpKeySetFetcher, KeySetFetcher};
use crate::token::{parse_and_verify, Token};
use crate::verify::{verify_signature, JsonWebTokenVerifier, JwsVerifier};

/// Bearer token validation gate.
///
/// One instance owns one [`ValidationCache`] for its lifetime and is
/// otherwise stateless. Create it once and share it across concurrent
/// callers; every method takes `&self`.
pub struct Validator {
    cache: ValidationCache,
    fetcher: Arc<dyn KeySetFetcher>,
    verifier: Arc<dyn JwsVerifier>,
    leeway: i64,
}

impl Validator {
    /// Create a validator with production collaborators (HTTP key-set
    /// fetcher, `jsonwebtoken` signature verifier).
    ///
    /// `key_capacity` bounds the number of cached validation results and
    /// `ttl_seconds` is how long each result lives, in whole seconds.
    pub fn new(key_capacity: u64, ttl_seconds: u64) -> Self {
        Self::builder()
            .key_capacity(key_capacity)
            .ttl(Duration::from_secs(ttl_seconds))
            .build()
    }

    /// Create a validator from a [`ValidatorConfig`].
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::builder()
            .key_capacity(config.key_capacity)
            .ttl(Duration::from_secs(config.ttl_seconds))
            .clock_leeway_seconds(config.clock_leeway_seconds)
            .build()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Validate a raw authorization value of the form `"Bearer <token>"`
    /// against the key set published at `key_set_url` and the expected
    /// `audience` and `issuer`.
    ///
    /// On a cache miss the token goes through the full pipeline: signature
    /// verification against every fetched key, audience check, issuer check,
    /// then a cache insert. On a hit the signature and audience/issuer work
    /// is skipped entirely; a cached token is not re-signature-checked until
    /// its entry expires, even if the key set has since rotated.
    ///
    /// Time-based claims (`exp`, `nbf`) are re-checked on every call as the
    /// final step, so an expired token is rejected while its cache entry is
    /// still live. A failed validation leaves the cache untouched.
    pub async fn validate(
        &self,
        authorization: &str,
        key_set_url: &str,
        audience: &str,
        issuer: &str,
    ) -> Result<Token> {
        let parts: Vec<&str> = authorization.split(' ').collect();
        let token_str = extract_bearer(&parts)?;

        if !self.cache.contains(token_str).await {
            let token = verify_signature(
                self.fetcher.as_ref(),
                self.verifier.as_ref(),
                key_set_url,
                token_str,
                self.leeway,
            )
            .await?;

            // The primary audience is the first entry; an empty audience
            // sequence fails the same check.
            if token.audience().first().copied() != Some(audience) {
                return Err(AuthError::AudienceInvalid);
            }
            if token.issuer() != issuer {
                return Err(AuthError::IssuerInvalid);
            }

            self.cache.insert(token_str).await;
            debug!("token validated and cached");
        }

        // Cheap parse and expiry re-check on every call; the expensive
        // signature pass against a remote key set runs only on a miss.
        parse_and_verify(token_str, self.leeway)
    }

    /// Clear every cached validation result.
    pub async fn purge_cache(&self) {
        self.cache.purge().await;
    }

    /// Read access to the validation cache.
    pub fn cache(&self) -> &ValidationCache {
        &self.cache
    }
}

/// Builder for [`Validator`], the seam where collaborators are swapped.
///
/// Tests substitute the key-set fetcher and per-key verifier here instead of
/// reassigning anything global.
pub struct ValidatorBuilder {
    key_capacity: u64,
    ttl: Duration,
    leeway: i64,
    fetcher: Option<Arc<dyn KeySetFetcher>>,
    verifier: Option<Arc<dyn JwsVerifier>>,
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        let config = ValidatorConfig::default();
        Self {
            key_capacity: config.key_capacity,
            ttl: Duration::from_secs(config.ttl_seconds),
            leeway: config.clock_leeway_seconds,
            fetcher: None,
            verifier: None,
        }
    }
}

impl ValidatorBuilder {
    pub fn key_capacity(mut self, capacity: u64) -> Self {
        self.key_capacity = capacity;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn clock_leeway_seconds(mut self, leeway: i64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn key_set_fetcher(mut self, fetcher: Arc<dyn KeySetFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn jws_verifier(mut self, verifier: Arc<dyn JwsVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            cache: ValidationCache::new(self.key_capacity, self.ttl),
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(HttpKeySetFetcher)),
            verifier: self
                .verifier
                .unwrap_or_else(|| Arc::new(JsonWebTokenVerifier)),
            leeway: self.leeway,
        }
    }
}
