//! Per-key signature verification and the match-any multi-key policy

use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AuthError, Result};
use crate::jwks::{Jwk, KeySetFetcher};
use crate::token::{parse_and_verify, Token};

/// Verifies a compact JWS against a single key.
///
/// Returns the payload bytes when the signature matches, or a human-readable
/// reason when it does not. The reason feeds the joined diagnostics of
/// [`AuthError::InvalidSignature`].
pub trait JwsVerifier: Send + Sync {
    fn verify(&self, token: &str, key: &Jwk) -> std::result::Result<Vec<u8>, String>;
}

/// `jsonwebtoken`-backed verifier for RSA and EC keys
#[derive(Debug, Default, Clone)]
pub struct JsonWebTokenVerifier;

impl JwsVerifier for JsonWebTokenVerifier {
    fn verify(&self, token: &str, key: &Jwk) -> std::result::Result<Vec<u8>, String> {
        let header =
            decode_header(token).map_err(|e| format!("failed to decode JWS header: {e}"))?;
        let decoding_key = decoding_key_for(key)?;

        // Signature-only check. Time claims are re-verified on every call by
        // the claims layer and audience belongs to the orchestrator, so both
        // are disabled here.
        let mut validation = Validation::new(header.alg);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Value>(token, &decoding_key, &validation).map_err(|e| {
            match &key.kid {
                Some(kid) => format!("key {kid}: {e}"),
                None => e.to_string(),
            }
        })?;

        serde_json::to_vec(&data.claims).map_err(|e| e.to_string())
    }
}

fn decoding_key_for(key: &Jwk) -> std::result::Result<DecodingKey, String> {
    match key.kty.as_str() {
        "RSA" => {
            let n = key
                .n
                .as_deref()
                .ok_or_else(|| "RSA key missing modulus (n)".to_string())?;
            let e = key
                .e
                .as_deref()
                .ok_or_else(|| "RSA key missing exponent (e)".to_string())?;
            DecodingKey::from_rsa_components(n, e)
                .map_err(|e| format!("invalid RSA components: {e}"))
        }
        "EC" => {
            let x = key
                .x
                .as_deref()
                .ok_or_else(|| "EC key missing x coordinate".to_string())?;
            let y = key
                .y
                .as_deref()
                .ok_or_else(|| "EC key missing y coordinate".to_string())?;
            DecodingKey::from_ec_components(x, y)
                .map_err(|e| format!("invalid EC components: {e}"))
        }
        other => Err(format!("unsupported key type: {other}")),
    }
}

/// Fetch the key set for `key_set_url` and attempt verification of `token`
/// against each key in fetch order.
///
/// Match-any policy: the first key that verifies wins, and the token's
/// claims are then parsed and time-checked. When no key matches, the failure
/// reasons of every attempted key are newline-joined into one
/// [`AuthError::InvalidSignature`].
pub(crate) async fn verify_signature(
    fetcher: &dyn KeySetFetcher,
    verifier: &dyn JwsVerifier,
    key_set_url: &str,
    token: &str,
    leeway: i64,
) -> Result<Token> {
    let set = fetcher.fetch(key_set_url).await?;

    let mut reasons = Vec::new();
    for key in &set.keys {
        match verifier.verify(token, key) {
            Ok(_) => {
                debug!(kid = key.kid.as_deref(), "signature verified");
                return parse_and_verify(token, leeway);
            }
            Err(reason) => reasons.push(reason),
        }
    }

    let reasons = reasons.join("\n");
    warn!(%reasons, "no key in the fetched set verified the token");
    Err(AuthError::InvalidSignature { reasons })
}
