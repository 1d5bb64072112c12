//! Decoded JWT claims and time-based re-verification
//!
//! Parsing here reads the claims segment of a compact JWS without touching
//! the signature. Callers combine it with a signature check (directly, or
//! indirectly via a prior cache entry) before trusting the result.

use std::collections::HashMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthError, Result};

/// Audience claim encoding: providers emit either a single string or an array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AudienceClaim {
    One(String),
    Many(Vec<String>),
}

/// Decoded JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    aud: Option<AudienceClaim>,
    #[serde(default)]
    iss: String,
    /// Subject (user identifier)
    #[serde(default)]
    pub sub: String,
    /// Expiration time (Unix timestamp)
    exp: Option<i64>,
    /// Not-before time (Unix timestamp)
    nbf: Option<i64>,
    /// Issued at (Unix timestamp)
    pub iat: Option<i64>,
    /// Custom claims
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

impl Token {
    /// Parse the claims segment of a compact JWS.
    pub fn parse(token: &str) -> Result<Self> {
        let mut segments = token.split('.');
        let payload = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                return Err(AuthError::Parse {
                    message: "token is not a three-segment JWS".to_string(),
                })
            }
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|e| AuthError::Parse {
            message: format!("claims segment is not base64url: {e}"),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| AuthError::Parse {
            message: format!("claims are not valid JSON: {e}"),
        })
    }

    /// Re-check the time-based claims (`exp`, `nbf`) against the current
    /// time, tolerating `leeway` seconds of clock skew.
    ///
    /// This runs on every validation call, cache hit or not, so an expired
    /// token is rejected regardless of prior cache state.
    pub fn verify_time(&self, leeway: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        if let Some(exp) = self.exp {
            if now > exp + leeway {
                return Err(AuthError::ClaimsInvalid {
                    message: "token is expired".to_string(),
                });
            }
        }

        if let Some(nbf) = self.nbf {
            if now + leeway < nbf {
                return Err(AuthError::ClaimsInvalid {
                    message: "token is not yet valid".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Audience entries in claim order. A single-string `aud` claim reads as
    /// a one-element sequence.
    pub fn audience(&self) -> Vec<&str> {
        match &self.aud {
            Some(AudienceClaim::One(aud)) => vec![aud.as_str()],
            Some(AudienceClaim::Many(auds)) => auds.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// Issuer claim
    pub fn issuer(&self) -> &str {
        &self.iss
    }

    /// Expiration claim, when present
    pub fn expiration(&self) -> Option<i64> {
        self.exp
    }

    /// Not-before claim, when present
    pub fn not_before(&self) -> Option<i64> {
        self.nbf
    }
}

/// Parse a token and re-run its time-based claim checks.
pub fn parse_and_verify(token_str: &str, leeway: i64) -> Result<Token> {
    let token = Token::parse(token_str)?;
    token.verify_time(leeway)?;
    Ok(token)
}
