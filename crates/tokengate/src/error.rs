//! Error types for the token validation gate

use thiserror::Error;

/// Errors produced while validating a bearer token
///
/// Every error is terminal for the call that produced it: nothing is retried
/// internally and no error state is cached, so the next call with the same
/// token re-attempts full validation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Authorization value is missing the scheme or token part, or the
    /// scheme literal is not exactly `Bearer`
    #[error("Authorization header must have a Bearer token")]
    MalformedHeader,

    /// Key-set retrieval failed; carries the fetcher's own message
    #[error("Key set fetch failed: {message}")]
    KeyFetch { message: String },

    /// No fetched key verified the token. The message is the newline-joined
    /// failure reason of every attempted key, which keeps per-key
    /// diagnostics visible during key rotation windows.
    #[error("{reasons}")]
    InvalidSignature { reasons: String },

    /// Token string could not be decoded into claims
    #[error("Token parse failed: {message}")]
    Parse { message: String },

    /// Time-based claim check failed (expired or not yet valid)
    #[error("Token claims are invalid: {message}")]
    ClaimsInvalid { message: String },

    /// First audience entry does not match the expected audience
    #[error("audience is not valid")]
    AudienceInvalid,

    /// Issuer claim does not match the expected issuer
    #[error("issuer is not valid")]
    IssuerInvalid,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AuthError>;
