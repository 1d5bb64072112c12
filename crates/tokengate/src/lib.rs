//! # Tokengate
//!
//! A bearer token validation gate for Auth0-style identity providers. It
//! sits in front of an HTTP-style request handler, validates incoming JWTs
//! against the provider's published JWKS, confirms audience and issuer
//! claims, and caches validation results so the same token is not
//! cryptographically re-verified on every request.
//!
//! ## Features
//!
//! - **Bearer extraction**: strict `"Bearer <token>"` parsing of the raw
//!   authorization value
//! - **JWKS verification**: match-any signature check across every key in
//!   the fetched set, with per-key diagnostics on total failure
//! - **Claim checks**: audience and issuer validated once per token, exp/nbf
//!   re-checked on every call
//! - **Result caching**: capacity- and TTL-bounded cache of validated token
//!   strings, safe for concurrent use
//! - **Dependency injection**: key-set fetching and per-key verification are
//!   traits, swappable through the builder
//!
//! ## Example
//!
//! ```no_run
//! use tokengate::Validator;
//!
//! # async fn example() -> tokengate::Result<()> {
//! let validator = Validator::new(1024, 300);
//! let token = validator
//!     .validate(
//!         "Bearer eyJ0eXAi...",
//!         "https://tenant.example.com/.well-known/jwks.json",
//!         "https://api.example.com/",
//!         "https://tenant.example.com/",
//!     )
//!     .await?;
//! println!("subject: {}", token.sub);
//! # Ok(())
//! # }
//! ```

pub mod bearer;
pub mod cache;
pub mod config;
pub mod error;
pub mod jwks;
pub mod token;
pub mod validator;
pub mod verify;

// Re-export commonly used types
pub use cache::ValidationCache;
pub use config::ValidatorConfig;
pub use error::{AuthError, Result};
pub use jwks::{HttpKeySetFetcher, Jwk, JwkSet, KeySetFetcher};
pub use token::Token;
pub use validator::{Validator, ValidatorBuilder};
pub use verify::{JsonWebTokenVerifier, JwsVerifier};

/// Version of the tokengate crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
