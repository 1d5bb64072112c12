//! Bearer scheme extraction from a raw authorization value
//!
//! The token arrives as an HTTP-style header value of the form
//! `"Bearer <token>"`. Checking for the `Bearer` literal is an extra
//! mechanism for making sure the gate is not handed arbitrary strings.

use crate::error::{AuthError, Result};

const BEARER_SCHEME: &str = "Bearer";

/// Extract the bare token from a space-split authorization value.
///
/// The first part must be exactly `Bearer` (case-sensitive) and a second
/// part must be present. The second part is returned unmodified; trailing
/// parts are ignored.
pub fn extract_bearer<'a>(parts: &[&'a str]) -> Result<&'a str> {
    if parts.len() < 2 {
        return Err(AuthError::MalformedHeader);
    }
    if parts[0] != BEARER_SCHEME {
        return Err(AuthError::MalformedHeader);
    }
    Ok(parts[1])
}
