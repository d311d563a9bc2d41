//! Bearer-token expiry checks.
//!
//! The backend issues JWTs. The client never verifies the signature (it has
//! no key, and the backend re-checks every request anyway); it only reads the
//! `exp` claim so it can log the user out *before* sending a request that is
//! bound to fail.
//!
//! ```text
//! header . payload . signature
//!          └─ base64url JSON: { "exp": 1735689600, ... }
//! ```
//!
//! Anything that doesn't decode cleanly counts as expired. A token we can't
//! read is a token we can't trust.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Why a token's expiry couldn't be read.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Not three dot-separated segments.
    #[error("token is not a three-part JWT")]
    Shape,

    /// The payload segment isn't base64url.
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The payload isn't a JSON object, or `exp` isn't a number.
    #[error("token payload is not valid claims JSON: {0}")]
    Claims(#[from] serde_json::Error),

    /// The claims carry no usable `exp`.
    #[error("token has no expiry claim")]
    MissingExpiry,

    /// `exp` is a number, but not an instant the system clock can hold.
    #[error("token expiry is out of range")]
    OutOfRange,
}

#[derive(Deserialize)]
struct Claims {
    /// Seconds since the Unix epoch. Some issuers emit fractional seconds.
    exp: Option<f64>,
}

/// Reads the expiry instant embedded in `token`.
///
/// # Errors
/// Returns a [`TokenError`] describing the first thing that was wrong with
/// the token's shape or claims.
pub fn expires_at(token: &str) -> Result<SystemTime, TokenError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_header), Some(payload), Some(_signature), None) if !payload.is_empty() => {
            payload
        }
        _ => return Err(TokenError::Shape),
    };

    // Padding is optional in JWTs; strip it so one engine handles both.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Claims = serde_json::from_slice(&bytes)?;

    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    let offset =
        Duration::try_from_secs_f64(exp).map_err(|_| TokenError::OutOfRange)?;
    UNIX_EPOCH.checked_add(offset).ok_or(TokenError::OutOfRange)
}

/// Returns `true` if `token` is expired at `now`, or can't be read at all.
///
/// "Expired" means `now` is at or past the `exp` instant.
pub fn is_expired_at(token: &str, now: SystemTime) -> bool {
    match expires_at(token) {
        Ok(exp) => now >= exp,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable token treated as expired");
            true
        }
    }
}

/// Returns `true` if `token` is expired right now (system clock), or can't
/// be read at all.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, SystemTime::now())
}
