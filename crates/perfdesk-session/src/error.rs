//! Error types for the session layer.

use perfdesk_backend::BackendError;
use perfdesk_identity::{FieldErrors, IdentityError};

use crate::StorageError;

/// Errors that can occur across the session lifecycle: sign-in, bootstrap,
/// refresh, and token checks before an authenticated request.
///
/// An error from `bootstrap`, `refresh`, or `authorize` on a
/// [`SessionManager`](crate::SessionManager) means the session has been
/// cleared. A failed sign-in leaves whatever session existed before unless
/// the backend had already issued a token.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Form input failed client-side validation. Nothing was sent.
    #[error("invalid input: {0}")]
    Invalid(#[from] FieldErrors),

    /// An authenticated action was attempted with no token.
    #[error("not signed in")]
    NotAuthenticated,

    /// The token is past its expiry (or unreadable). The session was
    /// cleared.
    #[error("session token has expired")]
    TokenExpired,

    /// The backend rejected the call or couldn't be reached.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Persisting or clearing session state failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The identity couldn't be encoded for storage, or the stored one
    /// couldn't be decoded.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl SessionError {
    /// Returns `true` if the caller should send the user to the login
    /// screen. Only validation errors keep the user on the current form.
    pub fn requires_login(&self) -> bool {
        !matches!(self, SessionError::Invalid(_))
    }

    /// A short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Invalid(errors) => errors.to_string(),
            SessionError::NotAuthenticated => "Please sign in".to_string(),
            SessionError::TokenExpired => {
                "Your session has expired. Please sign in again".to_string()
            }
            SessionError::Backend(e) => e.user_message().to_string(),
            SessionError::Storage(_) | SessionError::Identity(_) => {
                "Could not save your session".to_string()
            }
        }
    }
}
