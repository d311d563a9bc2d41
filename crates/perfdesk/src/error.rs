//! Unified error type for perfdesk.

use perfdesk_backend::BackendError;
use perfdesk_identity::{IdentityError, Role};
use perfdesk_routes::{Route, UnknownRoute};
use perfdesk_session::{SessionError, StorageError};

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `perfdesk` facade you deal with this single error type
/// instead of importing errors from each sub-crate. `#[from]` lets `?`
/// convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PerfdeskError {
    /// Identity encode/decode or an unknown role name.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A backend call failed outside the session lifecycle.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Sign-in, bootstrap, token, or persistence failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Opening the state directory failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A path that isn't a screen.
    #[error(transparent)]
    Route(#[from] UnknownRoute),

    /// The signed-in role may not use this screen.
    #[error("{role} may not open {route}")]
    Forbidden { route: Route, role: Role },

    /// No state directory was configured and the platform has no data
    /// directory.
    #[error("no state directory: set one explicitly")]
    NoStateDir,
}

impl PerfdeskError {
    /// Returns `true` if the user should be sent back to the login screen.
    pub fn requires_login(&self) -> bool {
        match self {
            PerfdeskError::Session(e) => e.requires_login(),
            PerfdeskError::Forbidden { .. } => true,
            _ => false,
        }
    }

    /// A short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            PerfdeskError::Session(e) => e.user_message(),
            PerfdeskError::Backend(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}
