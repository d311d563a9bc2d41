/// Errors that can occur talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a non-success status. `message` is the
    /// `message` field of its error payload, or the status text when the
    /// payload had none.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS,
    /// timeout, TLS).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// A success response whose body didn't match the expected shape.
    #[cfg(feature = "http")]
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The backend is not reachable for a reason outside HTTP.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// A short message suitable for showing to the user.
    ///
    /// Backend-provided messages are passed through; everything else
    /// collapses to a generic line.
    pub fn user_message(&self) -> &str {
        match self {
            BackendError::Rejected { message, .. } => message,
            _ => "Could not reach the server",
        }
    }

    /// Returns `true` for 401/403 replies.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Rejected { status: 401 | 403, .. })
    }
}
