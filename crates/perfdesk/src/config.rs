//! Client configuration.
//!
//! The backend URL and the Google OAuth client id are baked in at build
//! time from `PERFDESK_API_URL` and `PERFDESK_GOOGLE_CLIENT_ID`, the same way
//! the web client took them from its build environment. Both can be
//! overridden at run time through the builder.

use std::path::PathBuf;
use std::time::Duration;

use perfdesk_session::SessionConfig;

use crate::PerfdeskError;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = match option_env!("PERFDESK_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api",
};

/// Google OAuth client id baked in at build time, if any.
pub const DEFAULT_GOOGLE_CLIENT_ID: Option<&str> =
    option_env!("PERFDESK_GOOGLE_CLIENT_ID");

/// Everything a [`PerfdeskClient`](crate::PerfdeskClient) needs to start.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the REST paths are appended to.
    pub api_url: String,

    /// Client id for Google sign-in. Only needed by front ends that obtain
    /// the Google credential themselves.
    pub google_client_id: Option<String>,

    /// Where persisted session state lives. `None` means the platform data
    /// directory (`~/.local/share/perfdesk` on Linux).
    pub state_dir: Option<PathBuf>,

    /// Per-request timeout for backend calls.
    pub request_timeout: Duration,

    /// Token-check settings.
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            google_client_id: DEFAULT_GOOGLE_CLIENT_ID.map(str::to_string),
            state_dir: None,
            request_timeout: Duration::from_secs(30),
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// The state directory to use, resolving the platform default.
    ///
    /// # Errors
    /// [`PerfdeskError::NoStateDir`] if none was configured and the platform
    /// has no data directory.
    pub fn resolved_state_dir(&self) -> Result<PathBuf, PerfdeskError> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("perfdesk"))
                .ok_or(PerfdeskError::NoStateDir),
        }
    }
}
