//! Session types: the client's record of who is signed in.

use std::time::Duration;

use perfdesk_identity::{Identity, Role};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for token checks.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Treat a token as expired this long before its `exp`, so a request
    /// started just before expiry doesn't land just after it.
    ///
    /// Default: zero (expired exactly at `exp`).
    pub expiry_leeway: Duration,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The current identity and its bearer token.
///
/// Both halves are optional:
///
/// ```text
///   identity  token
///   --------  -----
///   None      None    signed out
///   Some      Some    signed in
///   None      Some    token stored, profile fetch in flight
/// ```
///
/// A `Session` is only mutated by the [`SessionManager`](crate::SessionManager)
/// entry points; everything else reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    token: Option<String>,
}

impl Session {
    /// An empty session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A fully signed-in session.
    pub fn signed_in(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity: Some(identity),
            token: Some(token.into()),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The signed-in user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    /// Returns `true` if an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn clear(&mut self) {
        self.identity = None;
        self.token = None;
    }
}
