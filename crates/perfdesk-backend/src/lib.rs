//! Backend abstraction layer for perfdesk.
//!
//! Provides the [`AuthBackend`] and [`RosterBackend`] traits that abstract
//! over the REST service the client talks to, plus an HTTP implementation.
//! The session layer only ever sees the traits, so tests can swap in an
//! in-memory backend and count calls.
//!
//! # Feature Flags
//!
//! - `http` (default): [`HttpBackend`] via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::BackendError;
#[cfg(feature = "http")]
pub use http::HttpBackend;

use std::future::Future;

use perfdesk_identity::{
    Credentials, EmployeePage, GoogleGrant, Identity, RegisterReply,
    Registration, TokenGrant, UserId,
};

/// The authentication endpoints.
///
/// Each method maps to one REST call. Implementations do no session
/// bookkeeping; deciding what to persist is the session layer's job.
pub trait AuthBackend: Send + Sync + 'static {
    /// `POST /users/login`: exchanges credentials for a bearer token.
    fn login(
        &self,
        creds: &Credentials,
    ) -> impl Future<Output = Result<TokenGrant, BackendError>> + Send;

    /// `POST /users/register`: creates an account.
    fn register(
        &self,
        reg: &Registration,
    ) -> impl Future<Output = Result<RegisterReply, BackendError>> + Send;

    /// `GET /users/profile`: the identity behind `token`.
    fn profile(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Identity, BackendError>> + Send;

    /// `POST /users/auth/google`: exchanges a Google ID-token credential for
    /// a bearer token and identity.
    fn google(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<GoogleGrant, BackendError>> + Send;
}

/// Which slice of the employee roster to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Restricts the roster to one manager's reports. Admins list everyone
    /// and leave this unset.
    pub manager_id: Option<UserId>,
}

impl Default for RosterQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            manager_id: None,
        }
    }
}

/// Authenticated data endpoints.
pub trait RosterBackend: Send + Sync + 'static {
    /// `GET /emp/get`: one page of the employee roster.
    fn employees(
        &self,
        token: &str,
        query: &RosterQuery,
    ) -> impl Future<Output = Result<EmployeePage, BackendError>> + Send;
}
