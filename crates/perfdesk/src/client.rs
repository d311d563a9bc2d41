//! `PerfdeskClient` builder and the client itself.
//!
//! This is the entry point for front ends. It ties together all the layers:
//! backend → session → routes.

use std::time::Duration;

use perfdesk_backend::{AuthBackend, HttpBackend, RosterBackend, RosterQuery};
use perfdesk_identity::{Credentials, EmployeePage, Identity, Registration, Role};
use perfdesk_routes::{Access, Menu, Route, menu_for, navigate};
use perfdesk_session::{
    Bootstrap, FileStorage, Registered, Session, SessionConfig, SessionError,
    SessionManager, Storage,
};

use crate::{ClientConfig, PerfdeskError};

/// Builder for configuring a perfdesk client.
///
/// # Example
///
/// ```rust,ignore
/// use perfdesk::prelude::*;
///
/// let mut client = PerfdeskClient::builder()
///     .api_url("https://hr.example.com/api")
///     .build()?;
/// client.start().await?;
/// ```
pub struct PerfdeskClientBuilder {
    config: ClientConfig,
}

impl PerfdeskClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Sets the backend base URL.
    pub fn api_url(mut self, url: &str) -> Self {
        self.config.api_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets where persisted session state lives.
    pub fn state_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.state_dir = Some(dir.into());
        self
    }

    /// Sets the Google OAuth client id.
    pub fn google_client_id(mut self, id: &str) -> Self {
        self.config.google_client_id = Some(id.to_string());
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a client that talks HTTP and persists to the state directory.
    ///
    /// The session starts signed out; call
    /// [`start()`](PerfdeskClient::start) to restore a saved one.
    pub fn build(self) -> Result<PerfdeskClient<HttpBackend, FileStorage>, PerfdeskError> {
        let storage = FileStorage::open(self.config.resolved_state_dir()?)?;
        self.build_with(storage)
    }

    /// Builds an HTTP client over caller-supplied storage.
    pub fn build_with<S: Storage>(
        self,
        storage: S,
    ) -> Result<PerfdeskClient<HttpBackend, S>, PerfdeskError> {
        let backend =
            HttpBackend::new(&self.config.api_url, self.config.request_timeout)?;
        Ok(PerfdeskClient::from_parts(backend, storage, self.config))
    }
}

impl Default for PerfdeskClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A perfdesk client: one user's session plus access decisions.
///
/// Every mutation goes through the inner [`SessionManager`], so the
/// fail-closed rules hold no matter which front end drives it.
pub struct PerfdeskClient<B, S> {
    manager: SessionManager<B, S>,
    config: ClientConfig,
}

impl PerfdeskClient<HttpBackend, FileStorage> {
    /// Creates a new builder.
    pub fn builder() -> PerfdeskClientBuilder {
        PerfdeskClientBuilder::new()
    }
}

impl<B, S> PerfdeskClient<B, S>
where
    B: AuthBackend + RosterBackend,
    S: Storage,
{
    /// Assembles a client from an existing backend and storage.
    pub fn from_parts(backend: B, storage: S, config: ClientConfig) -> Self {
        let manager = SessionManager::new(backend, storage, config.session.clone());
        Self { manager, config }
    }

    pub fn session(&self) -> &Session {
        self.manager.session()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        self.manager.storage()
    }

    /// Client id a front end needs to obtain a Google credential.
    pub fn google_client_id(&self) -> Option<&str> {
        self.config.google_client_id.as_deref()
    }

    /// Restores a saved session. Run once at startup.
    pub async fn start(&mut self) -> Result<Bootstrap, PerfdeskError> {
        Ok(self.manager.bootstrap().await?)
    }

    pub async fn login(&mut self, creds: &Credentials) -> Result<Identity, PerfdeskError> {
        Ok(self.manager.login(creds).await?)
    }

    pub async fn register(
        &mut self,
        reg: &Registration,
    ) -> Result<Registered, PerfdeskError> {
        Ok(self.manager.register(reg).await?)
    }

    pub async fn login_with_google(
        &mut self,
        credential: &str,
    ) -> Result<Identity, PerfdeskError> {
        Ok(self.manager.login_with_google(credential).await?)
    }

    /// Re-fetches the signed-in user's profile.
    pub async fn refresh(&mut self) -> Result<Identity, PerfdeskError> {
        Ok(self.manager.refresh().await?)
    }

    pub fn logout(&mut self) {
        self.manager.logout();
    }

    /// What happens if the user navigates to `route` now.
    pub fn navigate(&self, route: Route) -> Access {
        navigate(self.manager.session(), route)
    }

    /// Like [`navigate`](Self::navigate), for a raw path.
    pub fn open(&self, path: &str) -> Result<(Route, Access), PerfdeskError> {
        let route: Route = path.parse()?;
        Ok((route, self.navigate(route)))
    }

    /// The navigation menus for the signed-in user.
    pub fn menus(&self) -> Vec<Menu> {
        menu_for(self.manager.session())
    }

    /// One page of the employee roster.
    ///
    /// Admins see every employee; other managers see their own reports.
    /// Page numbers are 1-based and both arguments are raised to at least 1.
    ///
    /// # Errors
    /// - [`PerfdeskError::Session`]: no token, or it expired (the session
    ///   is then cleared).
    /// - [`PerfdeskError::Forbidden`]: the role may not view employees.
    /// - [`PerfdeskError::Session`] wrapping [`SessionError::Backend`]: the
    ///   request failed. The session is cleared, so
    ///   [`requires_login`](PerfdeskError::requires_login) is `true`.
    pub async fn employees(
        &mut self,
        page: u32,
        per_page: u32,
    ) -> Result<EmployeePage, PerfdeskError> {
        let token = self.manager.authorize()?;

        let Some(identity) = self.manager.session().identity().cloned() else {
            return Err(SessionError::NotAuthenticated.into());
        };
        if !self.navigate(Route::ViewEmployees).is_render() {
            return Err(PerfdeskError::Forbidden {
                route: Route::ViewEmployees,
                role: identity.role,
            });
        }

        let query = RosterQuery {
            page: page.max(1),
            per_page: per_page.max(1),
            manager_id: (identity.role != Role::Admin).then(|| identity.id.clone()),
        };

        match self.manager.backend().employees(&token, &query).await {
            Ok(page) => {
                tracing::debug!(
                    page = query.page,
                    count = page.employees.len(),
                    total = page.total,
                    "roster fetched"
                );
                Ok(page)
            }
            Err(e) => {
                tracing::warn!(error = %e, "roster fetch failed, logging out");
                self.manager.logout();
                Err(SessionError::Backend(e).into())
            }
        }
    }
}
