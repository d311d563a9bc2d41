//! The session manager: owns the current session and every way it changes.
//!
//! There is exactly one writer of session state. Screens that need to know
//! who is signed in read [`SessionManager::session`]; screens that need a
//! token for a request call [`SessionManager::authorize`]. Nothing else can
//! touch the token or identity.
//!
//! ## Lifecycle
//!
//! ```text
//!              bootstrap() ─┬─ no token ──────────→ [signed out]
//!                           ├─ expired token ─────→ logout() → [signed out]
//!                           └─ valid token ─ profile ─┬─ ok ──→ [signed in]
//!                                                     └─ err ─→ logout()
//!
//!   login() / register() / login_with_google() ─────→ [signed in]
//!   authorize() on an expired token ────────────────→ logout()
//!   logout() ───────────────────────────────────────→ [signed out]
//! ```
//!
//! # Fail closed
//!
//! Whenever the manager can't prove the session is good (expired token,
//! profile fetch failed, storage write failed) it logs out before returning
//! the error. Callers never have to remember to clean up.

use std::time::SystemTime;

use perfdesk_backend::AuthBackend;
use perfdesk_identity::{
    Codec, Credentials, Identity, JsonCodec, Registration, validate_sign_in,
    validate_sign_up,
};

use crate::storage::{Storage, TOKEN_KEY, USER_KEY};
use crate::{Session, SessionConfig, SessionError, token};

/// Outcome of [`SessionManager::bootstrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// An identity was already in memory; nothing was done.
    AlreadyActive,
    /// No token was persisted. The session stays empty.
    Anonymous,
    /// A persisted token was valid and its profile was fetched.
    Restored(Identity),
}

/// Outcome of [`SessionManager::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registered {
    /// The backend signed the new user in straight away.
    SignedIn(Identity),
    /// The account exists; the user still has to sign in.
    PendingLogin { message: Option<String> },
}

/// Owns the session, its persisted copy, and the backend used to refresh it.
///
/// Generic over the backend and the storage so tests can run against an
/// in-memory fake of each.
pub struct SessionManager<B, S> {
    backend: B,
    storage: S,
    codec: JsonCodec,
    config: SessionConfig,
    session: Session,
}

impl<B: AuthBackend, S: Storage> SessionManager<B, S> {
    /// Creates a manager with an empty session.
    ///
    /// Persisted state is not read until [`bootstrap`](Self::bootstrap).
    pub fn new(backend: B, storage: S, config: SessionConfig) -> Self {
        Self {
            backend,
            storage,
            codec: JsonCodec,
            config,
            session: Session::anonymous(),
        }
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns `true` if `token` is expired, counting the configured leeway.
    /// A leeway too large for the clock makes every token expired.
    pub fn is_expired(&self, token: &str) -> bool {
        match SystemTime::now().checked_add(self.config.expiry_leeway) {
            Some(now) => token::is_expired_at(token, now),
            None => true,
        }
    }

    /// Restores the session from storage at startup.
    ///
    /// # Errors
    /// - [`SessionError::TokenExpired`]: the stored token is expired or
    ///   unreadable. Storage is cleared; the backend is not called.
    /// - [`SessionError::Backend`]: the profile fetch failed. Storage is
    ///   cleared.
    /// - [`SessionError::Storage`] / [`SessionError::Identity`]: reading or
    ///   writing persisted state failed. Storage is cleared as far as
    ///   possible.
    pub async fn bootstrap(&mut self) -> Result<Bootstrap, SessionError> {
        if self.session.is_authenticated() {
            return Ok(Bootstrap::AlreadyActive);
        }

        let stored = match self.storage.get(TOKEN_KEY) {
            Ok(stored) => stored,
            Err(e) => return Err(self.fail_closed(e)),
        };
        let Some(token) = stored else {
            tracing::debug!("no stored token, starting signed out");
            return Ok(Bootstrap::Anonymous);
        };

        if self.is_expired(&token) {
            tracing::warn!("stored token has expired, logging out");
            return Err(self.fail_closed(SessionError::TokenExpired));
        }

        let identity = self.adopt_token(token).await?;
        tracing::info!(user = %identity.id, role = %identity.role, "session restored");
        Ok(Bootstrap::Restored(identity))
    }

    /// Signs in with email and password, then fetches the profile.
    ///
    /// # Errors
    /// - [`SessionError::Invalid`]: the form failed validation; nothing was
    ///   sent and the session is untouched.
    /// - [`SessionError::Backend`]: bad credentials or an unreachable
    ///   backend. If the failure came from the profile fetch after the
    ///   token was issued, the token is discarded.
    /// - [`SessionError::TokenExpired`]: the backend handed out a token
    ///   that is already expired.
    pub async fn login(
        &mut self,
        creds: &Credentials,
    ) -> Result<Identity, SessionError> {
        validate_sign_in(creds)?;

        let grant = self.backend.login(creds).await?;
        if self.is_expired(&grant.token) {
            tracing::warn!("login returned an expired token");
            return Err(self.fail_closed(SessionError::TokenExpired));
        }

        let identity = self.adopt_token(grant.token).await?;
        tracing::info!(user = %identity.id, role = %identity.role, "signed in");
        Ok(identity)
    }

    /// Creates an account. If the backend signs the new user in right away
    /// (its reply carries a token), the token is adopted exactly like a
    /// login grant: stored, then the profile is fetched with it. A `user`
    /// echoed in the reply is not trusted in place of the profile.
    ///
    /// # Errors
    /// Same as [`login`](Self::login).
    pub async fn register(
        &mut self,
        reg: &Registration,
    ) -> Result<Registered, SessionError> {
        validate_sign_up(reg)?;

        let reply = self.backend.register(reg).await?;
        let Some(token) = reply.token else {
            tracing::info!(email = %reg.email, "account registered");
            return Ok(Registered::PendingLogin {
                message: reply.message,
            });
        };

        if self.is_expired(&token) {
            tracing::warn!("registration returned an expired token");
            return Err(self.fail_closed(SessionError::TokenExpired));
        }

        let identity = self.adopt_token(token).await?;
        tracing::info!(user = %identity.id, role = %identity.role, "registered and signed in");
        Ok(Registered::SignedIn(identity))
    }

    /// Signs in with a Google ID-token credential. The backend returns the
    /// identity alongside the token, so no profile fetch follows.
    ///
    /// # Errors
    /// - [`SessionError::NotAuthenticated`]: the credential is empty.
    /// - [`SessionError::Backend`]: the backend refused the credential.
    /// - [`SessionError::TokenExpired`]: the issued token is already
    ///   expired.
    pub async fn login_with_google(
        &mut self,
        credential: &str,
    ) -> Result<Identity, SessionError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(SessionError::NotAuthenticated);
        }

        let grant = self.backend.google(credential).await?;
        if self.is_expired(&grant.token) {
            tracing::warn!("google sign-in returned an expired token");
            return Err(self.fail_closed(SessionError::TokenExpired));
        }

        let identity = self.establish(grant.token, grant.user)?;
        tracing::info!(user = %identity.id, role = %identity.role, "signed in with google");
        Ok(identity)
    }

    /// Re-fetches the profile for the current token, picking up changes
    /// made on the backend (a new role, a renamed user).
    ///
    /// # Errors
    /// Anything [`authorize`](Self::authorize) returns, plus
    /// [`SessionError::Backend`] if the fetch fails (the session is then
    /// cleared).
    pub async fn refresh(&mut self) -> Result<Identity, SessionError> {
        let token = self.authorize()?;
        self.adopt_token(token).await
    }

    /// Returns the bearer token for an authenticated request, after
    /// checking it hasn't expired.
    ///
    /// Call this right before every authenticated request.
    ///
    /// # Errors
    /// - [`SessionError::NotAuthenticated`]: there is no token.
    /// - [`SessionError::TokenExpired`]: the token expired; the session has
    ///   been logged out.
    pub fn authorize(&mut self) -> Result<String, SessionError> {
        let Some(token) = self.session.token().map(str::to_string) else {
            return Err(SessionError::NotAuthenticated);
        };
        if self.is_expired(&token) {
            tracing::warn!("token has expired, logging out");
            return Err(self.fail_closed(SessionError::TokenExpired));
        }
        Ok(token)
    }

    /// Clears the session and both persisted entries.
    ///
    /// Never fails: a storage error is logged and the in-memory session is
    /// cleared regardless. Calling it when already signed out is a no-op.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear stored session entry");
            }
        }
        if self.session.is_authenticated() {
            tracing::info!("signed out");
        }
        self.session.clear();
    }

    // -- internals --------------------------------------------------------

    /// Stores `token`, fetches the identity it belongs to, and signs in.
    /// Any failure logs out.
    async fn adopt_token(&mut self, token: String) -> Result<Identity, SessionError> {
        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            return Err(self.fail_closed(e));
        }
        self.session.set_token(token.clone());

        match self.backend.profile(&token).await {
            Ok(identity) => self.establish(token, identity),
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed, logging out");
                Err(self.fail_closed(e))
            }
        }
    }

    /// Persists both entries and installs the signed-in session.
    fn establish(
        &mut self,
        token: String,
        identity: Identity,
    ) -> Result<Identity, SessionError> {
        let persisted = self
            .codec
            .encode(&identity)
            .map_err(SessionError::from)
            .and_then(|user| {
                self.storage.set(TOKEN_KEY, &token)?;
                self.storage.set(USER_KEY, &user)?;
                Ok(())
            });
        if let Err(e) = persisted {
            return Err(self.fail_closed(e));
        }

        self.session = Session::signed_in(identity.clone(), token);
        Ok(identity)
    }

    fn fail_closed(&mut self, err: impl Into<SessionError>) -> SessionError {
        self.logout();
        err.into()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionManager`, run against an in-memory backend
    //! that counts calls and an in-memory storage map.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use perfdesk_backend::BackendError;
    use perfdesk_identity::{
        GoogleGrant, RegisterReply, Role, TokenGrant, UserId,
    };

    use super::*;
    use crate::MemoryStorage;

    // -- Helpers ----------------------------------------------------------

    fn jwt(exp: u64) -> String {
        let claims = format!(r#"{{"sub":"u-1","exp":{exp}}}"#);
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(claims))
    }

    /// Expires in 2096.
    fn valid_token() -> String {
        jwt(4_000_000_000)
    }

    /// Expired in 1970.
    fn expired_token() -> String {
        jwt(1_000)
    }

    fn ada(role: Role) -> Identity {
        Identity {
            id: UserId::new("u-1"),
            name: "Ada".into(),
            role,
            email: Some("ada@example.com".into()),
        }
    }

    fn creds() -> Credentials {
        Credentials::new("ada@example.com", "pw")
    }

    /// A scripted backend. `None` in a field means that endpoint fails.
    #[derive(Default)]
    struct FakeBackend {
        login_token: Option<String>,
        profile: Option<Identity>,
        register_reply: Option<RegisterReply>,
        google: Option<GoogleGrant>,
        login_calls: AtomicUsize,
        profile_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn signed_in_as(role: Role) -> Self {
            Self {
                login_token: Some(valid_token()),
                profile: Some(ada(role)),
                ..Self::default()
            }
        }

        fn profile_calls(&self) -> usize {
            self.profile_calls.load(Ordering::SeqCst)
        }

        fn login_calls(&self) -> usize {
            self.login_calls.load(Ordering::SeqCst)
        }
    }

    impl AuthBackend for FakeBackend {
        async fn login(&self, _creds: &Credentials) -> Result<TokenGrant, BackendError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            self.login_token
                .clone()
                .map(|token| TokenGrant { token })
                .ok_or(BackendError::Rejected {
                    status: 401,
                    message: "Invalid credentials".into(),
                })
        }

        async fn register(&self, _reg: &Registration) -> Result<RegisterReply, BackendError> {
            self.register_reply
                .clone()
                .ok_or(BackendError::Unavailable("register down".into()))
        }

        async fn profile(&self, _token: &str) -> Result<Identity, BackendError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            self.profile
                .clone()
                .ok_or(BackendError::Unavailable("profile down".into()))
        }

        async fn google(&self, _credential: &str) -> Result<GoogleGrant, BackendError> {
            self.google.clone().ok_or(BackendError::Rejected {
                status: 400,
                message: "Google login failed".into(),
            })
        }
    }

    fn manager(
        backend: FakeBackend,
        storage: MemoryStorage,
    ) -> SessionManager<FakeBackend, MemoryStorage> {
        SessionManager::new(backend, storage, SessionConfig::default())
    }

    fn stored(mgr: &SessionManager<FakeBackend, MemoryStorage>, key: &str) -> Option<String> {
        mgr.storage().get(key).unwrap()
    }

    // =====================================================================
    // bootstrap()
    // =====================================================================

    #[tokio::test]
    async fn test_bootstrap_no_token_stays_anonymous_without_backend_call() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());

        let outcome = mgr.bootstrap().await.expect("should succeed");

        assert_eq!(outcome, Bootstrap::Anonymous);
        assert!(!mgr.session().is_authenticated());
        assert_eq!(mgr.backend().profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_valid_token_fetches_profile_once() {
        let token = valid_token();
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, token.as_str())]);
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Manager), storage);

        let outcome = mgr.bootstrap().await.expect("should succeed");

        assert_eq!(outcome, Bootstrap::Restored(ada(Role::Manager)));
        assert_eq!(mgr.backend().profile_calls(), 1);
        assert_eq!(mgr.session().role(), Some(Role::Manager));
        assert_eq!(mgr.session().token(), Some(token.as_str()));
        let user: Identity =
            JsonCodec.decode(&stored(&mgr, USER_KEY).expect("user persisted")).unwrap();
        assert_eq!(user, ada(Role::Manager));
    }

    #[tokio::test]
    async fn test_bootstrap_expired_token_clears_storage_without_backend_call() {
        let token = expired_token();
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, token.as_str()),
            (USER_KEY, r#"{"_id":"u-1","name":"Ada","role":"Admin"}"#),
        ]);
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), storage);

        let result = mgr.bootstrap().await;

        assert!(matches!(result, Err(SessionError::TokenExpired)));
        assert_eq!(mgr.backend().profile_calls(), 0);
        assert!(mgr.storage().is_empty(), "stored session should be cleared");
        assert!(!mgr.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_malformed_token_is_treated_as_expired() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "garbage")]);
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), storage);

        let result = mgr.bootstrap().await;

        assert!(matches!(result, Err(SessionError::TokenExpired)));
        assert_eq!(mgr.backend().profile_calls(), 0);
        assert!(mgr.storage().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_profile_failure_fails_closed() {
        let token = valid_token();
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, token.as_str())]);
        let backend = FakeBackend {
            profile: None,
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, storage);

        let result = mgr.bootstrap().await;

        assert!(matches!(result, Err(SessionError::Backend(_))));
        assert!(result.unwrap_err().requires_login());
        assert_eq!(mgr.backend().profile_calls(), 1);
        assert!(mgr.storage().is_empty());
        assert_eq!(mgr.session(), &Session::anonymous());
    }

    #[tokio::test]
    async fn test_bootstrap_when_already_signed_in_does_nothing() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());
        mgr.login(&creds()).await.unwrap();

        let outcome = mgr.bootstrap().await.unwrap();

        assert_eq!(outcome, Bootstrap::AlreadyActive);
        assert_eq!(mgr.backend().profile_calls(), 1, "only the login fetch");
    }

    // =====================================================================
    // login()
    // =====================================================================

    #[tokio::test]
    async fn test_login_success_persists_token_and_user() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());

        let identity = mgr.login(&creds()).await.expect("should sign in");

        assert_eq!(identity.role, Role::Admin);
        assert_eq!(stored(&mgr, TOKEN_KEY), Some(valid_token()));
        assert!(stored(&mgr, USER_KEY).is_some());
        assert_eq!(mgr.backend().profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_login_invalid_form_sends_nothing() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());

        let result = mgr.login(&Credentials::new("not-an-email", "")).await;

        let err = result.unwrap_err();
        assert!(matches!(err, SessionError::Invalid(ref e) if e.len() == 2));
        assert!(!err.requires_login());
        assert_eq!(mgr.backend().login_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_session_empty() {
        let mut mgr = manager(FakeBackend::default(), MemoryStorage::new());

        let err = mgr.login(&creds()).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!mgr.session().is_authenticated());
        assert!(mgr.storage().is_empty());
    }

    #[tokio::test]
    async fn test_login_profile_failure_discards_token() {
        let backend = FakeBackend {
            login_token: Some(valid_token()),
            profile: None,
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());

        let result = mgr.login(&creds()).await;

        assert!(matches!(result, Err(SessionError::Backend(_))));
        assert_eq!(stored(&mgr, TOKEN_KEY), None);
        assert_eq!(mgr.session().token(), None);
    }

    #[tokio::test]
    async fn test_login_expired_grant_is_rejected_before_profile() {
        let backend = FakeBackend {
            login_token: Some(expired_token()),
            profile: Some(ada(Role::Admin)),
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());

        let result = mgr.login(&creds()).await;

        assert!(matches!(result, Err(SessionError::TokenExpired)));
        assert_eq!(mgr.backend().profile_calls(), 0);
        assert!(mgr.storage().is_empty());
    }

    // =====================================================================
    // register()
    // =====================================================================

    #[tokio::test]
    async fn test_register_without_token_is_pending_login() {
        let backend = FakeBackend {
            register_reply: Some(RegisterReply {
                message: Some("User registered".into()),
                ..RegisterReply::default()
            }),
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());
        let reg = Registration::new("Ada", "ada@example.com", "pw", Role::Student);

        let outcome = mgr.register(&reg).await.unwrap();

        assert_eq!(
            outcome,
            Registered::PendingLogin {
                message: Some("User registered".into())
            }
        );
        assert!(!mgr.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_with_token_fetches_profile() {
        let backend = FakeBackend {
            register_reply: Some(RegisterReply {
                token: Some(valid_token()),
                ..RegisterReply::default()
            }),
            profile: Some(ada(Role::Instructor)),
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());
        let reg = Registration::new("Ada", "ada@example.com", "pw", Role::Instructor);

        let outcome = mgr.register(&reg).await.unwrap();

        assert_eq!(outcome, Registered::SignedIn(ada(Role::Instructor)));
        assert_eq!(mgr.backend().profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_register_with_token_and_user_still_fetches_profile() {
        let backend = FakeBackend {
            register_reply: Some(RegisterReply {
                token: Some(valid_token()),
                user: Some(ada(Role::Admin)),
                message: None,
            }),
            profile: Some(ada(Role::Student)),
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());
        let reg = Registration::new("Ada", "ada@example.com", "pw", Role::Student);

        mgr.register(&reg).await.unwrap();

        assert_eq!(mgr.backend().profile_calls(), 1);
        assert_eq!(mgr.session().role(), Some(Role::Student));
    }

    #[test]
    fn test_is_expired_with_unrepresentable_leeway_is_expired() {
        let config = SessionConfig {
            expiry_leeway: std::time::Duration::MAX,
        };
        let mgr = SessionManager::new(FakeBackend::default(), MemoryStorage::new(), config);

        assert!(mgr.is_expired(&valid_token()));
    }

    #[tokio::test]
    async fn test_register_missing_name_is_invalid() {
        let mut mgr = manager(FakeBackend::default(), MemoryStorage::new());
        let reg = Registration::new("", "ada@example.com", "pw", Role::Student);

        let result = mgr.register(&reg).await;

        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    // =====================================================================
    // login_with_google()
    // =====================================================================

    #[tokio::test]
    async fn test_google_persists_both_entries_without_profile_fetch() {
        let backend = FakeBackend {
            google: Some(GoogleGrant {
                token: valid_token(),
                user: ada(Role::ExecutivesAssociates),
            }),
            ..FakeBackend::default()
        };
        let mut mgr = manager(backend, MemoryStorage::new());

        let identity = mgr.login_with_google("cred").await.unwrap();

        assert_eq!(identity.role, Role::ExecutivesAssociates);
        assert_eq!(mgr.backend().profile_calls(), 0);
        assert_eq!(stored(&mgr, TOKEN_KEY), Some(valid_token()));
        assert!(stored(&mgr, USER_KEY).is_some());
    }

    #[tokio::test]
    async fn test_google_empty_credential_is_rejected_locally() {
        let mut mgr = manager(FakeBackend::default(), MemoryStorage::new());

        let result = mgr.login_with_google("   ").await;

        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_google_refused_surfaces_message() {
        let mut mgr = manager(FakeBackend::default(), MemoryStorage::new());

        let err = mgr.login_with_google("cred").await.unwrap_err();

        assert_eq!(err.user_message(), "Google login failed");
    }

    // =====================================================================
    // authorize() / refresh() / logout()
    // =====================================================================

    #[tokio::test]
    async fn test_authorize_returns_current_token() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());
        mgr.login(&creds()).await.unwrap();

        assert_eq!(mgr.authorize().unwrap(), valid_token());
    }

    #[test]
    fn test_authorize_without_session_is_not_authenticated() {
        let mut mgr = manager(FakeBackend::default(), MemoryStorage::new());

        assert!(matches!(mgr.authorize(), Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_authorize_expired_token_logs_out() {
        let mut mgr = SessionManager::new(
            FakeBackend::signed_in_as(Role::Admin),
            MemoryStorage::new(),
            SessionConfig::default(),
        );
        mgr.login(&creds()).await.unwrap();
        // A leeway longer than the token's remaining life makes it
        // expired "now" without waiting.
        mgr.config.expiry_leeway = std::time::Duration::from_secs(200 * 365 * 24 * 3600);

        let result = mgr.authorize();

        assert!(matches!(result, Err(SessionError::TokenExpired)));
        assert!(!mgr.session().is_authenticated());
        assert!(mgr.storage().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_role() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Student), MemoryStorage::new());
        mgr.login(&creds()).await.unwrap();
        mgr.backend.profile = Some(ada(Role::Instructor));

        let identity = mgr.refresh().await.unwrap();

        assert_eq!(identity.role, Role::Instructor);
        assert_eq!(mgr.session().role(), Some(Role::Instructor));
        assert_eq!(mgr.backend().profile_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_logs_out() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Student), MemoryStorage::new());
        mgr.login(&creds()).await.unwrap();
        mgr.backend.profile = None;

        let result = mgr.refresh().await;

        assert!(matches!(result, Err(SessionError::Backend(_))));
        assert!(!mgr.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_removes_both_entries_and_is_idempotent() {
        let mut mgr = manager(FakeBackend::signed_in_as(Role::Admin), MemoryStorage::new());
        mgr.login(&creds()).await.unwrap();

        mgr.logout();
        mgr.logout();

        assert!(mgr.storage().is_empty());
        assert_eq!(mgr.session(), &Session::anonymous());
    }

    #[tokio::test]
    async fn test_restart_with_persisted_session_restores_it() {
        // First "process": sign in, keep the storage.
        let mut first = manager(FakeBackend::signed_in_as(Role::Manager), MemoryStorage::new());
        first.login(&creds()).await.unwrap();
        let storage = first.storage().clone();

        // Second "process": fresh manager over the same storage.
        let mut second = manager(FakeBackend::signed_in_as(Role::Manager), storage);
        let outcome = second.bootstrap().await.unwrap();

        assert_eq!(outcome, Bootstrap::Restored(ada(Role::Manager)));
    }
}
