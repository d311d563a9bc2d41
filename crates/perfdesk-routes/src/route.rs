//! The client's screens and who may open them.

use std::fmt;
use std::str::FromStr;

use perfdesk_identity::Role;

/// Roles that manage the employee roster.
pub const EMPLOYEE_MANAGERS: &[Role] = &[
    Role::Admin,
    Role::Manager,
    Role::ProgramHead,
    Role::ProgramManager,
    Role::BusinessManager,
];

/// Roles that review other people's performance.
pub const REVIEW_MANAGERS: &[Role] = &[
    Role::Manager,
    Role::ProgramHead,
    Role::ProgramManager,
    Role::BusinessManager,
];

/// A path that didn't match any screen.
#[derive(Debug, thiserror::Error)]
#[error("no screen at {0:?}")]
pub struct UnknownRoute(pub String);

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Every screen in the client.
///
/// - **Root** (`/`) is a landing redirect, never rendered itself.
/// - **Auth** (`/auth`) is the only public screen.
/// - Everything else needs a signed-in identity, and some need a role
///   from [`allowed_roles`](Route::allowed_roles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Auth,
    Home,
    AddEmployee,
    ViewEmployees,
    ManagerReview,
    SelfReview,
    ViewReview,
    AddKpi,
    ViewKpi,
    AddPerformance,
    ViewPerformance,
}

impl Route {
    /// Every route, in the order the client declares them.
    pub const ALL: [Route; 12] = [
        Route::Root,
        Route::Auth,
        Route::Home,
        Route::AddEmployee,
        Route::ViewEmployees,
        Route::ManagerReview,
        Route::SelfReview,
        Route::ViewReview,
        Route::AddKpi,
        Route::ViewKpi,
        Route::AddPerformance,
        Route::ViewPerformance,
    ];

    /// The URL path of this screen.
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Auth => "/auth",
            Route::Home => "/home",
            Route::AddEmployee => "/add-employee",
            Route::ViewEmployees => "/view-employees",
            Route::ManagerReview => "/manager-review",
            Route::SelfReview => "/self-review",
            Route::ViewReview => "/view-review",
            Route::AddKpi => "/add-kpi",
            Route::ViewKpi => "/view-kpi",
            Route::AddPerformance => "/add-performance",
            Route::ViewPerformance => "/view-performance",
        }
    }

    /// Looks up the screen for a path. A query string, a fragment, and a
    /// trailing slash are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Returns `true` for screens anyone may open.
    pub fn is_public(self) -> bool {
        matches!(self, Route::Root | Route::Auth)
    }

    /// The roles allowed on this screen. Empty means any signed-in user.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Route::AddEmployee | Route::ViewEmployees => EMPLOYEE_MANAGERS,
            Route::ManagerReview => REVIEW_MANAGERS,
            Route::Root
            | Route::Auth
            | Route::Home
            | Route::SelfReview
            | Route::ViewReview
            | Route::AddKpi
            | Route::ViewKpi
            | Route::AddPerformance
            | Route::ViewPerformance => &[],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}
