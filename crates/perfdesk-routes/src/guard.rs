//! The route guard: may this session see this screen?
//!
//! Everything here is a pure function of its inputs. No I/O, no token
//! checks (that's [`SessionManager::authorize`]'s job right before a
//! request), no mutation.
//!
//! [`SessionManager::authorize`]: perfdesk_session::SessionManager::authorize

use perfdesk_identity::Role;
use perfdesk_session::Session;

use crate::Route;

/// Why a navigation was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// No identity in the session.
    SignedOut,
    /// Signed in, but the screen doesn't allow this role.
    RoleNotAllowed(Role),
    /// `/` always forwards somewhere.
    Landing,
}

/// The guard's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Show the screen.
    Render,
    /// Go to `to` instead.
    Redirect { to: Route, reason: Reason },
}

impl Access {
    pub fn is_render(&self) -> bool {
        matches!(self, Access::Render)
    }
}

/// Decides whether a protected view may render.
///
/// Renders only if the session has an identity and, when `allowed` is
/// non-empty, that identity's role is in it. Otherwise redirects to the
/// login screen.
pub fn guard(session: &Session, allowed: &[Role]) -> Access {
    let Some(role) = session.role() else {
        return Access::Redirect {
            to: Route::Auth,
            reason: Reason::SignedOut,
        };
    };
    if !allowed.is_empty() && !allowed.contains(&role) {
        return Access::Redirect {
            to: Route::Auth,
            reason: Reason::RoleNotAllowed(role),
        };
    }
    Access::Render
}

/// Decides what happens when the user navigates to `route`.
///
/// `/` forwards to `/home` or `/auth`; `/auth` always renders; everything
/// else goes through [`guard`] with the route's own allow-set.
pub fn navigate(session: &Session, route: Route) -> Access {
    let access = match route {
        Route::Root => Access::Redirect {
            to: if session.is_authenticated() {
                Route::Home
            } else {
                Route::Auth
            },
            reason: Reason::Landing,
        },
        Route::Auth => Access::Render,
        protected => guard(session, protected.allowed_roles()),
    };
    if let Access::Redirect { to, reason } = access {
        tracing::debug!(from = %route, %to, ?reason, "navigation redirected");
    }
    access
}
