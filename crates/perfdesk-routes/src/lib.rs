//! Screens, the route guard, and navigation for perfdesk.
//!
//! # Key types
//!
//! - [`Route`]: every screen in the client and its allow-set
//! - [`guard`] / [`navigate`]: pure render-or-redirect decisions
//! - [`navigation`]: the menus each [`Role`](perfdesk_identity::Role) sees

mod guard;
mod nav;
mod route;

pub use guard::{Access, Reason, guard, navigate};
pub use nav::{Menu, MenuItem, menu_for, navigation};
pub use route::{EMPLOYEE_MANAGERS, REVIEW_MANAGERS, Route, UnknownRoute};
