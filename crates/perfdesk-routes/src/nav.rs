//! Navigation menus per role.

use perfdesk_identity::Role;
use perfdesk_session::Session;

use crate::Route;

/// One link in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

/// A titled drop-down group of links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

impl Menu {
    /// Returns `true` if `current` is one of this menu's links, i.e. the
    /// menu title should be highlighted.
    pub fn contains(&self, current: Route) -> bool {
        self.items.iter().any(|item| item.route == current)
    }
}

const EMPLOYEE_MANAGEMENT: Menu = Menu {
    title: "Employee Management",
    items: &[
        MenuItem {
            label: "Add Employee",
            route: Route::AddEmployee,
        },
        MenuItem {
            label: "View Employees",
            route: Route::ViewEmployees,
        },
    ],
};

const REVIEW_MANAGEMENT: Menu = Menu {
    title: "Review Management",
    items: &[
        MenuItem {
            label: "Manager Review",
            route: Route::ManagerReview,
        },
        MenuItem {
            label: "View Review",
            route: Route::ViewReview,
        },
        MenuItem {
            label: "Submit Self-Review",
            route: Route::SelfReview,
        },
    ],
};

const SELF_REVIEW: Menu = Menu {
    title: "Review Management",
    items: &[
        MenuItem {
            label: "View Review",
            route: Route::ViewReview,
        },
        MenuItem {
            label: "Submit Self-Review",
            route: Route::SelfReview,
        },
    ],
};

/// The menus shown to `role`, left to right.
pub fn navigation(role: Role) -> Vec<Menu> {
    match role {
        Role::Admin => vec![EMPLOYEE_MANAGEMENT],
        Role::Manager
        | Role::ProgramHead
        | Role::ProgramManager
        | Role::BusinessManager => vec![EMPLOYEE_MANAGEMENT, REVIEW_MANAGEMENT],
        Role::ExecutivesAssociates => vec![SELF_REVIEW],
        Role::Instructor | Role::Student | Role::Employee => Vec::new(),
    }
}

/// The menus for whoever is signed in; none when signed out.
pub fn menu_for(session: &Session) -> Vec<Menu> {
    session.role().map(navigation).unwrap_or_default()
}
