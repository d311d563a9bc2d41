//! Core identity types and the JSON bodies of the authentication endpoints.
//!
//! Every struct here mirrors a JSON shape the backend sends or expects, so
//! the serde attributes matter: a mismatch means the backend's replies stop
//! parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IdentityError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The backend's identifier for a user.
///
/// Newtype over `String` so a user id can't be passed where a token or an
/// email is expected. `#[serde(transparent)]` keeps it a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a `UserId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// What a signed-in user is allowed to see and do.
///
/// This is a closed set: a role string the backend sends that isn't listed
/// here fails to decode instead of silently falling through to "no
/// permissions". Matching on `Role` is exhaustive, so adding a variant forces
/// every permission table to be revisited.
///
/// The serde names are the exact strings stored by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Role {
    Admin,
    Manager,
    #[serde(rename = "Program Head")]
    ProgramHead,
    #[serde(rename = "Program Manager")]
    ProgramManager,
    #[serde(rename = "Business Manager")]
    BusinessManager,
    #[serde(rename = "Executives/Associates")]
    ExecutivesAssociates,
    Instructor,
    Student,
    /// Default role of the self-service sign-up form. Older accounts carry
    /// the misspelled `"employe"`.
    #[serde(alias = "employe")]
    Employee,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 9] = [
        Role::Admin,
        Role::Manager,
        Role::ProgramHead,
        Role::ProgramManager,
        Role::BusinessManager,
        Role::ExecutivesAssociates,
        Role::Instructor,
        Role::Student,
        Role::Employee,
    ];

    /// The wire name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::ProgramHead => "Program Head",
            Role::ProgramManager => "Program Manager",
            Role::BusinessManager => "Business Manager",
            Role::ExecutivesAssociates => "Executives/Associates",
            Role::Instructor => "Instructor",
            Role::Student => "Student",
            Role::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    /// Parses a wire name. Matching is exact apart from surrounding
    /// whitespace; `"employe"` is accepted for [`Role::Employee`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "employe" {
            return Ok(Role::Employee);
        }
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| IdentityError::UnknownRole(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The signed-in user, as returned by `GET /users/profile`.
///
/// This is also what gets persisted under the `user` storage key. Fields the
/// backend adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The backend names this `_id`; `id` is accepted too.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,

    /// Display name ("Welcome, {name}").
    pub name: String,

    /// Drives route access and the navigation menu.
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /users/login`.
///
/// `Debug` is implemented by hand so the password never reaches a log line.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials from raw form input, trimming both fields.
    pub fn new(email: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            email: email.as_ref().trim().to_string(),
            password: password.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /users/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Registration {
    /// Builds a registration from raw form input, trimming the text fields.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        password: impl AsRef<str>,
        role: Role,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
            password: password.as_ref().trim().to_string(),
            role,
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Reply of `POST /users/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub token: String,
}

/// Reply of `POST /users/register`.
///
/// Some deployments sign the new user in straight away and include a token;
/// others only confirm the account. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterReply {
    pub token: Option<String>,
    pub user: Option<Identity>,
    pub message: Option<String>,
}

/// Reply of `POST /users/auth/google`: a token and the identity together,
/// so no profile fetch is needed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleGrant {
    pub token: String,
    pub user: Identity,
}

/// The error payload every endpoint returns on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// One row of the employee roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

/// Reply of `GET /emp/get`: one page of employees plus the total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub total: u64,
}

// =========================================================================
// Tests
// =========================================================================
