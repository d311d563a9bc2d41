//! Client-side checks for the sign-in and sign-up forms.
//!
//! These run before a request is built, so an obviously bad email never
//! costs a round trip. Errors are collected per field rather than stopping at
//! the first one, letting a UI show them all inline.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Credentials, Registration};

/// Same shape the web form accepted: dotted local part, dotted domain, and a
/// 2–7 letter top-level domain. ASCII only.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@([A-Za-z0-9_-]+\.)+[A-Za-z]{2,7}$")
        .expect("email pattern is valid")
});

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// Validation messages keyed by field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(Field, &'static str)>,
}

impl FieldErrors {
    /// Returns `true` if every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| *msg)
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().copied()
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push((field, message));
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, msg)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {msg}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !EMAIL.is_match(email) {
        errors.push(Field::Email, "Invalid email format");
    }
}

/// Validates the sign-in form.
///
/// # Errors
/// Returns every failing field: a missing or malformed email and a missing
/// password.
pub fn validate_sign_in(creds: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(creds.email.trim(), &mut errors);
    if creds.password.trim().is_empty() {
        errors.push(Field::Password, "Password is required");
    }
    errors.into_result()
}

/// Validates the sign-up form.
///
/// # Errors
/// Returns every failing field: missing name, missing or malformed email,
/// missing password.
pub fn validate_sign_up(reg: &Registration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if reg.name.trim().is_empty() {
        errors.push(Field::Name, "Name is required");
    }
    check_email(reg.email.trim(), &mut errors);
    if reg.password.trim().is_empty() {
        errors.push(Field::Password, "Password is required");
    }
    errors.into_result()
}
