//! Identity and wire types for perfdesk.
//!
//! This crate defines the vocabulary every other layer speaks:
//!
//! - **Types** ([`Identity`], [`Role`], [`UserId`], and the request/response
//!   bodies of the authentication endpoints): what travels between the
//!   client and the REST backend, and what gets persisted locally.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   turned into strings/bytes for local storage.
//! - **Forms** ([`validate_sign_in`], [`validate_sign_up`]): field checks
//!   that run before any request is sent.
//! - **Errors** ([`IdentityError`]).
//!
//! # Architecture
//!
//! ```text
//! Backend (HTTP) → Identity (typed values) → Session (who is signed in)
//! ```
//!
//! Nothing in here performs I/O.

mod codec;
mod error;
mod forms;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::IdentityError;
pub use forms::{Field, FieldErrors, validate_sign_in, validate_sign_up};
pub use types::{
    Credentials, Employee, EmployeePage, ErrorBody, GoogleGrant, Identity,
    RegisterReply, Registration, Role, TokenGrant, UserId,
};
