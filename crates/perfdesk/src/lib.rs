//! # Perfdesk
//!
//! Session and access-control client for the perfdesk HR and performance
//! backend.
//!
//! Perfdesk keeps one user's signed-in state: it restores a saved session
//! at startup, signs in and out, checks the bearer token before each
//! authenticated request, and decides which screens the user may open.
//! Anything that goes wrong with the session logs the user out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use perfdesk::prelude::*;
//!
//! # async fn run() -> Result<(), PerfdeskError> {
//! let mut client = PerfdeskClient::builder().build()?;
//! client.start().await?;
//! if !client.session().is_authenticated() {
//!     client
//!         .login(&Credentials::new("ada@example.com", "hunter2"))
//!         .await?;
//! }
//! let page = client.employees(1, 10).await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{PerfdeskClient, PerfdeskClientBuilder};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_GOOGLE_CLIENT_ID};
pub use error::PerfdeskError;

pub use perfdesk_backend as backend;
pub use perfdesk_identity as identity;
pub use perfdesk_routes as routes;
pub use perfdesk_session as session;

pub mod prelude {
    pub use crate::{ClientConfig, PerfdeskClient, PerfdeskClientBuilder, PerfdeskError};
    pub use perfdesk_identity::{
        Credentials, Employee, EmployeePage, Identity, Registration, Role, UserId,
    };
    pub use perfdesk_routes::{Access, Menu, MenuItem, Reason, Route};
    pub use perfdesk_session::{Bootstrap, Registered, Session, SessionConfig};
}
