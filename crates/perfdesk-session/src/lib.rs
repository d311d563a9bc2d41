//! Session management for perfdesk.
//!
//! This crate handles the lifecycle of the signed-in user:
//!
//! 1. **Token checks**: is the bearer token still good? ([`token`])
//! 2. **Persistence**: the local-storage equivalent ([`Storage`])
//! 3. **Lifecycle**: bootstrap, sign-in, refresh, and logout
//!    ([`SessionManager`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Routes (above)    ← reads the Session to decide what may render
//!     ↕
//! Session (this crate)  ← owns identity + token, fails closed
//!     ↕
//! Backend (below)   ← the REST calls that issue tokens and profiles
//! ```

mod error;
mod manager;
mod session;
mod storage;
pub mod token;

pub use error::SessionError;
pub use manager::{Bootstrap, Registered, SessionManager};
pub use session::{Session, SessionConfig};
pub use storage::{
    FileStorage, MemoryStorage, Storage, StorageError, TOKEN_KEY, USER_KEY,
};
pub use token::TokenError;
