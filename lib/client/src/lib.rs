//! HTTP client core for the account service.
//!
//! [`Session`] is the single shared piece of client state: it owns the
//! bearer token and the current user profile, persists both across
//! restarts through a [`SessionStore`], and maps each account operation
//! onto one HTTP call through the [`Gateway`] seam.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use account_client::{FileStore, HttpGateway, Session};
//!
//! let gateway = Arc::new(HttpGateway::new("http://localhost:3000")?);
//! let store = Arc::new(FileStore::new(state_dir));
//! let session = Arc::new(Session::new(gateway, store));
//! session.authenticate("ada@x.io", "abc123!").await?;
//! ```

pub mod error;
pub mod gateway;
pub mod session;
pub mod store;
pub mod types;

pub use error::{ApiError, StoreError};
pub use gateway::{ApiRequest, Gateway, HttpGateway, Method, QueryValue};
pub use session::Session;
pub use store::{FileStore, MemoryStore, PersistedSession, SessionStore};
pub use types::{Credentials, LoginResponse, ProfileUpdate, RegisterRequest, User};

#[cfg(feature = "testing")]
pub use gateway::testing::FakeGateway;
