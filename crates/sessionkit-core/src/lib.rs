//! Core library for sessionkit.
//!
//! Holds everything a front-end needs to keep a user signed in against a
//! remote REST API:
//!
//! - `storage`: durable client-side key/value storage backends
//! - `store`: the session store (`AuthStore`) and its persisted snapshot
//! - `api`: the HTTP client wrapper (`ApiClient`) and its typed errors
//! - `auth`: the auth flow controller (`AuthFlow`)
//! - `effects`: the navigation and notification seams a UI implements
//! - `validation`: form and payload validation schemas
//! - `models`: wire types shared by all of the above
//! - `config`: configuration loading

pub mod api;
pub mod auth;
pub mod config;
pub mod effects;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiConfig, ApiError};
pub use auth::AuthFlow;
pub use effects::{Navigator, Notifier};
pub use config::{Config, StorageBackend};
pub use models::{ApiResponse, Role, User, UserPatch};
pub use storage::{ClientStorage, Storage};
pub use store::{AuthState, AuthStore};
