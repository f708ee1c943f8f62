//! Session store module.
//!
//! This module provides:
//! - `AuthState`: the current user, token and derived flags
//! - `AuthStore`: the single source of truth for `AuthState`, with
//!   synchronous mutators and a change subscription
//! - `PersistedAuth`: the snapshot written to durable storage
//!
//! The store is rehydrated from storage when constructed and writes its
//! snapshot after every mutation. Only `login` and `logout` move all fields
//! together; `set_user` and `set_token` are partial updates.

pub mod auth_store;
pub mod state;

pub use auth_store::{AuthStore, AUTH_TOKEN_KEY, PERSIST_KEY};
pub use state::{AuthState, PersistedAuth, PersistedState};
