//! Durable client-side key/value storage.
//!
//! This module provides:
//! - `Storage`: the backend trait (`get_item`/`set_item`/`remove_item`)
//! - `FileStorage`: one file per key in a data directory
//! - `KeyringStorage`: OS keychain entries, one per key
//! - `MemoryStorage`: a process-lifetime map
//! - `ClientStorage`: the guarded handle everything else uses
//!
//! Storage is best effort. `ClientStorage` may have no backend at all, and
//! backend failures are logged and swallowed rather than surfaced.

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

pub use self::file::FileStorage;
pub use self::keychain::KeyringStorage;
pub use self::memory::MemoryStorage;

/// A synchronous string key/value store that survives restarts.
pub trait Storage: Send + Sync {
    /// Returns `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Guarded access to an optional storage backend.
///
/// Clone is cheap; clones share the same backend.
#[derive(Clone, Default)]
pub struct ClientStorage {
    backend: Option<Arc<dyn Storage>>,
}

impl ClientStorage {
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A handle with no backend: reads return nothing and writes are skipped.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    pub fn set_item(&self, key: &str, value: &str) {
        let Some(backend) = self.backend.as_ref() else {
            debug!(key, "Storage unavailable, skipping write");
            return;
        };
        if let Err(e) = backend.set_item(key, value) {
            warn!(key, error = %e, "Failed to write to storage");
        }
    }

    pub fn remove_item(&self, key: &str) {
        let Some(backend) = self.backend.as_ref() else {
            debug!(key, "Storage unavailable, skipping remove");
            return;
        };
        if let Err(e) = backend.remove_item(key) {
            warn!(key, error = %e, "Failed to remove from storage");
        }
    }
}

impl std::fmt::Debug for ClientStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStorage")
            .field("available", &self.is_available())
            .finish()
    }
}
