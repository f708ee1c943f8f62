use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::state::{AuthState, PersistedAuth, PERSIST_VERSION};
use crate::models::{User, UserPatch};
use crate::storage::ClientStorage;

/// Storage key holding the raw bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key holding the serialized `PersistedAuth` snapshot
pub const PERSIST_KEY: &str = "auth-storage";

/// Session store.
///
/// Clone is cheap and clones share state, so the same store can be handed to
/// the auth flow and to whatever renders the UI.
#[derive(Clone, Debug)]
pub struct AuthStore {
    state: Arc<watch::Sender<AuthState>>,
    storage: ClientStorage,
}

impl AuthStore {
    /// Create a store, rehydrating from `storage` when a snapshot exists.
    pub fn new(storage: ClientStorage) -> Self {
        let initial = Self::rehydrate(&storage).unwrap_or_default();
        debug!(
            authenticated = initial.is_authenticated,
            has_token = initial.token.is_some(),
            "Auth store created"
        );
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    fn rehydrate(storage: &ClientStorage) -> Option<AuthState> {
        let raw = storage.get_item(PERSIST_KEY)?;
        match serde_json::from_str::<PersistedAuth>(&raw) {
            Ok(snapshot) if snapshot.version == PERSIST_VERSION => Some(snapshot.state.into()),
            Ok(snapshot) => {
                warn!(version = snapshot.version, "Ignoring auth snapshot with unknown version");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse auth snapshot");
                None
            }
        }
    }

    // ===== Reads =====

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    // ===== Mutators =====

    /// Partial update: the token is left as is.
    pub fn set_user(&self, user: Option<User>) {
        self.update(|state| {
            state.is_authenticated = user.is_some();
            state.user = user;
        });
    }

    /// Partial update: the user is left as is. An empty token removes the
    /// durable copy.
    pub fn set_token(&self, token: Option<String>) {
        self.update(|state| state.token = token.clone());
        self.write_token(token.as_deref().filter(|t| !t.is_empty()));
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.update(|state| state.is_loading = is_loading);
    }

    pub fn login(&self, user: User, token: String) {
        self.write_token(Some(&token));
        self.update(|state| {
            state.user = Some(user);
            state.token = Some(token);
            state.is_authenticated = true;
            state.is_loading = false;
        });
    }

    pub fn logout(&self) {
        self.write_token(None);
        self.update(|state| {
            state.user = None;
            state.token = None;
            state.is_authenticated = false;
            state.is_loading = false;
        });
    }

    /// Merge `patch` into the current user. Does nothing when signed out.
    pub fn update_user(&self, patch: UserPatch) {
        if self.state.borrow().user.is_none() {
            return;
        }
        self.update(|state| {
            if let Some(user) = state.user.as_mut() {
                user.merge(patch);
            }
        });
    }

    // ===== Persistence =====

    fn update(&self, mutate: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(mutate);
        self.save();
    }

    fn save(&self) {
        let snapshot = PersistedAuth::new(self.state.borrow().persisted());
        match serde_json::to_string(&snapshot) {
            Ok(json) => self.storage.set_item(PERSIST_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize auth snapshot"),
        }
    }

    fn write_token(&self, token: Option<&str>) {
        match token {
            Some(token) => self.storage.set_item(AUTH_TOKEN_KEY, token),
            None => self.storage.remove_item(AUTH_TOKEN_KEY),
        }
    }
}
