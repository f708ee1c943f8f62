use serde::{Deserialize, Serialize};

use crate::models::User;

/// Snapshot format version written alongside the persisted state
pub const PERSIST_VERSION: u32 = 0;

/// Everything the store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    /// True while a sign-in or sign-up request is in flight. Never persisted.
    pub is_loading: bool,
}

impl AuthState {
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }
}

/// The persisted subset of `AuthState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl From<PersistedState> for AuthState {
    fn from(persisted: PersistedState) -> Self {
        Self {
            user: persisted.user,
            token: persisted.token,
            is_authenticated: persisted.is_authenticated,
            is_loading: false,
        }
    }
}

/// On-disk envelope: `{"state": {...}, "version": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub state: PersistedState,
    pub version: u32,
}

impl PersistedAuth {
    pub fn new(state: PersistedState) -> Self {
        Self {
            state,
            version: PERSIST_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;

    #[test]
    fn test_snapshot_round_trip_drops_loading() {
        let state = AuthState {
            user: Some(sample_user()),
            token: Some("abc".to_string()),
            is_authenticated: true,
            is_loading: true,
        };

        let json = serde_json::to_string(&PersistedAuth::new(state.persisted())).unwrap();
        let restored: PersistedAuth = serde_json::from_str(&json).unwrap();
        let restored = AuthState::from(restored.state);

        assert_eq!(restored.user, state.user);
        assert_eq!(restored.token, state.token);
        assert_eq!(restored.is_authenticated, state.is_authenticated);
        assert!(!restored.is_loading);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = PersistedAuth::new(PersistedState::default());
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "state": { "user": null, "token": null, "isAuthenticated": false },
                "version": 0
            })
        );
    }
}
