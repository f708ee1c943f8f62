use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::effects::{Navigator, Notifier, DASHBOARD_ROUTE, HOME_ROUTE};
use crate::models::{AuthPayload, User};
use crate::store::AuthStore;
use crate::validation::{LoginForm, RegisterForm};

// ============================================================================
// Constants
// ============================================================================

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ME_PATH: &str = "/auth/me";

const SIGN_IN_SUCCESS: &str = "Welcome back!";
const SIGN_IN_FAILURE: &str = "Invalid credentials";
const SIGN_UP_SUCCESS: &str = "Account created successfully!";
const SIGN_UP_FAILURE: &str = "Failed to create account";
const SIGN_OUT_SUCCESS: &str = "Signed out successfully";

/// Auth flow controller.
///
/// Holds no state of its own beyond its collaborators; the only shared
/// in-flight state is the store's loading flag. Concurrent calls are not
/// serialized and the last store write wins.
#[derive(Clone)]
pub struct AuthFlow {
    api: ApiClient,
    store: AuthStore,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl AuthFlow {
    pub fn new(
        api: ApiClient,
        store: AuthStore,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
            notifier,
        }
    }

    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    /// Sign in with email and password. Returns true when signed in.
    pub async fn sign_in(&self, credentials: &LoginForm) -> bool {
        self.authenticate(LOGIN_PATH, credentials, SIGN_IN_SUCCESS, SIGN_IN_FAILURE)
            .await
    }

    /// Register a new account and sign into it. Returns true when signed in.
    pub async fn sign_up(&self, user_data: &RegisterForm) -> bool {
        self.authenticate(REGISTER_PATH, user_data, SIGN_UP_SUCCESS, SIGN_UP_FAILURE)
            .await
    }

    /// Clear the session locally. The backend is not contacted.
    pub fn sign_out(&self) {
        self.store.logout();
        self.notifier.success(SIGN_OUT_SUCCESS);
        self.navigator.push(HOME_ROUTE);
        info!("Signed out");
    }

    /// Re-validate the stored token against `/auth/me`.
    ///
    /// On success only the user is replaced; the token is kept as is. A
    /// successful reply without a user clears just the user. A rejection or
    /// error clears the whole session. Never notifies or navigates.
    pub async fn check_auth(&self) -> bool {
        match self.api.get::<Option<User>>(ME_PATH).await {
            Ok(response) if response.success => {
                let valid = response.data.is_some();
                match response.data {
                    Some(ref user) => info!(user_id = %user.id, "Session is valid"),
                    None => warn!("Auth check returned no user"),
                }
                self.store.set_user(response.data);
                valid
            }
            Ok(response) => {
                warn!(message = %response.message, "Auth check rejected");
                self.store.logout();
                false
            }
            Err(e) => {
                error!(error = %e, "Auth check error");
                self.store.logout();
                false
            }
        }
    }

    async fn authenticate<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        success_message: &str,
        failure_message: &str,
    ) -> bool {
        self.store.set_loading(true);

        let signed_in = match self.api.post::<Option<AuthPayload>, _>(path, body).await {
            Ok(response) => match response.data {
                Some(AuthPayload { user, token }) if response.success => {
                    info!(path, user_id = %user.id, "Authenticated");
                    self.store.login(user, token);
                    self.notifier.success(success_message);
                    self.navigator.push(DASHBOARD_ROUTE);
                    true
                }
                _ => {
                    // 2xx with success: false is a failed attempt, same as an error
                    warn!(path, message = %response.message, "Authentication rejected");
                    self.notifier.error(failure_message);
                    false
                }
            },
            Err(e) => {
                error!(path, error = %e, "Authentication error");
                self.notifier.error(failure_message);
                false
            }
        };

        self.store.set_loading(false);
        signed_in
    }
}
