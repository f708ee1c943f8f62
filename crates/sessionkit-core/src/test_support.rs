//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;

use crate::api::{ApiClient, ApiConfig};
use crate::effects::{Navigator, Notifier};
use crate::models::{Role, User};
use crate::storage::{ClientStorage, MemoryStorage};

pub fn sample_user() -> User {
    User {
        id: "u-1".to_string(),
        email: "a@b.com".to_string(),
        name: "Ada".to_string(),
        avatar: None,
        role: Role::User,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m),
                Notification::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(Notification::Error(message.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Serve `routes` under `/api` on an ephemeral port and return the base URL.
pub async fn spawn_backend(routes: Router) -> String {
    let app = Router::new().nest("/api", routes);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// Client wired to in-memory storage and a recording notifier.
pub fn test_client(
    base_url: &str,
) -> (ApiClient, ClientStorage, Arc<RecordingNotifier>) {
    let storage = ClientStorage::new(Arc::new(MemoryStorage::new()));
    let notifier = Arc::new(RecordingNotifier::default());
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    let client = ApiClient::new(&config, storage.clone(), notifier.clone()).unwrap();
    (client, storage, notifier)
}
