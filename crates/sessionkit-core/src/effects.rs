//! UI-side collaborators the core calls into.
//!
//! The core never renders anything. It asks a `Navigator` to change the
//! current route and a `Notifier` to show a message, and the front-end
//! decides what that means.

use tracing::{error, info};

/// Route shown after a successful sign-in or sign-up
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Route shown after sign-out
pub const HOME_ROUTE: &str = "/";

pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only writes to the log, for runs nobody is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(message, "Notification");
    }

    fn error(&self, message: &str) {
        error!(message, "Error notification");
    }
}
