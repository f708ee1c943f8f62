//! Authentication flow module.
//!
//! This module provides `AuthFlow`, which sequences each auth action:
//! request → session store update → navigation and notification.
//!
//! Nothing escapes an `AuthFlow` operation as an error. Failures are logged,
//! reported through the `Notifier` where the user asked for something, and
//! summarized in the returned `bool`.

pub mod flow;

pub use flow::{AuthFlow, LOGIN_PATH, ME_PATH, REGISTER_PATH};
