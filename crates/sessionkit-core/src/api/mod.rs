//! REST API client module.
//!
//! This module provides the `ApiClient` for talking to the configured
//! backend. Requests carry a bearer token read from durable storage, and
//! every response is decoded into the `ApiResponse` envelope.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
pub use error::ApiError;
