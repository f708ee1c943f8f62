use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Shown when neither the server nor the transport gave anything better
pub const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request failed with status code {}", status.as_u16())]
    Status {
        status: StatusCode,
        /// `message` field of the error body, if the server sent one
        message: Option<String>,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|resp| resp.message)
            .or_else(|_| {
                serde_json::from_str::<serde_json::Value>(body).map(|value| {
                    value
                        .get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_default()
                })
            })
            .ok()
            .filter(|m| !m.is_empty());

        ApiError::Status {
            status,
            message,
            body: Self::truncate_body(body),
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The most specific human-readable message available: the server's
    /// `message` field, then the transport's own message, then a fallback.
    pub fn user_message(&self) -> String {
        let message = match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { .. } => self.to_string(),
            ApiError::Timeout(e) | ApiError::Network(e) => e.to_string(),
            ApiError::InvalidResponse(message) => message.clone(),
            ApiError::InvalidHeader(e) => e.to_string(),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_server_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Email already registered","statusCode":400}"#,
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_from_status_accepts_loose_message_body() {
        // Not a full ErrorResponse, but still carries a message
        let err = ApiError::from_status(StatusCode::CONFLICT, r#"{"message":"Taken"}"#);
        assert_eq!(err.user_message(), "Taken");
    }

    #[test]
    fn test_from_status_without_message_uses_status_text() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, ApiError::Status { message: None, .. }));
        assert_eq!(err.user_message(), "Request failed with status code 500");

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, r#"{"message":""}"#);
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(!ApiError::from_status(StatusCode::FORBIDDEN, "").is_unauthorized());
        assert!(!ApiError::InvalidResponse("bad".to_string()).is_unauthorized());
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = ApiError::InvalidResponse("  ".to_string());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "é".repeat(400);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }
}
