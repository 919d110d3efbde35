/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP
 * responses.
 *
 * # Error Taxonomy
 *
 * - Missing-parameter errors (no conversation id on subscribe or
 *   publish) surface immediately as 4xx responses and mutate no state
 * - Transport errors (client aborts a streaming connection) are normal
 *   lifecycle termination, handled by stream teardown, and never appear
 *   here
 * - Partial fan-out failures are swallowed per subscriber inside the
 *   registry and never propagate as a publish failure
 *
 * No error from this module is fatal to the server process.
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chatstream::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Missing chatId");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing parameters, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// State management error (e.g., a response could not be assembled)
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - uses the status code carried by the error
    /// - `StateError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Missing chatId");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Missing chatId");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_state_error_maps_to_500() {
        let error = BackendError::state("Response assembly failed");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_accessor() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Missing data");
        assert_eq!(error.message(), "Missing data");
    }
}
