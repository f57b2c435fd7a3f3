//! Error types for postboard.
//!
//! This module defines the error taxonomy using `thiserror`. Two levels exist:
//!
//! - [`ApiError`] - failures of a single retrieval or mutation against the
//!   blog API. These are **non-fatal**: they are caught at the state boundary,
//!   stored, logged and rendered as a message. They never crash the view.
//! - [`AppError`] - fatal start-up and terminal failures returned from `main`.
//!
//! `ApiError` is `Clone + PartialEq` because state components keep the last
//! failure around for rendering and tests compare it directly.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Configuration, logging and terminal errors convert via `From` so `main`
/// can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup, rendering or event loop failure.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),

    /// HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(#[from] ApiError),

    /// Async runtime could not be started.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Failure of a single API operation.
///
/// | Variant | Cause |
/// |---------|-------|
/// | `Network` | Transport unreachable, connection reset, timeout |
/// | `Status` | Non-2xx response (or non-204 for deletes) |
/// | `NotFound` | The entity does not exist (404) |
/// | `Decode` | Response body is not the expected JSON |
/// | `Attachment` | A local image file could not be read for upload |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server could not be reached.
    #[error("Network failure: {reason}")]
    Network {
        /// Transport error description.
        reason: String,
    },

    /// The server answered with an unexpected status.
    #[error("Request failed with status {status}: {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase or response text.
        reason: String,
    },

    /// The requested entity does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of what was looked up, e.g. `post 7`.
        resource: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid response: {reason}")]
    Decode {
        /// Decoder error description.
        reason: String,
    },

    /// An image chosen for upload could not be read.
    #[error("Cannot read image {path:?}: {reason}")]
    Attachment {
        /// Path that was attempted.
        path: PathBuf,
        /// I/O error description.
        reason: String,
    },
}

impl ApiError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Network failures and 5xx responses are transient; everything else
    /// will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::NotFound { .. } | ApiError::Decode { .. } | ApiError::Attachment { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_is_transient() {
        let err = ApiError::Network {
            reason: "connection refused".to_string(),
        };
        assert!(err.is_transient());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn server_errors_are_transient_client_errors_are_not() {
        let server = ApiError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        let client = ApiError::Status {
            status: 422,
            reason: "Unprocessable Entity".to_string(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = ApiError::NotFound {
            resource: "post 7".to_string(),
        };
        assert_eq!(err.to_string(), "Not found: post 7");
        assert!(!err.is_transient());
    }

    #[test]
    fn attachment_error_includes_path() {
        let err = ApiError::Attachment {
            path: PathBuf::from("/tmp/missing.png"),
            reason: "No such file".to_string(),
        };
        assert!(err.to_string().contains("/tmp/missing.png"));
    }

    #[test]
    fn api_error_converts_into_app_error() {
        let err: AppError = ApiError::Decode {
            reason: "eof".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Client(_)));
    }
}
