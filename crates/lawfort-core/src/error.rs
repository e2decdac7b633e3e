//! Error types for the LawFort core crate.

use lawfort_protocol::{ApiError, DeviceError};
use thiserror::Error;

/// Errors returned by stores, forms, and clients.
///
/// `Display` is the message shown to the user verbatim.
#[derive(Debug, Error)]
pub enum LawfortError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),
    /// Backend rejected the request or returned an unusable body.
    #[error("{0}")]
    Request(String),
    /// Backend could not be reached.
    #[error("Cannot connect to backend at {url}. Please ensure the server is running.")]
    Connectivity { url: String },
    /// Microphone access was refused.
    #[error("{0}")]
    Permission(String),
    /// Session file could not be read or written.
    #[error("session storage error: {0}")]
    Session(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LawfortError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when the backend was unreachable rather than rejecting the call.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

impl From<ApiError> for LawfortError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(message) => Self::Request(message),
            ApiError::Connectivity { url } => Self::Connectivity { url },
        }
    }
}

impl From<DeviceError> for LawfortError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::PermissionDenied(reason) => Self::Permission(format!(
                "Microphone access denied. Please allow microphone permission. ({reason})"
            )),
            DeviceError::Failed(reason) => Self::Request(format!("Recording failed: {reason}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn api_errors_keep_their_message() {
        let err = LawfortError::from(ApiError::Request("User already exists".to_string()));
        assert_eq!(err.to_string(), "User already exists");

        let err = LawfortError::from(ApiError::Connectivity {
            url: "http://127.0.0.1:8000".to_string(),
        });
        assert!(err.is_connectivity());
        assert_eq!(
            err.to_string(),
            "Cannot connect to backend at http://127.0.0.1:8000. Please ensure the server is running."
        );
    }

    #[test]
    fn denied_microphone_maps_to_permission() {
        let err = LawfortError::from(DeviceError::PermissionDenied("blocked".to_string()));
        assert!(matches!(err, LawfortError::Permission(_)));
    }
}
