//! Transport seam between the stores and the LawFort REST backend.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Message used when the backend rejects a request without a `detail`.
pub const GENERIC_REQUEST_FAILURE: &str = "Request failed";

/// Errors returned by a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status or an unusable body.
    #[error("{0}")]
    Request(String),
    /// The backend could not be reached at all.
    #[error("Cannot connect to backend at {url}. Please ensure the server is running.")]
    Connectivity { url: String },
}

/// HTTP verb for body-carrying requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File sent as the single `file` field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// JSON backend used by every store and form.
///
/// Paths are appended verbatim to the implementation's base URL.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Issue a `GET` and return the decoded JSON body.
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    /// Send `payload` as a JSON body with the given verb.
    async fn send(&self, path: &str, payload: Value, method: Method) -> Result<Value, ApiError>;

    /// Upload a file as multipart form data.
    async fn upload(&self, path: &str, file: UploadFile) -> Result<Value, ApiError>;

    /// `POST` a JSON body.
    async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.send(path, payload, Method::Post).await
    }

    /// Attach (or drop) the bearer credential used for later requests.
    fn set_auth_token(&self, _token: Option<String>) {}
}
