//! HTTP transport for the LawFort backend.

use crate::error::LawfortError;
use async_trait::async_trait;
use lawfort_config::ApiConfig;
use lawfort_protocol::{
    ApiError, Backend, ErrorBody, GENERIC_REQUEST_FAILURE, Method, UploadFile,
};
use log::{debug, warn};
use parking_lot::RwLock;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// [`Backend`] over HTTP using `reqwest`.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Create a client for `base_url`; a trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        debug!("backend request (method={method}, url={url})");
        let response = self.authorize(request).send().await.map_err(|err| {
            warn!("backend unreachable (method={method}, url={url}): {err}");
            ApiError::Connectivity {
                url: url.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            warn!("failed to read response body (url={url}, status={status}): {err}");
            ApiError::Connectivity {
                url: url.to_string(),
            }
        })?;

        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(
                "backend rejected request (method={method}, url={url}, status={}): {detail}",
                status.as_u16()
            );
            return Err(ApiError::Request(detail));
        }
        decode_body(status, &body)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.execute("GET", &url, request).await
    }

    async fn send(&self, path: &str, payload: Value, method: Method) -> Result<Value, ApiError> {
        let url = self.url(path);
        let request = match method {
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        }
        .json(&payload);
        self.execute(method.as_str(), &url, request).await
    }

    async fn upload(&self, path: &str, file: UploadFile) -> Result<Value, ApiError> {
        let url = self.url(path);
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| ApiError::Request(format!("invalid content type: {err}")))?;
        let form = Form::new().part("file", part);
        debug!("uploading file (url={url}, bytes={size})");
        let request = self.client.post(&url).multipart(form);
        self.execute("POST", &url, request).await
    }

    fn set_auth_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }
}

/// Pull the server's `detail` out of an error body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string())
}

fn decode_body(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() || status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|err| ApiError::Request(format!("invalid response body: {err}")))
}

/// `GET` `path` and decode the body into `T`.
pub async fn fetch<T: DeserializeOwned>(
    backend: &dyn Backend,
    path: &str,
) -> Result<T, LawfortError> {
    let value = backend.get(path).await?;
    decode(path, value)
}

/// `POST` `body` to `path` and decode the response into `T`.
pub async fn submit<B, T>(backend: &dyn Backend, path: &str, body: &B) -> Result<T, LawfortError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let payload =
        serde_json::to_value(body).map_err(|err| LawfortError::Request(err.to_string()))?;
    let value = backend.post(path, payload).await?;
    decode(path, value)
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, LawfortError> {
    serde_json::from_value(value).map_err(|err| {
        warn!("unexpected response shape (path={path}): {err}");
        LawfortError::Request(format!("Unexpected response from {path}: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000///");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("/text-query"), "http://localhost:8000/text-query");
    }

    #[test]
    fn error_detail_falls_back_to_generic_message() {
        assert_eq!(error_detail(r#"{"detail":"Invalid OTP"}"#), "Invalid OTP");
        assert_eq!(error_detail(r#"{"detail":null}"#), "Request failed");
        assert_eq!(error_detail("<html>502</html>"), "Request failed");
        assert_eq!(error_detail(""), "Request failed");
    }

    #[test]
    fn empty_success_body_decodes_to_null() {
        assert_eq!(decode_body(StatusCode::OK, "  ").expect("null"), Value::Null);
        assert_eq!(
            decode_body(StatusCode::OK, r#"{"ok":true}"#).expect("json"),
            json!({ "ok": true })
        );
        assert!(matches!(
            decode_body(StatusCode::OK, "not json"),
            Err(ApiError::Request(_))
        ));
    }

    /// Nothing listens on port 9 locally, so the request fails at transport level.
    #[tokio::test]
    async fn unreachable_backend_names_the_endpoint() {
        let backend = HttpBackend::new("http://127.0.0.1:9/");
        let err = backend.get("/api/universal/emergency-helpline").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Connectivity {
                url: "http://127.0.0.1:9/api/universal/emergency-helpline".to_string()
            }
        );

        let err = backend
            .post("/text-query", json!({ "query": "phishing" }))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot connect to backend at http://127.0.0.1:9/text-query. Please ensure the server is running."
        );
    }
}
