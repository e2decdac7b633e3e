use async_trait::async_trait;
use lawfort_protocol::{ApiError, Backend, Method, UploadFile};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Semaphore, watch};

/// Canned outcome for a scripted route.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Non-2xx response carrying this detail.
    Reject(String),
    Unreachable,
}

impl Reply {
    fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Reject(detail) => Err(ApiError::Request(detail)),
            Reply::Unreachable => Err(ApiError::Connectivity {
                url: UnreachableBackend::DEFAULT_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub file: Option<UploadFile>,
}

/// Backend answering from per-path queues and recording every call.
///
/// Replies for a path are returned in order; the last one repeats. Paths
/// without a script are rejected with "not scripted".
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    routes: Arc<Mutex<HashMap<String, VecDeque<Reply>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    token: Arc<Mutex<Option<String>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, path: impl Into<String>, reply: Reply) -> Self {
        self.routes
            .lock()
            .entry(path.into())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(self, path: impl Into<String>, value: Value) -> Self {
        self.on(path, Reply::Json(value))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|call| call.path.clone()).collect()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn answer(&self, call: RecordedCall) -> Result<Value, ApiError> {
        let reply = {
            let mut routes = self.routes.lock();
            match routes.get_mut(&call.path) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        self.calls.lock().push(call);
        reply
            .unwrap_or_else(|| Reply::Reject("not scripted".to_string()))
            .into_result()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.answer(RecordedCall {
            method: "GET",
            path: path.to_string(),
            body: None,
            file: None,
        })
    }

    async fn send(&self, path: &str, payload: Value, method: Method) -> Result<Value, ApiError> {
        self.answer(RecordedCall {
            method: method.as_str(),
            path: path.to_string(),
            body: Some(payload),
            file: None,
        })
    }

    async fn upload(&self, path: &str, file: UploadFile) -> Result<Value, ApiError> {
        self.answer(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: None,
            file: Some(file),
        })
    }

    fn set_auth_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }
}

/// Backend whose every call fails as if the server were down.
#[derive(Debug, Clone, Default)]
pub struct UnreachableBackend;

impl UnreachableBackend {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:8000";

    fn fail() -> Result<Value, ApiError> {
        Err(ApiError::Connectivity {
            url: Self::DEFAULT_URL.to_string(),
        })
    }
}

#[async_trait]
impl Backend for UnreachableBackend {
    async fn get(&self, _path: &str) -> Result<Value, ApiError> {
        Self::fail()
    }

    async fn send(&self, _path: &str, _payload: Value, _method: Method) -> Result<Value, ApiError> {
        Self::fail()
    }

    async fn upload(&self, _path: &str, _file: UploadFile) -> Result<Value, ApiError> {
        Self::fail()
    }
}

/// Wraps a backend and holds each call until the test releases it.
#[derive(Debug, Clone)]
pub struct GatedBackend<B> {
    inner: B,
    permits: Arc<Semaphore>,
    started: Arc<watch::Sender<usize>>,
}

impl<B: Backend> GatedBackend<B> {
    pub fn new(inner: B) -> Self {
        let (started, _) = watch::channel(0);
        Self {
            inner,
            permits: Arc::new(Semaphore::new(0)),
            started: Arc::new(started),
        }
    }

    /// Let `count` held calls proceed.
    pub fn release(&self, count: usize) {
        self.permits.add_permits(count);
    }

    /// Wait until at least `count` calls have reached the backend.
    pub async fn wait_for_calls(&self, count: usize) {
        let mut started = self.started.subscribe();
        let _ = started.wait_for(|started| *started >= count).await;
    }

    pub fn started(&self) -> usize {
        *self.started.borrow()
    }

    async fn enter(&self) {
        self.started.send_modify(|started| *started += 1);
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }
}

#[async_trait]
impl<B: Backend> Backend for GatedBackend<B> {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.enter().await;
        self.inner.get(path).await
    }

    async fn send(&self, path: &str, payload: Value, method: Method) -> Result<Value, ApiError> {
        self.enter().await;
        self.inner.send(path, payload, method).await
    }

    async fn upload(&self, path: &str, file: UploadFile) -> Result<Value, ApiError> {
        self.enter().await;
        self.inner.upload(path, file).await
    }
}
