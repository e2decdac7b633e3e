//! Configuration schema for LawFort.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default backend used when no layer sets `api.base_url`.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Root config for the LawFort client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LawfortConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl LawfortConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> LawfortConfigBuilder {
        LawfortConfigBuilder::new()
    }
}

/// Builder for assembling a `LawfortConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct LawfortConfigBuilder {
    config: LawfortConfig,
}

impl LawfortConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: LawfortConfig::default(),
        }
    }

    /// Set the backend base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    /// Set the file the session is persisted to.
    pub fn session_path(mut self, path: impl Into<String>) -> Self {
        self.config.session.path = Some(path.into());
        self
    }

    /// Replace the chat configuration.
    pub fn chat(mut self, chat: ChatConfig) -> Self {
        self.config.chat = chat;
        self
    }

    /// Finalize and return the built `LawfortConfig`.
    pub fn build(self) -> LawfortConfig {
        self.config
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Where the authenticated session is kept between runs of the client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionConfig {
    /// Resolve the session file, falling back to `~/.lawfort/session.json`.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = self.path.as_ref() {
            return PathBuf::from(path);
        }
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".lawfort"))
            .unwrap_or_else(|| PathBuf::from(".lawfort"))
            .join("session.json")
    }
}

/// Legal assistant chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

fn default_greeting() -> String {
    "Hello! I am your Cyber Law Assistant. How can I help you today?".to_string()
}
