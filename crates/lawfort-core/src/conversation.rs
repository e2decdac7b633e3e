//! Chat history with the legal assistant.
//!
//! The store appends the user's message as soon as a query is submitted and
//! the assistant's reply once the backend answers. Queries from one
//! conversation reach the backend one at a time, so replies land in the order
//! the questions were asked.

use crate::api::{self, submit};
use crate::error::LawfortError;
use lawfort_protocol::{AudioClip, Backend, QueryAnswer, Sender, TextQueryRequest, UploadFile};
use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, broadcast};

pub const TEXT_QUERY_PATH: &str = "/text-query";
pub const VOICE_QUERY_PATH: &str = "/voice-query";

/// Reply used when the backend finds no matching section.
pub const NO_MATCH_REPLY: &str =
    "I couldn't find a relevant legal section for your query. Please try rephrasing.";
/// Reply used when the backend cannot be reached or rejects the query.
pub const SERVICE_ERROR_REPLY: &str =
    "Sorry, I couldn't reach the legal assistant service. Please try again later.";

const EVENT_CAPACITY: usize = 256;

/// Citation attached to an assistant reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageMeta {
    pub act: Option<String>,
    pub section: Option<String>,
    /// Match confidence as a whole percentage.
    pub confidence: Option<u32>,
    pub is_error: bool,
}

/// One chat entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub meta: Option<MessageMeta>,
}

impl Message {
    pub fn is_error(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.is_error)
    }
}

/// Point-in-time copy of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub is_open: bool,
    pub is_typing: bool,
}

/// Change notifications published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    MessageAppended(Message),
    TypingChanged(bool),
    VisibilityChanged(bool),
}

#[derive(Debug)]
struct Inner {
    messages: Vec<Message>,
    is_open: bool,
    /// Queries submitted but not yet answered.
    pending: usize,
}

/// Shared conversation state. Wrap in an `Arc` and hand the same handle to
/// every view that shows or sends chat messages.
pub struct ConversationStore {
    backend: Arc<dyn Backend>,
    inner: RwLock<Inner>,
    next_id: AtomicU64,
    query_gate: Mutex<()>,
    events: broadcast::Sender<ConversationEvent>,
}

impl ConversationStore {
    /// Create a closed conversation seeded with the assistant's `greeting`.
    pub fn new(backend: Arc<dyn Backend>, greeting: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let greeting = Message {
            id: 1,
            text: greeting.into(),
            sender: Sender::Bot,
            meta: None,
        };
        Self {
            backend,
            inner: RwLock::new(Inner {
                messages: vec![greeting],
                is_open: false,
                pending: 0,
            }),
            next_id: AtomicU64::new(2),
            query_gate: Mutex::new(()),
            events,
        }
    }

    pub fn snapshot(&self) -> ConversationState {
        let inner = self.inner.read();
        ConversationState {
            messages: inner.messages.clone(),
            is_open: inner.is_open,
            is_typing: inner.pending > 0,
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.read().messages.clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.read().is_open
    }

    pub fn is_typing(&self) -> bool {
        self.inner.read().pending > 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    /// Show or hide the chat panel. Returns the new visibility.
    pub fn toggle(&self) -> bool {
        let is_open = {
            let mut inner = self.inner.write();
            inner.is_open = !inner.is_open;
            inner.is_open
        };
        let _ = self.events.send(ConversationEvent::VisibilityChanged(is_open));
        is_open
    }

    /// Ask the assistant a typed question.
    ///
    /// Blank input is ignored and returns false. Otherwise exactly one user
    /// message and one assistant message are appended; backend failures turn
    /// into an error reply rather than an `Err`.
    pub async fn send_text_query(&self, text: &str) -> bool {
        let query = text.trim();
        if query.is_empty() {
            return false;
        }
        self.append(Sender::User, query.to_string(), None);
        let _pending = PendingQuery::begin(self);
        let _turn = self.query_gate.lock().await;

        debug!("sending text query (chars={})", query.chars().count());
        let request = TextQueryRequest {
            query: query.to_string(),
        };
        let reply =
            submit::<_, QueryAnswer>(self.backend.as_ref(), TEXT_QUERY_PATH, &request).await;
        self.record_reply(reply);
        true
    }

    /// Upload a recorded question.
    ///
    /// When the backend returns a transcript it is shown as the user's
    /// message ahead of the reply.
    pub async fn send_voice_query(&self, clip: AudioClip) {
        let _pending = PendingQuery::begin(self);
        let _turn = self.query_gate.lock().await;

        debug!(
            "sending voice query (file={}, bytes={})",
            clip.file_name,
            clip.bytes.len()
        );
        let file = UploadFile::new(clip.file_name, clip.content_type, clip.bytes);
        let reply = match self.backend.upload(VOICE_QUERY_PATH, file).await {
            Ok(value) => api::decode::<QueryAnswer>(VOICE_QUERY_PATH, value),
            Err(err) => Err(err.into()),
        };
        if let Some(transcript) = reply
            .as_ref()
            .ok()
            .and_then(|answer| non_blank(answer.transcript.as_deref()))
        {
            self.append(Sender::User, transcript.to_string(), None);
        }
        self.record_reply(reply);
    }

    fn record_reply(&self, reply: Result<QueryAnswer, LawfortError>) {
        match reply {
            Ok(answer) => match non_blank(answer.answer.as_deref()) {
                Some(text) => {
                    let meta = MessageMeta {
                        act: answer.act.clone(),
                        section: answer.section.clone(),
                        confidence: answer.confidence.map(confidence_percent),
                        is_error: false,
                    };
                    self.append(Sender::Bot, text.to_string(), Some(meta));
                }
                None => {
                    debug!("assistant found no matching section");
                    self.append(Sender::Bot, NO_MATCH_REPLY.to_string(), None);
                }
            },
            Err(err) => {
                warn!("legal assistant query failed: {err}");
                let meta = MessageMeta {
                    is_error: true,
                    ..MessageMeta::default()
                };
                self.append(Sender::Bot, SERVICE_ERROR_REPLY.to_string(), Some(meta));
            }
        }
    }

    fn append(&self, sender: Sender, text: String, meta: Option<MessageMeta>) {
        let message = Message {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text,
            sender,
            meta,
        };
        self.inner.write().messages.push(message.clone());
        let _ = self.events.send(ConversationEvent::MessageAppended(message));
    }

    fn adjust_pending(&self, started: bool) {
        let typing_changed = {
            let mut inner = self.inner.write();
            let was_typing = inner.pending > 0;
            if started {
                inner.pending += 1;
            } else {
                inner.pending = inner.pending.saturating_sub(1);
            }
            let is_typing = inner.pending > 0;
            (was_typing != is_typing).then_some(is_typing)
        };
        if let Some(is_typing) = typing_changed {
            let _ = self.events.send(ConversationEvent::TypingChanged(is_typing));
        }
    }
}

/// Marks a query as in flight until dropped, on every exit path.
struct PendingQuery<'a> {
    store: &'a ConversationStore,
}

impl<'a> PendingQuery<'a> {
    fn begin(store: &'a ConversationStore) -> Self {
        store.adjust_pending(true);
        Self { store }
    }
}

impl Drop for PendingQuery<'_> {
    fn drop(&mut self) {
        self.store.adjust_pending(false);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Convert a 0..1 score to a rounded percentage.
fn confidence_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}
