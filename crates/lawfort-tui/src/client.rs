//! Store handles shared by every TUI view.

use crate::event::AppEvent;
use lawfort_config::LawfortConfig;
use lawfort_core::{
    ConversationStore, HttpBackend, LawfortError, LawyerWorkspace, PortalClient, Session,
    SessionEvent, SessionStore,
};
use lawfort_protocol::Backend;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Backend connection plus the stores built on top of it.
#[derive(Clone)]
pub struct LawfortClient {
    backend: Arc<dyn Backend>,
    base_url: String,
    sessions: Arc<SessionStore>,
    conversation: Arc<ConversationStore>,
    portal: PortalClient,
    workspace: LawyerWorkspace,
}

impl LawfortClient {
    /// Connect to the configured backend and restore the saved session.
    pub fn connect(config: &LawfortConfig, session_path: PathBuf) -> Result<Self, LawfortError> {
        let http = HttpBackend::from_config(&config.api);
        let base_url = http.base_url().to_string();
        let sessions = SessionStore::load(session_path)?;
        info!(
            "client ready (base_url={}, restored_session={})",
            base_url,
            sessions.is_authenticated()
        );
        Ok(Self::with_backend(
            Arc::new(http),
            base_url,
            sessions,
            config.chat.greeting.clone(),
        ))
    }

    /// Assemble the stores around an existing backend.
    pub fn with_backend(
        backend: Arc<dyn Backend>,
        base_url: impl Into<String>,
        sessions: SessionStore,
        greeting: impl Into<String>,
    ) -> Self {
        backend.set_auth_token(sessions.token());
        Self {
            conversation: Arc::new(ConversationStore::new(backend.clone(), greeting)),
            portal: PortalClient::new(backend.clone()),
            workspace: LawyerWorkspace::new(backend.clone()),
            sessions: Arc::new(sessions),
            base_url: base_url.into(),
            backend,
        }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn conversation(&self) -> &Arc<ConversationStore> {
        &self.conversation
    }

    pub fn portal(&self) -> &PortalClient {
        &self.portal
    }

    pub fn workspace(&self) -> &LawyerWorkspace {
        &self.workspace
    }

    pub fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    /// Drop the session and stop sending its token.
    ///
    /// The token is dropped even when the saved session file cannot be
    /// removed; that error is returned afterwards.
    pub fn sign_out(&self) -> Result<(), LawfortError> {
        info!("signing out");
        let cleared = self.sessions.clear();
        self.backend.set_auth_token(None);
        cleared
    }

    /// Relay store notifications into the UI event channel until it closes.
    pub fn forward_events(&self, sender: mpsc::Sender<AppEvent>) {
        let conversation = self.conversation.subscribe();
        let sessions = self.sessions.subscribe();
        debug!("forwarding store events");

        let store = self.conversation.clone();
        tokio::spawn(relay(
            conversation,
            sender.clone(),
            AppEvent::Conversation,
            move || AppEvent::ConversationResync(store.snapshot()),
        ));
        let store = self.sessions.clone();
        tokio::spawn(relay(sessions, sender, AppEvent::Session, move || {
            AppEvent::Session(match store.current() {
                Some(session) => SessionEvent::SignedIn(session),
                None => SessionEvent::SignedOut,
            })
        }));
    }
}

/// Forward store events; after a lag, `resync` sends the store's current state.
async fn relay<T, R>(
    mut receiver: broadcast::Receiver<T>,
    sender: mpsc::Sender<AppEvent>,
    wrap: fn(T) -> AppEvent,
    resync: R,
) where
    T: Clone + Send + 'static,
    R: Fn() -> AppEvent + Send + 'static,
{
    loop {
        match receiver.recv().await {
            Ok(event) => {
                if sender.send(wrap(event)).await.is_err() {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("store events dropped, resyncing (skipped={})", skipped);
                if sender.send(resync()).await.is_err() {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawfort_core::ConversationEvent;
    use lawfort_test_utils::ScriptedBackend;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn conversation_events_reach_the_ui_channel() {
        let client = LawfortClient::with_backend(
            Arc::new(ScriptedBackend::new()),
            "http://localhost:8000",
            SessionStore::in_memory(),
            "Hello!",
        );
        let (tx, mut rx) = mpsc::channel(8);
        client.forward_events(tx);

        assert!(client.conversation().toggle());

        let event = rx.recv().await.expect("event");
        assert!(matches!(
            event,
            AppEvent::Conversation(ConversationEvent::VisibilityChanged(true))
        ));
    }

    #[tokio::test]
    async fn lagged_conversation_events_trigger_a_resync() {
        let store = Arc::new(ConversationStore::new(
            Arc::new(ScriptedBackend::new()),
            "Hello!",
        ));
        let (events, receiver) = broadcast::channel(2);
        for open in [true, false, true, false] {
            events
                .send(ConversationEvent::VisibilityChanged(open))
                .expect("send");
        }
        let (tx, mut rx) = mpsc::channel(8);
        let snapshot = store.clone();
        tokio::spawn(relay(receiver, tx, AppEvent::Conversation, move || {
            AppEvent::ConversationResync(snapshot.snapshot())
        }));

        match rx.recv().await.expect("resync") {
            AppEvent::ConversationResync(state) => {
                assert_eq!(state.messages.len(), 1);
                assert_eq!(state.messages[0].text, "Hello!");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::Conversation(ConversationEvent::VisibilityChanged(true)))
        ));
        drop(events);
    }

    #[tokio::test]
    async fn restored_token_is_sent() {
        let backend = ScriptedBackend::new();
        let sessions = SessionStore::in_memory();
        sessions
            .establish(Session::from_login("jwt".to_string(), None, "a@example.com"))
            .expect("session");

        let client = LawfortClient::with_backend(
            Arc::new(backend.clone()),
            "http://localhost:8000",
            sessions,
            "Hello!",
        );
        assert_eq!(backend.token().as_deref(), Some("jwt"));

        client.sign_out().expect("sign out");
        assert_eq!(backend.token(), None);
        assert!(client.current_session().is_none());
    }

    #[tokio::test]
    async fn token_is_dropped_when_session_file_is_stuck() {
        let temp = tempfile::TempDir::new().expect("tmp");
        let path = temp.path().join("session.json");
        let sessions = SessionStore::load(&path).expect("store");
        sessions
            .establish(Session::from_login("jwt".to_string(), None, "a@example.com"))
            .expect("session");
        std::fs::remove_file(&path).expect("remove");
        std::fs::create_dir(&path).expect("dir");

        let backend = ScriptedBackend::new();
        let client = LawfortClient::with_backend(
            Arc::new(backend.clone()),
            "http://localhost:8000",
            sessions,
            "Hello!",
        );
        let (tx, mut rx) = mpsc::channel(8);
        client.forward_events(tx);

        assert!(client.sign_out().is_err());
        assert_eq!(backend.token(), None);
        let event = rx.recv().await.expect("event");
        assert!(matches!(event, AppEvent::Session(SessionEvent::SignedOut)));
    }
}
