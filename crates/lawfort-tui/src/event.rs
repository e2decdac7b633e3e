//! TUI event types for input and store notifications.

use crate::app::{PortalContent, WorkspacePanel};
use crossterm::event::KeyEvent;
use lawfort_core::{AuthScreen, ConversationEvent, ConversationState, Session, SessionEvent};

/// Application event emitted by input handlers, store subscriptions, or
/// background requests.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Change published by the conversation store.
    Conversation(ConversationEvent),
    /// Full conversation after store events were dropped.
    ConversationResync(ConversationState),
    /// Change published by the session store.
    Session(SessionEvent),
    /// Auth form after a submit, plus the session when a login succeeded.
    AuthFinished(Box<AuthScreen>, Option<Session>),
    /// Portal page finished loading.
    Portal(PortalContent),
    /// Lawyer workspace request finished.
    Workspace(WorkspacePanel),
    /// Voice query finished (`Ok(false)` when nothing was recording).
    VoiceFinished(Result<bool, String>),
    /// Error from an action request.
    ActionError(String),
    /// Scroll event in the active view.
    Scroll(i16),
}
