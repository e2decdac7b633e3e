//! Client-side core for LawFort.
//!
//! This crate owns the backend client, the session and conversation stores,
//! the signup and login flows, the static law catalog, voice capture, and the
//! portal and lawyer workspace clients used by the terminal front end.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod conversation;
pub mod error;
pub mod lawyer;
pub mod portal;
pub mod session;
pub mod voice;

/// Backend transport and typed request helpers.
pub use api::{HttpBackend, fetch, submit};
pub use auth::{AuthMode, AuthScreen, LoginForm, SignupField, SignupFlow, SignupStep};
pub use catalog::{BrowseMode, CatalogView, LawRecord};
pub use conversation::{
    ConversationEvent, ConversationState, ConversationStore, Message, MessageMeta,
};
pub use error::LawfortError;
pub use lawyer::LawyerWorkspace;
pub use portal::{ContentSource, PortalClient, PortalPage};
pub use session::{Session, SessionEvent, SessionStore};
pub use voice::VoiceCapture;
