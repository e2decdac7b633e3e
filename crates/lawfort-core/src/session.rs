//! Authenticated session shared by every view, optionally persisted to disk.

use crate::error::LawfortError;
use chrono::{DateTime, Utc};
use lawfort_protocol::{Role, UserProfile, UserStats};
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Identity and credential of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub contact: String,
    pub role: Role,
    pub token: String,
    #[serde(default)]
    pub stats: UserStats,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a login response; `contact` fills in a missing profile.
    pub fn from_login(token: String, user: Option<UserProfile>, contact: &str) -> Self {
        let user = user.unwrap_or_else(|| UserProfile {
            name: String::new(),
            contact: contact.to_string(),
            role: Role::default(),
            stats: UserStats::default(),
        });
        let contact = if user.contact.trim().is_empty() {
            contact.to_string()
        } else {
            user.contact
        };
        let name = if user.name.trim().is_empty() {
            contact.clone()
        } else {
            user.name
        };
        Self {
            name,
            contact,
            role: user.role,
            token,
            stats: user.stats,
            signed_in_at: Utc::now(),
        }
    }
}

/// Change notifications for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    Updated(Session),
    SignedOut,
}

/// Holds at most one [`Session`] and mirrors it to a JSON file when configured.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self::with_state(None, None)
    }

    /// Open the store at `path`, restoring a previous session if one is saved.
    ///
    /// A corrupt file is logged and ignored so the user can sign in again.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LawfortError> {
        let path = path.into();
        let restored = match read_session(&path) {
            Ok(session) => session,
            Err(LawfortError::Session(err)) => {
                warn!(
                    "ignoring unreadable session file (path={}): {err}",
                    path.display()
                );
                None
            }
            Err(err) => return Err(err),
        };
        if let Some(session) = &restored {
            info!(
                "restored session (contact={}, role={})",
                session.contact,
                session.role.as_str()
            );
        }
        Ok(Self::with_state(Some(path), restored))
    }

    fn with_state(path: Option<PathBuf>, current: Option<Session>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path,
            current: RwLock::new(current),
            events,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Return a copy of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|session| session.token.clone())
    }

    /// Replace the current session and persist it.
    pub fn establish(&self, session: Session) -> Result<(), LawfortError> {
        self.persist(Some(&session))?;
        info!(
            "session established (contact={}, role={})",
            session.contact,
            session.role.as_str()
        );
        *self.current.write() = Some(session.clone());
        let _ = self.events.send(SessionEvent::SignedIn(session));
        Ok(())
    }

    /// Mutate the current session in place. Returns false when signed out.
    pub fn update<F>(&self, apply: F) -> Result<bool, LawfortError>
    where
        F: FnOnce(&mut Session),
    {
        let updated = {
            let mut guard = self.current.write();
            let Some(session) = guard.as_mut() else {
                return Ok(false);
            };
            apply(session);
            session.clone()
        };
        self.persist(Some(&updated))?;
        let _ = self.events.send(SessionEvent::Updated(updated));
        Ok(true)
    }

    /// Sign out and remove the saved session.
    ///
    /// The in-memory session is always dropped and `SignedOut` published;
    /// a failure to remove the file is reported afterwards.
    pub fn clear(&self) -> Result<(), LawfortError> {
        let previous = self.current.write().take();
        if previous.is_some() {
            info!("session cleared");
            let _ = self.events.send(SessionEvent::SignedOut);
        }
        self.persist(None).inspect_err(|err| {
            warn!("failed to remove saved session: {err}");
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn persist(&self, session: Option<&Session>) -> Result<(), LawfortError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match session {
            Some(session) => {
                let serialized = serde_json::to_string_pretty(session)
                    .map_err(|err| LawfortError::Session(err.to_string()))?;
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, serialized)?;
                debug!("session saved (path={})", path.display());
            }
            None => {
                if path.exists() {
                    fs::remove_file(path)?;
                    debug!("session file removed (path={})", path.display());
                }
            }
        }
        Ok(())
    }
}

fn read_session(path: &Path) -> Result<Option<Session>, LawfortError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let session =
        serde_json::from_str(&contents).map_err(|err| LawfortError::Session(err.to_string()))?;
    Ok(Some(session))
}
