//! Wire protocol types for the LawFort backend, shared domain enums, and the
//! transport and audio seams implemented by the client and test fakes.

mod audio;
mod auth;
mod backend;
mod chat;
mod lawyer;
mod portal;

pub use audio::{AudioClip, AudioStream, DeviceError, Microphone};
pub use auth::{
    LoginRequest, LoginResponse, SignupRequest, SignupRole, UserProfile, UserStats,
    VerifyOtpRequest,
};
pub use backend::{ApiError, Backend, GENERIC_REQUEST_FAILURE, Method, UploadFile};
pub use chat::{QueryAnswer, TextQueryRequest};
pub use lawyer::{
    CaseSummary, ClientRecord, DraftDocument, DraftRequest, EvidenceItem, InvestigationRecord,
    NewClient, NewInvestigationRecord, NewNote, NewRoadmapStep, NewTimelineEvent, Note,
    RoadmapStep, SummaryRequest, TimelineEvent,
};
pub use portal::{
    AwarenessContent, EmergencyHelpline, RecoveryGuide, RecoverySection, RegionalHelpline,
    awareness_section_title,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role selected at signup.
///
/// Serialized lower-case; the web front end historically labelled lawyers
/// "Legal", so that spelling is accepted on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Member of the public.
    #[default]
    #[serde(alias = "Citizen")]
    Citizen,
    /// Police officer; requires a police id.
    #[serde(alias = "Police")]
    Police,
    /// Lawyer; requires a bar council id.
    #[serde(alias = "Lawyer", alias = "legal", alias = "Legal")]
    Lawyer,
}

impl Role {
    /// All roles in the order they are offered on the signup form.
    pub const ALL: [Role; 3] = [Role::Citizen, Role::Police, Role::Lawyer];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Police => "police",
            Role::Lawyer => "lawyer",
        }
    }

    /// Human label used in forms.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Citizen => "Citizen",
            Role::Police => "Police",
            Role::Lawyer => "Lawyer",
        }
    }

    /// Label of the verification id field, if the role requires one.
    pub fn verification_label(&self) -> Option<&'static str> {
        match self {
            Role::Citizen => None,
            Role::Police => Some("Police ID Number"),
            Role::Lawyer => Some("Bar Council ID"),
        }
    }

    /// Parse a role name case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "citizen" => Some(Role::Citizen),
            "police" => Some(Role::Police),
            "lawyer" | "legal" => Some(Role::Lawyer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed or spoken by the user.
    User,
    /// Message produced by the legal assistant.
    Bot,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Backend-assigned identifier; the API returns either integers or strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(id) => write!(f, "{id}"),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn role_accepts_legacy_spellings() {
        let role: Role = serde_json::from_value(json!("Legal")).expect("role");
        assert_eq!(role, Role::Lawyer);
        let role: Role = serde_json::from_value(json!("Police")).expect("role");
        assert_eq!(role, Role::Police);
        assert_eq!(serde_json::to_value(Role::Lawyer).expect("json"), json!("lawyer"));
        assert_eq!(Role::parse(" CITIZEN "), Some(Role::Citizen));
        assert_eq!(Role::parse("judge"), None);
    }

    #[test]
    fn entity_id_accepts_numbers_and_strings() {
        let ids: Vec<EntityId> = serde_json::from_value(json!([7, "abc"])).expect("ids");
        assert_eq!(ids[0].to_string(), "7");
        assert_eq!(ids[1].to_string(), "abc");
    }

    #[test]
    fn error_body_detail_is_optional() {
        let body: ErrorBody = serde_json::from_value(json!({})).expect("body");
        assert!(body.detail.is_none());
        let body: ErrorBody =
            serde_json::from_value(json!({ "detail": "User exists" })).expect("body");
        assert_eq!(body.detail.as_deref(), Some("User exists"));
    }
}
