//! Signup, OTP verification, and login payloads.

use crate::Role;
use serde::{Deserialize, Serialize};

/// Role-specific part of a signup payload.
///
/// Each variant carries only the identifier that applies to it, so the
/// serialized body never contains a police id for a lawyer or vice versa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum SignupRole {
    Citizen,
    Police { police_id: String },
    Lawyer { bar_council_id: String },
}

impl SignupRole {
    /// Plain role for this variant.
    pub fn role(&self) -> Role {
        match self {
            SignupRole::Citizen => Role::Citizen,
            SignupRole::Police { .. } => Role::Police,
            SignupRole::Lawyer { .. } => Role::Lawyer,
        }
    }
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub contact: String,
    pub password: String,
    #[serde(flatten)]
    pub role: SignupRole,
}

/// Body of `POST /api/auth/verify-otp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyOtpRequest {
    pub contact: String,
    pub otp: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub contact: String,
    pub password: String,
}

/// Reading statistics shown on the profile page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserStats {
    #[serde(default, alias = "lawsRead")]
    pub laws_read: u32,
    #[serde(default, alias = "savedItems")]
    pub saved_items: u32,
    #[serde(default, alias = "testsTaken")]
    pub tests_taken: u32,
}

/// User record returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "email")]
    pub contact: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub stats: UserStats,
}

/// Response of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn signup_payload_carries_only_matching_id() {
        let request = SignupRequest {
            name: "Asha".to_string(),
            contact: "asha@example.com".to_string(),
            password: "secret".to_string(),
            role: SignupRole::Police {
                police_id: "PID-1".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).expect("json"),
            json!({
                "name": "Asha",
                "contact": "asha@example.com",
                "password": "secret",
                "role": "police",
                "police_id": "PID-1"
            })
        );

        let citizen = SignupRequest {
            role: SignupRole::Citizen,
            ..request
        };
        let value = serde_json::to_value(&citizen).expect("json");
        assert_eq!(value["role"], json!("citizen"));
        assert!(value.get("police_id").is_none());
        assert!(value.get("bar_council_id").is_none());
    }

    #[test]
    fn login_response_accepts_access_token_and_email() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "tok",
            "user": { "name": "Ravi", "email": "ravi@example.com", "role": "Legal" }
        }))
        .expect("response");
        assert_eq!(response.token.as_deref(), Some("tok"));
        let user = response.user.expect("user");
        assert_eq!(user.contact, "ravi@example.com");
        assert_eq!(user.role, Role::Lawyer);
        assert_eq!(user.stats, UserStats::default());
    }
}
