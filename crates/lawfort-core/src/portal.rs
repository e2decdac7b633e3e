//! Cyber portal content: emergency numbers, recovery steps, and awareness.
//!
//! Every page has built-in content that is shown whenever the backend cannot
//! provide its own.

use crate::api::fetch;
use lawfort_protocol::{
    AwarenessContent, Backend, EmergencyHelpline, RecoveryGuide, RecoverySection,
    RegionalHelpline,
};
use log::warn;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const EMERGENCY_HELPLINE_PATH: &str = "/api/universal/emergency-helpline";
pub const RECOVERY_STEPS_PATH: &str = "/api/universal/recovery-steps";
pub const CYBER_AWARENESS_PATH: &str = "/api/universal/cyber-awareness";

/// National cyber fraud helpline.
pub const NATIONAL_HELPLINE: &str = "1930";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Backend,
    Fallback,
}

/// Page content together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalPage<T> {
    pub content: T,
    pub source: ContentSource,
}

#[derive(Clone)]
pub struct PortalClient {
    backend: Arc<dyn Backend>,
}

impl PortalClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn emergency_helpline(&self) -> PortalPage<EmergencyHelpline> {
        self.load(EMERGENCY_HELPLINE_PATH, fallback_helpline).await
    }

    pub async fn recovery_guide(&self) -> PortalPage<RecoveryGuide> {
        self.load(RECOVERY_STEPS_PATH, fallback_recovery_guide).await
    }

    pub async fn awareness(&self) -> PortalPage<AwarenessContent> {
        self.load(CYBER_AWARENESS_PATH, fallback_awareness).await
    }

    async fn load<T, F>(&self, path: &str, fallback: F) -> PortalPage<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match fetch::<T>(self.backend.as_ref(), path).await {
            Ok(content) => PortalPage {
                content,
                source: ContentSource::Backend,
            },
            Err(err) => {
                warn!("using built-in portal content (path={path}): {err}");
                PortalPage {
                    content: fallback(),
                    source: ContentSource::Fallback,
                }
            }
        }
    }
}

pub fn fallback_helpline() -> EmergencyHelpline {
    EmergencyHelpline {
        helpline: NATIONAL_HELPLINE.to_string(),
        message: "Call 1930 immediately - National Cyber Fraud Helpline".to_string(),
        regional: vec![
            RegionalHelpline {
                state: "Delhi".to_string(),
                number: "011-23456789".to_string(),
            },
            RegionalHelpline {
                state: "Maharashtra".to_string(),
                number: "022-22620111".to_string(),
            },
        ],
    }
}

pub fn fallback_recovery_guide() -> RecoveryGuide {
    let section = |title: &str, icon: &str, steps: [&str; 3]| RecoverySection {
        title: title.to_string(),
        icon: Some(icon.to_string()),
        steps: steps.iter().map(|step| step.to_string()).collect(),
    };
    RecoveryGuide {
        title: "Cyber Incident Recovery Guide".to_string(),
        description:
            "Follow these critical steps immediately after a cyber incident to secure your assets."
                .to_string(),
        sections: vec![
            section(
                "Financial Security",
                "DollarSign",
                [
                    "Call 1930 to report the fraud immediately.",
                    "Freeze your bank accounts and credit cards.",
                    "Change banking passwords and PINs.",
                ],
            ),
            section(
                "Social Media & Email",
                "Facebook",
                [
                    "Log out of all active sessions.",
                    "Enable Two-Factor Authentication (2FA).",
                    "Check for unauthorized connected devices.",
                ],
            ),
            section(
                "Digital Identity",
                "Key",
                [
                    "Scan your device for malware.",
                    "Change passwords for all critical accounts.",
                    "Alert your contacts about potential impersonation.",
                ],
            ),
        ],
    }
}

pub fn fallback_awareness() -> AwarenessContent {
    let list = |items: [&str; 2]| -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    };
    AwarenessContent {
        title: "Cyber Safety Awareness".to_string(),
        trending_scams: list(["UPI Refund Scam", "Parcel Stuck at Customs"]),
        red_flags: list(["Urgent pressure", "Unverified links"]),
        safe_banking_practices: list(["Never share OTP", "Change PIN regularly"]),
        more: BTreeMap::new(),
    }
}
