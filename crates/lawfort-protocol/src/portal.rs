//! Informational content served under `/api/universal`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Regional helpline number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionalHelpline {
    pub state: String,
    pub number: String,
}

/// Response of `GET /api/universal/emergency-helpline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyHelpline {
    pub helpline: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub regional: Vec<RegionalHelpline>,
}

/// One themed block of recovery steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoverySection {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Response of `GET /api/universal/recovery-steps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoveryGuide {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<RecoverySection>,
}

/// Response of `GET /api/universal/cyber-awareness`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwarenessContent {
    pub title: String,
    #[serde(default)]
    pub trending_scams: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub safe_banking_practices: Vec<String>,
    /// Further guidance blocks keyed by section name, e.g. `phishing_detection_guide`.
    #[serde(flatten)]
    pub more: BTreeMap<String, Value>,
}

impl AwarenessContent {
    /// All non-empty sections as `(key, items)`, fixed sections first.
    pub fn sections(&self) -> Vec<(&str, Vec<&str>)> {
        let fixed = [
            ("trending_scams", &self.trending_scams),
            ("red_flags", &self.red_flags),
            ("safe_banking_practices", &self.safe_banking_practices),
        ]
        .into_iter()
        .map(|(key, items)| (key, items.iter().map(String::as_str).collect::<Vec<_>>()));
        let more = self.more.iter().filter_map(|(key, value)| {
            let items: Vec<&str> = value.as_array()?.iter().filter_map(Value::as_str).collect();
            Some((key.as_str(), items))
        });
        fixed
            .chain(more)
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}

/// Display title for an awareness section key.
pub fn awareness_section_title(key: &str) -> String {
    let known = match key {
        "trending_scams" => "Trending Scams",
        "red_flags" => "Red Flags to Identify Fraud",
        "safe_banking_practices" => "Safe Banking Practices",
        "phishing_detection_guide" => "Phishing Detection Guide",
        "online_shopping_scam_patterns" => "Online Shopping Scam Patterns",
        "social_engineering_tactics" => "Social Engineering Tactics",
        "corporate_cyber_risks" => "Corporate Cyber Risks",
        "student_cyber_threats" => "Student Cyber Threats",
        "child_safety_guidelines" => "Child Safety Guidelines",
        "privacy_protection_steps" => "Privacy Protection Steps",
        "fake_job_offer_signals" => "Fake Job Offer Signals",
        "crypto_scam_patterns" => "Crypto Scam Patterns",
        "banking_fraud_patterns" => "Banking Fraud Patterns",
        "sim_and_mobile_security" => "SIM & Mobile Security",
        "romance_scam_indicators" => "Romance Scam Indicators",
        "cyber_harassment_patterns" => "Cyber Harassment Patterns",
        "safety_best_practices" => "Safety Best Practices",
        "learning_resources" => "Learning Resources",
        other => return other.replace('_', " "),
    };
    known.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn awareness_keeps_extra_sections() {
        let content: AwarenessContent = serde_json::from_value(json!({
            "title": "Cyber Safety Awareness",
            "red_flags": ["Urgent pressure"],
            "phishing_detection_guide": ["Check the sender domain"],
            "updated": "2024-01-01"
        }))
        .expect("content");

        let keys: Vec<&str> = content.sections().iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec!["red_flags", "phishing_detection_guide"]);
        assert_eq!(
            awareness_section_title("phishing_detection_guide"),
            "Phishing Detection Guide"
        );
        assert_eq!(awareness_section_title("deepfake_alerts"), "deepfake alerts");
    }
}
