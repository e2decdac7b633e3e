//! Legal assistant query payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /text-query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextQueryRequest {
    pub query: String,
}

/// Answer returned by `/text-query` and `/voice-query`.
///
/// Every field is optional: the assistant omits `answer` when no legal
/// section matched, and `confidence` is a 0–1 score when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryAnswer {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub act: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Server-side transcription of a voice query.
    #[serde(default)]
    pub transcript: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_none() {
        let answer: QueryAnswer = serde_json::from_value(json!({})).expect("answer");
        assert_eq!(answer, QueryAnswer::default());

        let answer: QueryAnswer = serde_json::from_value(json!({
            "answer": "Section 66F punishes cyber terrorism.",
            "act": "IT Act",
            "section": "66F",
            "confidence": 0.92
        }))
        .expect("answer");
        assert_eq!(answer.section.as_deref(), Some("66F"));
        assert_eq!(answer.confidence, Some(0.92));
    }
}
