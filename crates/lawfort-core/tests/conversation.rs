use lawfort_core::conversation::{NO_MATCH_REPLY, SERVICE_ERROR_REPLY};
use lawfort_core::{ConversationEvent, ConversationStore, MessageMeta};
use lawfort_protocol::{AudioClip, Sender};
use lawfort_test_utils::{GatedBackend, Reply, ScriptedBackend, UnreachableBackend};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const GREETING: &str = "Hello! I am your Cyber Law Assistant. How can I help you today?";

fn store_with(backend: ScriptedBackend) -> ConversationStore {
    ConversationStore::new(Arc::new(backend), GREETING)
}

/// A cited answer becomes a bot message with act, section, and percentage.
#[tokio::test]
async fn answer_carries_citation() {
    let backend = ScriptedBackend::new().json(
        "/text-query",
        json!({
            "answer": "Cyber terrorism is punishable with imprisonment for life.",
            "act": "IT Act",
            "section": "66F",
            "confidence": 0.92
        }),
    );
    let store = store_with(backend.clone());

    assert!(store.send_text_query("  what is cyber terrorism?  ").await);

    let state = store.snapshot();
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[0].text, GREETING);
    assert_eq!(state.messages[1].sender, Sender::User);
    assert_eq!(state.messages[1].text, "what is cyber terrorism?");
    let reply = &state.messages[2];
    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(
        reply.meta,
        Some(MessageMeta {
            act: Some("IT Act".to_string()),
            section: Some("66F".to_string()),
            confidence: Some(92),
            is_error: false,
        })
    );
    assert!(!state.is_typing);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(
        calls[0].body,
        Some(json!({ "query": "what is cyber terrorism?" }))
    );
}

#[tokio::test]
async fn missing_answer_uses_no_match_reply() {
    let backend = ScriptedBackend::new().json("/text-query", json!({ "confidence": 0.1 }));
    let store = store_with(backend);

    store.send_text_query("weather today").await;

    let last = store.messages().pop().expect("reply");
    assert_eq!(last.text, NO_MATCH_REPLY);
    assert!(!last.is_error());
}

/// Unreachable backend yields an error reply rather than a failure.
#[tokio::test]
async fn unreachable_backend_appends_error_reply() {
    let store = ConversationStore::new(Arc::new(UnreachableBackend), GREETING);

    assert!(store.send_text_query("is hacking a crime?").await);

    let state = store.snapshot();
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1].sender, Sender::User);
    assert_eq!(state.messages[2].text, SERVICE_ERROR_REPLY);
    assert!(state.messages[2].is_error());
    assert!(!state.is_typing);
}

#[tokio::test]
async fn rejected_query_appends_error_reply() {
    let backend =
        ScriptedBackend::new().on("/text-query", Reply::Reject("Model offline".to_string()));
    let store = store_with(backend);

    store.send_text_query("phishing").await;

    assert!(store.messages()[2].is_error());
}

#[tokio::test]
async fn blank_input_changes_nothing() {
    let backend = ScriptedBackend::new();
    let store = store_with(backend.clone());
    let before = store.snapshot();

    assert!(!store.send_text_query("").await);
    assert!(!store.send_text_query("   ").await);

    assert_eq!(store.snapshot(), before);
    assert!(backend.calls().is_empty());
}

/// The user message is visible and typing is on while the backend works.
#[tokio::test]
async fn typing_is_set_while_query_is_in_flight() {
    let gated = GatedBackend::new(
        ScriptedBackend::new().json("/text-query", json!({ "answer": "Section 66C applies." })),
    );
    let store = Arc::new(ConversationStore::new(Arc::new(gated.clone()), GREETING));

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.send_text_query("stolen password").await })
    };
    gated.wait_for_calls(1).await;

    let state = store.snapshot();
    assert!(state.is_typing);
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].text, "stolen password");

    gated.release(1);
    assert!(task.await.expect("join"));
    let state = store.snapshot();
    assert!(!state.is_typing);
    assert_eq!(state.messages[2].text, "Section 66C applies.");
}

/// Overlapping queries are answered in the order they were asked.
#[tokio::test]
async fn overlapping_queries_keep_submission_order() {
    let scripted = ScriptedBackend::new()
        .json("/text-query", json!({ "answer": "first answer" }))
        .json("/text-query", json!({ "answer": "second answer" }));
    let gated = GatedBackend::new(scripted);
    let store = Arc::new(ConversationStore::new(Arc::new(gated.clone()), GREETING));

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.send_text_query("first").await })
    };
    gated.wait_for_calls(1).await;
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.send_text_query("second").await })
    };
    while store.messages().len() < 3 {
        tokio::task::yield_now().await;
    }
    assert_eq!(gated.started(), 1);

    gated.release(1);
    first.await.expect("join");
    assert!(store.is_typing());
    gated.release(1);
    second.await.expect("join");

    let texts: Vec<String> = store.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            GREETING.to_string(),
            "first".to_string(),
            "second".to_string(),
            "first answer".to_string(),
            "second answer".to_string(),
        ]
    );
    assert!(!store.is_typing());
}

#[tokio::test]
async fn voice_transcript_precedes_answer() {
    let backend = ScriptedBackend::new().json(
        "/voice-query",
        json!({
            "transcript": "someone used my aadhaar",
            "answer": "This may be identity theft under Section 66C.",
            "act": "IT Act",
            "section": "66C"
        }),
    );
    let store = store_with(backend.clone());

    store.send_voice_query(AudioClip::wav(vec![1, 2, 3])).await;

    let messages = store.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "someone used my aadhaar");
    assert_eq!(
        messages[2].meta.as_ref().and_then(|m| m.section.clone()),
        Some("66C".to_string())
    );

    let upload = backend.calls().remove(0).file.expect("file");
    assert_eq!(upload.file_name, "voice.wav");
    assert_eq!(upload.content_type, "audio/wav");
    assert_eq!(upload.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn failed_voice_upload_appends_error_reply() {
    let store = ConversationStore::new(Arc::new(UnreachableBackend), GREETING);

    store.send_voice_query(AudioClip::wav(vec![0; 8])).await;

    let messages = store.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_error());
    assert!(!store.is_typing());
}

#[tokio::test]
async fn subscribers_observe_query_lifecycle() {
    let backend = ScriptedBackend::new().json("/text-query", json!({ "answer": "ok" }));
    let store = store_with(backend);
    let mut events = store.subscribe();

    assert!(store.toggle());
    store.send_text_query("hi").await;

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(match event {
            ConversationEvent::VisibilityChanged(open) => format!("open={open}"),
            ConversationEvent::TypingChanged(typing) => format!("typing={typing}"),
            ConversationEvent::MessageAppended(message) => format!("message={}", message.text),
        });
    }
    assert_eq!(
        seen,
        vec!["open=true", "message=hi", "typing=true", "message=ok", "typing=false"]
    );
    assert!(!store.toggle());
}
