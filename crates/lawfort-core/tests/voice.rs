use lawfort_core::{ConversationStore, LawfortError, VoiceCapture};
use lawfort_protocol::AudioClip;
use lawfort_test_utils::{ScriptedBackend, ScriptedMicrophone, UnreachableBackend};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn store(backend: ScriptedBackend) -> ConversationStore {
    ConversationStore::new(Arc::new(backend), "Hello!")
}

/// Denied access is an error and leaves the conversation untouched.
#[tokio::test]
async fn denied_microphone_appends_nothing() {
    let store = store(ScriptedBackend::new());
    let microphone = ScriptedMicrophone::denied();
    let stats = microphone.stats();
    let mut capture = VoiceCapture::new(microphone);

    let err = capture.start().await.unwrap_err();

    assert!(matches!(err, LawfortError::Permission(_)));
    assert!(!capture.is_recording());
    assert_eq!(store.messages().len(), 1);
    assert_eq!(stats.acquired(), 0);
}

#[tokio::test]
async fn stop_releases_device_and_uploads_clip() {
    let backend = ScriptedBackend::new().json(
        "/voice-query",
        json!({ "answer": "File a complaint at cybercrime.gov.in.", "confidence": 0.7 }),
    );
    let store = store(backend.clone());
    let microphone = ScriptedMicrophone::new(AudioClip::wav(vec![9; 32]));
    let stats = microphone.stats();
    let mut capture = VoiceCapture::new(microphone);

    capture.start().await.expect("start");
    capture.start().await.expect("second start is a no-op");
    assert!(capture.is_recording());
    assert_eq!(stats.acquired(), 1);

    assert!(capture.stop_and_send(&store).await.expect("send"));

    assert!(!capture.is_recording());
    assert_eq!(stats.released(), 1);
    assert_eq!(backend.paths(), vec!["/voice-query"]);
    let reply = store.messages().pop().expect("reply");
    assert_eq!(reply.meta.and_then(|meta| meta.confidence), Some(70));
}

#[tokio::test]
async fn stop_without_recording_does_nothing() {
    let store = store(ScriptedBackend::new());
    let mut capture = VoiceCapture::new(ScriptedMicrophone::new(AudioClip::wav(vec![1])));

    assert!(!capture.stop_and_send(&store).await.expect("stop"));
    assert_eq!(store.messages().len(), 1);
}

#[tokio::test]
async fn failed_upload_still_releases_device() {
    let store = ConversationStore::new(Arc::new(UnreachableBackend), "Hello!");
    let microphone = ScriptedMicrophone::new(AudioClip::wav(vec![1, 2]));
    let stats = microphone.stats();
    let mut capture = VoiceCapture::new(microphone);

    capture.start().await.expect("start");
    capture.stop_and_send(&store).await.expect("stop");

    assert_eq!(stats.released(), 1);
    assert!(store.messages()[1].is_error());
}

#[tokio::test]
async fn recording_error_releases_device() {
    let store = store(ScriptedBackend::new());
    let microphone = ScriptedMicrophone::failing_on_finish();
    let stats = microphone.stats();
    let mut capture = VoiceCapture::new(microphone);

    capture.start().await.expect("start");
    assert!(capture.stop_and_send(&store).await.is_err());

    assert_eq!(stats.released(), 1);
    assert!(!capture.is_recording());
}

#[tokio::test]
async fn cancel_and_drop_release_device() {
    let microphone = ScriptedMicrophone::new(AudioClip::wav(vec![1]));
    let stats = microphone.stats();

    let mut capture = VoiceCapture::new(microphone.clone());
    capture.start().await.expect("start");
    assert!(capture.cancel());
    assert_eq!(stats.released(), 1);

    let mut capture = VoiceCapture::new(microphone);
    capture.start().await.expect("start");
    drop(capture);
    assert_eq!(stats.released(), 2);
}
