use lawfort_core::portal::NATIONAL_HELPLINE;
use lawfort_core::{ContentSource, LawfortError, LawyerWorkspace, PortalClient};
use lawfort_protocol::{EntityId, NewClient, NewNote, UploadFile};
use lawfort_test_utils::{Reply, ScriptedBackend, UnreachableBackend};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn portal_prefers_backend_content() {
    let backend = ScriptedBackend::new().json(
        "/api/universal/emergency-helpline",
        json!({ "helpline": "1930", "message": "Report at once", "regional": [] }),
    );
    let portal = PortalClient::new(Arc::new(backend));

    let page = portal.emergency_helpline().await;

    assert_eq!(page.source, ContentSource::Backend);
    assert_eq!(page.content.message, "Report at once");
}

/// Every portal page has built-in content when the backend is down.
#[tokio::test]
async fn portal_falls_back_when_unreachable() {
    let portal = PortalClient::new(Arc::new(UnreachableBackend));

    let helpline = portal.emergency_helpline().await;
    assert_eq!(helpline.source, ContentSource::Fallback);
    assert_eq!(helpline.content.helpline, NATIONAL_HELPLINE);
    assert_eq!(helpline.content.regional.len(), 2);

    let guide = portal.recovery_guide().await;
    assert_eq!(guide.source, ContentSource::Fallback);
    assert_eq!(
        guide
            .content
            .sections
            .iter()
            .map(|section| section.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Financial Security", "Social Media & Email", "Digital Identity"]
    );

    let awareness = portal.awareness().await;
    assert_eq!(awareness.content.red_flags, vec!["Urgent pressure", "Unverified links"]);
}

#[tokio::test]
async fn malformed_portal_content_falls_back() {
    let backend = ScriptedBackend::new().json("/api/universal/recovery-steps", json!([1, 2]));
    let portal = PortalClient::new(Arc::new(backend));

    assert_eq!(portal.recovery_guide().await.source, ContentSource::Fallback);
}

#[tokio::test]
async fn notebook_lists_and_creates_notes() {
    let backend = ScriptedBackend::new()
        .json(
            "/api/lawyer/notebook/all",
            json!([{ "id": 4, "title": "Hearing prep", "content": "Bring logs" }]),
        )
        .json("/api/lawyer/notebook/create", json!({ "id": 5 }));
    let workspace = LawyerWorkspace::new(Arc::new(backend.clone()));

    let notes = workspace.notes().await.expect("notes");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, EntityId::Number(4));

    workspace
        .create_note(&NewNote {
            title: "Bail".to_string(),
            content: "Draft application".to_string(),
        })
        .await
        .expect("create");
    assert_eq!(
        backend.calls()[1].body,
        Some(json!({ "title": "Bail", "content": "Draft application" }))
    );
}

#[tokio::test]
async fn blank_fields_never_reach_the_backend() {
    let backend = ScriptedBackend::new();
    let workspace = LawyerWorkspace::new(Arc::new(backend.clone()));

    let err = workspace
        .add_client(&NewClient {
            name: "Arjun".to_string(),
            contact: " ".to_string(),
            case_details: "UPI fraud".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Fill all fields");
    assert!(matches!(
        workspace.generate_summary("").await,
        Err(LawfortError::Validation(_))
    ));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn evidence_upload_and_generators() {
    let backend = ScriptedBackend::new()
        .json("/api/lawyer/evidence/upload", json!({ "id": "ev-1" }))
        .json("/api/lawyer/summary/generate", json!({ "summary": "Short summary" }))
        .on("/api/lawyer/draft/generate", Reply::Reject("Unsupported draft type".to_string()));
    let workspace = LawyerWorkspace::new(Arc::new(backend.clone()));

    workspace
        .upload_evidence(UploadFile::new("chat.png", "image/png", vec![137, 80]))
        .await
        .expect("upload");
    assert_eq!(
        backend.calls()[0].file.as_ref().map(|file| file.file_name.as_str()),
        Some("chat.png")
    );

    let summary = workspace
        .generate_summary("Victim lost 40,000 INR via UPI")
        .await
        .expect("summary");
    assert_eq!(summary.summary, "Short summary");

    let err = workspace
        .generate_draft("affidavit", "details")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported draft type");
}
