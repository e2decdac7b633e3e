//! Lawyer workspace requests issued from slash commands.

use crate::app::WorkspacePanel;
use lawfort_core::{LawfortError, LawyerWorkspace};
use lawfort_protocol::{
    ClientRecord, EvidenceItem, InvestigationRecord, NewClient, NewInvestigationRecord, NewNote,
    NewRoadmapStep, NewTimelineEvent, Note, RoadmapStep, TimelineEvent, UploadFile,
};
use log::debug;
use std::path::{Path, PathBuf};

/// One workspace action; creates are followed by a fresh listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRequest {
    Notes,
    Records,
    Timeline,
    Clients,
    Roadmap,
    Evidence,
    CreateNote(NewNote),
    CreateRecord(NewInvestigationRecord),
    AddEvent(NewTimelineEvent),
    AddClient(NewClient),
    AddStep(NewRoadmapStep),
    Upload(PathBuf),
    Summary(String),
    Draft {
        draft_type: String,
        case_details: String,
    },
}

impl WorkspaceRequest {
    /// Status line shown while the request runs.
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceRequest::Notes | WorkspaceRequest::CreateNote(_) => "notebook",
            WorkspaceRequest::Records | WorkspaceRequest::CreateRecord(_) => "records",
            WorkspaceRequest::Timeline | WorkspaceRequest::AddEvent(_) => "timeline",
            WorkspaceRequest::Clients | WorkspaceRequest::AddClient(_) => "clients",
            WorkspaceRequest::Roadmap | WorkspaceRequest::AddStep(_) => "roadmap",
            WorkspaceRequest::Evidence | WorkspaceRequest::Upload(_) => "evidence",
            WorkspaceRequest::Summary(_) => "summary",
            WorkspaceRequest::Draft { .. } => "draft",
        }
    }
}

/// Run a request and render its outcome.
pub async fn execute(
    workspace: &LawyerWorkspace,
    request: WorkspaceRequest,
) -> Result<WorkspacePanel, LawfortError> {
    debug!("workspace request (kind={})", request.label());
    match request {
        WorkspaceRequest::Notes => Ok(notes_panel(&workspace.notes().await?)),
        WorkspaceRequest::Records => Ok(records_panel(&workspace.records().await?)),
        WorkspaceRequest::Timeline => Ok(timeline_panel(&workspace.timeline().await?)),
        WorkspaceRequest::Clients => Ok(clients_panel(&workspace.clients().await?)),
        WorkspaceRequest::Roadmap => Ok(roadmap_panel(&workspace.roadmap().await?)),
        WorkspaceRequest::Evidence => Ok(evidence_panel(&workspace.evidence().await?)),
        WorkspaceRequest::CreateNote(note) => {
            workspace.create_note(&note).await?;
            Ok(notes_panel(&workspace.notes().await?))
        }
        WorkspaceRequest::CreateRecord(record) => {
            workspace.create_record(&record).await?;
            Ok(records_panel(&workspace.records().await?))
        }
        WorkspaceRequest::AddEvent(event) => {
            workspace.add_timeline_event(&event).await?;
            Ok(timeline_panel(&workspace.timeline().await?))
        }
        WorkspaceRequest::AddClient(client) => {
            workspace.add_client(&client).await?;
            Ok(clients_panel(&workspace.clients().await?))
        }
        WorkspaceRequest::AddStep(step) => {
            workspace.add_roadmap_step(&step).await?;
            Ok(roadmap_panel(&workspace.roadmap().await?))
        }
        WorkspaceRequest::Upload(path) => {
            workspace.upload_evidence(read_upload(&path).await?).await?;
            Ok(evidence_panel(&workspace.evidence().await?))
        }
        WorkspaceRequest::Summary(details) => {
            let summary = workspace.generate_summary(&details).await?;
            Ok(WorkspacePanel::new("Case Summary", text_lines(&summary.summary)))
        }
        WorkspaceRequest::Draft {
            draft_type,
            case_details,
        } => {
            let draft = workspace.generate_draft(&draft_type, &case_details).await?;
            Ok(WorkspacePanel::new(
                format!("Draft: {}", draft_type.trim()),
                text_lines(&draft.draft),
            ))
        }
    }
}

async fn read_upload(path: &Path) -> Result<UploadFile, LawfortError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(UploadFile::new(file_name, content_type_for(path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("log") => "text/plain",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn listing<T>(
    title: &str,
    empty: &str,
    items: &[T],
    render: impl Fn(&T) -> Vec<String>,
) -> WorkspacePanel {
    if items.is_empty() {
        return WorkspacePanel::new(title, vec![empty.to_string()]);
    }
    let mut lines = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.extend(render(item));
    }
    WorkspacePanel::new(title, lines)
}

fn notes_panel(notes: &[Note]) -> WorkspacePanel {
    listing("Case Notebook", "No notes yet.", notes, |note| {
        vec![format!("#{} {}", note.id, note.title), note.content.clone()]
    })
}

fn records_panel(records: &[InvestigationRecord]) -> WorkspacePanel {
    listing(
        "Investigation Records",
        "No investigation records yet.",
        records,
        |record| {
            vec![
                format!("[{}] {}", record.case_number, record.title),
                record.description.clone(),
            ]
        },
    )
}

fn timeline_panel(events: &[TimelineEvent]) -> WorkspacePanel {
    listing("Case Timeline", "No timeline events yet.", events, |event| {
        vec![format!(
            "{}  [{}] {}",
            event.event_date, event.case_number, event.description
        )]
    })
}

fn clients_panel(clients: &[ClientRecord]) -> WorkspacePanel {
    listing("Clients", "No clients yet.", clients, |client| {
        vec![
            format!("{} ({})", client.name, client.contact),
            client.case_details.clone(),
        ]
    })
}

fn roadmap_panel(steps: &[RoadmapStep]) -> WorkspacePanel {
    listing("Case Roadmap", "No roadmap steps yet.", steps, |step| {
        let mark = if step.completed { "x" } else { " " };
        vec![format!(
            "[{mark}] [{}] {}: {}",
            step.case_number, step.stage, step.milestone
        )]
    })
}

fn evidence_panel(items: &[EvidenceItem]) -> WorkspacePanel {
    listing("Evidence Vault", "No evidence uploaded yet.", items, |item| {
        let mut line = item.filename.clone();
        if let Some(size) = item.size {
            line.push_str(&format!(" ({size} bytes)"));
        }
        let mut lines = vec![line];
        if let Some(hash) = &item.sha256 {
            lines.push(format!("sha256 {hash}"));
        }
        lines
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawfort_test_utils::ScriptedBackend;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn create_is_followed_by_listing() {
        let backend = ScriptedBackend::new()
            .json("/api/lawyer/clients/create", json!({ "id": 1 }))
            .json(
                "/api/lawyer/clients/all",
                json!([{ "id": 1, "name": "Meera", "contact": "98200", "case_details": "SIM swap" }]),
            );
        let workspace = LawyerWorkspace::new(Arc::new(backend.clone()));

        let panel = execute(
            &workspace,
            WorkspaceRequest::AddClient(NewClient {
                name: "Meera".to_string(),
                contact: "98200".to_string(),
                case_details: "SIM swap".to_string(),
            }),
        )
        .await
        .expect("panel");

        assert_eq!(panel.title, "Clients");
        assert_eq!(panel.lines, vec!["Meera (98200)", "SIM swap"]);
        assert_eq!(
            backend.paths(),
            vec!["/api/lawyer/clients/create", "/api/lawyer/clients/all"]
        );
    }

    #[tokio::test]
    async fn empty_listing_says_so() {
        let backend = ScriptedBackend::new().json("/api/lawyer/roadmap/all", json!([]));
        let workspace = LawyerWorkspace::new(Arc::new(backend));

        let panel = execute(&workspace, WorkspaceRequest::Roadmap)
            .await
            .expect("panel");

        assert_eq!(panel.lines, vec!["No roadmap steps yet."]);
    }

    #[tokio::test]
    async fn missing_upload_file_is_an_error() {
        let backend = ScriptedBackend::new();
        let workspace = LawyerWorkspace::new(Arc::new(backend.clone()));

        let result = execute(
            &workspace,
            WorkspaceRequest::Upload(PathBuf::from("/nonexistent/evidence.png")),
        )
        .await;

        assert!(matches!(result, Err(LawfortError::Io(_))));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn evidence_types_follow_extension() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("b.pdf")), "application/pdf");
        assert_eq!(content_type_for(Path::new("c")), "application/octet-stream");
    }
}
