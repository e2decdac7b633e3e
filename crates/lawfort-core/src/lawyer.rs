//! Case management endpoints available to lawyer accounts.

use crate::api::{fetch, submit};
use crate::error::LawfortError;
use lawfort_protocol::{
    Backend, CaseSummary, ClientRecord, DraftDocument, DraftRequest, EvidenceItem,
    InvestigationRecord, NewClient, NewInvestigationRecord, NewNote, NewRoadmapStep,
    NewTimelineEvent, Note, RoadmapStep, SummaryRequest, TimelineEvent, UploadFile,
};
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub const SUMMARY_PATH: &str = "/api/lawyer/summary/generate";
pub const DRAFT_PATH: &str = "/api/lawyer/draft/generate";

const FILL_ALL_FIELDS: &str = "Fill all fields";

/// Collections under `/api/lawyer`, each with `all` and `create` routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Notebook,
    Records,
    Timeline,
    Clients,
    Roadmap,
    Evidence,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Notebook => "notebook",
            Resource::Records => "records",
            Resource::Timeline => "timeline",
            Resource::Clients => "clients",
            Resource::Roadmap => "roadmap",
            Resource::Evidence => "evidence",
        }
    }

    pub fn list_path(self) -> String {
        format!("/api/lawyer/{}/all", self.name())
    }

    /// Route that adds an entry; evidence is uploaded rather than created.
    pub fn create_path(self) -> String {
        let action = match self {
            Resource::Evidence => "upload",
            _ => "create",
        };
        format!("/api/lawyer/{}/{action}", self.name())
    }
}

/// Typed client for the lawyer workspace.
#[derive(Clone)]
pub struct LawyerWorkspace {
    backend: Arc<dyn Backend>,
}

impl LawyerWorkspace {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn notes(&self) -> Result<Vec<Note>, LawfortError> {
        self.list(Resource::Notebook).await
    }

    pub async fn create_note(&self, note: &NewNote) -> Result<(), LawfortError> {
        require_filled(&[&note.title, &note.content])?;
        self.create(Resource::Notebook, note).await
    }

    pub async fn records(&self) -> Result<Vec<InvestigationRecord>, LawfortError> {
        self.list(Resource::Records).await
    }

    pub async fn create_record(&self, record: &NewInvestigationRecord) -> Result<(), LawfortError> {
        require_filled(&[&record.case_number, &record.title, &record.description])?;
        self.create(Resource::Records, record).await
    }

    pub async fn timeline(&self) -> Result<Vec<TimelineEvent>, LawfortError> {
        self.list(Resource::Timeline).await
    }

    pub async fn add_timeline_event(&self, event: &NewTimelineEvent) -> Result<(), LawfortError> {
        require_filled(&[&event.case_number, &event.event_date, &event.description])?;
        self.create(Resource::Timeline, event).await
    }

    pub async fn clients(&self) -> Result<Vec<ClientRecord>, LawfortError> {
        self.list(Resource::Clients).await
    }

    pub async fn add_client(&self, client: &NewClient) -> Result<(), LawfortError> {
        require_filled(&[&client.name, &client.contact, &client.case_details])?;
        self.create(Resource::Clients, client).await
    }

    pub async fn roadmap(&self) -> Result<Vec<RoadmapStep>, LawfortError> {
        self.list(Resource::Roadmap).await
    }

    pub async fn add_roadmap_step(&self, step: &NewRoadmapStep) -> Result<(), LawfortError> {
        require_filled(&[&step.case_number, &step.stage, &step.milestone])?;
        self.create(Resource::Roadmap, step).await
    }

    pub async fn evidence(&self) -> Result<Vec<EvidenceItem>, LawfortError> {
        self.list(Resource::Evidence).await
    }

    /// Upload a file to the evidence vault.
    pub async fn upload_evidence(&self, file: UploadFile) -> Result<(), LawfortError> {
        if file.file_name.trim().is_empty() || file.bytes.is_empty() {
            return Err(LawfortError::validation("Select a non-empty file to upload"));
        }
        let path = Resource::Evidence.create_path();
        info!(
            "uploading evidence (file={}, bytes={})",
            file.file_name,
            file.bytes.len()
        );
        self.backend.upload(&path, file).await?;
        Ok(())
    }

    pub async fn generate_summary(&self, case_details: &str) -> Result<CaseSummary, LawfortError> {
        require_filled(&[case_details])?;
        let request = SummaryRequest {
            case_details: case_details.trim().to_string(),
        };
        submit(self.backend.as_ref(), SUMMARY_PATH, &request).await
    }

    pub async fn generate_draft(
        &self,
        draft_type: &str,
        case_details: &str,
    ) -> Result<DraftDocument, LawfortError> {
        require_filled(&[draft_type, case_details])?;
        let request = DraftRequest {
            draft_type: draft_type.trim().to_string(),
            case_details: case_details.trim().to_string(),
        };
        submit(self.backend.as_ref(), DRAFT_PATH, &request).await
    }

    async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, LawfortError> {
        let items: Vec<T> = fetch(self.backend.as_ref(), &resource.list_path()).await?;
        debug!(
            "loaded lawyer {} (count={})",
            resource.name(),
            items.len()
        );
        Ok(items)
    }

    async fn create<B: Serialize + Sync>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<(), LawfortError> {
        let _: Value = submit(self.backend.as_ref(), &resource.create_path(), body).await?;
        info!("created lawyer {} entry", resource.name());
        Ok(())
    }
}

fn require_filled(fields: &[&str]) -> Result<(), LawfortError> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(LawfortError::validation(FILL_ALL_FIELDS));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Notebook.list_path(), "/api/lawyer/notebook/all");
        assert_eq!(Resource::Notebook.create_path(), "/api/lawyer/notebook/create");
        assert_eq!(Resource::Evidence.create_path(), "/api/lawyer/evidence/upload");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_filled(&["title", "content"]).is_ok());
        assert_eq!(
            require_filled(&["title", "  "]).unwrap_err().to_string(),
            "Fill all fields"
        );
    }
}
