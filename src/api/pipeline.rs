// src/api/pipeline.rs
//! Candidates on a role's hiring pipeline.
//!
//! The pipeline board is populated from a fixed fixture; `fetch_pipeline`
//! reads the same shape from `/roles/{id}/pipeline` for backends serving it.

use crate::core::ServiceClient;
use crate::error::ApiResult;
use crate::types::{CandidateStatus, PipelineCandidate, PipelineStage};

#[rustfmt::skip]
const FIXTURE: [(&str, &str, &str, &str, CandidateStatus, PipelineStage); 12] = [
    ("1", "Sophia Rodriguez", "Software Engineer", "TechCorp", CandidateStatus::Favourited, PipelineStage::InConsideration),
    ("2", "Liam Thompson", "Product Manager", "Innovate Solutions", CandidateStatus::Contacted, PipelineStage::OfferExtended),
    ("3", "Ava Carter", "Data Scientist", "DataMinds Inc.", CandidateStatus::Favourited, PipelineStage::Rejected),
    ("4", "Noah Bennett", "UX Designer", "Creative Studio", CandidateStatus::Contacted, PipelineStage::Interviewing),
    ("5", "Emma Garcia", "Frontend Developer", "WebWeavers", CandidateStatus::Favourited, PipelineStage::InConsideration),
    ("6", "Oliver Martinez", "Backend Engineer", "ServerWorks", CandidateStatus::Contacted, PipelineStage::Interviewing),
    ("7", "Isabella Robinson", "DevOps Engineer", "Cloud Nine", CandidateStatus::Contacted, PipelineStage::Rejected),
    ("8", "James Clark", "Project Manager", "Innovate Solutions", CandidateStatus::Favourited, PipelineStage::OfferExtended),
    ("9", "Charlotte Lewis", "QA Engineer", "TechCorp", CandidateStatus::Contacted, PipelineStage::InConsideration),
    ("10", "Benjamin Walker", "Full Stack Developer", "CodeCrafters", CandidateStatus::Favourited, PipelineStage::Interviewing),
    ("11", "Mia Hall", "UI Designer", "Creative Studio", CandidateStatus::Contacted, PipelineStage::InConsideration),
    ("12", "Lucas Allen", "Data Analyst", "DataMinds Inc.", CandidateStatus::Favourited, PipelineStage::Hired),
];

/// The static pipeline shown while the backend has no pipeline endpoint.
pub fn fixture_candidates() -> Vec<PipelineCandidate> {
    FIXTURE
        .iter()
        .map(|&(id, name, role, company, status, stage)| PipelineCandidate {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            company: company.to_string(),
            status,
            stage,
        })
        .collect()
}

/// Fixture candidates at the given stage, in fixture order.
pub fn fixture_by_stage(stage: PipelineStage) -> Vec<PipelineCandidate> {
    fixture_candidates()
        .into_iter()
        .filter(|c| c.stage == stage)
        .collect()
}

impl ServiceClient {
    pub async fn fetch_pipeline(&self, role_id: &str) -> ApiResult<Vec<PipelineCandidate>> {
        let action = "Fetch pipeline";
        let response = self.get(action, &["roles", role_id, "pipeline"], &[]).await?;
        Self::read_json_array(
            action,
            response,
            "Unexpected response format from pipeline endpoint",
        )
        .await
    }
}
