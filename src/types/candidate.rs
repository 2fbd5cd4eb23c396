// src/types/candidate.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Favourited,
    Contacted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    #[serde(rename = "In Consideration")]
    InConsideration,
    Interviewing,
    #[serde(rename = "Offer Extended")]
    OfferExtended,
    Rejected,
    Hired,
}

impl PipelineStage {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::InConsideration => "In Consideration",
            PipelineStage::Interviewing => "Interviewing",
            PipelineStage::OfferExtended => "Offer Extended",
            PipelineStage::Rejected => "Rejected",
            PipelineStage::Hired => "Hired",
        }
    }
}

impl CandidateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateStatus::Favourited => "Favourited",
            CandidateStatus::Contacted => "Contacted",
        }
    }
}

/// A candidate as shown on a role's pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCandidate {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub status: CandidateStatus,
    pub stage: PipelineStage,
}

/// Table a ranked candidate lives in; favorites are toggled per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteSource {
    RankedCandidates,
    RankedCandidatesFromResume,
}

impl std::str::FromStr for FavoriteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ranked_candidates" | "search" => Ok(FavoriteSource::RankedCandidates),
            "ranked_candidates_from_resume" | "resume" => {
                Ok(FavoriteSource::RankedCandidatesFromResume)
            }
            other => Err(format!(
                "Unknown favorite source: {}. Use ranked_candidates or ranked_candidates_from_resume",
                other
            )),
        }
    }
}

/// One entry of a completed search or resume ranking task.
///
/// Search results are keyed by `profile_id`, resume rankings by `resume_id`.
/// Fields the client does not interpret are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RankedCandidate {
    pub fn candidate_id(&self) -> Option<&str> {
        self.profile_id.as_deref().or(self.resume_id.as_deref())
    }

    pub fn favorite_source(&self) -> Option<FavoriteSource> {
        if self.profile_id.is_some() {
            Some(FavoriteSource::RankedCandidates)
        } else if self.resume_id.is_some() {
            Some(FavoriteSource::RankedCandidatesFromResume)
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.person_name.as_deref())
            .unwrap_or("Unknown")
    }
}
