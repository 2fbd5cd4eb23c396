// src/export.rs
//! Flat CSV renderings of roles, ranked candidates and pipeline boards.

use anyhow::{Context, Result};
use std::io::Write;

use crate::types::{PipelineCandidate, RankedCandidate, Role};

pub fn write_roles_csv<W: Write>(roles: &[Role], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "title",
        "location",
        "status",
        "experience",
        "key_requirements",
        "liked",
        "contacted",
        "created_at",
        "updated_at",
    ])?;

    for role in roles {
        let requirements = role.key_requirements.join("; ");
        let liked = role.candidate_stats.liked.to_string();
        let contacted = role.candidate_stats.contacted.to_string();
        csv.write_record([
            role.id.as_str(),
            role.title.as_str(),
            role.location.as_str(),
            role.status.as_str(),
            role.experience.as_str(),
            requirements.as_str(),
            liked.as_str(),
            contacted.as_str(),
            role.created_at.as_str(),
            role.updated_at.as_str(),
        ])?;
    }

    csv.flush().context("Failed to write roles CSV")
}

pub fn write_candidates_csv<W: Write>(candidates: &[RankedCandidate], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "candidate_id",
        "name",
        "role",
        "company",
        "score",
        "favorite",
        "profile_url",
    ])?;

    for candidate in candidates {
        let score = candidate.score.map(|s| s.to_string()).unwrap_or_default();
        let favorite = candidate.favorite.map(|f| f.to_string()).unwrap_or_default();
        let profile_url = candidate
            .linkedin_url
            .as_deref()
            .or(candidate.profile_url.as_deref())
            .unwrap_or_default();

        csv.write_record([
            candidate.candidate_id().unwrap_or_default(),
            candidate.display_name(),
            candidate.role.as_deref().unwrap_or_default(),
            candidate.company.as_deref().unwrap_or_default(),
            score.as_str(),
            favorite.as_str(),
            profile_url,
        ])?;
    }

    csv.flush().context("Failed to write candidates CSV")
}

pub fn write_pipeline_csv<W: Write>(candidates: &[PipelineCandidate], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["id", "name", "role", "company", "status", "stage"])?;

    for c in candidates {
        csv.write_record([
            c.id.as_str(),
            c.name.as_str(),
            c.role.as_str(),
            c.company.as_str(),
            c.status.label(),
            c.stage.label(),
        ])?;
    }

    csv.flush().context("Failed to write pipeline CSV")
}
