// src/types/role.rs
//! Job description DTO as returned by `/roles/` and the role shape shown to users.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::non_empty;

pub const UNTITLED_ROLE: &str = "Untitled Role";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_SUMMARY: &str = "No summary available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleStatus {
    #[default]
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

impl RoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Open => "open",
            RoleStatus::Closed => "closed",
            RoleStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for RoleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(RoleStatus::Open),
            "closed" => Ok(RoleStatus::Closed),
            other => Err(format!("Unknown role status: {}. Use open or closed", other)),
        }
    }
}

/// The backend sends `key_requirements` either as one delimited string or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyRequirements {
    Text(String),
    List(Vec<serde_json::Value>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateStatsDto {
    #[serde(default)]
    pub liked: Option<u32>,
    #[serde(default)]
    pub contacted: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdSummary {
    pub jd_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub jd_parsed_summary: Option<String>,
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub key_requirements: Option<KeyRequirements>,
    #[serde(default)]
    pub status: Option<RoleStatus>,
    #[serde(default)]
    pub candidate_stats: Option<CandidateStatsDto>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStats {
    pub liked: u32,
    pub contacted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub title: String,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
    pub summary: String,
    pub full_content: String,
    pub experience: String,
    pub key_requirements: Vec<String>,
    pub candidate_stats: CandidateStats,
    pub status: RoleStatus,
}

impl Role {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

impl From<JdSummary> for Role {
    fn from(jd: JdSummary) -> Self {
        let stats = jd.candidate_stats.unwrap_or_default();

        Self {
            id: jd.jd_id,
            title: non_empty(jd.role)
                .or_else(|| non_empty(jd.title))
                .unwrap_or_else(|| UNTITLED_ROLE.to_string()),
            location: non_empty(jd.location).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            created_at: jd.created_at,
            updated_at: jd.updated_at,
            summary: non_empty(jd.jd_parsed_summary).unwrap_or_else(|| NO_SUMMARY.to_string()),
            full_content: jd.jd_text.unwrap_or_default(),
            experience: non_empty(jd.experience_required)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            key_requirements: parse_key_requirements(jd.key_requirements.as_ref()),
            candidate_stats: CandidateStats {
                liked: stats.liked.unwrap_or(0),
                contacted: stats.contacted.unwrap_or(0),
            },
            status: jd.status.unwrap_or_default(),
        }
    }
}

/// Normalize `key_requirements` into an ordered list of strings.
///
/// Text is split on runs of `,` or `;`, each piece trimmed, empty pieces dropped.
/// Lists keep their order; non-string items are rendered as JSON text.
pub fn parse_key_requirements(value: Option<&KeyRequirements>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(KeyRequirements::Text(text)) => text
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(KeyRequirements::List(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    }
}

/// Backend timestamps are ISO-8601, sometimes without an offset (treated as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(value: serde_json::Value) -> JdSummary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_key_requirements_from_delimited_text() {
        let reqs = KeyRequirements::Text("a, b; c".to_string());
        assert_eq!(parse_key_requirements(Some(&reqs)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_key_requirements_drops_empty_pieces() {
        let reqs = KeyRequirements::Text(" Rust ,, ;SQL; ".to_string());
        assert_eq!(parse_key_requirements(Some(&reqs)), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_key_requirements_from_list() {
        let reqs = KeyRequirements::List(vec![json!("a"), json!("b")]);
        assert_eq!(parse_key_requirements(Some(&reqs)), vec!["a", "b"]);

        let mixed = KeyRequirements::List(vec![json!("a"), json!(5)]);
        assert_eq!(parse_key_requirements(Some(&mixed)), vec!["a", "5"]);
    }

    #[test]
    fn test_key_requirements_absent_or_null() {
        assert!(parse_key_requirements(None).is_empty());

        let jd = summary(json!({"jd_id": "1", "key_requirements": null}));
        assert!(jd.key_requirements.is_none());
        assert!(Role::from(jd).key_requirements.is_empty());
    }

    #[test]
    fn test_role_defaults_for_sparse_summary() {
        let role = Role::from(summary(json!({
            "jd_id": "jd-1",
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-02T10:00:00"
        })));

        assert_eq!(role.id, "jd-1");
        assert_eq!(role.title, UNTITLED_ROLE);
        assert_eq!(role.location, NOT_AVAILABLE);
        assert_eq!(role.summary, NO_SUMMARY);
        assert_eq!(role.full_content, "");
        assert_eq!(role.experience, NOT_AVAILABLE);
        assert_eq!(role.candidate_stats, CandidateStats { liked: 0, contacted: 0 });
        assert_eq!(role.status, RoleStatus::Open);
    }

    #[test]
    fn test_role_prefers_role_over_title() {
        let role = Role::from(summary(json!({
            "jd_id": "1",
            "title": "Generic title",
            "role": "Backend Engineer"
        })));
        assert_eq!(role.title, "Backend Engineer");

        let role = Role::from(summary(json!({
            "jd_id": "1",
            "title": "Generic title",
            "role": ""
        })));
        assert_eq!(role.title, "Generic title");
    }

    #[test]
    fn test_role_full_mapping() {
        let role = Role::from(summary(json!({
            "jd_id": "42",
            "title": "SWE",
            "location": "Berlin",
            "experience_required": "5+ years",
            "jd_parsed_summary": "Build things",
            "jd_text": "Full JD text",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "key_requirements": ["Rust", "Tokio"],
            "status": "closed",
            "candidate_stats": {"liked": 3}
        })));

        assert_eq!(role.location, "Berlin");
        assert_eq!(role.experience, "5+ years");
        assert_eq!(role.summary, "Build things");
        assert_eq!(role.full_content, "Full JD text");
        assert_eq!(role.key_requirements, vec!["Rust", "Tokio"]);
        assert_eq!(role.status, RoleStatus::Closed);
        assert_eq!(role.candidate_stats, CandidateStats { liked: 3, contacted: 0 });
    }

    #[test]
    fn test_unknown_status_does_not_fail_decoding() {
        let jd = summary(json!({"jd_id": "1", "status": "archived"}));
        assert_eq!(jd.status, Some(RoleStatus::Unknown));
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-05-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-05-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_role_status_from_str() {
        assert_eq!("OPEN".parse::<RoleStatus>(), Ok(RoleStatus::Open));
        assert_eq!("closed".parse::<RoleStatus>(), Ok(RoleStatus::Closed));
        assert!("paused".parse::<RoleStatus>().is_err());
    }
}
