use serde::{Deserialize, Serialize};

// ===== Search utility responses =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTaskResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedInUrlResponse {
    pub linkedin_url: String,
}

// ===== Favorites =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub candidate_id: String,
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteGroups {
    #[serde(default)]
    pub search: Vec<serde_json::Value>,
    #[serde(default)]
    pub resume: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesForJd {
    pub jd_id: String,
    #[serde(default)]
    pub favorites: FavoriteGroups,
}

// ===== Uploads =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedUpload {
    pub filename: String,
    pub error: String,
}

/// `/upload/resumes` has answered both `{success, message}` and
/// `{successful_uploads, failed_uploads}`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResumesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_uploads: Option<u32>,
    #[serde(default)]
    pub failed_uploads: Vec<FailedUpload>,
}

impl UploadResumesResponse {
    pub fn is_success(&self) -> bool {
        self.success
            .unwrap_or_else(|| self.successful_uploads.unwrap_or(0) > 0)
    }
}
