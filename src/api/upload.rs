// src/api/upload.rs
use reqwest::multipart::Form;
use tracing::info;

use crate::core::fs_ops::UploadFile;
use crate::core::ServiceClient;
use crate::error::{ApiError, ApiResult};
use crate::types::UploadResumesResponse;

const UPLOAD: &str = "upload";

impl ServiceClient {
    /// Upload a single job description document; returns the backend's parsed JD as-is.
    pub async fn upload_jd(&self, file: UploadFile) -> ApiResult<serde_json::Value> {
        info!("Uploading JD {} ({} bytes)", file.file_name, file.bytes.len());
        let form = Form::new().part("file", Self::file_part(file)?);
        self.post_multipart("Upload JD", &[UPLOAD, "jd"], form).await
    }

    /// Upload resumes for a job description. Every file goes under the `files` field.
    pub async fn upload_resumes(
        &self,
        jd_id: &str,
        files: Vec<UploadFile>,
    ) -> ApiResult<UploadResumesResponse> {
        if files.is_empty() {
            return Err(ApiError::InvalidArgument(
                "No resume files provided.".to_string(),
            ));
        }

        info!("Uploading {} resumes for JD {}", files.len(), jd_id);
        let mut form = Form::new().text("jd_id", jd_id.to_string());
        for file in files {
            form = form.part("files", Self::file_part(file)?);
        }

        let response: UploadResumesResponse = self
            .post_multipart("Upload resumes", &[UPLOAD, "resumes"], form)
            .await?;

        for failed in &response.failed_uploads {
            tracing::warn!("Resume {} was rejected: {}", failed.filename, failed.error);
        }
        Ok(response)
    }
}
