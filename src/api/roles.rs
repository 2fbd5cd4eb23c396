// src/api/roles.rs
//! Role (job description) management under `/roles/`.

use reqwest::multipart::Form;
use serde_json::json;
use tracing::info;

use crate::core::fs_ops::UploadFile;
use crate::core::ServiceClient;
use crate::error::ApiResult;
use crate::types::{JdSummary, Role, RoleStatus};

const ROLES: &str = "roles";

impl ServiceClient {
    /// Raw job descriptions owned by the current user, optionally sorted/filtered server-side.
    pub async fn fetch_jds(
        &self,
        sort: Option<&str>,
        filter: Option<&str>,
    ) -> ApiResult<Vec<JdSummary>> {
        let mut query = Vec::new();
        if let Some(sort) = sort.filter(|s| !s.is_empty()) {
            query.push(("sort", sort));
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            query.push(("filter", filter));
        }

        let action = "Fetch roles";
        let response = self.get(action, &[ROLES, ""], &query).await?;
        Self::read_json_array(
            action,
            response,
            "Unexpected response format from roles endpoint",
        )
        .await
    }

    pub async fn list_roles(
        &self,
        sort: Option<&str>,
        filter: Option<&str>,
    ) -> ApiResult<Vec<Role>> {
        let jds = self.fetch_jds(sort, filter).await?;
        Ok(jds.into_iter().map(Role::from).collect())
    }

    /// Create a role by uploading its job description document.
    pub async fn create_role(&self, file: UploadFile) -> ApiResult<Role> {
        let file_name = file.file_name.clone();
        let form = Form::new().part("file", Self::file_part(file)?);

        let created: JdSummary = self
            .post_multipart("Create role", &[ROLES, ""], form)
            .await?;

        info!("Created role {} from {}", created.jd_id, file_name);
        Ok(Role::from(created))
    }

    pub async fn update_role_status(&self, role_id: &str, status: RoleStatus) -> ApiResult<Role> {
        let updated: JdSummary = self
            .patch_json(
                "Update role status",
                &[ROLES, role_id, "status"],
                &json!({ "status": status }),
            )
            .await?;
        Ok(Role::from(updated))
    }

    /// Replace the editable job description text.
    pub async fn edit_role_content(&self, role_id: &str, jd_text: &str) -> ApiResult<Role> {
        let updated: JdSummary = self
            .patch_json(
                "Update role content",
                &[ROLES, role_id],
                &json!({ "jd_text": jd_text }),
            )
            .await?;
        Ok(Role::from(updated))
    }

    pub async fn delete_role(&self, role_id: &str) -> ApiResult<()> {
        self.delete("Delete role", &[ROLES, role_id]).await?;
        info!("Deleted role {}", role_id);
        Ok(())
    }
}
