// src/api/search.rs
//! Candidate search and resume ranking tasks under `/search/`.
//!
//! Start calls return immediately with a task id; results are fetched by
//! polling, either manually through `search_results` /
//! `resume_ranking_results` or through `wait_for_task`.

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::core::ServiceClient;
use crate::error::{ApiError, ApiResult};
use crate::task_poller::{poll_until_complete, CancelToken, PollPolicy};
use crate::types::{
    ApolloSearchOption, LinkedInUrlResponse, RankedCandidate, StopTaskResponse, TaskKind,
    TaskStart, TaskStatus,
};

const SEARCH: &str = "search";

#[derive(Serialize)]
struct StartTaskRequest<'a> {
    jd_id: &'a str,
    prompt: &'a str,
}

#[derive(Serialize)]
struct ApolloSearchRequest<'a> {
    search_option: u8,
    prompt: &'a str,
}

impl ServiceClient {
    /// Start the main search-and-rank pipeline for a job description.
    pub async fn start_search(&self, jd_id: &str, prompt: &str) -> ApiResult<TaskStart> {
        let task: TaskStart = self
            .post_json(
                "Start search",
                &[SEARCH, "search"],
                &StartTaskRequest { jd_id, prompt },
            )
            .await?;
        info!("Search task {} started for JD {}", task.task_id, jd_id);
        Ok(task)
    }

    /// Start an Apollo-backed search. `search_option` must be 1 (fast) or 2
    /// (web + Apollo); anything else is rejected before a request is made.
    pub async fn start_apollo_search(
        &self,
        jd_id: &str,
        prompt: &str,
        search_option: u8,
    ) -> ApiResult<TaskStart> {
        let option =
            ApolloSearchOption::try_from(search_option).map_err(ApiError::InvalidArgument)?;

        let task: TaskStart = self
            .post_json(
                "Start Apollo search",
                &[SEARCH, "apollo-search", jd_id],
                &ApolloSearchRequest {
                    search_option: option.code(),
                    prompt,
                },
            )
            .await?;
        info!(
            "Apollo search task {} started for JD {} (option {})",
            task.task_id,
            jd_id,
            option.code()
        );
        Ok(task)
    }

    pub async fn search_results(&self, task_id: &str) -> ApiResult<TaskStatus> {
        self.get_json(
            "Get search results",
            &[SEARCH, "search", "results", task_id],
            &[],
        )
        .await
    }

    /// Rank the resumes uploaded for a job description.
    pub async fn start_resume_ranking(&self, jd_id: &str, prompt: &str) -> ApiResult<TaskStart> {
        let task: TaskStart = self
            .post_json(
                "Start resume ranking",
                &[SEARCH, "rank-resumes"],
                &StartTaskRequest { jd_id, prompt },
            )
            .await?;
        info!("Resume ranking task {} started for JD {}", task.task_id, jd_id);
        Ok(task)
    }

    pub async fn resume_ranking_results(&self, task_id: &str) -> ApiResult<TaskStatus> {
        self.get_json(
            "Get resume ranking results",
            &[SEARCH, "rank-resumes", "results", task_id],
            &[],
        )
        .await
    }

    pub async fn poll_task(&self, kind: TaskKind, task_id: &str) -> ApiResult<TaskStatus> {
        match kind {
            TaskKind::Search => self.search_results(task_id).await,
            TaskKind::ResumeRanking => self.resume_ranking_results(task_id).await,
        }
    }

    /// Poll a task until it completes, fails, runs out of attempts or `cancel` fires.
    pub async fn wait_for_task(
        &self,
        kind: TaskKind,
        task_id: &str,
        policy: PollPolicy,
        cancel: &CancelToken,
    ) -> ApiResult<Vec<RankedCandidate>> {
        poll_until_complete(policy, cancel, move |_attempt| {
            self.poll_task(kind, task_id)
        })
        .await
    }

    /// Ask the backend to stop a running task. Does not wait for the task to wind down.
    pub async fn stop_task(&self, task_id: &str) -> ApiResult<StopTaskResponse> {
        let response: StopTaskResponse = self
            .post_empty("Stop task", &[SEARCH, "cancel", task_id])
            .await?;
        info!("Stop requested for task {}: {}", task_id, response.message);
        Ok(response)
    }

    pub async fn generate_linkedin_url(&self, profile_id: &str) -> ApiResult<LinkedInUrlResponse> {
        self.post_json(
            "Generate LinkedIn URL",
            &[SEARCH, "generate-linkedin-url"],
            &json!({ "profile_id": profile_id }),
        )
        .await
    }
}
