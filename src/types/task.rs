// src/types/task.rs
//! Two-phase background tasks: a start call hands out a `task_id`, a poll call
//! reports progress until the task completes or fails.

use serde::{Deserialize, Serialize};

use super::candidate::RankedCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Processing,
    Completed,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Processing)
    }
}

/// Which poll endpoint a task id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Started by `/search/search` or `/search/apollo-search/{jd_id}`.
    Search,
    /// Started by `/search/rank-resumes`.
    ResumeRanking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStart {
    pub task_id: String,
    pub status: TaskState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RankedCandidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskStatus {
    pub fn processing() -> Self {
        Self {
            status: TaskState::Processing,
            data: None,
            error: None,
        }
    }

    pub fn completed(data: Vec<RankedCandidate>) -> Self {
        Self {
            status: TaskState::Completed,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: TaskState::Failed,
            data: None,
            error: Some(error.into()),
        }
    }

    /// `None` while processing; the payload or the failure message once terminal.
    pub fn outcome(self) -> Option<Result<Vec<RankedCandidate>, String>> {
        match self.status {
            TaskState::Processing => None,
            TaskState::Completed => Some(Ok(self.data.unwrap_or_default())),
            TaskState::Failed => Some(Err(self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Task failed".to_string()))),
        }
    }
}

/// Apollo-backed search flavours accepted by `/search/apollo-search/{jd_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApolloSearchOption {
    /// Apollo only.
    Fast = 1,
    WebAndApollo = 2,
}

impl ApolloSearchOption {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ApolloSearchOption {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ApolloSearchOption::Fast),
            2 => Ok(ApolloSearchOption::WebAndApollo),
            _ => Err("searchOption must be 1 (Fast) or 2 (Web + Apollo)".to_string()),
        }
    }
}
