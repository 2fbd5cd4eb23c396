// src/types/mod.rs
pub mod candidate;
pub mod response;
pub mod role;
pub mod task;
pub mod user;

pub use candidate::{
    CandidateStatus, FavoriteSource, PipelineCandidate, PipelineStage, RankedCandidate,
};
pub use response::{
    FailedUpload, FavoriteGroups, FavoriteToggleResponse, FavoritesForJd, LinkedInUrlResponse,
    StopTaskResponse, UploadResumesResponse,
};
pub use role::{CandidateStats, JdSummary, KeyRequirements, Role, RoleStatus};
pub use task::{ApolloSearchOption, TaskKind, TaskStart, TaskState, TaskStatus};
pub use user::{SessionState, User};
