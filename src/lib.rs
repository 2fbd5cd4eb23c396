//! Client for the recruiter platform backend.
//!
//! Everything goes through one [`ServiceClient`]: roles, candidate search and
//! resume ranking tasks, uploads, favorites and the session check. Requests
//! carry the session cookie from the client's cookie jar; failures come back
//! as [`ApiError`].

pub mod api;
pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod export;
pub mod task_poller;
pub mod types;
pub mod utils;

pub use crate::core::{ClientConfig, ServiceClient, UploadFile};
pub use api::{check_session, fixture_candidates, watch_session};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use task_poller::{poll_until_complete, CancelToken, PollPolicy};
