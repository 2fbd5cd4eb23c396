// src/api/mod.rs
//! Backend operations, one file per resource. Each file extends `ServiceClient`.

pub mod favorites;
pub mod pipeline;
pub mod roles;
pub mod search;
pub mod session;
pub mod upload;

pub use pipeline::{fixture_by_stage, fixture_candidates};
pub use session::{check_session, watch_session};
