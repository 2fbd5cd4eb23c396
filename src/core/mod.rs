// src/core/mod.rs
//! Transport, client settings and upload file loading

pub mod client_config;
pub mod fs_ops;
pub mod service_client;

pub use client_config::ClientConfig;
pub use fs_ops::{FsOps, UploadFile};
pub use service_client::ServiceClient;
