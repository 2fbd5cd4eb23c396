// src/core/fs_ops.rs
//! Local file loading for multipart uploads

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::utils::{content_type_for, file_name_of};

/// A document held in memory, ready to become a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> ApiResult<Self> {
        FsOps::read_upload(path).await
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.file_name)
    }
}

pub struct FsOps;

impl FsOps {
    /// Read one file for upload
    pub async fn read_upload(path: &Path) -> ApiResult<UploadFile> {
        let bytes = fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(UploadFile::new(file_name_of(path), bytes))
    }

    /// Read several files, failing on the first unreadable one
    pub async fn read_uploads(paths: &[PathBuf]) -> ApiResult<Vec<UploadFile>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(Self::read_upload(path).await?);
        }
        Ok(files)
    }
}
