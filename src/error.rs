// src/error.rs
//! Error type shared by every backend call.
//!
//! Each variant maps onto one `ErrorKind` so callers can branch on the
//! category (transport, HTTP status, response shape, local validation)
//! without matching on message text.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{action} request failed: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `message` is the server-supplied text when one could
    /// be extracted, otherwise `"<action> failed (<status>)"`.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    UnexpectedShape(&'static str),

    #[error("{action}: could not decode response body: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    TaskFailed(String),

    #[error("task still processing after {attempts} polls")]
    PollExhausted { attempts: u32 },

    #[error("polling cancelled")]
    PollCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Http { status: u16 },
    Shape,
    InvalidArgument,
    Config,
    Io,
    Task,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { status, .. } => ErrorKind::Http { status: *status },
            Self::UnexpectedShape(_) | Self::Decode { .. } => ErrorKind::Shape,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidBaseUrl { .. } | Self::ClientBuild(_) => ErrorKind::Config,
            Self::File { .. } => ErrorKind::Io,
            Self::TaskFailed(_) | Self::PollExhausted { .. } | Self::PollCancelled => {
                ErrorKind::Task
            }
        }
    }

    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_message_only() {
        let err = ApiError::Http {
            status: 404,
            message: "Role not found".to_string(),
        };
        assert_eq!(err.to_string(), "Role not found");
        assert_eq!(err.kind(), ErrorKind::Http { status: 404 });
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            ApiError::UnexpectedShape("bad").kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            ApiError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(ApiError::PollCancelled.kind(), ErrorKind::Task);
        assert!(!ApiError::PollCancelled.is_unauthorized());
        assert!(ApiError::Http {
            status: 401,
            message: String::new()
        }
        .is_unauthorized());
    }
}
