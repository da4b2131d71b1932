//! Host-side error type.

use shotlink_core::{StoreError, UploadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown upload service '{0}'")]
    UnknownService(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no configuration directory available; set {0}")]
    NoDataDir(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl AppError {
    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Upload(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
