use crate::forms::FieldCheck;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixityError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        checks: Vec<FieldCheck>,
    },

    #[error("Geolocation is not supported by this browser or permission denied.")]
    GeolocationUnavailable,

    #[error("No data to export!")]
    NothingToExport,
}

impl FixityError {
    pub fn validation(message: impl Into<String>) -> Self {
        FixityError::Validation {
            message: message.into(),
            checks: Vec::new(),
        }
    }
}

pub type Result<T, E = FixityError> = std::result::Result<T, E>;
