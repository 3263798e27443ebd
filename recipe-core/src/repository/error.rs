//! Store accessor errors.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Network failure or the backend is down
    #[error("backing store unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status
    #[error("store responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        StoreError::Status {
            status: 404,
            message: format!("{} not found", what),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            StoreError::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}
