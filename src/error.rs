use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("You need to be signed in to save data.")]
    NotAuthenticated,
    #[error("external service error: {0}")]
    ExternalService(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    OutOfRange(String),
    #[error("index {index} is out of bounds for {len} entries")]
    InvalidIndex { index: usize, len: usize },
    #[error("unknown club: {0}")]
    UnknownClub(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Errors the user must fix before retrying (blocking), as opposed to
    /// transient notices and service hiccups.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::ExternalService(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::ExternalService(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ExternalService(err.to_string())
    }
}
