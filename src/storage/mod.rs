pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::{Club, ScorecardEntry, TrackedShot, UserId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Per-user document store. Every call names the user explicitly; `upsert_*`
/// returns the id of the stored item, assigning one when the item has none.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn list_clubs(&self, user: &UserId) -> Result<Vec<Club>, StorageError>;
    /// Clubs are keyed by name.
    async fn upsert_club(&self, user: &UserId, club: &Club) -> Result<String, StorageError>;
    async fn delete_club(&self, user: &UserId, name: &str) -> Result<(), StorageError>;

    async fn list_shots(&self, user: &UserId) -> Result<Vec<TrackedShot>, StorageError>;
    async fn upsert_shot(&self, user: &UserId, shot: &TrackedShot) -> Result<String, StorageError>;
    async fn delete_shot(&self, user: &UserId, id: &str) -> Result<(), StorageError>;

    async fn list_scorecards(&self, user: &UserId) -> Result<Vec<ScorecardEntry>, StorageError>;
    async fn upsert_scorecard(
        &self,
        user: &UserId,
        card: &ScorecardEntry,
    ) -> Result<String, StorageError>;
    async fn delete_scorecard(&self, user: &UserId, id: &str) -> Result<(), StorageError>;
}
