use super::{PersistenceStore, StorageError};
use crate::model::{Club, ScorecardEntry, TrackedShot, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
struct UserDocs {
    clubs: Vec<Club>,
    shots: Vec<TrackedShot>,
    scorecards: Vec<ScorecardEntry>,
}

type DocMap = Arc<RwLock<HashMap<UserId, UserDocs>>>;

/// Process-local store; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: DocMap,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&self, prefix: &str, current: &str) -> String {
        if current.is_empty() {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{prefix}-{n}")
        } else {
            current.to_string()
        }
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn list_clubs(&self, user: &UserId) -> Result<Vec<Club>, StorageError> {
        let map = self.docs.read().await;
        Ok(map.get(user).map(|d| d.clubs.clone()).unwrap_or_default())
    }

    async fn upsert_club(&self, user: &UserId, club: &Club) -> Result<String, StorageError> {
        let mut map = self.docs.write().await;
        let docs = map.entry(user.clone()).or_default();
        match docs.clubs.iter_mut().find(|c| c.name == club.name) {
            Some(existing) => existing.distance = club.distance,
            None => docs.clubs.push(club.clone()),
        }
        Ok(club.name.clone())
    }

    async fn delete_club(&self, user: &UserId, name: &str) -> Result<(), StorageError> {
        let mut map = self.docs.write().await;
        if let Some(docs) = map.get_mut(user) {
            docs.clubs.retain(|c| c.name != name);
        }
        Ok(())
    }

    async fn list_shots(&self, user: &UserId) -> Result<Vec<TrackedShot>, StorageError> {
        let map = self.docs.read().await;
        Ok(map.get(user).map(|d| d.shots.clone()).unwrap_or_default())
    }

    async fn upsert_shot(&self, user: &UserId, shot: &TrackedShot) -> Result<String, StorageError> {
        let id = self.assign_id("shot", &shot.id);
        let mut stored = shot.clone();
        stored.id.clone_from(&id);

        let mut map = self.docs.write().await;
        let docs = map.entry(user.clone()).or_default();
        match docs.shots.iter_mut().find(|s| s.id == id) {
            Some(existing) => *existing = stored,
            None => docs.shots.push(stored),
        }
        Ok(id)
    }

    async fn delete_shot(&self, user: &UserId, id: &str) -> Result<(), StorageError> {
        let mut map = self.docs.write().await;
        if let Some(docs) = map.get_mut(user) {
            docs.shots.retain(|s| s.id != id);
        }
        Ok(())
    }

    async fn list_scorecards(&self, user: &UserId) -> Result<Vec<ScorecardEntry>, StorageError> {
        let map = self.docs.read().await;
        Ok(map.get(user).map(|d| d.scorecards.clone()).unwrap_or_default())
    }

    async fn upsert_scorecard(
        &self,
        user: &UserId,
        card: &ScorecardEntry,
    ) -> Result<String, StorageError> {
        let id = self.assign_id("card", &card.id);
        let mut stored = card.clone();
        stored.id.clone_from(&id);

        let mut map = self.docs.write().await;
        let docs = map.entry(user.clone()).or_default();
        match docs.scorecards.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = stored,
            None => docs.scorecards.push(stored),
        }
        Ok(id)
    }

    async fn delete_scorecard(&self, user: &UserId, id: &str) -> Result<(), StorageError> {
        let mut map = self.docs.write().await;
        if let Some(docs) = map.get_mut(user) {
            docs.scorecards.retain(|c| c.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_users_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
        let store = MemoryStore::new();
        let alice = UserId::parse(Some("alice"))?;
        let bob = UserId::parse(Some("bob"))?;
        store.upsert_club(&alice, &Club::new("7I", 170.0)).await?;
        store.upsert_club(&alice, &Club::new("7I", 172.0)).await?;
        assert_eq!(store.list_clubs(&alice).await?, vec![Club::new("7I", 172.0)]);
        assert!(store.list_clubs(&bob).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_shot_ids_assigned_and_deleted() -> Result<(), Box<dyn std::error::Error>> {
        let store = MemoryStore::new();
        let user = UserId::parse(Some("u1"))?;
        let a = store.upsert_shot(&user, &TrackedShot::new("7I", 160.0)?).await?;
        let b = store.upsert_shot(&user, &TrackedShot::new("PW", 120.0)?).await?;
        assert_ne!(a, b);
        store.delete_shot(&user, &a).await?;
        let left = store.list_shots(&user).await?;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, b);
        Ok(())
    }
}
