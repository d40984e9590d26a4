use super::{PersistenceStore, StorageError};
use crate::model::{Club, PlayerScores, ScorecardEntry, TrackedShot, UserId};
use async_trait::async_trait;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

const DDL: [&str; 3] = [
    include_str!("../sql/schema/sqlite/00_club.sql"),
    include_str!("../sql/schema/sqlite/01_tracked_shot.sql"),
    include_str!("../sql/schema/sqlite/02_scorecard.sql"),
];

/// SQLite-backed store. rusqlite is blocking, so every call runs on the
/// blocking pool against a single shared connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply the schema.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::init(Connection::open(path)?)
    }

    /// # Errors
    /// Returns an error if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(&DDL.join("\n"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StorageError::new("sqlite connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorageError::new(e.to_string()))?
    }
}

fn parse_row_id(id: &str) -> Result<Option<i64>, StorageError> {
    if id.is_empty() {
        return Ok(None);
    }
    id.parse::<i64>()
        .map(Some)
        .map_err(|_| StorageError::new(format!("'{id}' is not a sqlite row id")))
}

#[async_trait]
impl PersistenceStore for SqliteStore {
    async fn list_clubs(&self, user: &UserId) -> Result<Vec<Club>, StorageError> {
        let user = user.as_str().to_string();
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare("SELECT name, distance FROM club WHERE user_id = ?1 ORDER BY rowid;")?;
            let rows = stmt.query_map(params![user], |row| {
                Ok(Club {
                    name: row.get(0)?,
                    distance: row.get(1)?,
                })
            })?;
            let collected = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(collected)
        })
        .await
    }

    async fn upsert_club(&self, user: &UserId, club: &Club) -> Result<String, StorageError> {
        let user = user.as_str().to_string();
        let club = club.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO club (user_id, name, distance) VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id, name) DO UPDATE SET distance = excluded.distance;",
                params![user, club.name, club.distance],
            )?;
            Ok(club.name)
        })
        .await
    }

    async fn delete_club(&self, user: &UserId, name: &str) -> Result<(), StorageError> {
        let user = user.as_str().to_string();
        let name = name.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM club WHERE user_id = ?1 AND name = ?2;",
                params![user, name],
            )?;
            Ok(())
        })
        .await
    }

    async fn list_shots(&self, user: &UserId) -> Result<Vec<TrackedShot>, StorageError> {
        let user = user.as_str().to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT shot_id, club, distance, shot_ts FROM tracked_shot
                 WHERE user_id = ?1 ORDER BY shot_id;",
            )?;
            let rows = stmt.query_map(params![user], |row| {
                Ok(TrackedShot {
                    id: row.get::<_, i64>(0)?.to_string(),
                    club: row.get(1)?,
                    distance: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?;
            let collected = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(collected)
        })
        .await
    }

    async fn upsert_shot(&self, user: &UserId, shot: &TrackedShot) -> Result<String, StorageError> {
        let user = user.as_str().to_string();
        let shot = shot.clone();
        let row_id = parse_row_id(&shot.id)?;
        self.with_conn(move |conn| {
            if let Some(id) = row_id {
                let updated = conn.execute(
                    "UPDATE tracked_shot SET club = ?3, distance = ?4, shot_ts = ?5
                     WHERE shot_id = ?1 AND user_id = ?2;",
                    params![id, user, shot.club, shot.distance, shot.timestamp],
                )?;
                if updated == 0 {
                    return Err(StorageError::new(format!("no tracked shot {id} for this user")));
                }
                return Ok(id.to_string());
            }
            conn.execute(
                "INSERT INTO tracked_shot (user_id, club, distance, shot_ts) VALUES (?1, ?2, ?3, ?4);",
                params![user, shot.club, shot.distance, shot.timestamp],
            )?;
            Ok(conn.last_insert_rowid().to_string())
        })
        .await
    }

    async fn delete_shot(&self, user: &UserId, id: &str) -> Result<(), StorageError> {
        let user = user.as_str().to_string();
        let Some(row_id) = parse_row_id(id)? else {
            return Ok(());
        };
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM tracked_shot WHERE user_id = ?1 AND shot_id = ?2;",
                params![user, row_id],
            )?;
            Ok(())
        })
        .await
    }

    async fn list_scorecards(&self, user: &UserId) -> Result<Vec<ScorecardEntry>, StorageError> {
        let user = user.as_str().to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT scorecard_id, course, play_date, players_json FROM scorecard
                 WHERE user_id = ?1 ORDER BY scorecard_id;",
            )?;
            let rows = stmt.query_map(params![user], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;
            let mut cards = Vec::new();
            for row in rows {
                let (id, course, date, players_json) = row?;
                let players: Vec<PlayerScores> = serde_json::from_str(&players_json)?;
                cards.push(ScorecardEntry {
                    id: id.to_string(),
                    course,
                    date,
                    players,
                });
            }
            Ok(cards)
        })
        .await
    }

    async fn upsert_scorecard(
        &self,
        user: &UserId,
        card: &ScorecardEntry,
    ) -> Result<String, StorageError> {
        let user = user.as_str().to_string();
        let card = card.clone();
        let row_id = parse_row_id(&card.id)?;
        let players_json = serde_json::to_string(&card.players)?;
        self.with_conn(move |conn| {
            if let Some(id) = row_id {
                let updated = conn.execute(
                    "UPDATE scorecard SET course = ?3, play_date = ?4, players_json = ?5
                     WHERE scorecard_id = ?1 AND user_id = ?2;",
                    params![id, user, card.course, card.date, players_json],
                )?;
                if updated == 0 {
                    return Err(StorageError::new(format!("no scorecard {id} for this user")));
                }
                return Ok(id.to_string());
            }
            conn.execute(
                "INSERT INTO scorecard (user_id, course, play_date, players_json)
                 VALUES (?1, ?2, ?3, ?4);",
                params![user, card.course, card.date, players_json],
            )?;
            Ok(conn.last_insert_rowid().to_string())
        })
        .await
    }

    async fn delete_scorecard(&self, user: &UserId, id: &str) -> Result<(), StorageError> {
        let user = user.as_str().to_string();
        let Some(row_id) = parse_row_id(id)? else {
            return Ok(());
        };
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM scorecard WHERE user_id = ?1 AND scorecard_id = ?2;",
                params![user, row_id],
            )?;
            Ok(())
        })
        .await
    }
}
