use crate::clubs::{ClubBook, aggregate, default_clubs};
use crate::error::CoreError;
use crate::model::{Club, ScorecardEntry, TrackedShot, UserId};
use crate::scorecard::ScorecardLedger;
use crate::storage::PersistenceStore;
use futures::future::{join, join3};

/// # Errors
/// `CoreError::NotAuthenticated` when no user is signed in.
pub fn require_user(user: Option<&UserId>) -> Result<&UserId, CoreError> {
    user.ok_or(CoreError::NotAuthenticated)
}

/// Build the club book for a session: defaults, overridden by averages of
/// the user's tracked shots, overridden again by clubs the user edited by
/// hand. A signed-out user or any failed fetch gets the default book, so the
/// result is never empty.
pub async fn load_club_book(store: &dyn PersistenceStore, user: Option<&UserId>) -> ClubBook {
    let Some(user) = user else {
        return ClubBook::default();
    };
    match fetch_club_book(store, user).await {
        Ok(book) => book,
        Err(e) => {
            tracing::warn!(%user, error = %e, "could not load clubs, using default clubs");
            ClubBook::default()
        }
    }
}

/// Same layering as [`load_club_book`] without the fallback.
///
/// # Errors
/// The store's error when either the shots or the saved clubs cannot be read.
pub async fn fetch_club_book(
    store: &dyn PersistenceStore,
    user: &UserId,
) -> Result<ClubBook, CoreError> {
    let (shots, saved) = join(store.list_shots(user), store.list_clubs(user)).await;
    let book = ClubBook::build(&default_clubs(), &aggregate(&shots?));
    Ok(book.merge_saved(&saved?))
}

/// Record a shot from the course.
///
/// # Errors
/// `NotAuthenticated`, `InvalidInput` for a blank club or bad distance (no
/// store call is made), or the store's error.
pub async fn track_shot(
    store: &dyn PersistenceStore,
    user: Option<&UserId>,
    club: &str,
    distance_yards: f64,
) -> Result<TrackedShot, CoreError> {
    let user = require_user(user)?;
    let mut shot = TrackedShot::new(club, distance_yards)?;
    shot.id = store.upsert_shot(user, &shot).await?;
    tracing::info!(%user, club = %shot.club, distance = shot.distance, "shot saved");
    Ok(shot)
}

/// Change one club's carry and persist it. The returned book is only produced
/// once the store accepted the change, so a failed save leaves the caller's
/// book as it was.
///
/// # Errors
/// `NotAuthenticated`, `InvalidInput`, `UnknownClub`, or the store's error.
pub async fn update_club_distance(
    store: &dyn PersistenceStore,
    user: Option<&UserId>,
    book: &ClubBook,
    name: &str,
    distance_yards: f64,
) -> Result<ClubBook, CoreError> {
    let user = require_user(user)?;
    let updated = book.update_distance(name, distance_yards)?;
    store
        .upsert_club(user, &Club::new(name, distance_yards))
        .await?;
    Ok(updated)
}

/// # Errors
/// `NotAuthenticated` or the store's error.
pub async fn delete_shot(
    store: &dyn PersistenceStore,
    user: Option<&UserId>,
    shot_id: &str,
) -> Result<(), CoreError> {
    let user = require_user(user)?;
    store.delete_shot(user, shot_id).await?;
    Ok(())
}

/// # Errors
/// `NotAuthenticated`, `InvalidInput` for a blank course name, or the
/// store's error.
pub async fn save_scorecard(
    store: &dyn PersistenceStore,
    user: Option<&UserId>,
    ledger: &ScorecardLedger,
    course: &str,
    date: chrono::NaiveDate,
) -> Result<ScorecardEntry, CoreError> {
    let user = require_user(user)?;
    let mut entry = ledger.to_entry(course, date)?;
    entry.id = store.upsert_scorecard(user, &entry).await?;
    tracing::info!(%user, course = %entry.course, "scorecard saved");
    Ok(entry)
}

/// # Errors
/// `NotAuthenticated` or the store's error.
pub async fn delete_scorecard(
    store: &dyn PersistenceStore,
    user: Option<&UserId>,
    id: &str,
) -> Result<(), CoreError> {
    let user = require_user(user)?;
    store.delete_scorecard(user, id).await?;
    Ok(())
}

/// Everything the profile screen lists.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub clubs: ClubBook,
    pub shots: Vec<TrackedShot>,
    pub scorecards: Vec<ScorecardEntry>,
}

impl Profile {
    /// Reload from the store. Each list is replaced only when its fetch
    /// succeeds; failures are returned and the previous contents kept.
    ///
    /// # Errors
    /// `NotAuthenticated` when no user is signed in.
    pub async fn refresh(
        &mut self,
        store: &dyn PersistenceStore,
        user: Option<&UserId>,
    ) -> Result<Vec<CoreError>, CoreError> {
        let user = require_user(user)?;
        let mut failures = Vec::new();

        let (clubs, shots, cards) = join3(
            fetch_club_book(store, user),
            store.list_shots(user),
            store.list_scorecards(user),
        )
        .await;

        match clubs {
            Ok(clubs) => self.clubs = clubs,
            Err(e) => failures.push(e),
        }
        match shots {
            Ok(shots) => self.shots = shots,
            Err(e) => failures.push(e.into()),
        }
        match cards {
            Ok(cards) => self.scorecards = cards,
            Err(e) => failures.push(e.into()),
        }
        Ok(failures)
    }
}
