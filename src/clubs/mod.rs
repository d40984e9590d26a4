pub mod aggregate;

pub use aggregate::{LearnedDistances, aggregate, club_key};

use crate::error::CoreError;
use crate::model::Club;
use serde::{Deserialize, Serialize};

pub const NO_CLUBS: &str = "No clubs available.";

const DEFAULT_CLUBS: [(&str, f64); 12] = [
    ("Driver", 240.0),
    ("3W", 220.0),
    ("5W", 200.0),
    ("4I", 190.0),
    ("6I", 180.0),
    ("7I", 165.0),
    ("8I", 155.0),
    ("9I", 145.0),
    ("PW", 130.0),
    ("GW", 120.0),
    ("SW", 110.0),
    ("Putter", 5.0),
];

#[must_use]
pub fn default_clubs() -> Vec<Club> {
    DEFAULT_CLUBS
        .iter()
        .map(|(name, distance)| Club::new(*name, *distance))
        .collect()
}

/// A user's ordered club-to-carry mapping.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClubBook {
    clubs: Vec<Club>,
}

impl Default for ClubBook {
    fn default() -> Self {
        Self {
            clubs: default_clubs(),
        }
    }
}

impl ClubBook {
    /// Overlay learned averages on `defaults`, keeping their order. Clubs
    /// without a learned value keep their default carry; an empty or
    /// all-invalid `defaults` falls back to the built-in set.
    #[must_use]
    pub fn build(defaults: &[Club], learned: &LearnedDistances) -> Self {
        let base: Vec<Club> = defaults
            .iter()
            .filter(|c| c.distance.is_finite() && c.distance > 0.0)
            .cloned()
            .collect();
        let base = if base.is_empty() { default_clubs() } else { base };

        let clubs = base
            .into_iter()
            .map(|club| match learned.get(&club_key(&club.name)) {
                Some(avg) if avg.is_finite() && *avg > 0.0 => Club::new(club.name, avg.round()),
                _ => club,
            })
            .collect();
        Self { clubs }
    }

    /// Wrap an already-merged list as-is. Used when reloading a snapshot.
    #[must_use]
    pub fn from_clubs(clubs: Vec<Club>) -> Self {
        Self { clubs }
    }

    #[must_use]
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Club> {
        self.clubs.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    /// Name of the club whose carry is closest to `distance`. On a tie the
    /// club listed first wins.
    #[must_use]
    pub fn suggest(&self, distance: f64) -> &str {
        let mut best: Option<(&Club, f64)> = None;
        for club in self.clubs.iter().filter(|c| c.distance > 0.0) {
            let diff = (club.distance - distance).abs();
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((club, diff)),
            }
        }
        best.map_or(NO_CLUBS, |(club, _)| club.name.as_str())
    }

    /// Replace one club's carry.
    ///
    /// # Errors
    /// `CoreError::InvalidInput` for a non-positive distance and
    /// `CoreError::UnknownClub` when no club has that name. Unknown names are
    /// never inserted.
    pub fn update_distance(&self, name: &str, new_distance: f64) -> Result<Self, CoreError> {
        if !new_distance.is_finite() || new_distance <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "club distance must be positive, got {new_distance}"
            )));
        }
        let idx = self
            .clubs
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| CoreError::UnknownClub(name.to_string()))?;
        let mut clubs = self.clubs.clone();
        clubs[idx].distance = new_distance;
        Ok(Self { clubs })
    }

    /// Overlay clubs the user saved explicitly: matching names take the saved
    /// carry, new names are appended in the order given.
    #[must_use]
    pub fn merge_saved(&self, saved: &[Club]) -> Self {
        let mut clubs = self.clubs.clone();
        for club in saved {
            if !club.distance.is_finite() || club.distance <= 0.0 {
                continue;
            }
            match clubs.iter_mut().find(|c| c.name == club.name) {
                Some(existing) => existing.distance = club.distance,
                None => clubs.push(club.clone()),
            }
        }
        Self { clubs }
    }
}
