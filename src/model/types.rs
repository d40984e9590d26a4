use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::CoreError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a `lat,lon` pair as typed on the command line.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidInput` if either half is missing, not a
    /// number, or outside the valid coordinate range.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let (lat, lon) = text
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidInput(format!("expected lat,lon but got '{text}'")))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("bad latitude '{lat}'")))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("bad longitude '{lon}'")))?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidInput(format!(
                "coordinates out of range: {latitude},{longitude}"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ElevationSample {
    pub point: GeoPoint,
    pub elevation_meters: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Club {
    #[serde(alias = "club")]
    pub name: String,
    pub distance: f64,
}

impl Club {
    #[must_use]
    pub fn new(name: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackedShot {
    /// Empty until a store assigns one.
    #[serde(default)]
    pub id: String,
    pub club: String,
    pub distance: f64,
    pub timestamp: String,
}

impl TrackedShot {
    /// Build a new, not-yet-persisted shot stamped with the current time.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidInput` for a blank club label or a
    /// distance that is not a positive number.
    pub fn new(club: &str, distance: f64) -> Result<Self, CoreError> {
        let club = club.trim();
        if club.is_empty() {
            return Err(CoreError::InvalidInput("Please enter a club name.".into()));
        }
        if !distance.is_finite() || distance <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "shot distance must be positive, got {distance}"
            )));
        }
        Ok(Self {
            id: String::new(),
            club: club.to_string(),
            distance,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hole {
    pub number: u32,
    pub distance_yards: f64,
    pub par: u32,
    pub handicap_rank: u32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    pub speed_mph: f64,
    pub direction_degrees: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlayerScores {
    pub name: String,
    pub scores: Vec<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScorecardEntry {
    #[serde(default)]
    pub id: String,
    pub course: String,
    pub date: String,
    pub players: Vec<PlayerScores>,
}

/// Identity every store call is scoped to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// # Errors
    /// Returns `CoreError::NotAuthenticated` when no usable identity is present.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self(id.to_string())),
            _ => Err(CoreError::NotAuthenticated),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HoleSpec {
    pub par: u32,
    pub yardage: f64,
    pub handicap: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeeSet {
    pub tee_name: String,
    pub holes: Vec<HoleSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseSummary {
    pub id: i64,
    pub club_name: String,
    pub course_name: String,
    pub city: String,
    pub state: String,
    pub location: Option<GeoPoint>,
    /// Keyed by tee category (`male`, `female`, ...).
    pub tees: BTreeMap<String, Vec<TeeSet>>,
}

impl fmt::Display for CourseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}, {}, {}",
            self.club_name, self.course_name, self.city, self.state
        )
    }
}
