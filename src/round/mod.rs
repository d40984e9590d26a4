pub mod readout;

pub use readout::{Readout, UNAVAILABLE, WindSummary};

use crate::clubs::ClubBook;
use crate::error::CoreError;
use crate::geo;
use crate::model::{ElevationSample, GeoPoint, Hole, Wind};
use std::sync::atomic::{AtomicU64, Ordering};

pub const LAST_HOLE_NOTICE: &str = "You have reached the last hole.";
pub const FIRST_HOLE_NOTICE: &str = "You are on the first hole.";

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Distinguishes one round screen visit from the next, so late async results
/// can be matched against the session that asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationSubject {
    Player,
    Target,
}

/// An elevation lookup the session wants performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRequest {
    pub subject: ElevationSubject,
    pub point: GeoPoint,
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    id: SessionId,
    tee: Option<String>,
    holes: Vec<Hole>,
    current_hole_index: usize,
    location: Option<GeoPoint>,
    target: Option<GeoPoint>,
    player_elevation: Option<ElevationSample>,
    target_elevation: Option<ElevationSample>,
    wind: Option<Wind>,
    clubs: ClubBook,
    elevation_factor: f64,
}

impl RoundSession {
    #[must_use]
    pub fn new(tee: impl Into<String>, holes: Vec<Hole>, clubs: ClubBook, elevation_factor: f64) -> Self {
        Self {
            id: SessionId::next(),
            tee: Some(tee.into()),
            holes,
            current_hole_index: 0,
            location: None,
            target: None,
            player_elevation: None,
            target_elevation: None,
            wind: None,
            clubs,
            elevation_factor,
        }
    }

    /// A session with no course loaded: distance and club readouts only.
    #[must_use]
    pub fn free_roam(clubs: ClubBook, elevation_factor: f64) -> Self {
        let mut session = Self::new(String::new(), Vec::new(), clubs, elevation_factor);
        session.tee = None;
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn tee(&self) -> Option<&str> {
        self.tee.as_deref()
    }

    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    #[must_use]
    pub fn current_hole_index(&self) -> usize {
        self.current_hole_index
    }

    #[must_use]
    pub fn current_hole(&self) -> Option<&Hole> {
        self.holes.get(self.current_hole_index)
    }

    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    #[must_use]
    pub fn target(&self) -> Option<GeoPoint> {
        self.target
    }

    #[must_use]
    pub fn wind(&self) -> Option<Wind> {
        self.wind
    }

    #[must_use]
    pub fn clubs(&self) -> &ClubBook {
        &self.clubs
    }

    pub fn set_clubs(&mut self, clubs: ClubBook) {
        self.clubs = clubs;
    }

    /// # Errors
    /// `CoreError::OutOfRange` on the last hole (or with no holes); the
    /// index is left unchanged.
    pub fn advance_hole(&mut self) -> Result<usize, CoreError> {
        if self.current_hole_index + 1 >= self.holes.len() {
            return Err(CoreError::OutOfRange(LAST_HOLE_NOTICE.into()));
        }
        self.current_hole_index += 1;
        Ok(self.current_hole_index)
    }

    /// # Errors
    /// `CoreError::OutOfRange` on the first hole; the index is left unchanged.
    pub fn retreat_hole(&mut self) -> Result<usize, CoreError> {
        if self.current_hole_index == 0 {
            return Err(CoreError::OutOfRange(FIRST_HOLE_NOTICE.into()));
        }
        self.current_hole_index -= 1;
        Ok(self.current_hole_index)
    }

    /// Record a tapped target. The previous target's elevation no longer
    /// applies and is dropped.
    pub fn set_target(&mut self, point: GeoPoint) -> ElevationRequest {
        self.target = Some(point);
        self.target_elevation = None;
        ElevationRequest {
            subject: ElevationSubject::Target,
            point,
        }
    }

    /// Record a new position fix. The last player elevation is kept until
    /// the lookup for this fix comes back.
    pub fn update_location(&mut self, point: GeoPoint) -> ElevationRequest {
        self.location = Some(point);
        ElevationRequest {
            subject: ElevationSubject::Player,
            point,
        }
    }

    /// Store an elevation result. Returns `false` and ignores the sample when
    /// it belongs to a point the session has since moved away from.
    pub fn apply_elevation(&mut self, subject: ElevationSubject, sample: ElevationSample) -> bool {
        let (current, slot) = match subject {
            ElevationSubject::Player => (self.location, &mut self.player_elevation),
            ElevationSubject::Target => (self.target, &mut self.target_elevation),
        };
        if current != Some(sample.point) {
            return false;
        }
        *slot = Some(sample);
        true
    }

    /// Drop the elevation for `subject` when the lookup for its current
    /// point came back empty. Results for an older point are ignored.
    pub fn clear_elevation(&mut self, subject: ElevationSubject, point: GeoPoint) -> bool {
        let (current, slot) = match subject {
            ElevationSubject::Player => (self.location, &mut self.player_elevation),
            ElevationSubject::Target => (self.target, &mut self.target_elevation),
        };
        if current != Some(point) {
            return false;
        }
        *slot = None;
        true
    }

    pub fn apply_wind(&mut self, wind: Wind) {
        self.wind = Some(wind);
    }

    #[must_use]
    pub fn current_readout(&self) -> Readout {
        let distance_yards = match (self.location, self.target) {
            (Some(here), Some(there)) => Some(geo::distance_yards(here, there)),
            _ => None,
        };
        let elevation_delta_feet = match (self.player_elevation, self.target_elevation) {
            (Some(p), Some(t)) if self.target.is_some() => {
                Some(geo::elevation_delta_feet(p.elevation_meters, t.elevation_meters))
            }
            _ => None,
        };
        let plays_like_yards = match (distance_yards, elevation_delta_feet) {
            (Some(raw), Some(delta)) => Some(geo::plays_like_distance(raw, delta, self.elevation_factor)),
            _ => None,
        };
        let suggested_club = plays_like_yards
            .or(distance_yards)
            .map(|d| self.clubs.suggest(d).to_string());

        Readout {
            distance_yards,
            plays_like_yards,
            suggested_club,
            elevation_delta_feet,
            wind: self.wind.map(WindSummary::from),
        }
    }
}
