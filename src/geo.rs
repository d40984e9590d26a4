//! Great-circle distance, compass sectors and elevation-adjusted yardage.

use crate::model::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub const YARDS_PER_METER: f64 = 1.093_61;
pub const FEET_PER_METER: f64 = 3.280_84;
pub const FEET_PER_YARD: f64 = 3.0;

/// Haversine distance between two points, in yards.
#[must_use]
pub fn distance_yards(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c * YARDS_PER_METER
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Compass {
    const SECTORS: [Compass; 8] = [
        Compass::N,
        Compass::NE,
        Compass::E,
        Compass::SE,
        Compass::S,
        Compass::SW,
        Compass::W,
        Compass::NW,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Compass::N => "N",
            Compass::NE => "NE",
            Compass::E => "E",
            Compass::SE => "SE",
            Compass::S => "S",
            Compass::SW => "SW",
            Compass::W => "W",
            Compass::NW => "NW",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a bearing in degrees to one of eight 45° sectors. Sector lower bounds
/// are inclusive, so 337.5 is N and 22.5 is NE. Out-of-range bearings are
/// wrapped into `[0, 360)` first. Returns `None` for NaN or infinite input.
#[must_use]
pub fn cardinal_direction(degrees: f64) -> Option<Compass> {
    if !degrees.is_finite() {
        return None;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // shift by half a sector so N starts at 0
    let shifted = (wrapped + 22.5).rem_euclid(360.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = (shifted / 45.0).floor() as usize;
    Some(Compass::SECTORS[sector.min(7)])
}

/// Vertical change from player to target in feet; positive means uphill.
#[must_use]
pub fn elevation_delta_feet(player_meters: f64, target_meters: f64) -> f64 {
    (target_meters - player_meters) * FEET_PER_METER
}

/// Raw yardage adjusted for elevation: `factor` yards per yard of rise.
#[must_use]
pub fn plays_like_distance(raw_yards: f64, elevation_delta_feet: f64, elevation_factor: f64) -> f64 {
    raw_yards + elevation_factor * (elevation_delta_feet / FEET_PER_YARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let a = pt(36.5686, -121.9505);
        assert!(distance_yards(a, a).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = pt(36.5686, -121.9505);
        let b = pt(36.5701, -121.9489);
        assert!((distance_yards(a, b) - distance_yards(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        // one degree on a 6371 km sphere is ~111.195 km
        let d = distance_yards(pt(0.0, 0.0), pt(1.0, 0.0));
        let expected = 111_194.93 * YARDS_PER_METER;
        assert!((d - expected).abs() < 1.0, "got {d}, expected {expected}");
    }

    #[test]
    fn test_cardinal_boundaries() {
        assert_eq!(cardinal_direction(0.0), Some(Compass::N));
        assert_eq!(cardinal_direction(44.0), Some(Compass::NE));
        assert_eq!(cardinal_direction(359.9), Some(Compass::N));
        assert_eq!(cardinal_direction(337.5), Some(Compass::N));
        assert_eq!(cardinal_direction(337.4), Some(Compass::NW));
        assert_eq!(cardinal_direction(22.5), Some(Compass::NE));
        assert_eq!(cardinal_direction(22.4), Some(Compass::N));
        assert_eq!(cardinal_direction(180.0), Some(Compass::S));
        assert_eq!(cardinal_direction(270.0), Some(Compass::W));
    }

    #[test]
    fn test_cardinal_wraps_out_of_range() {
        assert_eq!(cardinal_direction(360.0), Some(Compass::N));
        assert_eq!(cardinal_direction(450.0), Some(Compass::E));
        assert_eq!(cardinal_direction(-90.0), Some(Compass::W));
        assert_eq!(cardinal_direction(f64::NAN), None);
    }

    #[test]
    fn test_plays_like_is_monotonic() {
        let flat = plays_like_distance(150.0, 0.0, 1.0);
        let uphill = plays_like_distance(150.0, 30.0, 1.0);
        let downhill = plays_like_distance(150.0, -30.0, 1.0);
        assert!((flat - 150.0).abs() < f64::EPSILON);
        assert!((uphill - 160.0).abs() < 1e-9);
        assert!((downhill - 140.0).abs() < 1e-9);
        assert!(plays_like_distance(150.0, 30.0, 0.3) < uphill);
    }

    #[test]
    fn test_elevation_delta_sign() {
        assert!(elevation_delta_feet(10.0, 20.0) > 0.0);
        assert!(elevation_delta_feet(20.0, 10.0) < 0.0);
    }
}
