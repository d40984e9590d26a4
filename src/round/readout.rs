use crate::geo::{Compass, cardinal_direction};
use crate::model::Wind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown for any readout whose inputs are not in yet.
pub const UNAVAILABLE: &str = "--";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WindSummary {
    pub speed_mph: f64,
    pub direction: Option<Compass>,
}

impl From<Wind> for WindSummary {
    fn from(wind: Wind) -> Self {
        Self {
            speed_mph: wind.speed_mph.round(),
            direction: wind.direction_degrees.and_then(cardinal_direction),
        }
    }
}

impl fmt::Display for WindSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(dir) => write!(f, "{} mph {dir}", self.speed_mph),
            None => write!(f, "{} mph {UNAVAILABLE}", self.speed_mph),
        }
    }
}

/// What the live round screen shows. `None` fields render as `--`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Readout {
    pub distance_yards: Option<f64>,
    pub plays_like_yards: Option<f64>,
    pub suggested_club: Option<String>,
    pub elevation_delta_feet: Option<f64>,
    pub wind: Option<WindSummary>,
}

fn yards(v: Option<f64>) -> String {
    v.map_or_else(|| UNAVAILABLE.to_string(), |y| format!("{y:.2} yards"))
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance: {}", yards(self.distance_yards))?;
        writeln!(f, "Plays like: {}", yards(self.plays_like_yards))?;
        writeln!(
            f,
            "Suggested club: {}",
            self.suggested_club.as_deref().unwrap_or(UNAVAILABLE)
        )?;
        match self.elevation_delta_feet {
            Some(ft) => writeln!(f, "Elevation: {ft:+.0} ft")?,
            None => writeln!(f, "Elevation: {UNAVAILABLE}")?,
        }
        match &self.wind {
            Some(w) => write!(f, "Wind: {w}"),
            None => write!(f, "Wind: {UNAVAILABLE}"),
        }
    }
}
