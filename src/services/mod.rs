//! Collaborator interfaces the round core calls out to, and HTTP adapters
//! for the public APIs behind them.
//!
//! Failure policy, applied by callers rather than by each adapter:
//! - course search: surface the error, keep the previous result list
//! - weather: keep the last known wind, or show `--`
//! - elevation: `Ok(None)` or an error both leave the plays-like readout unset
//! - persistence: club loading falls back to the default club book

pub mod course_api;
pub mod elevation;
pub mod location;
pub mod weather;

pub use course_api::GolfCourseApiClient;
pub use elevation::OpenElevationClient;
pub use location::{ChannelLocationSource, LocationHint, LocationSubscription};
pub use weather::{DisabledWeather, OpenWeatherClient};

use crate::error::CoreError;
use crate::model::{CourseSummary, GeoPoint, Wind};
use async_trait::async_trait;

#[async_trait]
pub trait CourseSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<CourseSummary>, CoreError>;
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current(&self, point: GeoPoint) -> Result<Wind, CoreError>;
}

#[async_trait]
pub trait ElevationLookup: Send + Sync {
    /// Elevation in meters, or `None` when the provider has no data there.
    async fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, CoreError>;
}

/// Push-based position source.
pub trait LocationStream: Send + Sync {
    /// # Errors
    /// Returns an error if the provider cannot start delivering fixes
    /// (permissions denied, no receiver available).
    fn subscribe(&self, hint: LocationHint) -> Result<LocationSubscription, CoreError>;
}
