#![allow(dead_code)]

use async_trait::async_trait;
use pinhigh::error::CoreError;
use pinhigh::model::{
    Club, CourseSummary, GeoPoint, HoleSpec, ScorecardEntry, TeeSet, TrackedShot, UserId, Wind,
};
use pinhigh::services::{CourseSearch, ElevationLookup, WeatherLookup};
use pinhigh::storage::{PersistenceStore, StorageError};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, Semaphore};

pub fn point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint {
        latitude,
        longitude,
    }
}

pub fn user(name: &str) -> UserId {
    UserId::parse(Some(name)).expect("test user id")
}

/// Known elevations by point; anything else is reported as unavailable.
pub struct StubElevation {
    heights: Vec<(GeoPoint, f64)>,
    pub calls: AtomicUsize,
}

impl StubElevation {
    pub fn new(heights: &[(GeoPoint, f64)]) -> Self {
        Self {
            heights: heights.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ElevationLookup for StubElevation {
    async fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .heights
            .iter()
            .find(|(p, _)| *p == point)
            .map(|(_, h)| *h))
    }
}

/// Elevation lookup that blocks until the test hands out a permit.
/// `entered` is signalled each time a lookup starts waiting.
pub struct GatedElevation {
    pub elevation: f64,
    pub permits: Arc<Semaphore>,
    pub entered: Arc<Notify>,
}

impl GatedElevation {
    pub fn new(elevation: f64, permits: usize) -> Self {
        Self {
            elevation,
            permits: Arc::new(Semaphore::new(permits)),
            entered: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl ElevationLookup for GatedElevation {
    async fn elevation_at(&self, _point: GeoPoint) -> Result<Option<f64>, CoreError> {
        self.entered.notify_one();
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| CoreError::ExternalService(e.to_string()))?;
        permit.forget();
        Ok(Some(self.elevation))
    }
}

pub struct CountingWeather {
    pub wind: Wind,
    pub calls: AtomicUsize,
}

impl CountingWeather {
    pub fn new(speed_mph: f64, direction_degrees: Option<f64>) -> Self {
        Self {
            wind: Wind {
                speed_mph,
                direction_degrees,
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherLookup for CountingWeather {
    async fn current(&self, _point: GeoPoint) -> Result<Wind, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.wind)
    }
}

pub struct FailingWeather;

#[async_trait]
impl WeatherLookup for FailingWeather {
    async fn current(&self, _point: GeoPoint) -> Result<Wind, CoreError> {
        Err(CoreError::ExternalService("weather service unavailable".into()))
    }
}

/// Fails the first lookup, then reports a steady breeze.
#[derive(Default)]
pub struct FlakyWeather {
    pub calls: AtomicUsize,
}

impl FlakyWeather {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherLookup for FlakyWeather {
    async fn current(&self, _point: GeoPoint) -> Result<Wind, CoreError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(CoreError::ExternalService("weather timed out".into()));
        }
        Ok(Wind {
            speed_mph: 6.0,
            direction_degrees: Some(90.0),
        })
    }
}

/// A store whose backend is down. Counts every call it receives.
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::new("database is down"))
    }
}

#[async_trait]
impl PersistenceStore for FailingStore {
    async fn list_clubs(&self, _user: &UserId) -> Result<Vec<Club>, StorageError> {
        self.fail()
    }
    async fn upsert_club(&self, _user: &UserId, _club: &Club) -> Result<String, StorageError> {
        self.fail()
    }
    async fn delete_club(&self, _user: &UserId, _name: &str) -> Result<(), StorageError> {
        self.fail()
    }
    async fn list_shots(&self, _user: &UserId) -> Result<Vec<TrackedShot>, StorageError> {
        self.fail()
    }
    async fn upsert_shot(
        &self,
        _user: &UserId,
        _shot: &TrackedShot,
    ) -> Result<String, StorageError> {
        self.fail()
    }
    async fn delete_shot(&self, _user: &UserId, _id: &str) -> Result<(), StorageError> {
        self.fail()
    }
    async fn list_scorecards(&self, _user: &UserId) -> Result<Vec<ScorecardEntry>, StorageError> {
        self.fail()
    }
    async fn upsert_scorecard(
        &self,
        _user: &UserId,
        _card: &ScorecardEntry,
    ) -> Result<String, StorageError> {
        self.fail()
    }
    async fn delete_scorecard(&self, _user: &UserId, _id: &str) -> Result<(), StorageError> {
        self.fail()
    }
}

pub struct StubCourses {
    pub courses: Vec<CourseSummary>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl CourseSearch for StubCourses {
    async fn search(&self, _query: &str) -> Result<Vec<CourseSummary>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.courses.clone())
    }
}

/// Two-tee course: `male/Blue` with 3 holes, `female/Red` with 2.
pub fn sample_course() -> CourseSummary {
    let hole = |par, yardage, handicap| HoleSpec {
        par,
        yardage,
        handicap,
    };
    let mut tees = BTreeMap::new();
    tees.insert(
        "male".to_string(),
        vec![TeeSet {
            tee_name: "Blue".to_string(),
            holes: vec![hole(4, 380.0, 7), hole(3, 165.0, 17), hole(5, 520.0, 1)],
        }],
    );
    tees.insert(
        "female".to_string(),
        vec![TeeSet {
            tee_name: "Red".to_string(),
            holes: vec![hole(4, 320.0, 7), hole(3, 130.0, 17)],
        }],
    );
    CourseSummary {
        id: 42,
        club_name: "Lakeside Golf Club".to_string(),
        course_name: "North".to_string(),
        city: "Monterey".to_string(),
        state: "CA".to_string(),
        location: Some(point(36.57, -121.95)),
        tees,
    }
}
