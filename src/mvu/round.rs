use crate::clubs::ClubBook;
use crate::error::CoreError;
use crate::geo;
use crate::model::{ElevationSample, GeoPoint, Wind};
use crate::round::{ElevationRequest, ElevationSubject, RoundSession, SessionId};
use crate::services::{ElevationLookup, WeatherLookup};

/// Default distance the player must move before wind is fetched again.
pub const WEATHER_REFRESH_YARDS: f64 = 500.0;

#[derive(Debug, Clone)]
pub struct RoundModel {
    pub session: RoundSession,
    pub notices: Vec<String>,
    pub last_error: Option<CoreError>,
    weather_point: Option<GeoPoint>,
    weather_refresh_yards: f64,
}

impl RoundModel {
    #[must_use]
    pub fn new(session: RoundSession) -> Self {
        Self::with_weather_refresh(session, WEATHER_REFRESH_YARDS)
    }

    #[must_use]
    pub fn with_weather_refresh(session: RoundSession, weather_refresh_yards: f64) -> Self {
        Self {
            session,
            notices: Vec::new(),
            last_error: None,
            weather_point: None,
            weather_refresh_yards,
        }
    }

    /// Hand pending notices to the UI, clearing them.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn wants_weather(&self, point: GeoPoint) -> bool {
        match self.weather_point {
            None => true,
            Some(last) => geo::distance_yards(last, point) > self.weather_refresh_yards,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    LocationUpdated(GeoPoint),
    TargetSelected(GeoPoint),
    NextHole,
    PrevHole,
    ElevationLoaded {
        session: SessionId,
        subject: ElevationSubject,
        point: GeoPoint,
        elevation_meters: Option<f64>,
    },
    WindLoaded {
        session: SessionId,
        point: GeoPoint,
        wind: Wind,
    },
    ClubsLoaded {
        session: SessionId,
        clubs: ClubBook,
    },
    Failed {
        session: SessionId,
        error: CoreError,
    },
}

impl Msg {
    fn session(&self) -> Option<SessionId> {
        match self {
            Msg::ElevationLoaded { session, .. }
            | Msg::WindLoaded { session, .. }
            | Msg::ClubsLoaded { session, .. }
            | Msg::Failed { session, .. } => Some(*session),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchElevation(ElevationRequest),
    FetchWeather(GeoPoint),
}

pub fn update(model: &mut RoundModel, msg: Msg) -> Vec<Effect> {
    if let Some(session) = msg.session() {
        if session != model.session.id() {
            tracing::debug!(?session, "dropping result for a session that is gone");
            return vec![];
        }
    }

    match msg {
        Msg::LocationUpdated(point) => {
            let mut effects = vec![Effect::FetchElevation(model.session.update_location(point))];
            // the fetch point is only recorded once wind arrives, so a failed
            // lookup is retried on the next fix
            if model.wants_weather(point) {
                effects.push(Effect::FetchWeather(point));
            }
            effects
        }
        Msg::TargetSelected(point) => {
            vec![Effect::FetchElevation(model.session.set_target(point))]
        }
        Msg::NextHole => {
            if let Err(e) = model.session.advance_hole() {
                model.notices.push(e.to_string());
            }
            vec![]
        }
        Msg::PrevHole => {
            if let Err(e) = model.session.retreat_hole() {
                model.notices.push(e.to_string());
            }
            vec![]
        }
        Msg::ElevationLoaded {
            subject,
            point,
            elevation_meters,
            ..
        } => {
            let applied = match elevation_meters {
                Some(elevation_meters) => model.session.apply_elevation(
                    subject,
                    ElevationSample {
                        point,
                        elevation_meters,
                    },
                ),
                None => model.session.clear_elevation(subject, point),
            };
            if !applied {
                tracing::debug!(?subject, %point, "elevation arrived for a stale point");
            }
            vec![]
        }
        Msg::WindLoaded { point, wind, .. } => {
            model.weather_point = Some(point);
            model.session.apply_wind(wind);
            vec![]
        }
        Msg::ClubsLoaded { clubs, .. } => {
            model.session.set_clubs(clubs);
            vec![]
        }
        Msg::Failed { error, .. } => {
            tracing::warn!(%error, "round lookup failed");
            model.notices.push(error.to_string());
            model.last_error = Some(error);
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub elevation: &'a dyn ElevationLookup,
    pub weather: &'a dyn WeatherLookup,
}

pub async fn run_effect(effect: Effect, session: SessionId, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::FetchElevation(req) => match deps.elevation.elevation_at(req.point).await {
            Ok(elevation_meters) => Msg::ElevationLoaded {
                session,
                subject: req.subject,
                point: req.point,
                elevation_meters,
            },
            Err(error) => Msg::Failed { session, error },
        },
        Effect::FetchWeather(point) => match deps.weather.current(point).await {
            Ok(wind) => Msg::WindLoaded {
                session,
                point,
                wind,
            },
            Err(error) => Msg::Failed { session, error },
        },
    }
}
