use super::CourseSearch;
use crate::error::CoreError;
use crate::model::{CourseSummary, GeoPoint, HoleSpec, TeeSet};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const GOLF_COURSE_API_URL: &str = "https://api.golfcourseapi.com";

#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default)]
    pub courses: Vec<ApiCourse>,
}

#[derive(Deserialize, Debug)]
pub struct ApiCourse {
    pub id: i64,
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub location: ApiLocation,
    #[serde(default)]
    pub tees: BTreeMap<String, Vec<ApiTee>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ApiLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct ApiTee {
    #[serde(default)]
    pub tee_name: String,
    #[serde(default)]
    pub holes: Vec<ApiHole>,
}

#[derive(Deserialize, Debug)]
pub struct ApiHole {
    #[serde(default)]
    pub par: u32,
    #[serde(default)]
    pub yardage: f64,
    #[serde(default)]
    pub handicap: u32,
}

#[must_use]
pub fn map_course(course: ApiCourse) -> CourseSummary {
    let location = match (course.location.latitude, course.location.longitude) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
        _ => None,
    };
    let tees = course
        .tees
        .into_iter()
        .map(|(category, tees)| {
            let sets = tees
                .into_iter()
                .map(|tee| TeeSet {
                    tee_name: tee.tee_name,
                    holes: tee
                        .holes
                        .into_iter()
                        .map(|h| HoleSpec {
                            par: h.par,
                            yardage: h.yardage,
                            handicap: h.handicap,
                        })
                        .collect(),
                })
                .collect();
            (category, sets)
        })
        .collect();
    CourseSummary {
        id: course.id,
        club_name: course.club_name,
        course_name: course.course_name,
        city: course.location.city,
        state: course.location.state,
        location,
        tees,
    }
}

pub struct GolfCourseApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GolfCourseApiClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(GOLF_COURSE_API_URL, api_key)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CourseSearch for GolfCourseApiClient {
    async fn search(&self, query: &str) -> Result<Vec<CourseSummary>, CoreError> {
        let url = format!("{}/v1/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("search_query", query)])
            .header("Authorization", format!("Key {}", self.api_key))
            .send()
            .await?
            .error_for_status()?;
        let body: SearchResponse = resp.json().await?;
        tracing::debug!(query, count = body.courses.len(), "course search returned");
        Ok(body.courses.into_iter().map(map_course).collect())
    }
}
