use super::ElevationLookup;
use crate::error::CoreError;
use crate::model::GeoPoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const OPEN_ELEVATION_URL: &str = "https://api.open-elevation.com";

#[derive(Deserialize, Debug)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Deserialize, Debug)]
struct LookupResult {
    elevation: Option<f64>,
}

fn elevation_from_body(body: &str) -> Result<Option<f64>, CoreError> {
    let parsed: LookupResponse = serde_json::from_str(body)?;
    Ok(parsed
        .results
        .first()
        .and_then(|r| r.elevation)
        .filter(|e| e.is_finite()))
}

pub struct OpenElevationClient {
    client: Client,
    base_url: String,
}

impl Default for OpenElevationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenElevationClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(OPEN_ELEVATION_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ElevationLookup for OpenElevationClient {
    async fn elevation_at(&self, point: GeoPoint) -> Result<Option<f64>, CoreError> {
        let url = format!("{}/api/v1/lookup", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[("locations", format!("{},{}", point.latitude, point.longitude))])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let elevation = elevation_from_body(&body)?;
        if elevation.is_none() {
            tracing::debug!(%point, "no elevation data for point");
        }
        Ok(elevation)
    }
}
