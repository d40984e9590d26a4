use super::WeatherLookup;
use crate::error::CoreError;
use crate::model::{GeoPoint, Wind};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org";

#[derive(Deserialize, Debug)]
struct WeatherResponse {
    wind: Option<WindBlock>,
}

#[derive(Deserialize, Debug)]
struct WindBlock {
    speed: f64,
    deg: Option<f64>,
}

fn wind_from_body(body: &str) -> Result<Wind, CoreError> {
    let parsed: WeatherResponse = serde_json::from_str(body)?;
    let wind = parsed
        .wind
        .ok_or_else(|| CoreError::ExternalService("weather response has no wind block".into()))?;
    Ok(Wind {
        speed_mph: wind.speed,
        direction_degrees: wind.deg,
    })
}

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(OPENWEATHER_URL, api_key)
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
impl WeatherLookup for OpenWeatherClient {
    async fn current(&self, point: GeoPoint) -> Result<Wind, CoreError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "imperial".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        wind_from_body(&body)
    }
}

/// Stand-in when no weather API key is configured; every lookup fails and
/// the wind readout stays `--`.
pub struct DisabledWeather;

#[async_trait]
impl WeatherLookup for DisabledWeather {
    async fn current(&self, _point: GeoPoint) -> Result<Wind, CoreError> {
        Err(CoreError::ExternalService("no weather API key configured".into()))
    }
}
