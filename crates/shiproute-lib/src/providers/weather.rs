use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::constants::FORECAST_SAMPLES;
use crate::error::{Error, Result};

use super::http::{build_client, fetch_body};
use super::{Coordinates, ProviderConfig, WeatherProvider, WeatherReport};

const PROVIDER: &str = "weather";

/// Hourly forecast client for the Open-Meteo API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.weather_timeout)?,
            base_url: config.weather_url.clone(),
        })
    }
}

impl WeatherProvider for OpenMeteoClient {
    fn forecast(&self, at: Coordinates) -> Result<WeatherReport> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("hourly", "temperature_2m,wind_speed_10m".to_string()),
            ],
        )
        .map_err(|err| Error::provider(PROVIDER, err))?;

        let body = fetch_body(self.client.get(url), PROVIDER)?;
        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    temperature_2m: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
}

/// Parse an Open-Meteo forecast body, keeping the first three hourly samples.
///
/// Null samples are dropped. A body without the `hourly` temperature and wind
/// series is reported as [`Error::ProviderUnavailable`].
pub fn parse_forecast(body: &str) -> Result<WeatherReport> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|err| Error::provider(PROVIDER, err))?;

    let leading = |series: Vec<Option<f64>>| -> Vec<f64> {
        series
            .into_iter()
            .take(FORECAST_SAMPLES)
            .flatten()
            .filter(|value| value.is_finite())
            .collect()
    };

    Ok(WeatherReport::Available {
        temperature: leading(response.hourly.temperature_2m),
        wind_speed: leading(response.hourly.wind_speed_10m),
    })
}
