//! External data providers consumed by the route estimator.
//!
//! Every provider is a trait so the estimator can run against live HTTP
//! services, fixed values in tests, or nothing at all (offline mode):
//!
//! - [`FuelPriceProvider`] - current fuel price per liter
//! - [`Geocoder`] - port name to coordinates
//! - [`WeatherProvider`] - short hourly forecast at a coordinate
//! - [`CongestionProvider`] - congestion level for a port
//!
//! Providers report failures as [`Error::ProviderUnavailable`](crate::Error)
//! and genuine absence of data as `Ok(None)` / [`WeatherReport::Unavailable`];
//! deciding what to do with a failure is left to the caller.

mod congestion;
mod fuel_price;
mod geocode;
mod http;
mod weather;

pub use congestion::ConstantCongestion;
pub use fuel_price::{parse_fuel_price, OilPriceClient};
pub use geocode::{parse_geocode, NominatimClient, PortLocator};
pub use weather::{parse_forecast, OpenMeteoClient};

use std::env;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

/// Environment variable holding the fuel price API token.
pub const FUEL_PRICE_TOKEN_ENV: &str = "SHIPROUTE_OILPRICE_TOKEN";
/// Environment variable that disables every HTTP provider when truthy.
pub const OFFLINE_ENV: &str = "SHIPROUTE_OFFLINE";

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const OIL_PRICE_URL: &str = "https://api.oilpriceapi.com/v1/prices/latest";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Geographic position of a port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Short weather forecast for one port.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherReport {
    /// Hourly samples in °C and km/h, earliest first.
    Available {
        temperature: Vec<f64>,
        wind_speed: Vec<f64>,
    },
    /// No forecast could be obtained for the port.
    Unavailable,
}

impl WeatherReport {
    /// Highest wind speed in the forecast, if there is at least one sample.
    pub fn max_wind_speed(&self) -> Option<f64> {
        match self {
            WeatherReport::Available { wind_speed, .. } => {
                wind_speed.iter().copied().reduce(f64::max)
            }
            WeatherReport::Unavailable => None,
        }
    }
}

/// Source of the current fuel price per liter.
pub trait FuelPriceProvider {
    fn fuel_price(&self) -> Result<f64>;
}

/// Resolves a port name to coordinates. `Ok(None)` means the name is unknown
/// to the geocoder.
pub trait Geocoder {
    fn geocode(&self, port: &str) -> Result<Option<Coordinates>>;
}

/// Source of short-term weather forecasts.
pub trait WeatherProvider {
    fn forecast(&self, at: Coordinates) -> Result<WeatherReport>;
}

/// Source of port congestion levels.
pub trait CongestionProvider {
    fn congestion(&self, port: &str) -> Result<f64>;
}

/// Provider used when network lookups are disabled; every lookup fails with
/// [`Error::ProviderUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

fn offline(provider: &'static str) -> Error {
    Error::provider(provider, "offline mode")
}

impl FuelPriceProvider for Offline {
    fn fuel_price(&self) -> Result<f64> {
        Err(offline("fuel price"))
    }
}

impl Geocoder for Offline {
    fn geocode(&self, _port: &str) -> Result<Option<Coordinates>> {
        Err(offline("geocoding"))
    }
}

impl WeatherProvider for Offline {
    fn forecast(&self, _at: Coordinates) -> Result<WeatherReport> {
        Err(offline("weather"))
    }
}

/// Settings for the HTTP providers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub weather_url: String,
    pub fuel_price_url: String,
    pub geocode_url: String,
    /// Bearer token for the fuel price API; the lookup fails without one.
    pub fuel_price_token: Option<String>,
    pub weather_timeout: Duration,
    pub fuel_price_timeout: Duration,
    pub geocode_timeout: Duration,
    /// Pause after every geocoding request (Nominatim allows one per second).
    pub geocode_interval: Duration,
    /// Skip every HTTP provider.
    pub offline: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            weather_url: OPEN_METEO_URL.to_string(),
            fuel_price_url: OIL_PRICE_URL.to_string(),
            geocode_url: NOMINATIM_URL.to_string(),
            fuel_price_token: None,
            weather_timeout: Duration::from_secs(5),
            fuel_price_timeout: Duration::from_secs(5),
            geocode_timeout: Duration::from_secs(10),
            geocode_interval: Duration::from_secs(1),
            offline: false,
        }
    }
}

impl ProviderConfig {
    /// Defaults overridden by `SHIPROUTE_OILPRICE_TOKEN` and `SHIPROUTE_OFFLINE`.
    pub fn from_env() -> Self {
        let fuel_price_token = env::var(FUEL_PRICE_TOKEN_ENV)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        let offline = env::var(OFFLINE_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        Self {
            fuel_price_token,
            offline,
            ..Self::default()
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// The full set of providers used by one estimate.
pub struct Providers {
    pub fuel_price: Box<dyn FuelPriceProvider>,
    pub geocoder: Box<dyn Geocoder>,
    pub weather: Box<dyn WeatherProvider>,
    pub congestion: Box<dyn CongestionProvider>,
}

impl Providers {
    /// HTTP-backed providers, or [`Providers::offline`] when `config.offline`.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        if config.offline {
            return Ok(Self::offline());
        }
        Ok(Self {
            fuel_price: Box::new(OilPriceClient::new(config)?),
            geocoder: Box::new(NominatimClient::new(config)?),
            weather: Box::new(OpenMeteoClient::new(config)?),
            congestion: Box::new(ConstantCongestion::default()),
        })
    }

    /// Providers that never touch the network. Congestion still reports the
    /// constant default level.
    pub fn offline() -> Self {
        Self {
            fuel_price: Box::new(Offline),
            geocoder: Box::new(Offline),
            weather: Box::new(Offline),
            congestion: Box::new(ConstantCongestion::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_wind_speed_ignores_unavailable_reports() {
        let report = WeatherReport::Available {
            temperature: vec![12.0, 13.0, 14.0],
            wind_speed: vec![12.5, 31.2, 8.0],
        };
        assert_eq!(report.max_wind_speed(), Some(31.2));
        assert_eq!(WeatherReport::Unavailable.max_wind_speed(), None);

        let empty = WeatherReport::Available {
            temperature: Vec::new(),
            wind_speed: Vec::new(),
        };
        assert_eq!(empty.max_wind_speed(), None);
    }

    #[test]
    fn offline_providers_fail_without_panicking() {
        let providers = Providers::offline();
        assert!(providers.fuel_price.fuel_price().is_err());
        assert!(providers.geocoder.geocode("Rotterdam").is_err());
        let at = Coordinates {
            latitude: 51.9,
            longitude: 4.4,
        };
        assert!(matches!(
            providers.weather.forecast(at),
            Err(Error::ProviderUnavailable { .. })
        ));
        assert_eq!(providers.congestion.congestion("Rotterdam").unwrap(), 500.0);
    }

    #[test]
    fn offline_config_skips_http_clients() {
        let config = ProviderConfig {
            offline: true,
            ..ProviderConfig::default()
        };
        let providers = Providers::from_config(&config).expect("offline providers");
        assert!(providers.fuel_price.fuel_price().is_err());
    }

    #[test]
    fn truthy_values() {
        for value in ["1", "true", " TRUE ", "yes", "on"] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["0", "false", "", "no"] {
            assert!(!is_truthy(value), "{value}");
        }
    }
}
