use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::normalize_port_name;

use super::http::{build_client, fetch_body};
use super::{Coordinates, Geocoder, ProviderConfig};

const PROVIDER: &str = "geocoding";

/// Geocoder backed by the OpenStreetMap Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    interval: Duration,
}

impl NominatimClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.geocode_timeout)?,
            base_url: config.geocode_url.clone(),
            interval: config.geocode_interval,
        })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, port: &str) -> Result<Option<Coordinates>> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[("q", port), ("format", "json"), ("limit", "1")],
        )
        .map_err(|err| Error::provider(PROVIDER, err))?;

        let body = fetch_body(self.client.get(url), PROVIDER);
        // Usage policy allows one request per second, failed ones included.
        thread::sleep(self.interval);
        parse_geocode(&body?)
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Parse a Nominatim search response, using the first match.
///
/// An empty result list is `Ok(None)`; unparsable coordinates are
/// [`Error::ProviderUnavailable`].
pub fn parse_geocode(body: &str) -> Result<Option<Coordinates>> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|err| Error::provider(PROVIDER, err))?;
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let parse = |value: &str, field: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::provider(PROVIDER, format!("invalid {field} '{value}'")))
    };

    Ok(Some(Coordinates {
        latitude: parse(&place.lat, "latitude")?,
        longitude: parse(&place.lon, "longitude")?,
    }))
}

/// Memoizing front for a [`Geocoder`].
///
/// Each normalized port name is looked up at most once per locator; failures
/// are logged, cached and reported as "no coordinates".
pub struct PortLocator<'a> {
    geocoder: &'a dyn Geocoder,
    cache: HashMap<String, Option<Coordinates>>,
}

impl<'a> PortLocator<'a> {
    pub fn new(geocoder: &'a dyn Geocoder) -> Self {
        Self {
            geocoder,
            cache: HashMap::new(),
        }
    }

    /// Coordinates for `port`, if the geocoder knows it.
    pub fn locate(&mut self, port: &str) -> Option<Coordinates> {
        let key = normalize_port_name(port);
        if let Some(cached) = self.cache.get(key) {
            return *cached;
        }

        let resolved = match self.geocoder.geocode(key) {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                debug!(port = %key, "geocoder has no match for port");
                None
            }
            Err(err) => {
                warn!(port = %key, error = %err, "could not geocode port");
                None
            }
        };
        self.cache.insert(key.to_string(), resolved);
        resolved
    }

    /// Ports resolved so far with their coordinates, sorted by name.
    pub fn resolved(&self) -> Vec<(String, Coordinates)> {
        let mut resolved: Vec<(String, Coordinates)> = self
            .cache
            .iter()
            .filter_map(|(port, coordinates)| coordinates.map(|c| (port.clone(), c)))
            .collect();
        resolved.sort_by(|a, b| a.0.cmp(&b.0));
        resolved
    }

    /// Number of distinct ports looked up.
    pub fn lookups(&self) -> usize {
        self.cache.len()
    }
}
