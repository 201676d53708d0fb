//! Common test utilities: fixture paths, small graphs and scripted providers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use shiproute_lib::providers::ConstantCongestion;
use shiproute_lib::{
    build_graph, CongestionProvider, Coordinates, Error, FuelPriceProvider, Geocoder, Providers,
    Result, RouteGraph, RouteRecord, WeatherProvider, WeatherReport,
};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn record(source: &str, destination: &str, distance_km: f64) -> RouteRecord {
    RouteRecord {
        source: source.to_string(),
        destination: destination.to_string(),
        distance_km,
    }
}

pub fn graph_from(edges: &[(&str, &str, f64)]) -> RouteGraph {
    let records: Vec<RouteRecord> = edges
        .iter()
        .map(|(source, destination, distance)| record(source, destination, *distance))
        .collect();
    build_graph(&records).expect("valid test graph")
}

pub struct FixedFuelPrice(pub f64);

impl FuelPriceProvider for FixedFuelPrice {
    fn fuel_price(&self) -> Result<f64> {
        Ok(self.0)
    }
}

pub struct FailingFuelPrice;

impl FuelPriceProvider for FailingFuelPrice {
    fn fuel_price(&self) -> Result<f64> {
        Err(Error::provider("fuel price", "connection refused"))
    }
}

/// Coordinate derived from a port name, used by [`GridGeocoder`].
pub fn grid_coordinates(port: &str) -> Coordinates {
    let seed = port.bytes().map(f64::from).sum::<f64>();
    Coordinates {
        latitude: seed % 90.0,
        longitude: seed % 180.0,
    }
}

/// Geocoder that places every port at [`grid_coordinates`] and records how
/// often it was asked. Clones share the call log.
#[derive(Clone, Default)]
pub struct GridGeocoder {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl Geocoder for GridGeocoder {
    fn geocode(&self, port: &str) -> Result<Option<Coordinates>> {
        self.calls.borrow_mut().push(port.to_string());
        Ok(Some(grid_coordinates(port)))
    }
}

/// Forecasts with scripted wind speeds per port; other ports are calm.
#[derive(Default)]
pub struct ScriptedWeather {
    pub wind_by_port: HashMap<String, Vec<f64>>,
}

impl WeatherProvider for ScriptedWeather {
    fn forecast(&self, at: Coordinates) -> Result<WeatherReport> {
        let scripted = self
            .wind_by_port
            .iter()
            .find(|(port, _)| grid_coordinates(port) == at)
            .map(|(_, winds)| winds.clone());
        let wind_speed = scripted.unwrap_or_else(|| vec![5.0, 6.0, 7.0]);
        Ok(WeatherReport::Available {
            temperature: vec![15.0; wind_speed.len()],
            wind_speed,
        })
    }
}

pub struct FailingWeather;

impl WeatherProvider for FailingWeather {
    fn forecast(&self, _at: Coordinates) -> Result<WeatherReport> {
        Err(Error::provider("weather", "timed out"))
    }
}

pub struct CongestionByPort(pub HashMap<String, f64>);

impl CongestionProvider for CongestionByPort {
    fn congestion(&self, port: &str) -> Result<f64> {
        self.0
            .get(port)
            .copied()
            .ok_or_else(|| Error::provider("congestion", format!("no feed for {port}")))
    }
}

/// Providers with a fixed fuel price and no network access.
pub fn fixed_price_providers(price: f64) -> Providers {
    Providers {
        fuel_price: Box::new(FixedFuelPrice(price)),
        ..Providers::offline()
    }
}

pub fn default_congestion() -> Box<dyn CongestionProvider> {
    Box::new(ConstantCongestion::default())
}
