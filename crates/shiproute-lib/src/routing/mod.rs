//! Route estimation for shipping voyages.
//!
//! This module provides:
//! - [`RouteRequest`] - Ports and ship type for one estimate
//! - [`RouteEstimate`] - Ranked, costed route options
//! - [`estimate_route`] - Main entry point tying the pipeline together
//!
//! # Degradation
//!
//! Provider failures never abort an estimate. Each one is logged at `warn`
//! and replaced with a default: fuel price 1.5, congestion 500, and an
//! unavailable forecast for weather or geocoding failures.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use shiproute_lib::{estimate_route, load_route_graph, FuelProfileCatalog,
//!     PortHaltCatalog, Providers, RouteRequest};
//!
//! let graph = load_route_graph(Path::new("routes.csv"))?;
//! let request = RouteRequest::new("Rotterdam", "Singapore", "container");
//! let estimate = estimate_route(
//!     &graph,
//!     &request,
//!     &FuelProfileCatalog::default(),
//!     &PortHaltCatalog::default(),
//!     &Providers::offline(),
//! )?;
//! println!("best total cost: {:.2}", estimate.best().total_cost);
//! # Ok::<(), shiproute_lib::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_CONGESTION_LEVEL, DEFAULT_FUEL_PRICE};
use crate::error::{Error, Result};
use crate::graph::{normalize_port_name, PortId, RouteGraph};
use crate::path::find_candidate_paths;
use crate::profiles::{FuelProfileLookup, HaltProfileLookup};
use crate::providers::{Coordinates, PortLocator, Providers, WeatherReport};
use crate::ranking::{build_route_option, rank_route_options, CostInputs, RouteOption, RouteRanking};
use crate::risk::PortConditions;

/// Maximum number of "did you mean" suggestions for an unknown port.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route estimation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub ship_type: String,
}

impl RouteRequest {
    pub fn new(
        start: impl Into<String>,
        goal: impl Into<String>,
        ship_type: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ship_type: ship_type.into(),
        }
    }
}

/// Where the fuel price of an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Live,
    Default,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceSource::Live => "live",
            PriceSource::Default => "default",
        })
    }
}

/// Result of a route estimate.
#[derive(Debug, Clone, Serialize)]
pub struct RouteEstimate {
    pub start: String,
    pub goal: String,
    pub ship_type: String,
    pub fuel_price: f64,
    pub fuel_price_source: PriceSource,
    pub ranking: RouteRanking,
    /// Coordinates of every port that could be geocoded.
    pub coordinates: BTreeMap<String, Coordinates>,
}

impl RouteEstimate {
    /// The cheapest option.
    pub fn best(&self) -> &RouteOption {
        self.ranking.best()
    }
}

/// Estimate cost and risk of travelling from `request.start` to
/// `request.goal`.
///
/// # Errors
///
/// - [`Error::UnknownPort`] when either port is not in `graph`
/// - [`Error::RouteNotFound`] when the goal is unreachable
pub fn estimate_route(
    graph: &RouteGraph,
    request: &RouteRequest,
    fuel_profiles: &dyn FuelProfileLookup,
    halt_profiles: &dyn HaltProfileLookup,
    providers: &Providers,
) -> Result<RouteEstimate> {
    let start_id = resolve_port(graph, &request.start)?;
    let goal_id = resolve_port(graph, &request.goal)?;
    let start = normalize_port_name(&request.start).to_string();
    let goal = normalize_port_name(&request.goal).to_string();

    let (fuel_price, fuel_price_source) = resolve_fuel_price(providers);

    let candidates = find_candidate_paths(graph, start_id, goal_id);
    if candidates.is_empty() {
        return Err(Error::RouteNotFound { start, goal });
    }

    let inputs = CostInputs {
        ship_type: &request.ship_type,
        fuel_price,
        fuel_profiles,
        halt_profiles,
    };
    let mut locator = PortLocator::new(providers.geocoder.as_ref());
    let mut options = Vec::with_capacity(candidates.len());
    for path in &candidates {
        let distance = graph.path_distance(path).ok_or(Error::EmptyRoutePlan)?;
        let route: Vec<String> = graph.path_names(path);
        let conditions: Vec<PortConditions> = route
            .iter()
            .map(|port| observe_port(port, providers, &mut locator))
            .collect();
        options.push(build_route_option(route, distance, &inputs, &conditions));
    }

    let ranking = rank_route_options(options).ok_or(Error::EmptyRoutePlan)?;
    debug!(
        options = ranking.options().len(),
        total_cost = ranking.best().total_cost,
        geocoded = locator.lookups(),
        "route estimate complete"
    );

    Ok(RouteEstimate {
        start,
        goal,
        ship_type: request.ship_type.trim().to_string(),
        fuel_price,
        fuel_price_source,
        ranking,
        coordinates: locator.resolved().into_iter().collect(),
    })
}

/// Resolve a port name to its id, returning an error for unknown ports.
fn resolve_port(graph: &RouteGraph, name: &str) -> Result<PortId> {
    graph.port_id(name).ok_or_else(|| Error::UnknownPort {
        name: normalize_port_name(name).to_string(),
        suggestions: graph.fuzzy_port_matches(name, MAX_SUGGESTIONS),
    })
}

fn resolve_fuel_price(providers: &Providers) -> (f64, PriceSource) {
    match providers.fuel_price.fuel_price() {
        Ok(price) => (price, PriceSource::Live),
        Err(err) => {
            warn!(
                error = %err,
                default_price = DEFAULT_FUEL_PRICE,
                "fuel price unavailable; using default"
            );
            (DEFAULT_FUEL_PRICE, PriceSource::Default)
        }
    }
}

fn observe_port(port: &str, providers: &Providers, locator: &mut PortLocator<'_>) -> PortConditions {
    let congestion = providers.congestion.congestion(port).unwrap_or_else(|err| {
        warn!(
            port = %port,
            error = %err,
            default_level = DEFAULT_CONGESTION_LEVEL,
            "congestion unavailable; using default"
        );
        DEFAULT_CONGESTION_LEVEL
    });

    let weather = match locator.locate(port) {
        Some(at) => providers.weather.forecast(at).unwrap_or_else(|err| {
            warn!(port = %port, error = %err, "weather forecast unavailable");
            WeatherReport::Unavailable
        }),
        None => {
            warn!(port = %port, "no coordinates for port; skipping weather");
            WeatherReport::Unavailable
        }
    };

    PortConditions {
        port: port.to_string(),
        congestion,
        weather,
    }
}
