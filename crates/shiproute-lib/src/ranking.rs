//! Route options and their ranking by total cost.

use serde::Serialize;

use crate::cost::{fuel_cost, halt_cost, round_to_cents, voyage_duration};
use crate::profiles::{FuelProfileLookup, HaltProfileLookup};
use crate::providers::WeatherReport;
use crate::risk::{annotate_risks, PortConditions};

/// Pricing inputs shared by every option of one estimate.
#[derive(Clone, Copy)]
pub struct CostInputs<'a> {
    pub ship_type: &'a str,
    pub fuel_price: f64,
    pub fuel_profiles: &'a dyn FuelProfileLookup,
    pub halt_profiles: &'a dyn HaltProfileLookup,
}

/// Forecast recorded for one port of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortWeather {
    pub port: String,
    pub report: WeatherReport,
}

/// A fully costed and annotated candidate route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    pub route: Vec<String>,
    pub distance: f64,
    pub duration: f64,
    pub fuel_cost: f64,
    pub halt_cost: f64,
    pub total_cost: f64,
    pub issues: Vec<String>,
    pub precautions: Vec<String>,
    pub weather: Vec<PortWeather>,
}

/// Cost and annotate one candidate route.
///
/// `conditions` holds one entry per port of `route`, in the same order.
pub fn build_route_option(
    route: Vec<String>,
    distance_km: f64,
    inputs: &CostInputs<'_>,
    conditions: &[PortConditions],
) -> RouteOption {
    let fuel = fuel_cost(
        inputs.ship_type,
        distance_km,
        inputs.fuel_price,
        &inputs.fuel_profiles,
    );
    let halt = halt_cost(&route, &inputs.halt_profiles);
    let risks = annotate_risks(conditions);
    let weather = conditions
        .iter()
        .map(|port| PortWeather {
            port: port.port.clone(),
            report: port.weather.clone(),
        })
        .collect();

    RouteOption {
        route,
        distance: distance_km,
        duration: voyage_duration(distance_km),
        fuel_cost: fuel,
        halt_cost: halt,
        total_cost: round_to_cents(fuel + halt),
        issues: risks.issues,
        precautions: risks.precautions,
        weather,
    }
}

/// All options of an estimate and the cheapest among them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRanking {
    options: Vec<RouteOption>,
    best_index: usize,
}

impl RouteRanking {
    pub fn options(&self) -> &[RouteOption] {
        &self.options
    }

    pub fn best(&self) -> &RouteOption {
        &self.options[self.best_index]
    }

    pub fn best_index(&self) -> usize {
        self.best_index
    }
}

/// Rank options by total cost. The first option wins ties; `None` when there
/// is nothing to rank.
pub fn rank_route_options(options: Vec<RouteOption>) -> Option<RouteRanking> {
    let best_index = options
        .iter()
        .enumerate()
        .reduce(|best, candidate| {
            if candidate.1.total_cost.total_cmp(&best.1.total_cost).is_lt() {
                candidate
            } else {
                best
            }
        })
        .map(|(index, _)| index)?;

    Some(RouteRanking {
        options,
        best_index,
    })
}
