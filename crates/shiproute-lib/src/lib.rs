//! Shipping route library entry points.
//!
//! This crate exposes helpers to locate the route dataset, load the route
//! graph and cost profiles, query external data providers, and estimate the
//! cost and risk of a voyage between two ports. Higher-level consumers (the
//! CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod constants;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod profiles;
pub mod providers;
pub mod ranking;
pub mod risk;
pub mod routes;
pub mod routing;
mod table;

pub use dataset::{default_data_dir, resolve_dataset, DatasetPaths};
pub use error::{Error, Result};
pub use graph::{build_graph, PortId, RouteGraph};
pub use path::{find_candidate_paths, find_path};
pub use profiles::{FuelProfileCatalog, FuelProfileLookup, HaltProfileLookup, PortHaltCatalog};
pub use providers::{
    Coordinates, CongestionProvider, FuelPriceProvider, Geocoder, ProviderConfig, Providers,
    WeatherProvider, WeatherReport,
};
pub use ranking::{rank_route_options, RouteOption, RouteRanking};
pub use risk::{annotate_risks, RiskAssessment};
pub use routes::{load_route_graph, load_routes, RouteRecord};
pub use routing::{estimate_route, PriceSource, RouteEstimate, RouteRequest};
