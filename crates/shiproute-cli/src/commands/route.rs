//! Route command handler for estimating a voyage between two ports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use shiproute_lib::output::write_route_map;
use shiproute_lib::{
    estimate_route, resolve_dataset, Error as RouteError, ProviderConfig, Providers,
    RouteRequest,
};

use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure port.
    pub from: String,
    /// Destination port.
    pub to: String,
    /// Ship type used for the fuel profile lookup.
    pub ship_type: String,
    /// Skip every network provider.
    pub offline: bool,
    /// Write the best route as GeoJSON to this path.
    pub map: Option<PathBuf>,
}

impl RouteCommandArgs {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(&self.from, &self.to, &self.ship_type)
    }
}

/// Handle the route subcommand.
///
/// Loads the dataset, wires the providers and prints the estimate.
pub fn handle_route_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let paths = resolve_dataset(data_dir).context("failed to locate the route dataset")?;
    let graph = paths
        .load_graph()
        .with_context(|| format!("failed to load routes from {}", paths.routes.display()))?;
    let fuel_profiles = paths
        .load_fuel_profiles()
        .context("failed to load fuel profiles")?;
    let halt_profiles = paths.load_port_data().context("failed to load port data")?;

    let mut config = ProviderConfig::from_env();
    config.offline |= args.offline;
    let providers =
        Providers::from_config(&config).context("failed to initialise data providers")?;

    let request = args.to_request();
    let estimate = estimate_route(
        &graph,
        &request,
        &fuel_profiles,
        &halt_profiles,
        &providers,
    )
    .map_err(handle_route_failure)?;

    format.render_estimate(&estimate)?;

    if let Some(path) = &args.map {
        let located = write_route_map(&estimate, path)
            .with_context(|| format!("failed to write route map to {}", path.display()))?;
        if format.is_text() {
            println!(
                "Route map written to {} ({} of {} ports located)",
                path.display(),
                located,
                estimate.best().route.len()
            );
        }
    }

    Ok(())
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownPort { name, suggestions } => {
            anyhow::anyhow!(format_unknown_port_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_port_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown port '{}'.", name);
    match suggestions {
        [] => message.push_str(" Run the `ports` command to list known ports."),
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {start} and {goal}. Routes are directed; \
         check that the routes table has a path leaving {start} that reaches {goal}."
    )
}
