//! Ships command handler for listing fuel profiles.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use shiproute_lib::constants::DEFAULT_FUEL_CONSUMPTION;
use shiproute_lib::{resolve_dataset, FuelProfileCatalog};

use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct ShipProfile<'a> {
    ship_type: &'a str,
    fuel_consumption: f64,
}

/// Handle the ships subcommand.
///
/// Lists ship types with a fuel profile in the dataset.
pub fn handle_list_ships(data_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let paths = resolve_dataset(data_dir).context("failed to locate the route dataset")?;
    let catalog = paths
        .load_fuel_profiles()
        .context("failed to load fuel profiles")?;

    match format {
        OutputFormat::Json => {
            let profiles: Vec<ShipProfile<'_>> = catalog
                .profiles_sorted()
                .into_iter()
                .map(|(ship_type, fuel_consumption)| ShipProfile {
                    ship_type,
                    fuel_consumption,
                })
                .collect();
            print_json(&profiles)
        }
        OutputFormat::Text => {
            print_fuel_profiles(&catalog);
            Ok(())
        }
    }
}

/// Print the fuel profiles to stdout in a formatted table.
fn print_fuel_profiles(catalog: &FuelProfileCatalog) {
    let profiles = catalog.profiles_sorted();
    if profiles.is_empty() {
        println!(
            "No fuel profiles available; every ship type uses the default rate of {}.",
            DEFAULT_FUEL_CONSUMPTION
        );
        return;
    }

    println!("Ship types ({}):", profiles.len());
    println!("{:<24} {:>16}", "Ship Type", "Fuel Consumption");
    for (ship_type, rate) in profiles {
        println!("{:<24} {:>16.2}", ship_type, rate);
    }
    if let Some(path) = catalog.source_path() {
        println!("Source: {}", path.display());
    }
}
