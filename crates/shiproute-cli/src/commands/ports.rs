//! Ports command handler for listing the ports of the route graph.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use shiproute_lib::{resolve_dataset, HaltProfileLookup, PortHaltCatalog, RouteGraph};

use crate::output::{print_json, OutputFormat};
use crate::terminal::ColorPalette;

#[derive(Debug, Serialize)]
struct PortEntry<'a> {
    name: &'a str,
    outgoing_routes: usize,
    vessels_in_port: Option<u32>,
}

fn port_entries<'a>(graph: &'a RouteGraph, halts: &PortHaltCatalog) -> Vec<PortEntry<'a>> {
    graph
        .port_names()
        .into_iter()
        .map(|name| PortEntry {
            name,
            outgoing_routes: graph
                .port_id(name)
                .map(|id| graph.neighbours(id).len())
                .unwrap_or(0),
            vessels_in_port: halts.vessels_in_port(name),
        })
        .collect()
}

/// Handle the ports subcommand.
pub fn handle_list_ports(data_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let paths = resolve_dataset(data_dir).context("failed to locate the route dataset")?;
    let graph = paths
        .load_graph()
        .with_context(|| format!("failed to load routes from {}", paths.routes.display()))?;
    let halts = paths.load_port_data().context("failed to load port data")?;
    let entries = port_entries(&graph, &halts);

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            let palette = ColorPalette::detect();
            println!("Ports ({}):", entries.len());
            println!("{:<20} {:>8} {:>16}", "Name", "Routes", "Vessels in Port");
            for entry in &entries {
                let vessels = entry
                    .vessels_in_port
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}{:<20}{} {:>8} {:>16}",
                    palette.white_bold, entry.name, palette.reset, entry.outgoing_routes, vessels
                );
            }
            Ok(())
        }
    }
}
