//! Route table loading.
//!
//! Routes are read from a CSV file with `Source`, `Destination` and
//! `Distance_km` columns; each row becomes one directed edge.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{build_graph, RouteGraph};
use crate::table::HeaderMap;

const ROUTE_COLUMNS: &[(&str, &[&str])] = &[
    ("source", &["source", "from", "origin", "source_port"]),
    (
        "destination",
        &["destination", "to", "target", "destination_port"],
    ),
    (
        "distance_km",
        &["distance_km", "distance", "distancekm", "km"],
    ),
];

/// One row of the route table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub source: String,
    pub destination: String,
    pub distance_km: f64,
}

/// Load route records from a CSV file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = fs::File::open(path)?;
    let records = load_routes_from_reader(file)?;
    info!(
        path = %path.display(),
        routes = records.len(),
        "loaded route table"
    );
    Ok(records)
}

/// Load route records from any reader (file or in-memory buffer).
pub fn load_routes_from_reader<R: Read>(reader: R) -> Result<Vec<RouteRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = HeaderMap::resolve(&headers, ROUTE_COLUMNS).map_err(|message| {
        Error::InvalidRouteData {
            message: format!("routes table {message}"),
        }
    })?;

    let mut records = Vec::new();
    for (offset, result) in csv_reader.records().enumerate() {
        // Header occupies line 1.
        let row = offset + 2;
        let record = result?;

        let field = |column: &str| {
            columns
                .get(&record, column)
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidRouteData {
                    message: format!("missing {column} at row {row}"),
                })
        };

        let source = field("source")?;
        let destination = field("destination")?;
        let distance_km = field("distance_km")?
            .parse::<f64>()
            .map_err(|err| Error::InvalidRouteData {
                message: format!("invalid distance_km at row {row}: {err}"),
            })?;

        records.push(RouteRecord {
            source,
            destination,
            distance_km,
        });
    }

    Ok(records)
}

/// Load a route table and build its graph in one step.
pub fn load_route_graph(path: &Path) -> Result<RouteGraph> {
    let records = load_routes(path)?;
    build_graph(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_routes_with_surrounding_whitespace() {
        let csv = "Source,Destination,Distance_km\n Shanghai , Singapore ,3800\nSingapore,Colombo,2700.5\n";
        let records = load_routes_from_reader(Cursor::new(csv)).expect("valid routes");

        assert_eq!(
            records,
            vec![
                RouteRecord {
                    source: "Shanghai".to_string(),
                    destination: "Singapore".to_string(),
                    distance_km: 3800.0,
                },
                RouteRecord {
                    source: "Singapore".to_string(),
                    destination: "Colombo".to_string(),
                    distance_km: 2700.5,
                },
            ]
        );
    }

    #[test]
    fn missing_field_reports_row() {
        let csv = "Source,Destination,Distance_km\nA,B,10\nA,,10\n";
        let err = load_routes_from_reader(Cursor::new(csv)).expect_err("blank destination");
        assert_eq!(
            err.to_string(),
            "invalid route data: missing destination at row 3"
        );
    }

    #[test]
    fn unparsable_distance_is_rejected() {
        let csv = "Source,Destination,Distance_km\nA,B,far\n";
        let err = load_routes_from_reader(Cursor::new(csv)).expect_err("bad distance");
        assert!(err.to_string().contains("invalid distance_km at row 2"));
    }

    #[test]
    fn missing_columns_are_named() {
        let csv = "Source,Distance_km\nA,10\n";
        let err = load_routes_from_reader(Cursor::new(csv)).expect_err("no destination column");
        assert!(err.to_string().contains("missing required columns: destination"));
    }
}
