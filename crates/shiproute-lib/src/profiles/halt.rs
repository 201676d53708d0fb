//! Port halt profile loading.
//!
//! The port table carries a `Port Name` and a `Vessels in Port` count; the
//! vessel count drives the halt charge for every port a route touches.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::normalize_port_name;
use crate::table::HeaderMap;

use super::HaltProfileLookup;

const PORT_COLUMNS: &[(&str, &[&str])] = &[
    ("port", &["port name", "port_name", "port"]),
    (
        "vessels",
        &["vessels in port", "vessels_in_port", "vessels", "vessel_count"],
    ),
];

/// Vessel counts keyed by trimmed port name.
#[derive(Debug, Clone, Default)]
pub struct PortHaltCatalog {
    vessels: HashMap<String, u32>,
}

impl PortHaltCatalog {
    /// Load port halt profiles from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load port halt profiles from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|err| Error::ProfileData {
                message: format!("failed to read port data headers: {err}"),
            })?
            .clone();
        let columns =
            HeaderMap::resolve(&headers, PORT_COLUMNS).map_err(|message| Error::ProfileData {
                message: format!("port data {message}"),
            })?;

        let mut catalog = Self::default();
        for (offset, result) in csv_reader.records().enumerate() {
            let row = offset + 2;
            let record = result.map_err(|err| Error::ProfileData {
                message: err.to_string(),
            })?;

            let port = columns
                .get(&record, "port")
                .ok_or_else(|| Error::ProfileData {
                    message: format!("missing port name at row {row}"),
                })?
                .to_string();
            let vessels = columns
                .get(&record, "vessels")
                .ok_or_else(|| Error::ProfileData {
                    message: format!("missing vessel count for '{port}' at row {row}"),
                })?
                .parse::<u32>()
                .map_err(|err| Error::ProfileData {
                    message: format!("invalid vessel count for '{port}' at row {row}: {err}"),
                })?;

            catalog.insert(&port, vessels);
        }

        Ok(catalog)
    }

    /// Build a catalog from `(port, vessels)` pairs.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut catalog = Self::default();
        for (port, vessels) in entries {
            catalog.insert(port, vessels);
        }
        catalog
    }

    /// Add a profile unless the port is already known.
    pub fn insert(&mut self, port: &str, vessels: u32) {
        let key = normalize_port_name(port);
        if self.vessels.contains_key(key) {
            debug!(port = %key, "ignoring repeated port data row");
            return;
        }
        self.vessels.insert(key.to_string(), vessels);
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}

impl HaltProfileLookup for PortHaltCatalog {
    fn vessels_in_port(&self, port: &str) -> Option<u32> {
        self.vessels.get(normalize_port_name(port)).copied()
    }
}
