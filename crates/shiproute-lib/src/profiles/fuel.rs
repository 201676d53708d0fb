//! Fuel profile catalog loading.
//!
//! Profiles come from a CSV file with at least `ship_type` and
//! `fuel_consumption` columns. Extra columns are ignored, and when a ship type
//! appears on several rows the first row is used.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::HeaderMap;

use super::FuelProfileLookup;

const FUEL_COLUMNS: &[(&str, &[&str])] = &[
    ("ship_type", &["ship_type", "shiptype", "vessel_type", "type"]),
    (
        "fuel_consumption",
        &["fuel_consumption", "consumption", "fuel_rate", "consumption_rate"],
    ),
];

/// Fuel consumption rates keyed by normalized ship type.
#[derive(Debug, Clone, Default)]
pub struct FuelProfileCatalog {
    rates: HashMap<String, f64>,
    display_names: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl FuelProfileCatalog {
    /// Load a fuel profile catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a fuel profile catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|err| Error::ProfileData {
                message: format!("failed to read fuel profile headers: {err}"),
            })?
            .clone();
        let columns =
            HeaderMap::resolve(&headers, FUEL_COLUMNS).map_err(|message| Error::ProfileData {
                message: format!("fuel profiles {message}"),
            })?;

        let mut catalog = Self::default();
        for (offset, result) in csv_reader.records().enumerate() {
            let row = offset + 2;
            let record = result.map_err(|err| Error::ProfileData {
                message: err.to_string(),
            })?;

            let ship_type = columns
                .get(&record, "ship_type")
                .ok_or_else(|| Error::ProfileData {
                    message: format!("missing ship_type at row {row}"),
                })?
                .to_string();
            let rate = columns
                .get(&record, "fuel_consumption")
                .ok_or_else(|| Error::ProfileData {
                    message: format!("missing fuel_consumption for '{ship_type}' at row {row}"),
                })?
                .parse::<f64>()
                .map_err(|err| Error::ProfileData {
                    message: format!(
                        "invalid fuel_consumption for '{ship_type}' at row {row}: {err}"
                    ),
                })?;

            catalog.insert(&ship_type, rate)?;
        }

        Ok(catalog)
    }

    /// Build a catalog from `(ship_type, rate)` pairs.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut catalog = Self::default();
        for (ship_type, rate) in entries {
            catalog.insert(ship_type, rate)?;
        }
        Ok(catalog)
    }

    /// Add a profile unless the ship type is already known.
    ///
    /// Rates must be finite and non-negative.
    pub fn insert(&mut self, ship_type: &str, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::ProfileData {
                message: format!(
                    "fuel_consumption for '{}' must be finite and non-negative, got {}",
                    ship_type.trim(),
                    rate
                ),
            });
        }

        let key = normalize_ship_type(ship_type);
        if key.is_empty() {
            return Err(Error::ProfileData {
                message: "ship_type must not be empty".to_string(),
            });
        }
        if self.rates.contains_key(&key) {
            debug!(ship_type = %key, "ignoring repeated fuel profile row");
            return Ok(());
        }
        self.display_names
            .insert(key.clone(), ship_type.trim().to_string());
        self.rates.insert(key, rate);
        Ok(())
    }

    /// Ship types with their rates, sorted by display name.
    pub fn profiles_sorted(&self) -> Vec<(&str, f64)> {
        let mut profiles: Vec<(&str, f64)> = self
            .rates
            .iter()
            .map(|(key, rate)| {
                let name = self
                    .display_names
                    .get(key)
                    .map(String::as_str)
                    .unwrap_or(key.as_str());
                (name, *rate)
            })
            .collect();
        profiles.sort_by(|a, b| a.0.cmp(b.0));
        profiles
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl FuelProfileLookup for FuelProfileCatalog {
    fn consumption_rate(&self, ship_type: &str) -> Option<f64> {
        self.rates.get(&normalize_ship_type(ship_type)).copied()
    }
}

/// Normalize a ship type for case-insensitive lookup.
fn normalize_ship_type(ship_type: &str) -> String {
    ship_type.trim().to_lowercase()
}
