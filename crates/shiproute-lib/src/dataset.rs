use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::RouteGraph;
use crate::profiles::{FuelProfileCatalog, PortHaltCatalog};
use crate::routes::load_route_graph;

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "SHIPROUTE_DATA_DIR";
/// Environment variable overriding the routes table.
pub const ROUTES_ENV: &str = "SHIPROUTE_ROUTES";
/// Environment variable overriding the fuel profile table.
pub const FUEL_PROFILES_ENV: &str = "SHIPROUTE_FUEL_PROFILES";
/// Environment variable overriding the port halt table.
pub const PORT_DATA_ENV: &str = "SHIPROUTE_PORT_DATA";

pub const ROUTES_FILENAME: &str = "routes.csv";
pub const FUEL_PROFILES_FILENAME: &str = "ship_fuel_efficiency.csv";
pub const PORT_DATA_FILENAME: &str = "Port_Data.csv";

/// Locations of the dataset tables.
///
/// The routes table is required; the profile tables are optional and
/// `None` when the resolved file does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub routes: PathBuf,
    pub fuel_profiles: Option<PathBuf>,
    pub port_data: Option<PathBuf>,
}

impl DatasetPaths {
    /// Resolve the tables inside `data_dir`, honouring the per-file
    /// environment overrides.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        let routes = file_override(ROUTES_ENV).unwrap_or_else(|| data_dir.join(ROUTES_FILENAME));
        if !routes.is_file() {
            return Err(Error::DatasetNotFound { path: routes });
        }

        let optional = |env_key: &str, filename: &str| {
            let path = file_override(env_key).unwrap_or_else(|| data_dir.join(filename));
            if path.is_file() {
                Some(path)
            } else {
                debug!(path = %path.display(), "optional dataset table not present");
                None
            }
        };

        Ok(Self {
            routes,
            fuel_profiles: optional(FUEL_PROFILES_ENV, FUEL_PROFILES_FILENAME),
            port_data: optional(PORT_DATA_ENV, PORT_DATA_FILENAME),
        })
    }

    pub fn load_graph(&self) -> Result<RouteGraph> {
        load_route_graph(&self.routes)
    }

    /// Fuel profiles, or an empty catalog (every ship type at the default
    /// rate) when the table is absent.
    pub fn load_fuel_profiles(&self) -> Result<FuelProfileCatalog> {
        match &self.fuel_profiles {
            Some(path) => FuelProfileCatalog::from_path(path),
            None => {
                warn!("no fuel profile table found; every ship type uses the default rate");
                Ok(FuelProfileCatalog::default())
            }
        }
    }

    /// Port halt profiles, or an empty catalog (no halt charges) when the
    /// table is absent.
    pub fn load_port_data(&self) -> Result<PortHaltCatalog> {
        match &self.port_data {
            Some(path) => PortHaltCatalog::from_path(path),
            None => {
                warn!("no port data table found; halt costs will be zero");
                Ok(PortHaltCatalog::default())
            }
        }
    }
}

/// Resolve the default dataset directory using platform-specific project
/// directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "shiproute", "shiproute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Locate the dataset tables.
///
/// The directory is resolved in this order:
/// 1. Explicit `data_dir` argument when provided.
/// 2. `SHIPROUTE_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// `SHIPROUTE_ROUTES`, `SHIPROUTE_FUEL_PROFILES` and `SHIPROUTE_PORT_DATA`
/// point individual tables elsewhere.
pub fn resolve_dataset(data_dir: Option<&Path>) -> Result<DatasetPaths> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => default_data_dir()?,
        },
    };

    let paths = DatasetPaths::in_dir(&dir)?;
    info!(
        routes = %paths.routes.display(),
        fuel_profiles = paths.fuel_profiles.is_some(),
        port_data = paths.port_data.is_some(),
        "resolved dataset"
    );
    Ok(paths)
}

fn file_override(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
