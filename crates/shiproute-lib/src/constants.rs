//! Constants shared by the cost calculator, risk annotator and providers.

/// Fuel consumption rate used when a ship type has no profile.
pub const DEFAULT_FUEL_CONSUMPTION: f64 = 150.0;

/// Fuel price per liter used when the price provider is unavailable.
pub const DEFAULT_FUEL_PRICE: f64 = 1.5;

/// Average vessel speed (km/h) assumed when estimating voyage duration.
pub const AVERAGE_SPEED_KMH: f64 = 20.0;

/// Halt charge per vessel already waiting in a port.
pub const HALT_COST_PER_VESSEL: f64 = 10.0;

/// Congestion level reported when no live congestion signal exists.
pub const DEFAULT_CONGESTION_LEVEL: f64 = 500.0;

/// Congestion strictly above this level raises a heavy-congestion issue.
pub const HEAVY_CONGESTION_THRESHOLD: f64 = 500.0;

/// Wind speed (km/h) strictly above this level raises a high-wind issue.
pub const HIGH_WIND_THRESHOLD_KMH: f64 = 30.0;

/// Number of hourly forecast samples kept per port.
pub const FORECAST_SAMPLES: usize = 3;
