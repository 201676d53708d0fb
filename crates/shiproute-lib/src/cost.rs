//! Voyage cost and duration calculations.
//!
//! All functions are deterministic for their inputs. The only side effect is a
//! warning log when a ship type has no fuel profile.

use tracing::warn;

use crate::constants::{AVERAGE_SPEED_KMH, DEFAULT_FUEL_CONSUMPTION, HALT_COST_PER_VESSEL};
use crate::profiles::{FuelProfileLookup, HaltProfileLookup};

/// Round to two decimal places.
///
/// Rounds the exact binary value of `value`, so `225.67499999999998` becomes
/// `225.67`; exact halves such as `6076.125` go to the even cent. Scaling by
/// 100 first would round twice.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Consumption rate for `ship_type`, falling back to
/// [`DEFAULT_FUEL_CONSUMPTION`] with a warning when no profile exists.
pub fn consumption_rate(ship_type: &str, profiles: &impl FuelProfileLookup) -> f64 {
    match profiles.consumption_rate(ship_type) {
        Some(rate) => rate,
        None => {
            warn!(
                ship_type = %ship_type.trim(),
                default_rate = DEFAULT_FUEL_CONSUMPTION,
                "no fuel profile for ship type; using default consumption rate"
            );
            DEFAULT_FUEL_CONSUMPTION
        }
    }
}

/// Fuel cost for a voyage: `rate × distance_km × fuel_price`, rounded to cents.
///
/// # Examples
/// ```
/// use shiproute_lib::cost::fuel_cost;
/// use shiproute_lib::profiles::FuelProfileCatalog;
///
/// let profiles = FuelProfileCatalog::from_entries([("cargo", 10.0)]).unwrap();
/// assert_eq!(fuel_cost("Cargo", 800.0, 2.0, &profiles), 16_000.0);
///
/// // Unknown ship types use the default rate of 150.
/// assert_eq!(fuel_cost("ferry", 10.0, 1.5, &profiles), 2_250.0);
/// ```
pub fn fuel_cost(
    ship_type: &str,
    distance_km: f64,
    fuel_price: f64,
    profiles: &impl FuelProfileLookup,
) -> f64 {
    let rate = consumption_rate(ship_type, profiles);
    round_to_cents(rate * distance_km * fuel_price)
}

/// Halt charge for a single port: vessels in port × 10, or zero without a
/// profile.
pub fn port_halt_cost(port: &str, profiles: &impl HaltProfileLookup) -> f64 {
    profiles
        .vessels_in_port(port)
        .map(|vessels| f64::from(vessels) * HALT_COST_PER_VESSEL)
        .unwrap_or(0.0)
}

/// Halt charges summed over every port of `route`, endpoints included.
pub fn halt_cost<S: AsRef<str>>(route: &[S], profiles: &impl HaltProfileLookup) -> f64 {
    route
        .iter()
        .map(|port| port_halt_cost(port.as_ref(), profiles))
        .sum()
}

/// Estimated voyage duration in hours at [`AVERAGE_SPEED_KMH`], rounded to
/// two decimals.
pub fn voyage_duration(distance_km: f64) -> f64 {
    round_to_cents(distance_km / AVERAGE_SPEED_KMH)
}
