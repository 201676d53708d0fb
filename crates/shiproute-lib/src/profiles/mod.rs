//! Cost profiles used by the cost calculator.
//!
//! - [`fuel`] - per ship-type fuel consumption rates
//! - [`halt`] - per port vessel counts that drive halt charges
//!
//! Both tables are consumed through the [`FuelProfileLookup`] and
//! [`HaltProfileLookup`] traits so callers can plug in other sources.

pub mod fuel;
pub mod halt;

pub use fuel::FuelProfileCatalog;
pub use halt::PortHaltCatalog;

/// Lookup of fuel consumption rates by ship type.
pub trait FuelProfileLookup {
    /// Consumption rate for `ship_type`; matching ignores case and surrounding
    /// whitespace. `None` when the ship type has no profile.
    fn consumption_rate(&self, ship_type: &str) -> Option<f64>;
}

/// Lookup of port congestion counts used for halt charges.
pub trait HaltProfileLookup {
    /// Vessels currently in `port` (trimmed name). `None` when the port has no
    /// profile.
    fn vessels_in_port(&self, port: &str) -> Option<u32>;
}

impl<T: FuelProfileLookup + ?Sized> FuelProfileLookup for &T {
    fn consumption_rate(&self, ship_type: &str) -> Option<f64> {
        (**self).consumption_rate(ship_type)
    }
}

impl<T: HaltProfileLookup + ?Sized> HaltProfileLookup for &T {
    fn vessels_in_port(&self, port: &str) -> Option<u32> {
        (**self).vessels_in_port(port)
    }
}
