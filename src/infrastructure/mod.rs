//! In-memory adapters for the domain ports, plus the default currency
//! rounding and geofence-backed geography collaborators.

pub mod currency;
pub mod geography;
pub mod in_memory;
