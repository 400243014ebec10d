//! Domain model: money and rate value objects, the geographic override
//! hierarchy, versioned pricing configs, multiplier sources, zone fees, and
//! the ports the application layer depends on.

pub mod config;
pub mod fare;
pub mod geo;
pub mod money;
pub mod multiplier;
pub mod ports;
pub mod version;
pub mod zone_fee;
