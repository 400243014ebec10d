//! Application layer: the pricing resolver, multiplier and zone-fee
//! resolvers, the fare calculator, the version lifecycle manager, and the
//! `FareEngine` facade that wires them together.

pub mod calculator;
pub mod engine;
pub mod lifecycle;
pub mod multipliers;
pub mod resolver;
pub mod zone_fees;
