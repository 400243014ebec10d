use super::config::{CancellationSchedule, defaults};
use super::money::{Money, Rate};
use serde::{Deserialize, Serialize};

/// Fully populated pricing parameters for one location/ride-type/version,
/// produced by the pricing resolver. No field is optional anymore; anything
/// the hierarchy left unset was filled from the documented defaults.
///
/// Carries provenance so a fare can be traced back to the exact version and
/// config rows that shaped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPricing {
    pub version_id: u64,
    pub contributing_config_ids: Vec<u64>,
    pub base_fare: Money,
    pub per_km_rate: Money,
    pub per_minute_rate: Money,
    pub minimum_fare: Money,
    pub booking_fee: Money,
    pub platform_commission_pct: Rate,
    pub driver_incentive_pct: Rate,
    pub surge_min_multiplier: Rate,
    pub surge_max_multiplier: Rate,
    pub tax_rate: Rate,
    pub tax_inclusive: bool,
    pub cancellation: CancellationSchedule,
}

impl ResolvedPricing {
    /// The documented global defaults, with no contributing config rows.
    pub fn defaults(version_id: u64) -> Self {
        Self {
            version_id,
            contributing_config_ids: Vec::new(),
            base_fare: defaults::base_fare(),
            per_km_rate: defaults::per_km_rate(),
            per_minute_rate: defaults::per_minute_rate(),
            minimum_fare: defaults::minimum_fare(),
            booking_fee: defaults::booking_fee(),
            platform_commission_pct: defaults::platform_commission_pct(),
            driver_incentive_pct: defaults::driver_incentive_pct(),
            surge_min_multiplier: defaults::surge_min_multiplier(),
            surge_max_multiplier: defaults::surge_max_multiplier(),
            tax_rate: defaults::tax_rate(),
            tax_inclusive: defaults::tax_inclusive(),
            cancellation: defaults::cancellation(),
        }
    }
}

/// One itemized charge on a fare. Zone fee lines carry the zone id; the
/// base/distance/time/booking lines do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareLine {
    pub label: String,
    #[serde(default)]
    pub zone_id: Option<u32>,
    pub amount: Money,
}

impl FareLine {
    pub fn charge(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            zone_id: None,
            amount,
        }
    }

    pub fn zone_fee(zone_id: u32, zone_name: &str, fee_type: &str, amount: Money) -> Self {
        Self {
            label: format!("{zone_name} {fee_type}"),
            zone_id: Some(zone_id),
            amount,
        }
    }
}

/// The four multiplier sources and their product, kept on the fare for audit.
/// `surge_raw` is the band value before clamping into the resolved bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierStack {
    pub time: Rate,
    pub weather: Rate,
    pub event: Rate,
    pub surge_raw: Rate,
    pub surge: Rate,
    pub total: Rate,
}

impl MultiplierStack {
    pub const NEUTRAL: Self = Self {
        time: Rate::ONE,
        weather: Rate::ONE,
        event: Rate::ONE,
        surge_raw: Rate::ONE,
        surge: Rate::ONE,
        total: Rate::ONE,
    };
}

/// The computed, immutable output of one fare calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareCalculation {
    pub version_id: u64,
    pub lines: Vec<FareLine>,
    pub multipliers: MultiplierStack,
    pub pre_multiplier_subtotal: Money,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
    pub platform_commission: Money,
    pub driver_earnings: Money,
}
