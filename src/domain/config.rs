use super::geo::GeoScope;
use super::money::{Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideType {
    Economy,
    Comfort,
    Premium,
    Xl,
}

/// One cancellation tier: applies once `after_minutes` have elapsed since the
/// ride request. `amount` is a fixed charge, or a percentage of the estimated
/// fare when `is_percentage` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationTier {
    pub after_minutes: i64,
    pub amount: Decimal,
    #[serde(default)]
    pub is_percentage: bool,
}

/// Ordered cancellation tiers. Merged atomically during pricing resolution:
/// a more specific schedule replaces a broader one wholesale, tiers are never
/// mixed across scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationSchedule {
    pub tiers: Vec<CancellationTier>,
}

impl CancellationSchedule {
    pub fn new(mut tiers: Vec<CancellationTier>) -> Self {
        tiers.sort_by_key(|tier| tier.after_minutes);
        Self { tiers }
    }

    /// Picks the highest tier whose threshold has been reached and charges it.
    pub fn fee_for(&self, elapsed_minutes: i64, estimated_fare: Money) -> Money {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.after_minutes <= elapsed_minutes)
            .map(|tier| {
                if tier.is_percentage {
                    Money::new(estimated_fare.value() * tier.amount / dec!(100))
                } else {
                    Money::new(tier.amount)
                }
            })
            .unwrap_or(Money::ZERO)
    }
}

/// One row of the pricing hierarchy. Every pricing field is optional; `None`
/// means "inherit from a broader scope". The resolver merges rows per field,
/// most specific first, and fills anything still unset from [`defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub id: u64,
    pub version_id: u64,
    #[serde(default)]
    pub scope: GeoScope,
    #[serde(default)]
    pub ride_type: Option<RideType>,
    #[serde(default)]
    pub base_fare: Option<Money>,
    #[serde(default)]
    pub per_km_rate: Option<Money>,
    #[serde(default)]
    pub per_minute_rate: Option<Money>,
    #[serde(default)]
    pub minimum_fare: Option<Money>,
    #[serde(default)]
    pub booking_fee: Option<Money>,
    #[serde(default)]
    pub platform_commission_pct: Option<Rate>,
    #[serde(default)]
    pub driver_incentive_pct: Option<Rate>,
    #[serde(default)]
    pub surge_min_multiplier: Option<Rate>,
    #[serde(default)]
    pub surge_max_multiplier: Option<Rate>,
    #[serde(default)]
    pub tax_rate: Option<Rate>,
    #[serde(default)]
    pub tax_inclusive: Option<bool>,
    #[serde(default)]
    pub cancellation: Option<CancellationSchedule>,
}

impl PricingConfig {
    /// An all-inherit row, useful as a merge accumulator and in tests.
    pub fn empty(id: u64, version_id: u64) -> Self {
        Self {
            id,
            version_id,
            scope: GeoScope::GLOBAL,
            ride_type: None,
            base_fare: None,
            per_km_rate: None,
            per_minute_rate: None,
            minimum_fare: None,
            booking_fee: None,
            platform_commission_pct: None,
            driver_incentive_pct: None,
            surge_min_multiplier: None,
            surge_max_multiplier: None,
            tax_rate: None,
            tax_inclusive: None,
            cancellation: None,
        }
    }
}

/// Documented global defaults, applied to any field the hierarchy left unset.
pub mod defaults {
    use super::*;

    pub fn base_fare() -> Money {
        Money::new(dec!(3.00))
    }

    pub fn per_km_rate() -> Money {
        Money::new(dec!(1.50))
    }

    pub fn per_minute_rate() -> Money {
        Money::new(dec!(0.25))
    }

    pub fn minimum_fare() -> Money {
        Money::new(dec!(5.00))
    }

    pub fn booking_fee() -> Money {
        Money::new(dec!(1.00))
    }

    pub fn platform_commission_pct() -> Rate {
        Rate::new_unchecked(dec!(0.20))
    }

    pub fn driver_incentive_pct() -> Rate {
        Rate::ZERO
    }

    pub fn surge_min_multiplier() -> Rate {
        Rate::ONE
    }

    pub fn surge_max_multiplier() -> Rate {
        Rate::new_unchecked(dec!(5.0))
    }

    pub fn tax_rate() -> Rate {
        Rate::ZERO
    }

    pub fn tax_inclusive() -> bool {
        false
    }

    pub fn cancellation() -> CancellationSchedule {
        CancellationSchedule::new(vec![
            CancellationTier {
                after_minutes: 0,
                amount: dec!(0.00),
                is_percentage: false,
            },
            CancellationTier {
                after_minutes: 2,
                amount: dec!(5.00),
                is_percentage: false,
            },
            CancellationTier {
                after_minutes: 5,
                amount: dec!(10.00),
                is_percentage: false,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_tier_selection() {
        let schedule = defaults::cancellation();
        let fare = Money::new(dec!(20.00));
        assert_eq!(schedule.fee_for(1, fare), Money::new(dec!(0.00)));
        assert_eq!(schedule.fee_for(3, fare), Money::new(dec!(5.00)));
        assert_eq!(schedule.fee_for(10, fare), Money::new(dec!(10.00)));
    }

    #[test]
    fn test_cancellation_percentage_tier() {
        let schedule = CancellationSchedule::new(vec![
            CancellationTier {
                after_minutes: 0,
                amount: dec!(0),
                is_percentage: false,
            },
            CancellationTier {
                after_minutes: 5,
                amount: dec!(50),
                is_percentage: true,
            },
        ]);
        let fee = schedule.fee_for(6, Money::new(dec!(24.00)));
        assert_eq!(fee, Money::new(dec!(12.00)));
    }

    #[test]
    fn test_cancellation_tiers_sorted_on_construction() {
        let schedule = CancellationSchedule::new(vec![
            CancellationTier {
                after_minutes: 5,
                amount: dec!(10.00),
                is_percentage: false,
            },
            CancellationTier {
                after_minutes: 0,
                amount: dec!(0.00),
                is_percentage: false,
            },
        ]);
        assert_eq!(schedule.tiers[0].after_minutes, 0);
        assert_eq!(schedule.fee_for(7, Money::ZERO), Money::new(dec!(10.00)));
    }
}
