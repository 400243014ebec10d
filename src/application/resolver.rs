use crate::domain::config::{PricingConfig, RideType, defaults};
use crate::domain::fare::ResolvedPricing;
use crate::domain::geo::ResolvedLocation;
use crate::domain::ports::{ConfigStoreBox, VersionStoreBox};
use crate::error::{PricingError, Result};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::debug;

/// Cascades hierarchy config rows into one fully populated [`ResolvedPricing`].
///
/// Rows merge per field, not per row: the most specific row that sets a field
/// wins that field, while its unset fields keep inheriting from broader rows.
/// The cancellation schedule is the one atomic field, replaced wholesale.
pub struct PricingResolver {
    versions: VersionStoreBox,
    configs: ConfigStoreBox,
}

impl PricingResolver {
    pub fn new(versions: VersionStoreBox, configs: ConfigStoreBox) -> Self {
        Self { versions, configs }
    }

    /// Resolves pricing for one location/ride-type at `now`.
    ///
    /// Fails only with [`PricingError::Configuration`] when no active version
    /// is in effect; an empty config set resolves to the documented defaults.
    pub async fn resolve(
        &self,
        location: &ResolvedLocation,
        ride_type: RideType,
        now: DateTime<Utc>,
    ) -> Result<ResolvedPricing> {
        let version = self
            .versions
            .get_active(now)
            .await?
            .ok_or(PricingError::Configuration)?;

        let mut rows = self
            .configs
            .find_matching(version.id, location, ride_type)
            .await?;

        // The store pre-filters; ordering is re-established here rather than
        // trusted. Specificity desc, ride-type-specific before generic.
        rows.sort_by_key(|row| (Reverse(row.scope.specificity()), row.ride_type.is_none()));

        let pricing = merge(version.id, &rows);
        debug!(
            version_id = version.id,
            rows = rows.len(),
            contributing = pricing.contributing_config_ids.len(),
            "resolved pricing"
        );
        Ok(pricing)
    }
}

/// First non-`None` wins per field, scanning rows most specific first.
/// Anything still unset afterwards is filled from the documented defaults.
fn merge(version_id: u64, rows: &[PricingConfig]) -> ResolvedPricing {
    let mut acc = PricingConfig::empty(0, version_id);
    let mut contributing = Vec::new();

    for row in rows {
        let before = set_fields(&acc);
        acc.base_fare = acc.base_fare.or(row.base_fare);
        acc.per_km_rate = acc.per_km_rate.or(row.per_km_rate);
        acc.per_minute_rate = acc.per_minute_rate.or(row.per_minute_rate);
        acc.minimum_fare = acc.minimum_fare.or(row.minimum_fare);
        acc.booking_fee = acc.booking_fee.or(row.booking_fee);
        acc.platform_commission_pct = acc.platform_commission_pct.or(row.platform_commission_pct);
        acc.driver_incentive_pct = acc.driver_incentive_pct.or(row.driver_incentive_pct);
        acc.surge_min_multiplier = acc.surge_min_multiplier.or(row.surge_min_multiplier);
        acc.surge_max_multiplier = acc.surge_max_multiplier.or(row.surge_max_multiplier);
        acc.tax_rate = acc.tax_rate.or(row.tax_rate);
        acc.tax_inclusive = acc.tax_inclusive.or(row.tax_inclusive);
        if acc.cancellation.is_none() {
            acc.cancellation = row.cancellation.clone();
        }
        if set_fields(&acc) > before {
            contributing.push(row.id);
        }
    }

    ResolvedPricing {
        version_id,
        contributing_config_ids: contributing,
        base_fare: acc.base_fare.unwrap_or_else(defaults::base_fare),
        per_km_rate: acc.per_km_rate.unwrap_or_else(defaults::per_km_rate),
        per_minute_rate: acc.per_minute_rate.unwrap_or_else(defaults::per_minute_rate),
        minimum_fare: acc.minimum_fare.unwrap_or_else(defaults::minimum_fare),
        booking_fee: acc.booking_fee.unwrap_or_else(defaults::booking_fee),
        platform_commission_pct: acc
            .platform_commission_pct
            .unwrap_or_else(defaults::platform_commission_pct),
        driver_incentive_pct: acc
            .driver_incentive_pct
            .unwrap_or_else(defaults::driver_incentive_pct),
        surge_min_multiplier: acc
            .surge_min_multiplier
            .unwrap_or_else(defaults::surge_min_multiplier),
        surge_max_multiplier: acc
            .surge_max_multiplier
            .unwrap_or_else(defaults::surge_max_multiplier),
        tax_rate: acc.tax_rate.unwrap_or_else(defaults::tax_rate),
        tax_inclusive: acc.tax_inclusive.unwrap_or_else(defaults::tax_inclusive),
        cancellation: acc.cancellation.unwrap_or_else(defaults::cancellation),
    }
}

fn set_fields(config: &PricingConfig) -> usize {
    [
        config.base_fare.is_some(),
        config.per_km_rate.is_some(),
        config.per_minute_rate.is_some(),
        config.minimum_fare.is_some(),
        config.booking_fee.is_some(),
        config.platform_commission_pct.is_some(),
        config.driver_incentive_pct.is_some(),
        config.surge_min_multiplier.is_some(),
        config.surge_max_multiplier.is_some(),
        config.tax_rate.is_some(),
        config.tax_inclusive.is_some(),
        config.cancellation.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::GeoScope;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    fn row(id: u64, scope: GeoScope) -> PricingConfig {
        PricingConfig {
            scope,
            ..PricingConfig::empty(id, 1)
        }
    }

    #[test]
    fn test_merge_empty_rows_yields_defaults() {
        let pricing = merge(1, &[]);
        assert_eq!(pricing, ResolvedPricing::defaults(1));
    }

    #[test]
    fn test_per_field_merge_zone_wins_with_inheritance() {
        let mut zone = row(10, GeoScope::zone(1000));
        zone.base_fare = Some(Money::new(dec!(6.00)));
        // zone row leaves per_km_rate unset; it must inherit from the city row
        let mut city = row(11, GeoScope::city(100));
        city.base_fare = Some(Money::new(dec!(4.00)));
        city.per_km_rate = Some(Money::new(dec!(2.00)));

        // already sorted most specific first
        let pricing = merge(1, &[zone, city]);
        assert_eq!(pricing.base_fare, Money::new(dec!(6.00)));
        assert_eq!(pricing.per_km_rate, Money::new(dec!(2.00)));
        assert_eq!(pricing.per_minute_rate, defaults::per_minute_rate());
        assert_eq!(pricing.contributing_config_ids, vec![10, 11]);
    }

    #[test]
    fn test_cancellation_schedule_merges_atomically() {
        use crate::domain::config::{CancellationSchedule, CancellationTier};

        let mut zone = row(10, GeoScope::zone(1000));
        zone.cancellation = Some(CancellationSchedule::new(vec![CancellationTier {
            after_minutes: 0,
            amount: dec!(2.00),
            is_percentage: false,
        }]));
        let mut country = row(11, GeoScope::country(1));
        country.cancellation = Some(defaults::cancellation());

        let pricing = merge(1, &[zone, country]);
        // the single-tier zone schedule replaces the country one wholesale
        assert_eq!(pricing.cancellation.tiers.len(), 1);
        assert_eq!(pricing.cancellation.tiers[0].amount, dec!(2.00));
    }

    #[test]
    fn test_row_without_new_fields_is_not_contributing() {
        let mut zone = row(10, GeoScope::zone(1000));
        zone.base_fare = Some(Money::new(dec!(6.00)));
        let mut city = row(11, GeoScope::city(100));
        city.base_fare = Some(Money::new(dec!(4.00)));

        let pricing = merge(1, &[zone, city]);
        assert_eq!(pricing.contributing_config_ids, vec![10]);
    }
}
