use crate::domain::fare::{FareCalculation, FareLine, MultiplierStack, ResolvedPricing};
use crate::domain::money::{Money, Rate};
use crate::domain::ports::CurrencyBox;
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Trip measurements the calculator prices.
#[derive(Debug, Clone, Copy)]
pub struct TripMetrics {
    pub distance_km: Decimal,
    pub duration_min: Decimal,
}

/// The four resolved multipliers before composition. `surge` is the raw band
/// value; the calculator clamps it into the resolved bounds.
#[derive(Debug, Clone, Copy)]
pub struct RawMultipliers {
    pub time: Rate,
    pub weather: Rate,
    pub event: Rate,
    pub surge: Rate,
}

impl RawMultipliers {
    pub const NEUTRAL: Self = Self {
        time: Rate::ONE,
        weather: Rate::ONE,
        event: Rate::ONE,
        surge: Rate::ONE,
    };
}

/// Combines resolved pricing, trip metrics, multipliers, and zone fees into a
/// [`FareCalculation`] using a fixed composition order that is bit-for-bit
/// reproducible for billing and dispute resolution:
///
/// base, distance, time charges; zone fees; booking fee into the
/// pre-multiplier subtotal; the composed multiplier; the minimum-fare floor
/// (after multipliers); tax; commission split. Rounding is delegated to the
/// Currency collaborator at the emission boundary only.
pub struct FareCalculator {
    currency: CurrencyBox,
}

impl FareCalculator {
    pub fn new(currency: CurrencyBox) -> Self {
        Self { currency }
    }

    /// The running subtotal percentage zone fees apply against:
    /// base + distance charge + time charge, unrounded.
    pub fn pre_fee_subtotal(&self, pricing: &ResolvedPricing, metrics: &TripMetrics) -> Money {
        pricing.base_fare
            + Money::new(metrics.distance_km * pricing.per_km_rate.value())
            + Money::new(metrics.duration_min * pricing.per_minute_rate.value())
    }

    pub fn calculate(
        &self,
        pricing: &ResolvedPricing,
        metrics: &TripMetrics,
        multipliers: RawMultipliers,
        zone_fees_total: Money,
        zone_fee_lines: Vec<FareLine>,
    ) -> FareCalculation {
        let base = pricing.base_fare;
        let distance_charge = Money::new(metrics.distance_km * pricing.per_km_rate.value());
        let time_charge = Money::new(metrics.duration_min * pricing.per_minute_rate.value());

        let pre_multiplier_subtotal =
            base + distance_charge + time_charge + pricing.booking_fee + zone_fees_total;

        let surge = multipliers
            .surge
            .clamp(pricing.surge_min_multiplier, pricing.surge_max_multiplier);
        let total_multiplier =
            multipliers.time * multipliers.weather * multipliers.event * surge;

        let multiplied_subtotal = pre_multiplier_subtotal * total_multiplier;
        // The minimum-fare floor applies after multipliers, so a sub-1.0
        // multiplier can never price a trip below the floor.
        let subtotal = multiplied_subtotal.max(pricing.minimum_fare);

        let (tax_amount, total) = if pricing.tax_inclusive {
            let net = Money::new(subtotal.value() / (Decimal::ONE + pricing.tax_rate.value()));
            (subtotal - net, subtotal)
        } else {
            let tax = subtotal * pricing.tax_rate;
            (tax, subtotal + tax)
        };

        // Commission is computed pre-tax, on the subtotal. The driver
        // incentive is an additive bonus, not a reduction of commission.
        let platform_commission = subtotal * pricing.platform_commission_pct;
        let driver_earnings =
            subtotal - platform_commission + subtotal * pricing.driver_incentive_pct;

        let mut lines = vec![
            FareLine::charge("base fare", self.currency.round(base)),
            FareLine::charge("distance", self.currency.round(distance_charge)),
            FareLine::charge("time", self.currency.round(time_charge)),
            FareLine::charge("booking fee", self.currency.round(pricing.booking_fee)),
        ];
        lines.extend(zone_fee_lines.into_iter().map(|line| FareLine {
            amount: self.currency.round(line.amount),
            ..line
        }));

        debug!(
            version_id = pricing.version_id,
            %total_multiplier,
            subtotal = %subtotal,
            "fare composed"
        );

        FareCalculation {
            version_id: pricing.version_id,
            lines,
            multipliers: MultiplierStack {
                time: multipliers.time,
                weather: multipliers.weather,
                event: multipliers.event,
                surge_raw: multipliers.surge,
                surge,
                total: total_multiplier,
            },
            pre_multiplier_subtotal: self.currency.round(pre_multiplier_subtotal),
            subtotal: self.currency.round(subtotal),
            tax_amount: self.currency.round(tax_amount),
            total: self.currency.round(total),
            platform_commission: self.currency.round(platform_commission),
            driver_earnings: self.currency.round(driver_earnings),
        }
    }

    /// Accepts a negotiated price iff it lies within `variance` of the quoted
    /// total, i.e. inside `[total * (1 - v), total * (1 + v)]`.
    pub fn validate_negotiated_price(
        &self,
        quoted_total: Money,
        offered: Money,
        variance: Rate,
    ) -> Result<()> {
        let min = Money::new(quoted_total.value() * (Decimal::ONE - variance.value()));
        let max = Money::new(quoted_total.value() * (Decimal::ONE + variance.value()));
        if min <= offered && offered <= max {
            Ok(())
        } else {
            Err(PricingError::PriceOutOfRange {
                price: offered.value(),
                min: self.currency.round(min).value(),
                max: self.currency.round(max).value(),
            })
        }
    }

    /// Cancellation fee from the resolved tier schedule, rounded for billing.
    pub fn cancellation_fee(
        &self,
        pricing: &ResolvedPricing,
        minutes_since_request: i64,
        estimated_fare: Money,
    ) -> Money {
        self.currency.round(
            pricing
                .cancellation
                .fee_for(minutes_since_request, estimated_fare),
        )
    }
}
