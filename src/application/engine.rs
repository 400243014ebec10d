use super::calculator::{FareCalculator, RawMultipliers, TripMetrics};
use super::multipliers::MultiplierResolver;
use super::resolver::PricingResolver;
use super::zone_fees::ZoneFeeResolver;
use crate::domain::config::RideType;
use crate::domain::fare::FareCalculation;
use crate::domain::geo::ResolvedLocation;
use crate::domain::money::{Money, Rate};
use crate::domain::multiplier::WeatherCondition;
use crate::domain::ports::GeographyBox;
use crate::error::{PricingError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Accepted negotiated-price variance band unless overridden: +/-20%.
const DEFAULT_PRICE_VARIANCE: Rate = Rate::new_unchecked(dec!(0.20));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One fare estimate request. Distance, duration, the demand/supply ratio,
/// and the current weather are measured by external collaborators and arrive
/// here as plain inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub pickup: LatLng,
    pub dropoff: LatLng,
    pub ride_type: RideType,
    pub moment: DateTime<Utc>,
    pub distance_km: Decimal,
    pub duration_min: Decimal,
    pub demand_supply_ratio: Decimal,
    #[serde(default)]
    pub weather: Option<WeatherCondition>,
}

/// The engine facade: resolves pricing, gathers multipliers and zone fees,
/// and composes the authoritative fare.
///
/// Each estimate is a pure function of (version snapshot, configs,
/// multipliers, inputs): no shared mutable state, safe for unlimited
/// concurrent callers. The independent lookups run in parallel; only the
/// final compose step is sequential.
pub struct FareEngine {
    geography: GeographyBox,
    resolver: PricingResolver,
    multipliers: MultiplierResolver,
    zone_fees: ZoneFeeResolver,
    calculator: FareCalculator,
    price_variance: Rate,
}

impl FareEngine {
    pub fn new(
        geography: GeographyBox,
        resolver: PricingResolver,
        multipliers: MultiplierResolver,
        zone_fees: ZoneFeeResolver,
        calculator: FareCalculator,
    ) -> Self {
        Self {
            geography,
            resolver,
            multipliers,
            zone_fees,
            calculator,
            price_variance: DEFAULT_PRICE_VARIANCE,
        }
    }

    /// Overrides the accepted negotiated-price variance band (default +/-20%).
    pub fn with_price_variance(mut self, variance: Rate) -> Self {
        self.price_variance = variance;
        self
    }

    pub async fn estimate(&self, request: &EstimateRequest) -> Result<FareCalculation> {
        validate_metrics(request)?;
        let pickup = self
            .geography
            .resolve(request.pickup.lat, request.pickup.lng)
            .await?;
        let dropoff = self
            .geography
            .resolve(request.dropoff.lat, request.dropoff.lng)
            .await?;

        let pricing = self
            .resolver
            .resolve(&pickup, request.ride_type, request.moment)
            .await?;
        let local = local_time(&pickup, request.moment);

        let (time, weather, event, surge) = tokio::try_join!(
            self.multipliers.time_multiplier(&pickup, local),
            async {
                match request.weather {
                    Some(condition) => {
                        self.multipliers.weather_multiplier(&pickup, condition).await
                    }
                    None => Ok(Rate::ONE),
                }
            },
            self.multipliers
                .event_multiplier(pickup.zone_id, pickup.city_id, request.moment),
            self.multipliers
                .surge_multiplier(&pickup, request.demand_supply_ratio),
        )?;

        let metrics = TripMetrics {
            distance_km: request.distance_km,
            duration_min: request.duration_min,
        };
        let pre_fee_subtotal = self.calculator.pre_fee_subtotal(&pricing, &metrics);
        let (zone_fees_total, zone_fee_lines) = self
            .zone_fees
            .resolve(
                pickup.zone_id,
                dropoff.zone_id,
                request.ride_type,
                local,
                pre_fee_subtotal,
            )
            .await?;

        let fare = self.calculator.calculate(
            &pricing,
            &metrics,
            RawMultipliers {
                time,
                weather,
                event,
                surge,
            },
            zone_fees_total,
            zone_fee_lines,
        );
        info!(
            version_id = fare.version_id,
            ride_type = ?request.ride_type,
            total = %fare.total,
            multiplier = %fare.multipliers.total,
            "fare estimated"
        );
        Ok(fare)
    }

    /// Quotes the trip and accepts the offered price iff it falls within the
    /// configured variance band of the quoted total.
    pub async fn validate_negotiated_price(
        &self,
        request: &EstimateRequest,
        offered: Money,
    ) -> Result<FareCalculation> {
        let fare = self.estimate(request).await?;
        self.calculator
            .validate_negotiated_price(fare.total, offered, self.price_variance)?;
        Ok(fare)
    }

    /// Fee owed for cancelling `minutes_since_request` after requesting a ride
    /// from `pickup`.
    pub async fn cancellation_fee(
        &self,
        pickup: LatLng,
        ride_type: RideType,
        minutes_since_request: i64,
        estimated_fare: Money,
        moment: DateTime<Utc>,
    ) -> Result<Money> {
        let location = self.geography.resolve(pickup.lat, pickup.lng).await?;
        let pricing = self.resolver.resolve(&location, ride_type, moment).await?;
        Ok(self
            .calculator
            .cancellation_fee(&pricing, minutes_since_request, estimated_fare))
    }
}

fn local_time(location: &ResolvedLocation, moment: DateTime<Utc>) -> NaiveDateTime {
    (moment + Duration::minutes(location.utc_offset_min as i64)).naive_utc()
}

fn validate_metrics(request: &EstimateRequest) -> Result<()> {
    for (label, value) in [
        ("distance_km", request.distance_km),
        ("duration_min", request.duration_min),
        ("demand_supply_ratio", request.demand_supply_ratio),
    ] {
        if value < Decimal::ZERO {
            return Err(PricingError::Validation(format!(
                "{label} must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}
