use crate::domain::geo::ResolvedLocation;
use crate::domain::money::Rate;
use crate::domain::multiplier::WeatherCondition;
use crate::domain::ports::MultiplierStoreBox;
use crate::error::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

/// Resolves the four independent multiplier sources. A miss on any source is
/// never an error; it yields the neutral 1.0.
pub struct MultiplierResolver {
    store: MultiplierStoreBox,
}

impl MultiplierResolver {
    pub fn new(store: MultiplierStoreBox) -> Self {
        Self { store }
    }

    /// Day-of-week + time-of-day match at the most specific scope, ties broken
    /// by highest `priority`.
    pub async fn time_multiplier(
        &self,
        location: &ResolvedLocation,
        local: NaiveDateTime,
    ) -> Result<Rate> {
        let candidates = self.store.time_multipliers(location).await?;
        Ok(candidates
            .iter()
            .filter(|m| m.scope.matches(location) && m.matches(local))
            .max_by_key(|m| (m.scope.specificity(), m.priority))
            .map(|m| m.multiplier)
            .unwrap_or(Rate::ONE))
    }

    /// Exact condition match at the most specific scope.
    pub async fn weather_multiplier(
        &self,
        location: &ResolvedLocation,
        condition: WeatherCondition,
    ) -> Result<Rate> {
        let candidates = self.store.weather_multipliers(location).await?;
        Ok(candidates
            .iter()
            .filter(|m| m.scope.matches(location) && m.condition == condition)
            .max_by_key(|m| m.scope.specificity())
            .map(|m| m.multiplier)
            .unwrap_or(Rate::ONE))
    }

    /// Among events whose buffered window contains `moment` and whose
    /// zone/city matches, the highest multiplier wins. Overlapping events do
    /// not stack.
    pub async fn event_multiplier(
        &self,
        zone_id: Option<u32>,
        city_id: u32,
        moment: DateTime<Utc>,
    ) -> Result<Rate> {
        let candidates = self.store.event_multipliers(zone_id, city_id).await?;
        Ok(candidates
            .iter()
            .filter(|e| e.applies_to(zone_id, city_id) && e.is_active_at(moment))
            .map(|e| e.multiplier)
            .max()
            .unwrap_or(Rate::ONE))
    }

    /// Band at the most specific matching scope whose `[min, max)` contains
    /// the demand/supply ratio. Unclamped; the calculator clamps into the
    /// resolved surge bounds.
    pub async fn surge_multiplier(
        &self,
        location: &ResolvedLocation,
        ratio: Decimal,
    ) -> Result<Rate> {
        let candidates = self.store.surge_thresholds(location).await?;
        Ok(candidates
            .iter()
            .filter(|band| band.scope.matches(location) && band.contains(ratio))
            .max_by_key(|band| (band.scope.specificity(), band.ratio_min))
            .map(|band| band.multiplier)
            .unwrap_or(Rate::ONE))
    }
}
