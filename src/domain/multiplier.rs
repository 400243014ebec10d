use super::geo::GeoScope;
use super::money::Rate;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// True when `time` falls inside `[start, end]`, honoring windows that wrap
/// midnight (start > end means "from start through midnight to end").
pub fn window_contains(start: NaiveTime, end: NaiveTime, time: NaiveTime) -> bool {
    if start <= end {
        start <= time && time <= end
    } else {
        time >= start || time <= end
    }
}

/// Time-of-day multiplier, e.g. a night or rush-hour rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMultiplier {
    pub id: u64,
    #[serde(default)]
    pub scope: GeoScope,
    pub days: Vec<Weekday>,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub multiplier: Rate,
    #[serde(default)]
    pub priority: i32,
}

impl TimeMultiplier {
    pub fn matches(&self, local: NaiveDateTime) -> bool {
        self.days.contains(&local.weekday()) && window_contains(self.start, self.end, local.time())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Rain,
    Snow,
    Storm,
    Fog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMultiplier {
    pub id: u64,
    #[serde(default)]
    pub scope: GeoScope,
    pub condition: WeatherCondition,
    pub multiplier: Rate,
}

/// Event-driven multiplier (concert, game, ...). Active from `pre_buffer_min`
/// before the event starts until `post_buffer_min` after it ends. Targets a
/// zone or a whole city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMultiplier {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub zone_id: Option<u32>,
    #[serde(default)]
    pub city_id: Option<u32>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub pre_buffer_min: i64,
    #[serde(default)]
    pub post_buffer_min: i64,
    pub multiplier: Rate,
}

impl EventMultiplier {
    pub fn is_active_at(&self, moment: DateTime<Utc>) -> bool {
        let opens = self.starts_at - Duration::minutes(self.pre_buffer_min);
        let closes = self.ends_at + Duration::minutes(self.post_buffer_min);
        opens <= moment && moment <= closes
    }

    pub fn applies_to(&self, zone_id: Option<u32>, city_id: u32) -> bool {
        match (self.zone_id, self.city_id) {
            (Some(zone), _) => zone_id == Some(zone),
            (None, Some(city)) => city == city_id,
            (None, None) => false,
        }
    }
}

/// One demand/supply band: matches when the ratio is in `[ratio_min,
/// ratio_max)`; a missing `ratio_max` leaves the band unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeThreshold {
    pub id: u64,
    #[serde(default)]
    pub scope: GeoScope,
    pub ratio_min: Decimal,
    #[serde(default)]
    pub ratio_max: Option<Decimal>,
    pub multiplier: Rate,
}

impl SurgeThreshold {
    pub fn contains(&self, ratio: Decimal) -> bool {
        self.ratio_min <= ratio && self.ratio_max.is_none_or(|max| ratio < max)
    }
}
