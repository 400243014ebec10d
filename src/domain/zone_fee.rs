use super::config::RideType;
use super::money::Money;
use super::multiplier::window_contains;
use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Recurring local-time window gating a zone fee. Without a day list the
/// window applies every day; the time span may wrap midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub days: Option<Vec<Weekday>>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn contains(&self, local: NaiveDateTime) -> bool {
        let day_ok = self
            .days
            .as_ref()
            .is_none_or(|days| days.contains(&local.weekday()));
        day_ok && window_contains(self.start, self.end, local.time())
    }
}

/// Additional charge tied to a pricing zone, e.g. an airport pickup fee.
///
/// Percentage fees apply against the pre-multiplier running subtotal
/// (base + distance + time charges); fixed fees apply as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFee {
    pub id: u64,
    pub zone_id: u32,
    pub zone_name: String,
    pub fee_type: String,
    #[serde(default)]
    pub ride_type: Option<RideType>,
    pub amount: Decimal,
    #[serde(default)]
    pub is_percentage: bool,
    #[serde(default)]
    pub applies_pickup: bool,
    #[serde(default)]
    pub applies_dropoff: bool,
    #[serde(default)]
    pub schedule: Option<TimeWindow>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ZoneFee {
    pub fn charge(&self, pre_fee_subtotal: Money) -> Money {
        if self.is_percentage {
            Money::new(pre_fee_subtotal.value() * self.amount / dec!(100))
        } else {
            Money::new(self.amount)
        }
    }

    pub fn applies_to_ride(&self, ride_type: RideType) -> bool {
        self.ride_type.is_none_or(|rt| rt == ride_type)
    }

    pub fn in_schedule(&self, local: NaiveDateTime) -> bool {
        self.schedule
            .as_ref()
            .is_none_or(|window| window.contains(local))
    }
}
