use crate::application::engine::{EstimateRequest, LatLng};
use crate::domain::config::RideType;
use crate::domain::multiplier::WeatherCondition;
use crate::error::{PricingError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RequestRow {
    ride_type: RideType,
    pickup_lat: f64,
    pickup_lng: f64,
    dropoff_lat: f64,
    dropoff_lng: f64,
    distance_km: Decimal,
    duration_min: Decimal,
    ratio: Decimal,
    moment: DateTime<Utc>,
    #[serde(default)]
    weather: Option<WeatherCondition>,
}

impl From<RequestRow> for EstimateRequest {
    fn from(row: RequestRow) -> Self {
        Self {
            pickup: LatLng {
                lat: row.pickup_lat,
                lng: row.pickup_lng,
            },
            dropoff: LatLng {
                lat: row.dropoff_lat,
                lng: row.dropoff_lng,
            },
            ride_type: row.ride_type,
            moment: row.moment,
            distance_km: row.distance_km,
            duration_min: row.duration_min,
            demand_supply_ratio: row.ratio,
            weather: row.weather,
        }
    }
}

/// Streams estimate requests from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// yielding `Result<EstimateRequest>` lazily so large request files never
/// load fully into memory.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<EstimateRequest>> {
        self.reader
            .into_deserialize::<RequestRow>()
            .map(|result| result.map(Into::into).map_err(PricingError::from))
    }
}
