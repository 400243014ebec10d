use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PricingError>;

/// Error taxonomy for the pricing engine.
///
/// Lookup misses for multipliers and zone fees are never errors; they resolve
/// to neutral values. A fare estimate either fully succeeds or fails up front
/// with `Configuration`; there are no partial results.
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("no active pricing version is in effect")]
    Configuration,
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("negotiated price {price} outside accepted band [{min}, {max}]")]
    PriceOutOfRange {
        price: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("version {id} is {status}, mutations require a draft")]
    StaleVersion { id: u64, status: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
