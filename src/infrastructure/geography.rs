use crate::domain::geo::ResolvedLocation;
use crate::domain::ports::Geography;
use crate::error::{PricingError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One rectangular geofence mapping a coordinate box to a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFence {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub location: ResolvedLocation,
}

impl GeoFence {
    fn contains(&self, lat: f64, lng: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lng <= lng && lng <= self.max_lng
    }
}

/// Catalog-backed geography stub. Real point resolution lives in an external
/// service; this keeps the binary and tests runnable against fixture data.
/// Fences are checked in order, first hit wins, so narrower fences (zones)
/// should precede broader ones in the catalog.
#[derive(Default, Clone)]
pub struct StaticGeography {
    fences: Vec<GeoFence>,
}

impl StaticGeography {
    pub fn new(fences: Vec<GeoFence>) -> Self {
        Self { fences }
    }
}

#[async_trait]
impl Geography for StaticGeography {
    async fn resolve(&self, lat: f64, lng: f64) -> Result<ResolvedLocation> {
        self.fences
            .iter()
            .find(|fence| fence.contains(lat, lng))
            .map(|fence| fence.location.clone())
            .ok_or_else(|| {
                PricingError::Validation(format!("no geofence covers point ({lat}, {lng})"))
            })
    }
}
