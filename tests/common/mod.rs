#![allow(dead_code)]

use chrono::{DateTime, Utc};
use fare_engine::application::calculator::FareCalculator;
use fare_engine::application::engine::{EstimateRequest, FareEngine, LatLng};
use fare_engine::application::lifecycle::VersionLifecycleManager;
use fare_engine::application::multipliers::MultiplierResolver;
use fare_engine::application::resolver::PricingResolver;
use fare_engine::application::zone_fees::ZoneFeeResolver;
use fare_engine::domain::config::RideType;
use fare_engine::domain::geo::ResolvedLocation;
use fare_engine::domain::ports::VersionStore;
use fare_engine::domain::version::PricingConfigVersion;
use fare_engine::infrastructure::currency::BankersRounding;
use fare_engine::infrastructure::geography::{GeoFence, StaticGeography};
use fare_engine::infrastructure::in_memory::{
    InMemoryConfigStore, InMemoryMultiplierStore, InMemoryVersionStore, InMemoryZoneFeeStore,
};
use rust_decimal_macros::dec;

/// Zone 1000 sits inside city 100, region 10, country 1. The pickup point
/// below falls inside the zone fence; the dropoff point only inside the city
/// fence.
pub const ZONE_PICKUP: LatLng = LatLng {
    lat: 40.05,
    lng: -3.65,
};
pub const CITY_DROPOFF: LatLng = LatLng { lat: 39.5, lng: -3.5 };

pub struct World {
    pub versions: InMemoryVersionStore,
    pub configs: InMemoryConfigStore,
    pub multipliers: InMemoryMultiplierStore,
    pub zone_fees: InMemoryZoneFeeStore,
}

impl World {
    pub fn new() -> Self {
        Self {
            versions: InMemoryVersionStore::new(),
            configs: InMemoryConfigStore::new(),
            multipliers: InMemoryMultiplierStore::new(),
            zone_fees: InMemoryZoneFeeStore::new(),
        }
    }

    /// Seeds and activates version 1.
    pub async fn with_active_version() -> Self {
        let world = Self::new();
        world
            .versions
            .insert(PricingConfigVersion::draft(1, "test"))
            .await
            .unwrap();
        world.versions.activate(1).await.unwrap();
        world
    }

    pub fn engine(&self) -> FareEngine {
        FareEngine::new(
            Box::new(StaticGeography::new(fences())),
            PricingResolver::new(Box::new(self.versions.clone()), Box::new(self.configs.clone())),
            MultiplierResolver::new(Box::new(self.multipliers.clone())),
            ZoneFeeResolver::new(Box::new(self.zone_fees.clone())),
            FareCalculator::new(Box::new(BankersRounding::default())),
        )
    }

    pub fn lifecycle(&self) -> VersionLifecycleManager {
        VersionLifecycleManager::new(
            Box::new(self.versions.clone()),
            Box::new(self.configs.clone()),
            Box::new(self.multipliers.clone()),
            Box::new(self.zone_fees.clone()),
        )
    }
}

pub fn zone_location() -> ResolvedLocation {
    ResolvedLocation {
        country_id: 1,
        region_id: 10,
        city_id: 100,
        zone_id: Some(1000),
        utc_offset_min: 0,
    }
}

pub fn city_location() -> ResolvedLocation {
    ResolvedLocation {
        zone_id: None,
        ..zone_location()
    }
}

pub fn fences() -> Vec<GeoFence> {
    vec![
        GeoFence {
            min_lat: 40.0,
            max_lat: 40.1,
            min_lng: -3.7,
            max_lng: -3.6,
            location: zone_location(),
        },
        GeoFence {
            min_lat: 39.0,
            max_lat: 41.0,
            min_lng: -4.0,
            max_lng: -3.0,
            location: city_location(),
        },
    ]
}

pub fn moment() -> DateTime<Utc> {
    // a Friday, 12:00 UTC
    "2026-07-03T12:00:00Z".parse().unwrap()
}

pub fn request(ride_type: RideType) -> EstimateRequest {
    EstimateRequest {
        pickup: ZONE_PICKUP,
        dropoff: CITY_DROPOFF,
        ride_type,
        moment: moment(),
        distance_km: dec!(10),
        duration_min: dec!(20),
        demand_supply_ratio: dec!(1.0),
        weather: None,
    }
}
