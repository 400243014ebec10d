use super::config::{PricingConfig, RideType};
use super::geo::ResolvedLocation;
use super::money::Money;
use super::multiplier::{EventMultiplier, SurgeThreshold, TimeMultiplier, WeatherMultiplier};
use super::version::PricingConfigVersion;
use super::zone_fee::ZoneFee;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store for pricing catalog versions.
///
/// `activate` is the one transactional operation in the engine: archiving the
/// previously active version and activating the new one must be atomic, so
/// there is never a moment with zero or two active versions.
#[async_trait]
pub trait VersionStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Option<PricingConfigVersion>>;
    async fn get_active(&self, now: DateTime<Utc>) -> Result<Option<PricingConfigVersion>>;
    async fn insert(&self, version: PricingConfigVersion) -> Result<()>;
    async fn update(&self, version: PricingConfigVersion) -> Result<()>;
    async fn all(&self) -> Result<Vec<PricingConfigVersion>>;
    async fn activate(&self, id: u64) -> Result<PricingConfigVersion>;
}

/// Store for pricing config rows. `find_matching` pre-filters by version,
/// location, and ride type; the resolver re-sorts by specificity itself and
/// never assumes ordering it did not verify.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn find_matching(
        &self,
        version_id: u64,
        location: &ResolvedLocation,
        ride_type: RideType,
    ) -> Result<Vec<PricingConfig>>;
    async fn for_version(&self, version_id: u64) -> Result<Vec<PricingConfig>>;
    async fn get(&self, id: u64) -> Result<Option<PricingConfig>>;
    async fn insert(&self, config: PricingConfig) -> Result<()>;
    async fn update(&self, config: PricingConfig) -> Result<()>;
    async fn remove(&self, id: u64) -> Result<()>;
}

/// Store for the four independent multiplier sources. Lookups are scoped
/// pre-filters; selection logic lives in the resolvers.
#[async_trait]
pub trait MultiplierStore: Send + Sync {
    async fn time_multipliers(&self, location: &ResolvedLocation) -> Result<Vec<TimeMultiplier>>;
    async fn weather_multipliers(
        &self,
        location: &ResolvedLocation,
    ) -> Result<Vec<WeatherMultiplier>>;
    async fn event_multipliers(
        &self,
        zone_id: Option<u32>,
        city_id: u32,
    ) -> Result<Vec<EventMultiplier>>;
    async fn surge_thresholds(&self, location: &ResolvedLocation) -> Result<Vec<SurgeThreshold>>;
    async fn insert_time(&self, multiplier: TimeMultiplier) -> Result<()>;
    async fn insert_weather(&self, multiplier: WeatherMultiplier) -> Result<()>;
    async fn insert_event(&self, multiplier: EventMultiplier) -> Result<()>;
    async fn insert_surge(&self, threshold: SurgeThreshold) -> Result<()>;
}

#[async_trait]
pub trait ZoneFeeStore: Send + Sync {
    async fn fees_for_zone(&self, zone_id: u32) -> Result<Vec<ZoneFee>>;
    async fn insert(&self, fee: ZoneFee) -> Result<()>;
}

/// External geography collaborator: lat/lng -> hierarchy ids + UTC offset.
#[async_trait]
pub trait Geography: Send + Sync {
    async fn resolve(&self, lat: f64, lng: f64) -> Result<ResolvedLocation>;
}

/// External currency collaborator. The engine delegates all rounding here.
pub trait Currency: Send + Sync {
    fn round(&self, amount: Money) -> Money;
}

pub type VersionStoreBox = Box<dyn VersionStore>;
pub type ConfigStoreBox = Box<dyn ConfigStore>;
pub type MultiplierStoreBox = Box<dyn MultiplierStore>;
pub type ZoneFeeStoreBox = Box<dyn ZoneFeeStore>;
pub type GeographyBox = Box<dyn Geography>;
pub type CurrencyBox = Box<dyn Currency>;
