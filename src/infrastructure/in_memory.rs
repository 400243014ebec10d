use crate::domain::config::{PricingConfig, RideType};
use crate::domain::geo::ResolvedLocation;
use crate::domain::multiplier::{
    EventMultiplier, SurgeThreshold, TimeMultiplier, WeatherMultiplier,
};
use crate::domain::ports::{ConfigStore, MultiplierStore, VersionStore, ZoneFeeStore};
use crate::domain::version::{PricingConfigVersion, VersionStatus};
use crate::domain::zone_fee::ZoneFee;
use crate::error::{PricingError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory version store.
///
/// `activate` performs the whole swap under one write lock, which is the
/// transactional boundary guaranteeing the single-active-version invariant.
#[derive(Default, Clone)]
pub struct InMemoryVersionStore {
    versions: Arc<RwLock<HashMap<u64, PricingConfigVersion>>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn get(&self, id: u64) -> Result<Option<PricingConfigVersion>> {
        let versions = self.versions.read().await;
        Ok(versions.get(&id).cloned())
    }

    async fn get_active(&self, now: DateTime<Utc>) -> Result<Option<PricingConfigVersion>> {
        let versions = self.versions.read().await;
        Ok(versions
            .values()
            .find(|v| v.status == VersionStatus::Active && v.is_effective_at(now))
            .cloned())
    }

    async fn insert(&self, version: PricingConfigVersion) -> Result<()> {
        let mut versions = self.versions.write().await;
        versions.insert(version.id, version);
        Ok(())
    }

    async fn update(&self, version: PricingConfigVersion) -> Result<()> {
        let mut versions = self.versions.write().await;
        if !versions.contains_key(&version.id) {
            return Err(PricingError::NotFound {
                entity: "version",
                id: version.id,
            });
        }
        versions.insert(version.id, version);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<PricingConfigVersion>> {
        let versions = self.versions.read().await;
        Ok(versions.values().cloned().collect())
    }

    async fn activate(&self, id: u64) -> Result<PricingConfigVersion> {
        let mut versions = self.versions.write().await;
        let target = versions.get(&id).ok_or(PricingError::NotFound {
            entity: "version",
            id,
        })?;
        if target.status != VersionStatus::Draft {
            return Err(PricingError::StaleVersion {
                id,
                status: target.status.to_string(),
            });
        }
        for version in versions.values_mut() {
            if version.status == VersionStatus::Active {
                version.status = VersionStatus::Archived;
            }
        }
        match versions.get_mut(&id) {
            Some(target) => {
                target.status = VersionStatus::Active;
                Ok(target.clone())
            }
            None => Err(PricingError::NotFound {
                entity: "version",
                id,
            }),
        }
    }
}

/// Thread-safe in-memory config store. `find_matching` pre-filters by
/// version, scope match, and ride type; ordering is the resolver's concern.
#[derive(Default, Clone)]
pub struct InMemoryConfigStore {
    configs: Arc<RwLock<HashMap<u64, PricingConfig>>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn find_matching(
        &self,
        version_id: u64,
        location: &ResolvedLocation,
        ride_type: RideType,
    ) -> Result<Vec<PricingConfig>> {
        let configs = self.configs.read().await;
        Ok(configs
            .values()
            .filter(|c| {
                c.version_id == version_id
                    && c.scope.matches(location)
                    && c.ride_type.is_none_or(|rt| rt == ride_type)
            })
            .cloned()
            .collect())
    }

    async fn for_version(&self, version_id: u64) -> Result<Vec<PricingConfig>> {
        let configs = self.configs.read().await;
        Ok(configs
            .values()
            .filter(|c| c.version_id == version_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: u64) -> Result<Option<PricingConfig>> {
        let configs = self.configs.read().await;
        Ok(configs.get(&id).cloned())
    }

    async fn insert(&self, config: PricingConfig) -> Result<()> {
        let mut configs = self.configs.write().await;
        configs.insert(config.id, config);
        Ok(())
    }

    async fn update(&self, config: PricingConfig) -> Result<()> {
        let mut configs = self.configs.write().await;
        if !configs.contains_key(&config.id) {
            return Err(PricingError::NotFound {
                entity: "config",
                id: config.id,
            });
        }
        configs.insert(config.id, config);
        Ok(())
    }

    async fn remove(&self, id: u64) -> Result<()> {
        let mut configs = self.configs.write().await;
        configs.remove(&id).ok_or(PricingError::NotFound {
            entity: "config",
            id,
        })?;
        Ok(())
    }
}

/// Thread-safe in-memory store for the four multiplier sources.
#[derive(Default, Clone)]
pub struct InMemoryMultiplierStore {
    time: Arc<RwLock<Vec<TimeMultiplier>>>,
    weather: Arc<RwLock<Vec<WeatherMultiplier>>>,
    events: Arc<RwLock<Vec<EventMultiplier>>>,
    surge: Arc<RwLock<Vec<SurgeThreshold>>>,
}

impl InMemoryMultiplierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MultiplierStore for InMemoryMultiplierStore {
    async fn time_multipliers(&self, location: &ResolvedLocation) -> Result<Vec<TimeMultiplier>> {
        let time = self.time.read().await;
        Ok(time
            .iter()
            .filter(|m| m.scope.matches(location))
            .cloned()
            .collect())
    }

    async fn weather_multipliers(
        &self,
        location: &ResolvedLocation,
    ) -> Result<Vec<WeatherMultiplier>> {
        let weather = self.weather.read().await;
        Ok(weather
            .iter()
            .filter(|m| m.scope.matches(location))
            .cloned()
            .collect())
    }

    async fn event_multipliers(
        &self,
        zone_id: Option<u32>,
        city_id: u32,
    ) -> Result<Vec<EventMultiplier>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.applies_to(zone_id, city_id))
            .cloned()
            .collect())
    }

    async fn surge_thresholds(&self, location: &ResolvedLocation) -> Result<Vec<SurgeThreshold>> {
        let surge = self.surge.read().await;
        Ok(surge
            .iter()
            .filter(|band| band.scope.matches(location))
            .cloned()
            .collect())
    }

    async fn insert_time(&self, multiplier: TimeMultiplier) -> Result<()> {
        self.time.write().await.push(multiplier);
        Ok(())
    }

    async fn insert_weather(&self, multiplier: WeatherMultiplier) -> Result<()> {
        self.weather.write().await.push(multiplier);
        Ok(())
    }

    async fn insert_event(&self, multiplier: EventMultiplier) -> Result<()> {
        self.events.write().await.push(multiplier);
        Ok(())
    }

    async fn insert_surge(&self, threshold: SurgeThreshold) -> Result<()> {
        self.surge.write().await.push(threshold);
        Ok(())
    }
}

/// Thread-safe in-memory zone fee store, indexed by zone.
#[derive(Default, Clone)]
pub struct InMemoryZoneFeeStore {
    fees: Arc<RwLock<Vec<ZoneFee>>>,
}

impl InMemoryZoneFeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ZoneFeeStore for InMemoryZoneFeeStore {
    async fn fees_for_zone(&self, zone_id: u32) -> Result<Vec<ZoneFee>> {
        let fees = self.fees.read().await;
        Ok(fees
            .iter()
            .filter(|fee| fee.zone_id == zone_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, fee: ZoneFee) -> Result<()> {
        self.fees.write().await.push(fee);
        Ok(())
    }
}
