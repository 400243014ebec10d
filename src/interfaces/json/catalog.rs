use crate::domain::config::PricingConfig;
use crate::domain::multiplier::{
    EventMultiplier, SurgeThreshold, TimeMultiplier, WeatherMultiplier,
};
use crate::domain::ports::{ConfigStore, MultiplierStore, VersionStore, ZoneFeeStore};
use crate::domain::version::PricingConfigVersion;
use crate::domain::zone_fee::ZoneFee;
use crate::error::Result;
use crate::infrastructure::geography::GeoFence;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::info;

/// A whole pricing catalog as one JSON fixture: versions, hierarchy configs,
/// the four multiplier sources, zone fees, and the geofences backing the
/// geography stub. `activate_version` names the draft to activate on load.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PricingCatalog {
    #[serde(default)]
    pub versions: Vec<PricingConfigVersion>,
    #[serde(default)]
    pub configs: Vec<PricingConfig>,
    #[serde(default)]
    pub time_multipliers: Vec<TimeMultiplier>,
    #[serde(default)]
    pub weather_multipliers: Vec<WeatherMultiplier>,
    #[serde(default)]
    pub event_multipliers: Vec<EventMultiplier>,
    #[serde(default)]
    pub surge_thresholds: Vec<SurgeThreshold>,
    #[serde(default)]
    pub zone_fees: Vec<ZoneFee>,
    #[serde(default)]
    pub geofences: Vec<GeoFence>,
    #[serde(default)]
    pub activate_version: Option<u64>,
}

impl PricingCatalog {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Seeds the stores from this catalog and activates the named version.
    pub async fn load_into(
        &self,
        versions: &dyn VersionStore,
        configs: &dyn ConfigStore,
        multipliers: &dyn MultiplierStore,
        zone_fees: &dyn ZoneFeeStore,
    ) -> Result<()> {
        for version in &self.versions {
            versions.insert(version.clone()).await?;
        }
        for config in &self.configs {
            configs.insert(config.clone()).await?;
        }
        for multiplier in &self.time_multipliers {
            multipliers.insert_time(multiplier.clone()).await?;
        }
        for multiplier in &self.weather_multipliers {
            multipliers.insert_weather(multiplier.clone()).await?;
        }
        for multiplier in &self.event_multipliers {
            multipliers.insert_event(multiplier.clone()).await?;
        }
        for threshold in &self.surge_thresholds {
            multipliers.insert_surge(threshold.clone()).await?;
        }
        for fee in &self.zone_fees {
            zone_fees.insert(fee.clone()).await?;
        }
        if let Some(version_id) = self.activate_version {
            versions.activate(version_id).await?;
        }
        info!(
            versions = self.versions.len(),
            configs = self.configs.len(),
            zone_fees = self.zone_fees.len(),
            "pricing catalog loaded"
        );
        Ok(())
    }
}
