use crate::domain::config::PricingConfig;
use crate::domain::multiplier::{
    EventMultiplier, SurgeThreshold, TimeMultiplier, WeatherMultiplier,
};
use crate::domain::ports::{ConfigStoreBox, MultiplierStoreBox, VersionStoreBox, ZoneFeeStoreBox};
use crate::domain::version::{PricingConfigVersion, VersionStatus};
use crate::domain::zone_fee::ZoneFee;
use crate::error::{PricingError, Result};
use chrono::{DateTime, Utc};
use tracing::info;

/// Governs the draft -> active -> archived lifecycle and gates config
/// mutations on the owning version being a draft.
///
/// Once a version goes active its configs are immutable; changes go through
/// [`clone_to_draft`](Self::clone_to_draft), keeping in-flight fare
/// computations stable while future pricing is prepared. Multiplier and
/// zone-fee rows are operational data that is not versioned, so their writes
/// take effect immediately. Every mutation emits an audit event; persisting
/// the audit trail is delegated to the log sink.
pub struct VersionLifecycleManager {
    versions: VersionStoreBox,
    configs: ConfigStoreBox,
    multipliers: MultiplierStoreBox,
    zone_fees: ZoneFeeStoreBox,
}

impl VersionLifecycleManager {
    pub fn new(
        versions: VersionStoreBox,
        configs: ConfigStoreBox,
        multipliers: MultiplierStoreBox,
        zone_fees: ZoneFeeStoreBox,
    ) -> Self {
        Self {
            versions,
            configs,
            multipliers,
            zone_fees,
        }
    }

    pub async fn create_draft(
        &self,
        actor: &str,
        name: &str,
        effective_from: Option<DateTime<Utc>>,
        effective_until: Option<DateTime<Utc>>,
    ) -> Result<PricingConfigVersion> {
        let id = self.next_version_id().await?;
        let version = PricingConfigVersion {
            id,
            name: name.to_string(),
            status: VersionStatus::Draft,
            effective_from,
            effective_until,
        };
        self.versions.insert(version.clone()).await?;
        info!(actor, action = "create_draft", version_id = id, "audit");
        Ok(version)
    }

    /// Activates a draft. The store swaps the previously active version to
    /// archived and this one to active in a single transaction, so the
    /// single-active-version invariant can never be observed violated.
    pub async fn activate(&self, actor: &str, id: u64) -> Result<PricingConfigVersion> {
        let activated = self.versions.activate(id).await?;
        info!(actor, action = "activate", version_id = id, "audit");
        Ok(activated)
    }

    /// Retires the active version. Only active versions can be archived;
    /// drafts are discarded by never activating them, and re-archiving is
    /// rejected.
    pub async fn archive(&self, actor: &str, id: u64) -> Result<PricingConfigVersion> {
        let mut version = self
            .versions
            .get(id)
            .await?
            .ok_or(PricingError::NotFound {
                entity: "version",
                id,
            })?;
        if version.status != VersionStatus::Active {
            return Err(PricingError::Validation(format!(
                "version {id} is {}, only an active version can be archived",
                version.status
            )));
        }
        version.status = VersionStatus::Archived;
        self.versions.update(version.clone()).await?;
        info!(actor, action = "archive", version_id = id, "audit");
        Ok(version)
    }

    pub async fn get_active(&self, now: DateTime<Utc>) -> Result<Option<PricingConfigVersion>> {
        self.versions.get_active(now).await
    }

    /// Copies an existing version's configs into a fresh draft, assigning new
    /// version and config ids.
    pub async fn clone_to_draft(
        &self,
        actor: &str,
        source_id: u64,
        name: &str,
    ) -> Result<PricingConfigVersion> {
        if self.versions.get(source_id).await?.is_none() {
            return Err(PricingError::NotFound {
                entity: "version",
                id: source_id,
            });
        }
        let draft = self.create_draft(actor, name, None, None).await?;

        let source_configs = self.configs.for_version(source_id).await?;
        let mut next_config_id = self.next_config_id().await?;
        for mut config in source_configs {
            config.id = next_config_id;
            config.version_id = draft.id;
            next_config_id += 1;
            self.configs.insert(config).await?;
        }
        info!(
            actor,
            action = "clone_to_draft",
            source_version_id = source_id,
            version_id = draft.id,
            "audit"
        );
        Ok(draft)
    }

    pub async fn insert_config(&self, actor: &str, config: PricingConfig) -> Result<()> {
        self.ensure_draft(config.version_id).await?;
        let config_id = config.id;
        self.configs.insert(config).await?;
        info!(actor, action = "insert_config", config_id, "audit");
        Ok(())
    }

    pub async fn update_config(&self, actor: &str, config: PricingConfig) -> Result<()> {
        self.ensure_draft(config.version_id).await?;
        if self.configs.get(config.id).await?.is_none() {
            return Err(PricingError::NotFound {
                entity: "config",
                id: config.id,
            });
        }
        let config_id = config.id;
        self.configs.update(config).await?;
        info!(actor, action = "update_config", config_id, "audit");
        Ok(())
    }

    pub async fn remove_config(&self, actor: &str, id: u64) -> Result<()> {
        let config = self.configs.get(id).await?.ok_or(PricingError::NotFound {
            entity: "config",
            id,
        })?;
        self.ensure_draft(config.version_id).await?;
        self.configs.remove(id).await?;
        info!(actor, action = "remove_config", config_id = id, "audit");
        Ok(())
    }

    pub async fn insert_time_multiplier(
        &self,
        actor: &str,
        multiplier: TimeMultiplier,
    ) -> Result<()> {
        let id = multiplier.id;
        self.multipliers.insert_time(multiplier).await?;
        info!(actor, action = "insert_time_multiplier", id, "audit");
        Ok(())
    }

    pub async fn insert_weather_multiplier(
        &self,
        actor: &str,
        multiplier: WeatherMultiplier,
    ) -> Result<()> {
        let id = multiplier.id;
        self.multipliers.insert_weather(multiplier).await?;
        info!(actor, action = "insert_weather_multiplier", id, "audit");
        Ok(())
    }

    pub async fn insert_event_multiplier(
        &self,
        actor: &str,
        multiplier: EventMultiplier,
    ) -> Result<()> {
        let id = multiplier.id;
        self.multipliers.insert_event(multiplier).await?;
        info!(actor, action = "insert_event_multiplier", id, "audit");
        Ok(())
    }

    pub async fn insert_surge_threshold(
        &self,
        actor: &str,
        threshold: SurgeThreshold,
    ) -> Result<()> {
        let id = threshold.id;
        self.multipliers.insert_surge(threshold).await?;
        info!(actor, action = "insert_surge_threshold", id, "audit");
        Ok(())
    }

    pub async fn insert_zone_fee(&self, actor: &str, fee: ZoneFee) -> Result<()> {
        let id = fee.id;
        self.zone_fees.insert(fee).await?;
        info!(actor, action = "insert_zone_fee", id, "audit");
        Ok(())
    }

    async fn ensure_draft(&self, version_id: u64) -> Result<()> {
        let version = self
            .versions
            .get(version_id)
            .await?
            .ok_or(PricingError::NotFound {
                entity: "version",
                id: version_id,
            })?;
        if version.status == VersionStatus::Draft {
            Ok(())
        } else {
            Err(PricingError::StaleVersion {
                id: version_id,
                status: version.status.to_string(),
            })
        }
    }

    async fn next_version_id(&self) -> Result<u64> {
        Ok(self
            .versions
            .all()
            .await?
            .iter()
            .map(|v| v.id)
            .max()
            .unwrap_or(0)
            + 1)
    }

    async fn next_config_id(&self) -> Result<u64> {
        let mut max_id = 0;
        for version in self.versions.all().await? {
            for config in self.configs.for_version(version.id).await? {
                max_id = max_id.max(config.id);
            }
        }
        Ok(max_id + 1)
    }
}
