use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Active,
    Archived,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionStatus::Draft => write!(f, "draft"),
            VersionStatus::Active => write!(f, "active"),
            VersionStatus::Archived => write!(f, "archived"),
        }
    }
}

/// A versioned snapshot of the entire pricing catalog.
///
/// Lifecycle: draft -> active -> archived. At most one version may be active
/// and currently effective; activation archives the previous active version
/// in the same transaction. Configs belonging to a version mutate only while
/// the version is a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfigVersion {
    pub id: u64,
    pub name: String,
    pub status: VersionStatus,
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub effective_until: Option<DateTime<Utc>>,
}

impl PricingConfigVersion {
    pub fn draft(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: VersionStatus::Draft,
            effective_from: None,
            effective_until: None,
        }
    }

    /// True when `now` falls inside the effective window. Open bounds pass.
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.effective_from.is_none_or(|from| from <= now)
            && self.effective_until.is_none_or(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_effective_window() {
        let mut version = PricingConfigVersion::draft(1, "summer");
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        assert!(version.is_effective_at(now));

        version.effective_from = Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        version.effective_until = Some(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert!(version.is_effective_at(now));
        assert!(!version.is_effective_at(Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap()));
        assert!(!version.is_effective_at(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()));
    }
}
