use serde::{Deserialize, Serialize};

/// Output of the external Geography collaborator for one lat/lng point.
///
/// `utc_offset_min` is the location's offset from UTC in minutes; time-of-day
/// windows (time multipliers, zone fee schedules) evaluate in local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub country_id: u32,
    pub region_id: u32,
    pub city_id: u32,
    pub zone_id: Option<u32>,
    pub utc_offset_min: i32,
}

/// Geographic scope of a config or multiplier row. All fields optional; an
/// all-`None` scope is global.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoScope {
    #[serde(default)]
    pub country_id: Option<u32>,
    #[serde(default)]
    pub region_id: Option<u32>,
    #[serde(default)]
    pub city_id: Option<u32>,
    #[serde(default)]
    pub zone_id: Option<u32>,
}

impl GeoScope {
    pub const GLOBAL: Self = Self {
        country_id: None,
        region_id: None,
        city_id: None,
        zone_id: None,
    };

    pub fn country(id: u32) -> Self {
        Self {
            country_id: Some(id),
            ..Self::GLOBAL
        }
    }

    pub fn region(id: u32) -> Self {
        Self {
            region_id: Some(id),
            ..Self::GLOBAL
        }
    }

    pub fn city(id: u32) -> Self {
        Self {
            city_id: Some(id),
            ..Self::GLOBAL
        }
    }

    pub fn zone(id: u32) -> Self {
        Self {
            zone_id: Some(id),
            ..Self::GLOBAL
        }
    }

    /// Specificity rank: zone(4) > city(3) > region(2) > country(1) > global(0).
    ///
    /// Evaluated as a fixed narrowest-first table, first set level wins.
    pub fn specificity(&self) -> u8 {
        [
            (self.zone_id.is_some(), 4),
            (self.city_id.is_some(), 3),
            (self.region_id.is_some(), 2),
            (self.country_id.is_some(), 1),
        ]
        .iter()
        .find(|(set, _)| *set)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
    }

    /// True when every constrained level of this scope matches the location.
    pub fn matches(&self, location: &ResolvedLocation) -> bool {
        let zone_ok = match self.zone_id {
            Some(zone) => location.zone_id == Some(zone),
            None => true,
        };
        zone_ok
            && self.city_id.is_none_or(|id| id == location.city_id)
            && self.region_id.is_none_or(|id| id == location.region_id)
            && self.country_id.is_none_or(|id| id == location.country_id)
    }
}
