use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One campable lookout tower, as shipped in the availability snapshot.
/// Records are immutable for the lifetime of a snapshot; a refresh replaces
/// the whole set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub metadata: FacilityMetadata,
    #[serde(default)]
    pub attributes: Option<FacilityAttributes>,
    #[serde(default)]
    pub cell_coverage: Option<Vec<CellCoverage>>,
    /// Nightly cost; present only in early snapshot variants and unused by
    /// the current filters
    #[serde(default)]
    pub rate: Option<f64>,
    /// Per-day "is this night bookable" map, keyed `yyyy-MM-dd`. `None` or
    /// empty means the facility isn't currently taking reservations.
    #[serde(default)]
    pub availability: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMetadata {
    pub facility_name: String,
    pub facility_id: u64,
    pub facility_latitude: f64,
    pub facility_longitude: f64,
    #[serde(default)]
    pub facility_rules: Option<FacilityRules>,
    /// `"CABIN ELECTRIC"` indicates wired service
    #[serde(default)]
    pub campsite_type: Option<String>,
    #[serde(default)]
    pub is_accessible: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRules {
    #[serde(rename = "maxConsecutiveStay", default)]
    pub max_consecutive_stay: Option<StayRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayRule {
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellCoverage {
    pub carrier: String,
    /// 0-4 scale aggregated from reviewer reports
    pub average_rating: f64,
    #[serde(default)]
    pub number_of_ratings: Option<u32>,
}

/// Site attribute keys the filters recognize today. Snapshots carry many
/// more; unrecognized keys are preserved in `details` but ignored.
pub const SITE_ACCESS_DETAIL: &str = "Site Access";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityAttributes {
    #[serde(default)]
    pub details: BTreeMap<String, AttributeValue>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl FacilityAttributes {
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        match self.details.get(key)? {
            AttributeValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Attribute values arrive as loosely-typed scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FacilityRecord {
    /// A facility with no availability data at all is most likely closed,
    /// which is a different situation than "open but fully booked"
    pub fn is_likely_closed(&self) -> bool {
        match &self.availability {
            None => true,
            Some(days) => days.is_empty(),
        }
    }

    pub fn available_night_count(&self) -> usize {
        self.availability
            .as_ref()
            .map(|days| days.values().filter(|&&bookable| bookable).count())
            .unwrap_or(0)
    }

    pub fn max_consecutive_stay(&self) -> Option<u32> {
        self.metadata
            .facility_rules
            .as_ref()?
            .max_consecutive_stay
            .as_ref()
            .map(|rule| rule.value)
    }

    pub fn carrier_rating(&self, carrier: &str) -> Option<f64> {
        self.cell_coverage
            .as_ref()?
            .iter()
            .find(|coverage| coverage.carrier == carrier)
            .map(|coverage| coverage.average_rating)
    }

    pub fn site_access(&self) -> Option<&str> {
        self.attributes.as_ref()?.detail_str(SITE_ACCESS_DETAIL)
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.attributes
            .as_ref()
            .map(|attributes| attributes.amenities.iter().any(|entry| entry == amenity))
            .unwrap_or(false)
    }

    pub fn is_accessible(&self) -> bool {
        self.metadata.is_accessible.unwrap_or(false)
    }
}
