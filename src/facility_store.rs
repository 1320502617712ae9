use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::facility::FacilityRecord;

/// Shared, swap-on-refresh snapshot of every known facility.
///
/// Handlers clone the inner `Arc`, so a scheduled refresh never mutates
/// data an in-flight request is reading; it replaces the whole set at once.
#[derive(Clone)]
pub struct FacilityStore {
    inner: Arc<RwLock<Snapshot>>,
}

struct Snapshot {
    facilities: Arc<Vec<FacilityRecord>>,
    fetched_at: Option<DateTime<Utc>>,
}

impl FacilityStore {
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Snapshot {
                facilities: Arc::new(Vec::new()),
                fetched_at: None,
            })),
        }
    }

    pub fn with_facilities(facilities: Vec<FacilityRecord>) -> Self {
        let store = Self::empty();
        store.replace(facilities);
        store
    }

    /// Wholesale-replaces the snapshot
    pub fn replace(&self, facilities: Vec<FacilityRecord>) {
        let mut snapshot = self.inner.write().expect("facility store lock poisoned");
        snapshot.facilities = Arc::new(facilities);
        snapshot.fetched_at = Some(Utc::now());
    }

    pub fn facilities(&self) -> Arc<Vec<FacilityRecord>> {
        self.inner
            .read()
            .expect("facility store lock poisoned")
            .facilities
            .clone()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .expect("facility store lock poisoned")
            .fetched_at
    }

    pub fn len(&self) -> usize {
        self.facilities().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, facility_id: u64) -> Option<FacilityRecord> {
        self.facilities()
            .iter()
            .find(|facility| facility.metadata.facility_id == facility_id)
            .cloned()
    }

    /// Every carrier with at least one coverage rating, sorted and deduped;
    /// feeds the carrier dropdown
    pub fn cell_carriers(&self) -> Vec<String> {
        let facilities = self.facilities();
        let mut carriers: Vec<String> = facilities
            .iter()
            .filter_map(|facility| facility.cell_coverage.as_ref())
            .flatten()
            .map(|coverage| coverage.carrier.clone())
            .collect();
        carriers.sort();
        carriers.dedup();
        carriers
    }

    /// Upper bound for the consecutive-nights selector: the largest
    /// `maxConsecutiveStay` across facilities that declare one
    pub fn max_consecutive_nights(&self) -> u32 {
        self.facilities()
            .iter()
            .filter_map(|facility| facility.max_consecutive_stay())
            .max()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{CellCoverage, FacilityMetadata, FacilityRules, StayRule};

    fn facility(id: u64, carriers: &[(&str, f64)], max_stay: Option<u32>) -> FacilityRecord {
        FacilityRecord {
            metadata: FacilityMetadata {
                facility_name: format!("FACILITY {}", id),
                facility_id: id,
                facility_latitude: 45.0,
                facility_longitude: -115.0,
                facility_rules: max_stay.map(|value| FacilityRules {
                    max_consecutive_stay: Some(StayRule { value }),
                }),
                campsite_type: None,
                is_accessible: None,
            },
            attributes: None,
            cell_coverage: if carriers.is_empty() {
                None
            } else {
                Some(
                    carriers
                        .iter()
                        .map(|(carrier, rating)| CellCoverage {
                            carrier: carrier.to_string(),
                            average_rating: *rating,
                            number_of_ratings: None,
                        })
                        .collect(),
                )
            },
            rate: None,
            availability: None,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = FacilityStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.fetched_at().is_none());
        assert!(store.cell_carriers().is_empty());
        assert_eq!(store.max_consecutive_nights(), 1);
        assert!(store.find(1).is_none());
    }

    #[test]
    fn test_replace_swaps_the_whole_snapshot() {
        let store = FacilityStore::with_facilities(vec![facility(1, &[], None)]);
        assert_eq!(store.len(), 1);
        assert!(store.fetched_at().is_some());

        let held = store.facilities();
        store.replace(vec![facility(2, &[], None), facility(3, &[], None)]);

        // The old handout is untouched by the swap
        assert_eq!(held.len(), 1);
        assert_eq!(store.len(), 2);
        assert!(store.find(1).is_none());
        assert!(store.find(3).is_some());
    }

    #[test]
    fn test_cell_carriers_sorted_and_deduped() {
        let store = FacilityStore::with_facilities(vec![
            facility(1, &[("Verizon", 3.1), ("AT&T", 2.0)], None),
            facility(2, &[("Verizon", 1.5)], None),
            facility(3, &[], None),
        ]);
        assert_eq!(store.cell_carriers(), vec!["AT&T", "Verizon"]);
    }

    #[test]
    fn test_max_consecutive_nights() {
        let store = FacilityStore::with_facilities(vec![
            facility(1, &[], Some(5)),
            facility(2, &[], Some(14)),
            facility(3, &[], None),
        ]);
        assert_eq!(store.max_consecutive_nights(), 14);
    }
}
