use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warp::{reject, Rejection, Reply};

use crate::date_parser::parse_day;
use crate::facility_store::FacilityStore;
use crate::filter_engine::{self, FilterCriteria};
use crate::warp_helpers::SnapshotUnavailableError;

/// Raw filter selections from the query string. Values that fail to parse
/// relax the corresponding filter instead of failing the request, so a
/// half-typed date never blanks the map.
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub consecutive_nights: Option<String>,
    pub after_date: Option<String>,
    pub before_date: Option<String>,
    pub cell_carrier: Option<String>,
    pub electricity: Option<String>,
    pub car_access: Option<String>,
    pub accessible: Option<String>,
}

impl MatchQuery {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            // An unparseable night count can't filter anything out; zero
            // disables the run check entirely
            consecutive_nights: match self.consecutive_nights.as_deref() {
                None => 1,
                Some(raw) => raw.parse().unwrap_or(0),
            },
            after_date: self.after_date.as_deref().and_then(parse_bound),
            before_date: self.before_date.as_deref().and_then(parse_bound),
            cell_carrier: self.cell_carrier.unwrap_or_default(),
            electricity: parse_flag(self.electricity.as_deref()),
            car_access: parse_flag(self.car_access.as_deref()),
            accessible: parse_flag(self.accessible.as_deref()),
        }
    }
}

// A bound that fails date validation is treated as unset
fn parse_bound(raw: &str) -> Option<chrono::NaiveDate> {
    match parse_day(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("Ignoring {}", e);
            None
        }
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("true") | Some("1"))
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    /// Per-facility highlight decision, keyed by facility ID
    pub matches: BTreeMap<u64, bool>,
    pub total: usize,
    pub matched: usize,
}

/// Evaluates the filter predicate once per facility; the frontend uses the
/// result to pick each marker's visual state
pub async fn facility_matches(
    query: MatchQuery,
    store: FacilityStore,
) -> Result<impl Reply, Rejection> {
    if store.is_empty() {
        return Err(reject::custom(SnapshotUnavailableError));
    }

    let criteria = query.into_criteria();
    let facilities = store.facilities();

    let mut decisions = BTreeMap::new();
    let mut matched = 0;
    for facility in facilities.iter() {
        let is_match = filter_engine::matches(facility, &criteria);
        if is_match {
            matched += 1;
        }
        decisions.insert(facility.metadata.facility_id, is_match);
    }

    Ok(warp::reply::json(&MatchesResponse {
        total: decisions.len(),
        matched,
        matches: decisions,
    }))
}
