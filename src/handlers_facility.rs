use serde::Serialize;
use warp::{reject, Rejection, Reply};

use crate::date_parser::{format_for_display, parse_day};
use crate::facility::{CellCoverage, FacilityRecord};
use crate::facility_store::FacilityStore;
use crate::name_formatter::normalize_facility_name;
use crate::warp_helpers::{NotFoundError, SnapshotUnavailableError};

const BOOKING_URL_BASE: &str = "https://www.recreation.gov/camping/campgrounds";

#[derive(Debug, Serialize)]
pub struct FacilitySummary {
    pub facility_id: u64,
    /// Normalized display name; the raw snapshot name is only in the detail
    /// view
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub likely_closed: bool,
    pub available_nights: usize,
}

impl FacilitySummary {
    fn from_record(record: &FacilityRecord) -> Self {
        Self {
            facility_id: record.metadata.facility_id,
            name: normalize_facility_name(&record.metadata.facility_name),
            latitude: record.metadata.facility_latitude,
            longitude: record.metadata.facility_longitude,
            likely_closed: record.is_likely_closed(),
            available_nights: record.available_night_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FacilitiesResponse {
    pub facilities: Vec<FacilitySummary>,
    pub total: usize,
}

pub async fn list_facilities(store: FacilityStore) -> Result<impl Reply, Rejection> {
    if store.is_empty() {
        return Err(reject::custom(SnapshotUnavailableError));
    }

    let facilities = store.facilities();
    let summaries: Vec<FacilitySummary> =
        facilities.iter().map(FacilitySummary::from_record).collect();

    Ok(warp::reply::json(&FacilitiesResponse {
        total: summaries.len(),
        facilities: summaries,
    }))
}

#[derive(Debug, Serialize)]
pub struct FacilityDetail {
    pub facility_id: u64,
    pub name: String,
    pub raw_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub likely_closed: bool,
    pub booking_url: String,
    /// Bookable nights in `yyyy-MM-dd` form
    pub available_dates: Vec<String>,
    /// The same nights formatted for the popup, e.g. `June 3 (Tue)`
    pub available_dates_display: Vec<String>,
    pub cell_coverage: Option<Vec<CellCoverage>>,
}

pub async fn get_facility(facility_id: u64, store: FacilityStore) -> Result<impl Reply, Rejection> {
    if store.is_empty() {
        return Err(reject::custom(SnapshotUnavailableError));
    }
    let Some(record) = store.find(facility_id) else {
        return Err(reject::custom(NotFoundError));
    };

    let mut available_dates = Vec::new();
    let mut available_dates_display = Vec::new();
    if let Some(days) = &record.availability {
        for (day, &is_available) in days {
            if !is_available {
                continue;
            }
            if let Ok(date) = parse_day(day) {
                available_dates.push(day.clone());
                available_dates_display.push(format_for_display(date));
            }
        }
    }

    Ok(warp::reply::json(&FacilityDetail {
        facility_id: record.metadata.facility_id,
        name: normalize_facility_name(&record.metadata.facility_name),
        raw_name: record.metadata.facility_name.clone(),
        latitude: record.metadata.facility_latitude,
        longitude: record.metadata.facility_longitude,
        likely_closed: record.is_likely_closed(),
        booking_url: format!("{}/{}", BOOKING_URL_BASE, record.metadata.facility_id),
        available_dates,
        available_dates_display,
        cell_coverage: record.cell_coverage.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct SnapshotMeta {
    pub total_facilities: usize,
    pub cell_carriers: Vec<String>,
    pub consecutive_nights_max: u32,
    pub fetched_at: Option<String>,
}

pub async fn snapshot_meta(store: FacilityStore) -> Result<impl Reply, Rejection> {
    if store.is_empty() {
        return Err(reject::custom(SnapshotUnavailableError));
    }

    Ok(warp::reply::json(&SnapshotMeta {
        total_facilities: store.len(),
        cell_carriers: store.cell_carriers(),
        consecutive_nights_max: store.max_consecutive_nights(),
        fetched_at: store.fetched_at().map(|at| at.to_rfc3339()),
    }))
}
