use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability_scanner::has_consecutive_run;
use crate::facility::FacilityRecord;

/// 3 out of 4 is a rating of "good"
const GOOD_RECEPTION_RATING: f64 = 3.0;

/// Campsite type that indicates wired service
const ELECTRIC_CAMPSITE_TYPE: &str = "CABIN ELECTRIC";

/// Amenity entries that indicate wired service
const ELECTRIC_AMENITIES: [&str; 2] = ["Electricity", "Cabin Electricity"];

/// `Site Access` values that indicate you can drive to the tower; the data
/// entry isn't consistent about the hyphen
const DRIVE_IN_SITE_ACCESS: [&str; 2] = ["Drive-In", "Drive In"];

/// The user's current filter selections. The UI layer owns the only mutable
/// copy and replaces it wholesale on each change; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum run of bookable nights; zero disables the run check
    pub consecutive_nights: u32,
    pub after_date: Option<NaiveDate>,
    pub before_date: Option<NaiveDate>,
    /// Empty string means any carrier is fine
    pub cell_carrier: String,
    pub electricity: bool,
    pub car_access: bool,
    pub accessible: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            consecutive_nights: 1,
            after_date: None,
            before_date: None,
            cell_carrier: String::new(),
            electricity: false,
            car_access: false,
            accessible: false,
        }
    }
}

/// Decides whether a facility should be highlighted under the current
/// filters. Every sub-check must pass; each is vacuously true while its
/// filter is unset, and fails closed when the facility lacks the data the
/// check needs.
pub fn matches(facility: &FacilityRecord, criteria: &FilterCriteria) -> bool {
    check_dates(facility, criteria)
        && check_cell_carrier(facility, &criteria.cell_carrier)
        && check_electricity(facility, criteria.electricity)
        && check_car_access(facility, criteria.car_access)
        && check_accessible(facility, criteria.accessible)
}

fn check_dates(facility: &FacilityRecord, criteria: &FilterCriteria) -> bool {
    has_consecutive_run(
        facility.availability.as_ref(),
        criteria.consecutive_nights,
        criteria.after_date,
        criteria.before_date,
    )
}

fn check_cell_carrier(facility: &FacilityRecord, cell_carrier: &str) -> bool {
    if cell_carrier.is_empty() {
        return true;
    }

    match facility.carrier_rating(cell_carrier) {
        Some(rating) => rating >= GOOD_RECEPTION_RATING,
        None => false,
    }
}

fn check_electricity(facility: &FacilityRecord, electricity: bool) -> bool {
    if !electricity {
        return true;
    }

    if facility.metadata.campsite_type.as_deref() == Some(ELECTRIC_CAMPSITE_TYPE) {
        return true;
    }
    ELECTRIC_AMENITIES
        .iter()
        .any(|amenity| facility.has_amenity(amenity))
}

fn check_car_access(facility: &FacilityRecord, car_access: bool) -> bool {
    if !car_access {
        return true;
    }

    // Accessible sites are assumed reachable by car even when the site
    // access attribute is missing
    if facility.is_accessible() {
        return true;
    }
    match facility.site_access() {
        Some(access) => DRIVE_IN_SITE_ACCESS.contains(&access),
        None => false,
    }
}

fn check_accessible(facility: &FacilityRecord, accessible: bool) -> bool {
    !accessible || facility.is_accessible()
}
