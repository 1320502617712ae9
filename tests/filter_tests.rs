use std::collections::BTreeMap;

use chrono::NaiveDate;

use lookout_hunter::availability_scanner::has_consecutive_run;
use lookout_hunter::facility::{
    AttributeValue, CellCoverage, FacilityAttributes, FacilityMetadata, FacilityRecord,
    SITE_ACCESS_DETAIL,
};
use lookout_hunter::filter_engine::{matches, FilterCriteria};
use lookout_hunter::name_formatter::normalize_facility_name;

fn availability(days: &[(&str, bool)]) -> BTreeMap<String, bool> {
    days.iter()
        .map(|(day, available)| (day.to_string(), *available))
        .collect()
}

fn day(s: &str) -> NaiveDate {
    lookout_hunter::date_parser::parse_day(s).unwrap()
}

fn facility() -> FacilityRecord {
    FacilityRecord {
        metadata: FacilityMetadata {
            facility_name: "SOURDOUGH MTN. LOOKOUT RENTAL".to_string(),
            facility_id: 234247,
            facility_latitude: 48.7122,
            facility_longitude: -121.0035,
            facility_rules: None,
            campsite_type: None,
            is_accessible: Some(false),
        },
        attributes: Some(FacilityAttributes {
            details: BTreeMap::from([(
                SITE_ACCESS_DETAIL.to_string(),
                AttributeValue::Text("Drive-In".to_string()),
            )]),
            amenities: vec![],
        }),
        cell_coverage: Some(vec![CellCoverage {
            carrier: "Verizon".to_string(),
            average_rating: 3.2,
            number_of_ratings: Some(5),
        }]),
        rate: None,
        availability: Some(availability(&[
            ("2024-06-01", true),
            ("2024-06-02", true),
            ("2024-06-03", false),
        ])),
    }
}

#[test]
fn normalization_is_idempotent_across_sample_names() {
    let samples = [
        "SOURDOUGH MTN. LOOKOUT RENTAL",
        "MCGREGOR MOUNTAIN LOOKOUT",
        "MT. HOOD LOOKOUT (SEASONAL)",
        "HORNET LOOKOUT",
        "Green Ridge Lookout",
        "ARID PEAK LOOKOUT",
        "ST. PAUL LOOKOUT RENTAL",
    ];
    for raw in samples {
        let once = normalize_facility_name(raw);
        assert_eq!(once, normalize_facility_name(&once));
    }
}

#[test]
fn run_length_is_monotonic() {
    let days = availability(&[
        ("2024-07-01", true),
        ("2024-07-02", true),
        ("2024-07-03", true),
        ("2024-07-04", false),
        ("2024-07-05", true),
        ("2024-07-06", true),
    ]);
    let bounds = [
        (None, None),
        (Some(day("2024-07-02")), None),
        (None, Some(day("2024-07-05"))),
        (Some(day("2024-07-02")), Some(day("2024-07-06"))),
    ];

    for (after, before) in bounds {
        for nights in 1..=6 {
            if has_consecutive_run(Some(&days), nights, after, before) {
                for shorter in 1..nights {
                    assert!(
                        has_consecutive_run(Some(&days), shorter, after, before),
                        "run of {} exists but run of {} doesn't (after={:?}, before={:?})",
                        nights,
                        shorter,
                        after,
                        before
                    );
                }
            }
        }
    }
}

#[test]
fn closed_facility_fails_closed() {
    for nights in 1..=4 {
        assert!(!has_consecutive_run(
            None,
            nights,
            Some(day("2024-06-01")),
            Some(day("2024-09-01"))
        ));
        assert!(!has_consecutive_run(None, nights, None, None));
    }
}

#[test]
fn unbounded_scan_finds_runs_at_the_boundary() {
    let days = availability(&[
        ("2024-06-01", true),
        ("2024-06-02", true),
        ("2024-06-03", false),
    ]);
    assert!(has_consecutive_run(Some(&days), 2, None, None));
    assert!(!has_consecutive_run(Some(&days), 3, None, None));
}

// Days before the window are skipped, not reset, so the run that started on
// day one can't be completed with only one in-window day
#[test]
fn window_excludes_days_before_the_after_bound() {
    let days = availability(&[
        ("2024-06-01", true),
        ("2024-06-02", true),
        ("2024-06-03", false),
    ]);
    assert!(!has_consecutive_run(
        Some(&days),
        2,
        Some(day("2024-06-02")),
        None
    ));
}

#[test]
fn carrier_rating_threshold_is_three() {
    let mut record = facility();
    let criteria = FilterCriteria {
        cell_carrier: "X".to_string(),
        ..FilterCriteria::default()
    };

    record.cell_coverage = Some(vec![CellCoverage {
        carrier: "X".to_string(),
        average_rating: 2.9,
        number_of_ratings: None,
    }]);
    assert!(!matches(&record, &criteria));

    record.cell_coverage = Some(vec![CellCoverage {
        carrier: "X".to_string(),
        average_rating: 3.0,
        number_of_ratings: None,
    }]);
    assert!(matches(&record, &criteria));
}

#[test]
fn one_failing_predicate_vetoes_the_facility() {
    let record = facility();

    // Everything passes except the ADA requirement
    let mut criteria = FilterCriteria {
        consecutive_nights: 2,
        after_date: Some(day("2024-06-01")),
        before_date: Some(day("2024-06-03")),
        cell_carrier: "Verizon".to_string(),
        car_access: true,
        accessible: true,
        ..FilterCriteria::default()
    };
    assert!(!matches(&record, &criteria));

    criteria.accessible = false;
    assert!(matches(&record, &criteria));
}

#[test]
fn sourdough_normalizes_to_title_case_with_expansion() {
    assert_eq!(
        normalize_facility_name("SOURDOUGH MTN. LOOKOUT RENTAL"),
        "Sourdough Mountain Lookout"
    );
}
