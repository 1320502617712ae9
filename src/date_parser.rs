use chrono::NaiveDate;

/// Day keys in the availability snapshot are always `yyyy-MM-dd`
const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

/// Parses a snapshot day string. The format is strict: anything that isn't
/// exactly `yyyy-MM-dd`, or that names an impossible calendar date, is
/// rejected rather than coerced.
pub fn parse_day(day: &str) -> Result<NaiveDate, DateError> {
    if !matches_day_pattern(day) {
        return Err(DateError::InvalidDateFormat(day.to_string()));
    }

    NaiveDate::parse_from_str(day, DAY_FORMAT)
        .map_err(|_| DateError::InvalidDateFormat(day.to_string()))
}

// chrono's numeric parsing accepts unpadded digits, so the shape is checked
// up front
fn matches_day_pattern(day: &str) -> bool {
    let bytes = day.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Renders a date the way the popup shows it, e.g. `June 3 (Tue)`
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%B %-d (%a)").to_string()
}
