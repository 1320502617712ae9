use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::date_parser::parse_day;

/// Decides whether an availability map contains a run of at least `nights`
/// consecutive bookable days between the optional inclusive bounds.
///
/// A `None` map means the facility isn't taking reservations and never
/// matches. A `nights` of zero can't filter anything out and matches any
/// non-null map regardless of the bounds.
pub fn has_consecutive_run(
    availability: Option<&BTreeMap<String, bool>>,
    nights: u32,
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
) -> bool {
    let Some(days) = availability else {
        return false;
    };

    if nights == 0 {
        return true;
    }

    let mut consecutive_seen: u32 = 0;
    for (day, &is_day_available) in days {
        let Ok(date) = parse_day(day) else {
            continue;
        };

        // TODO: the leading bound can read one day off, because skipped
        // days never reset a run that started before the bound; the fix
        // has been tricky, and the tests below pin the current behavior
        if after.is_some_and(|bound| date < bound) {
            continue;
        }
        if before.is_some_and(|bound| date > bound) {
            break;
        }

        if is_day_available {
            consecutive_seen += 1;
        } else {
            consecutive_seen = 0;
        }

        if consecutive_seen >= nights {
            return true;
        }
    }

    false
}
