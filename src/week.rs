//! Week arithmetic anchored to the dining hall's local timezone.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// All "what week is it" and staleness decisions use this timezone.
pub const REFERENCE_TZ: Tz = chrono_tz::America::New_York;

#[must_use]
pub fn today_local() -> NaiveDate {
    Utc::now().with_timezone(&REFERENCE_TZ).date_naive()
}

/// Monday of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday of the week containing `date`.
#[must_use]
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

/// The seven dates of the week containing `date`, Monday first.
pub fn week_dates(date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let start = start_of_week(date);
    (0..7).map(move |offset| start + Duration::days(offset))
}

/// `MM/DD/YYYY`, the format the menu site's `dtdate` parameter expects.
#[must_use]
pub fn dtdate_param(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Current UTC time at second precision, `Z`-suffixed.
#[must_use]
pub fn utc_now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
