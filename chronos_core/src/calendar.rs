//! Calendar-date arithmetic.
//!
//! Everything operates on calendar dates (`NaiveDate`), never on wall-clock
//! instants, so day counts are exact regardless of time zones or DST.

use crate::DateRange;
use chrono::{Datelike, Duration, NaiveDate};

/// Shift `date` forward by `days` (backwards when negative).
///
/// Clamps to the first/last representable date instead of overflowing.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Shift `date` backwards by `days`
pub fn sub_days(date: NaiveDate, days: i64) -> NaiveDate {
    add_days(date, days.saturating_neg())
}

/// Whole calendar days from `b` to `a`; positive when `a` is later
pub fn difference_in_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// Inclusive range test: `start <= date <= end`
pub fn is_within_interval(date: NaiveDate, range: &DateRange) -> bool {
    range.start <= date && date <= range.end
}

/// Same calendar day, ignoring any time-of-day component
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.ordinal() == b.ordinal()
}
