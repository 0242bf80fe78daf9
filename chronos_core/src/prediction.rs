//! Cycle statistics and forward predictions.
//!
//! All functions here are pure: the same history always yields the same
//! averages and dates.

use crate::calendar::{add_days, difference_in_days, sub_days};
use crate::{
    CycleRecord, DateRange, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH, MAX_CYCLE_LENGTH,
};
use chrono::NaiveDate;

/// Days between predicted ovulation and the following period
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Fertile days counted before predicted ovulation
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;

/// Fertile days counted after predicted ovulation
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Average start-to-start cycle length.
///
/// The most recent cycle is treated as possibly ongoing and left out: the
/// start dates of `history[..len - 1]` give `len - 2` intervals, and their sum
/// is divided by `len - 2`. Histories of two cycles or fewer therefore have
/// nothing to average and get the 28 day default.
///
/// Intervals are taken in insertion order. If that order is not chronological
/// the mean can come out non-positive, in which case the default is used too.
/// Long gaps between recorded cycles are capped at [`MAX_CYCLE_LENGTH`].
pub fn calculate_average_cycle_length(history: &[CycleRecord]) -> u32 {
    if history.len() <= 2 {
        return DEFAULT_CYCLE_LENGTH;
    }

    let completed = &history[..history.len() - 1];
    let sum: i64 = completed
        .windows(2)
        .map(|pair| difference_in_days(pair[1].start_date, pair[0].start_date))
        .sum();
    let divisor = (history.len() - 2) as i64;

    let average = round_half_up(sum, divisor);
    if average < 1 {
        tracing::warn!(
            "Cycle history is not in date order (mean interval {} days), using default of {}",
            average,
            DEFAULT_CYCLE_LENGTH
        );
        return DEFAULT_CYCLE_LENGTH;
    }
    if average > i64::from(MAX_CYCLE_LENGTH) {
        tracing::warn!(
            "Mean interval of {} days exceeds {}, capping",
            average,
            MAX_CYCLE_LENGTH
        );
        return MAX_CYCLE_LENGTH;
    }

    u32::try_from(average).unwrap_or(DEFAULT_CYCLE_LENGTH)
}

/// Mean period length across every recorded cycle
pub fn calculate_average_period_length(history: &[CycleRecord]) -> u32 {
    if history.is_empty() {
        return DEFAULT_PERIOD_LENGTH;
    }

    let sum: i64 = history.iter().map(|c| i64::from(c.period_length)).sum();
    let average = round_half_up(sum, history.len() as i64);

    u32::try_from(average).unwrap_or(DEFAULT_PERIOD_LENGTH)
}

/// Next period start: last start plus the average cycle length
pub fn predict_next_period(last_period_start: NaiveDate, average_cycle_length: u32) -> NaiveDate {
    add_days(last_period_start, i64::from(average_cycle_length))
}

/// Ovulation falls a fixed luteal phase before the next period
pub fn predict_ovulation(next_period: NaiveDate) -> NaiveDate {
    sub_days(next_period, LUTEAL_PHASE_DAYS)
}

/// Fertile window: five days before ovulation through the day after
pub fn calculate_fertile_window(ovulation: NaiveDate) -> DateRange {
    DateRange {
        start: sub_days(ovulation, FERTILE_DAYS_BEFORE_OVULATION),
        end: add_days(ovulation, FERTILE_DAYS_AFTER_OVULATION),
    }
}

/// The `period_length` consecutive days starting at `start`
pub fn generate_period_dates(start: NaiveDate, period_length: u32) -> Vec<NaiveDate> {
    (0..i64::from(period_length))
        .map(|offset| add_days(start, offset))
        .collect()
}

/// Integer division rounding to nearest, halves towards +inf.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}
