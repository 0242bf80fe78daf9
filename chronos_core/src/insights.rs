//! Read-only views derived from a profile: where today sits in the cycle,
//! how calendar days should be marked, and per-cycle statistics.
//!
//! Nothing here mutates the profile or feeds back into predictions.

use crate::calendar::{add_days, difference_in_days, is_same_day, sub_days};
use crate::prediction::generate_period_dates;
use crate::{CycleRecord, DateRange, Error, MoodKind, Result, SymptomKind, UserProfile};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Last cycle day counted as follicular
const FOLLICULAR_LAST_DAY: u32 = 7;

/// Last cycle day counted as ovulatory
const OVULATORY_LAST_DAY: u32 = 14;

// ============================================================================
// Cycle summary
// ============================================================================

/// Coarse phase of the menstrual cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
    Unknown,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulatory => "Ovulatory",
            CyclePhase::Luteal => "Luteal",
            CyclePhase::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Snapshot of where `today` falls in the current cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSummary {
    pub cycle_day: u32,
    pub phase: CyclePhase,
    pub days_since_last_period: i64,
    pub days_until_next_period: Option<i64>,
}

/// 1-based day of the cycle, wrapping every `average_cycle_length` days
pub fn cycle_day(profile: &UserProfile, today: NaiveDate) -> Option<u32> {
    let last_start = profile.last_period_start?;
    let cycle_length = i64::from(profile.average_cycle_length.max(1));
    let elapsed = difference_in_days(today, last_start);
    u32::try_from(elapsed.rem_euclid(cycle_length) + 1).ok()
}

/// Phase for `today`, or `Unknown` without a recorded period
pub fn current_phase(profile: &UserProfile, today: NaiveDate) -> CyclePhase {
    match cycle_day(profile, today) {
        None => CyclePhase::Unknown,
        Some(day) if day <= profile.average_period_length => CyclePhase::Menstrual,
        Some(day) if day <= FOLLICULAR_LAST_DAY => CyclePhase::Follicular,
        Some(day) if day <= OVULATORY_LAST_DAY => CyclePhase::Ovulatory,
        Some(_) => CyclePhase::Luteal,
    }
}

/// Everything the status view shows; `None` before any period is known
pub fn summarize(profile: &UserProfile, today: NaiveDate) -> Option<CycleSummary> {
    let last_start = profile.last_period_start?;
    let cycle_day = cycle_day(profile, today)?;

    Some(CycleSummary {
        cycle_day,
        phase: current_phase(profile, today),
        days_since_last_period: difference_in_days(today, last_start),
        days_until_next_period: profile
            .next_period_prediction
            .map(|next| difference_in_days(next, today)),
    })
}

/// True on the one day that is `days_before` days ahead of the next period
pub fn reminder_due(profile: &UserProfile, today: NaiveDate, days_before: u32) -> bool {
    profile
        .next_period_prediction
        .map(|next| sub_days(next, i64::from(days_before)) == today)
        .unwrap_or(false)
}

// ============================================================================
// Calendar marking
// ============================================================================

/// How a calendar day is highlighted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayKind {
    Period,
    Ovulation,
    Fertile,
    PredictedPeriod,
    Regular,
}

impl DayKind {
    /// Single-character marker for text calendars
    pub fn marker(&self) -> char {
        match self {
            DayKind::Period => 'P',
            DayKind::Ovulation => 'O',
            DayKind::Fertile => 'F',
            DayKind::PredictedPeriod => 'p',
            DayKind::Regular => '.',
        }
    }
}

/// Dates the calendar needs, computed once per render
struct DayMarks {
    period: Vec<NaiveDate>,
    ovulation: Option<NaiveDate>,
    fertile: Option<DateRange>,
    predicted_period: Option<DateRange>,
}

impl DayMarks {
    fn from_profile(profile: &UserProfile) -> Self {
        let period = profile
            .last_period_start
            .map(|start| generate_period_dates(start, profile.average_period_length))
            .unwrap_or_default();

        let predicted_period = profile.next_period_prediction.and_then(|next| {
            let days = i64::from(profile.average_period_length);
            (days > 0).then(|| DateRange::new(next, add_days(next, days - 1)))
        });

        Self {
            period,
            ovulation: profile.ovulation_prediction,
            fertile: profile.fertile_days,
            predicted_period,
        }
    }

    fn classify(&self, date: NaiveDate) -> DayKind {
        if self.period.contains(&date) {
            DayKind::Period
        } else if self.ovulation.is_some_and(|o| is_same_day(&o, &date)) {
            DayKind::Ovulation
        } else if self.fertile.is_some_and(|range| range.contains(date)) {
            DayKind::Fertile
        } else if self.predicted_period.is_some_and(|range| range.contains(date)) {
            DayKind::PredictedPeriod
        } else {
            DayKind::Regular
        }
    }
}

/// Marking for a single date
pub fn classify_day(profile: &UserProfile, date: NaiveDate) -> DayKind {
    DayMarks::from_profile(profile).classify(date)
}

/// Marking for every day of `year`-`month`
pub fn month_calendar(
    profile: &UserProfile,
    year: i32,
    month: u32,
) -> Result<Vec<(NaiveDate, DayKind)>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidInput(format!("no such month: {}-{:02}", year, month)))?;
    let marks = DayMarks::from_profile(profile);

    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| (d, marks.classify(d)))
        .collect())
}

// ============================================================================
// Statistics
// ============================================================================

/// Observed length of one completed cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleTrend {
    /// 1-based position in the history
    pub number: usize,
    pub start_date: NaiveDate,
    pub length: i64,
    pub period_length: u32,
}

/// Start-to-start length of every cycle that has a successor.
///
/// The latest cycle is still running, so it has no trend entry.
pub fn cycle_trends(history: &[CycleRecord]) -> Vec<CycleTrend> {
    history
        .windows(2)
        .enumerate()
        .map(|(index, pair)| CycleTrend {
            number: index + 1,
            start_date: pair[0].start_date,
            length: difference_in_days(pair[1].start_date, pair[0].start_date),
            period_length: pair[0].period_length,
        })
        .collect()
}

/// Most frequently recorded symptoms across all cycles
pub fn top_symptoms(history: &[CycleRecord], limit: usize) -> Vec<(SymptomKind, usize)> {
    rank(
        history
            .iter()
            .flat_map(|c| c.symptoms.iter().map(|s| s.kind)),
        limit,
    )
}

/// Most frequently recorded moods across all cycles
pub fn top_moods(history: &[CycleRecord], limit: usize) -> Vec<(MoodKind, usize)> {
    rank(
        history.iter().flat_map(|c| c.moods.iter().map(|m| m.kind)),
        limit,
    )
}

/// Count occurrences, most frequent first; ties keep declaration order
fn rank<K: Ord + Copy>(kinds: impl Iterator<Item = K>, limit: usize) -> Vec<(K, usize)> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for kind in kinds {
        *counts.entry(kind).or_insert(0) += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
