//! Core domain types for HerChronos.
//!
//! This module defines:
//! - Symptom and mood observations
//! - Cycle records
//! - The user profile aggregate and its partial-update form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Default cycle length used when history is too short to average
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Default period length used when there is no history
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Longest cycle or period, in days, a profile may record
pub const MAX_CYCLE_LENGTH: u32 = 365;

// ============================================================================
// Observations
// ============================================================================

/// Severity of a recorded symptom or mood (1 = mild, 3 = severe)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum Intensity {
    Mild,
    Moderate,
    Severe,
}

impl TryFrom<u8> for Intensity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Intensity::Mild),
            2 => Ok(Intensity::Moderate),
            3 => Ok(Intensity::Severe),
            other => Err(Error::InvalidInput(format!(
                "intensity must be 1, 2 or 3 (got {})",
                other
            ))),
        }
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        match value {
            Intensity::Mild => 1,
            Intensity::Moderate => 2,
            Intensity::Severe => 3,
        }
    }
}

/// Kinds of symptom a user can record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SymptomKind {
    Cramps,
    Headache,
    Bloating,
    BackPain,
    BreastTenderness,
    Acne,
    Fatigue,
    Cravings,
    Nausea,
    Spotting,
    Insomnia,
    Other,
}

impl SymptomKind {
    pub const ALL: [SymptomKind; 12] = [
        SymptomKind::Cramps,
        SymptomKind::Headache,
        SymptomKind::Bloating,
        SymptomKind::BackPain,
        SymptomKind::BreastTenderness,
        SymptomKind::Acne,
        SymptomKind::Fatigue,
        SymptomKind::Cravings,
        SymptomKind::Nausea,
        SymptomKind::Spotting,
        SymptomKind::Insomnia,
        SymptomKind::Other,
    ];

    /// Wire name, as used in snapshots and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomKind::Cramps => "cramps",
            SymptomKind::Headache => "headache",
            SymptomKind::Bloating => "bloating",
            SymptomKind::BackPain => "backPain",
            SymptomKind::BreastTenderness => "breastTenderness",
            SymptomKind::Acne => "acne",
            SymptomKind::Fatigue => "fatigue",
            SymptomKind::Cravings => "cravings",
            SymptomKind::Nausea => "nausea",
            SymptomKind::Spotting => "spotting",
            SymptomKind::Insomnia => "insomnia",
            SymptomKind::Other => "other",
        }
    }
}

impl fmt::Display for SymptomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymptomKind {
    type Err = Error;

    /// Case-insensitive; accepts `back-pain` / `back_pain` as well as `backPain`
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_kind(s);
        SymptomKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize_kind(kind.as_str()) == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown symptom: {}", s)))
    }
}

/// Kinds of mood a user can record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MoodKind {
    Happy,
    Sad,
    Irritated,
    Anxious,
    Energetic,
    Tired,
    Emotional,
    Neutral,
}

impl MoodKind {
    pub const ALL: [MoodKind; 8] = [
        MoodKind::Happy,
        MoodKind::Sad,
        MoodKind::Irritated,
        MoodKind::Anxious,
        MoodKind::Energetic,
        MoodKind::Tired,
        MoodKind::Emotional,
        MoodKind::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodKind::Happy => "happy",
            MoodKind::Sad => "sad",
            MoodKind::Irritated => "irritated",
            MoodKind::Anxious => "anxious",
            MoodKind::Energetic => "energetic",
            MoodKind::Tired => "tired",
            MoodKind::Emotional => "emotional",
            MoodKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_kind(s);
        MoodKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown mood: {}", s)))
    }
}

fn normalize_kind(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A dated symptom observation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SymptomKind,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A dated mood observation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MoodKind,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Cycles
// ============================================================================

/// Inclusive calendar date range
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        crate::calendar::is_within_interval(date, self)
    }
}

/// One recorded menstrual cycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub length: u32,
    pub period_length: u32,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A cycle as submitted by the user, before it is given an id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCycle {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub length: u32,
    pub period_length: u32,
    pub symptoms: Vec<SymptomEntry>,
    pub moods: Vec<MoodEntry>,
    pub notes: Option<String>,
}

impl NewCycle {
    /// A cycle with no observations attached yet
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, length: u32, period_length: u32) -> Self {
        Self {
            start_date,
            end_date,
            length,
            period_length,
            symptoms: Vec::new(),
            moods: Vec::new(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach a freshly generated id
    pub fn into_record(self) -> CycleRecord {
        CycleRecord {
            id: Uuid::new_v4(),
            start_date: self.start_date,
            end_date: self.end_date,
            length: self.length,
            period_length: self.period_length,
            symptoms: self.symptoms,
            moods: self.moods,
            notes: self.notes,
        }
    }
}

impl CycleRecord {
    /// Date order and period-within-cycle checks
    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(Error::InvalidProfile(format!(
                "cycle {} ends ({}) before it starts ({})",
                self.id, self.end_date, self.start_date
            )));
        }
        if self.length > MAX_CYCLE_LENGTH {
            return Err(Error::InvalidProfile(format!(
                "cycle {} has length {} (at most {} days)",
                self.id, self.length, MAX_CYCLE_LENGTH
            )));
        }
        if self.period_length > self.length {
            return Err(Error::InvalidProfile(format!(
                "cycle {} has period length {} longer than cycle length {}",
                self.id, self.period_length, self.length
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// The single per-installation aggregate: history plus derived predictions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub average_cycle_length: u32,
    pub average_period_length: u32,
    pub cycle_history: Vec<CycleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_period_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_period_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_period_prediction: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ovulation_prediction: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertile_days: Option<DateRange>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            average_cycle_length: DEFAULT_CYCLE_LENGTH,
            average_period_length: DEFAULT_PERIOD_LENGTH,
            cycle_history: Vec::new(),
            last_period_start: None,
            last_period_end: None,
            next_period_prediction: None,
            ovulation_prediction: None,
            fertile_days: None,
        }
    }
}

impl UserProfile {
    /// The cycle new moods and symptoms are attached to
    pub fn current_cycle(&self) -> Option<&CycleRecord> {
        self.cycle_history.last()
    }

    /// Check record-level invariants that serde's shape check cannot express
    pub fn validate(&self) -> Result<()> {
        check_average("averageCycleLength", self.average_cycle_length)?;
        check_average("averagePeriodLength", self.average_period_length)?;

        let mut seen_ids = HashSet::new();
        for cycle in &self.cycle_history {
            cycle.validate()?;
            if !seen_ids.insert(cycle.id) {
                return Err(Error::InvalidProfile(format!(
                    "duplicate cycle id {}",
                    cycle.id
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.last_period_start, self.last_period_end) {
            if end < start {
                return Err(Error::InvalidProfile(format!(
                    "lastPeriodEnd ({}) is before lastPeriodStart ({})",
                    end, start
                )));
            }
        }

        Ok(())
    }
}

fn check_average(field: &str, days: u32) -> Result<()> {
    if !(1..=MAX_CYCLE_LENGTH).contains(&days) {
        return Err(Error::InvalidProfile(format!(
            "{} must be between 1 and {} days, got {}",
            field, MAX_CYCLE_LENGTH, days
        )));
    }
    Ok(())
}

/// Partial update of a profile's raw (non-derived) fields.
///
/// `None` leaves a field untouched. For the optional dates, `Some(None)`
/// clears the field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub average_cycle_length: Option<u32>,
    pub average_period_length: Option<u32>,
    pub cycle_history: Option<Vec<CycleRecord>>,
    pub last_period_start: Option<Option<NaiveDate>>,
    pub last_period_end: Option<Option<NaiveDate>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge into `profile`
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(length) = self.average_cycle_length {
            profile.average_cycle_length = length;
        }
        if let Some(length) = self.average_period_length {
            profile.average_period_length = length;
        }
        if let Some(history) = self.cycle_history {
            profile.cycle_history = history;
        }
        if let Some(start) = self.last_period_start {
            profile.last_period_start = start;
        }
        if let Some(end) = self.last_period_end {
            profile.last_period_end = end;
        }
    }
}
