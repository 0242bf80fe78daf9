//! Cycle tracker: owner of the session's user profile.
//!
//! Every mutation is one read-modify-write of the whole profile, done under
//! the tracker's mutex together with the persist step, so two callers can
//! never interleave their changes to the cycle history.
//!
//! Persist failures are reported as [`SaveOutcome::Failed`]. The in-memory
//! profile stays authoritative and is not rolled back.

use crate::calendar::{add_days, sub_days};
use crate::engine::{refresh_averages, update_predictions};
use crate::prediction::generate_period_dates;
use crate::store::ProfileStore;
use crate::{
    CycleRecord, MoodEntry, NewCycle, ProfilePatch, Result, SymptomEntry, UserProfile,
    DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH,
};
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Days between today and the last period start of a seeded profile
const SEED_DAYS_SINCE_PERIOD: i64 = 15;

/// Result of writing the profile back to the store
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Change applied and persisted
    Saved,
    /// Change applied in memory only; the store rejected the write
    Failed,
    /// Nothing changed, nothing written
    Skipped,
}

impl SaveOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveOutcome::Failed)
    }
}

struct TrackerState<S> {
    store: S,
    profile: UserProfile,
    loaded: bool,
}

impl<S: ProfileStore> TrackerState<S> {
    fn persist(&mut self) -> SaveOutcome {
        match self.store.save(&self.profile) {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                tracing::warn!("Failed to persist profile: {}. Keeping changes in memory.", e);
                SaveOutcome::Failed
            }
        }
    }

    fn recompute(&mut self) {
        self.profile = update_predictions(self.profile.clone());
    }
}

/// Session-scoped owner of the user profile
pub struct CycleTracker<S: ProfileStore> {
    state: Mutex<TrackerState<S>>,
}

impl<S: ProfileStore> CycleTracker<S> {
    /// Tracker over `store`; holds an empty profile until [`initialize`] runs.
    ///
    /// [`initialize`]: CycleTracker::initialize
    pub fn new(store: S) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                store,
                profile: UserProfile::default(),
                loaded: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState<S>> {
        // Mutations finish building a profile before assigning it, so a
        // poisoned lock still guards a whole one
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the stored profile, or seed one when there is none.
    ///
    /// A store that cannot be read counts as empty. Returns the outcome of
    /// persisting the seed (`Skipped` when a stored profile was found).
    pub fn initialize(&self, today: NaiveDate) -> SaveOutcome {
        let mut state = self.lock();

        let stored = match state.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Unable to load stored profile: {}. Starting from seed data.", e);
                None
            }
        };

        let outcome = match stored {
            Some(profile) => {
                tracing::info!(
                    "Loaded profile with {} cycles",
                    profile.cycle_history.len()
                );
                state.profile = profile;
                SaveOutcome::Skipped
            }
            None => {
                tracing::info!("No stored profile, seeding sample history");
                state.profile = seed_profile(today);
                state.persist()
            }
        };

        state.loaded = true;
        outcome
    }

    /// True until [`initialize`](CycleTracker::initialize) has completed
    pub fn is_loading(&self) -> bool {
        !self.lock().loaded
    }

    /// Copy of the current profile
    pub fn profile(&self) -> UserProfile {
        self.lock().profile.clone()
    }

    /// Merge raw fields into the profile, re-predict and persist.
    ///
    /// Averages are not recomputed from history here; pass them in the patch
    /// if they should change. A patch that would leave the profile invalid is
    /// rejected and nothing changes.
    pub fn update_profile(&self, patch: ProfilePatch) -> Result<SaveOutcome> {
        let mut state = self.lock();

        let mut patched = state.profile.clone();
        patch.apply_to(&mut patched);
        patched.validate()?;

        state.profile = update_predictions(patched);
        Ok(state.persist())
    }

    /// Close out a cycle: it becomes the current cycle and the new anchor
    /// for predictions. Returns the id given to the record.
    ///
    /// A cycle that ends before it starts, or whose period outlasts it, is
    /// rejected and the profile is left as it was.
    pub fn add_cycle(&self, cycle: NewCycle) -> Result<(Uuid, SaveOutcome)> {
        let record = cycle.into_record();
        record.validate()?;
        let id = record.id;

        let mut state = self.lock();
        state.profile.last_period_start = Some(record.start_date);
        state.profile.last_period_end = Some(record.end_date);
        state.profile.cycle_history.push(record);
        refresh_averages(&mut state.profile);
        state.recompute();

        tracing::info!(
            "Added cycle {} (history: {}, avg cycle {}d, avg period {}d)",
            id,
            state.profile.cycle_history.len(),
            state.profile.average_cycle_length,
            state.profile.average_period_length
        );

        Ok((id, state.persist()))
    }

    /// Record a mood against the current cycle. Dropped when there is no cycle.
    pub fn add_mood(&self, mood: MoodEntry) -> SaveOutcome {
        self.append_to_current(|cycle| cycle.moods.push(mood))
    }

    /// Record a symptom against the current cycle. Dropped when there is no cycle.
    pub fn add_symptom(&self, symptom: SymptomEntry) -> SaveOutcome {
        self.append_to_current(|cycle| cycle.symptoms.push(symptom))
    }

    fn append_to_current(&self, append: impl FnOnce(&mut CycleRecord)) -> SaveOutcome {
        let mut state = self.lock();
        match state.profile.cycle_history.last_mut() {
            Some(current) => append(current),
            None => {
                tracing::debug!("No current cycle, observation dropped");
                return SaveOutcome::Skipped;
            }
        }
        state.persist()
    }

    /// Days of the most recent period, sized by the average period length
    pub fn current_period_dates(&self) -> Vec<NaiveDate> {
        let state = self.lock();
        match state.profile.last_period_start {
            Some(start) => generate_period_dates(start, state.profile.average_period_length),
            None => Vec::new(),
        }
    }

    /// The whole profile as pretty-printed JSON
    pub fn export_snapshot(&self) -> Result<String> {
        let profile = self.profile();
        Ok(serde_json::to_string_pretty(&profile)?)
    }

    /// Replace the profile with a snapshot produced by
    /// [`export_snapshot`](CycleTracker::export_snapshot).
    ///
    /// Nothing changes unless the text parses and validates.
    pub fn import_snapshot(&self, text: &str) -> Result<SaveOutcome> {
        let imported: UserProfile = serde_json::from_str(text)?;
        imported.validate()?;
        let imported = update_predictions(imported);

        let mut state = self.lock();
        tracing::info!(
            "Importing snapshot with {} cycles (replacing {})",
            imported.cycle_history.len(),
            state.profile.cycle_history.len()
        );
        state.profile = imported;
        state.loaded = true;
        Ok(state.persist())
    }

    /// Tear down the tracker and hand back its store
    pub fn into_store(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .store
    }
}

/// Sample history for a first run: three regular cycles, the latest
/// starting fifteen days before `today`.
pub fn seed_profile(today: NaiveDate) -> UserProfile {
    let cycle_length = i64::from(DEFAULT_CYCLE_LENGTH);
    let period_length = i64::from(DEFAULT_PERIOD_LENGTH);
    let last_start = sub_days(today, SEED_DAYS_SINCE_PERIOD);

    let cycle_history = (0..3)
        .rev()
        .map(|cycles_ago| {
            let start = sub_days(last_start, cycles_ago * cycle_length);
            NewCycle::new(
                start,
                add_days(start, period_length),
                DEFAULT_CYCLE_LENGTH,
                DEFAULT_PERIOD_LENGTH,
            )
            .into_record()
        })
        .collect();

    update_predictions(UserProfile {
        average_cycle_length: DEFAULT_CYCLE_LENGTH,
        average_period_length: DEFAULT_PERIOD_LENGTH,
        cycle_history,
        last_period_start: Some(last_start),
        last_period_end: Some(add_days(last_start, period_length)),
        ..UserProfile::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::{DateRange, Error, Intensity, MoodKind, SymptomKind};
    use std::sync::Arc;
    use std::thread;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Store whose writes always fail
    struct BrokenStore;

    impl ProfileStore for BrokenStore {
        fn load(&self) -> Result<Option<UserProfile>> {
            Err(Error::Other("store offline".into()))
        }

        fn save(&mut self, _profile: &UserProfile) -> Result<()> {
            Err(Error::Other("store offline".into()))
        }
    }

    fn mood(kind: MoodKind) -> MoodEntry {
        MoodEntry {
            date: date(2024, 1, 3),
            kind,
            intensity: Intensity::Moderate,
            notes: None,
        }
    }

    fn symptom(kind: SymptomKind) -> SymptomEntry {
        SymptomEntry {
            date: date(2024, 1, 2),
            kind,
            intensity: Intensity::Severe,
            notes: Some("woke up with it".into()),
        }
    }

    fn empty_tracker() -> CycleTracker<MemoryStore> {
        CycleTracker::new(MemoryStore::with_profile(UserProfile::default()))
    }

    #[test]
    fn test_initialize_seeds_when_store_empty() {
        crate::logging::init_test();
        let tracker = CycleTracker::new(MemoryStore::new());
        assert!(tracker.is_loading());

        let outcome = tracker.initialize(date(2024, 3, 16));
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(!tracker.is_loading());

        let profile = tracker.profile();
        assert_eq!(profile.cycle_history.len(), 3);
        assert_eq!(profile.last_period_start, Some(date(2024, 3, 1)));
        assert_eq!(profile.last_period_end, Some(date(2024, 3, 6)));
        assert_eq!(profile.cycle_history[0].start_date, date(2024, 1, 5));
        assert_eq!(profile.next_period_prediction, Some(date(2024, 3, 29)));
        assert_eq!(profile.ovulation_prediction, Some(date(2024, 3, 15)));

        let store = tracker.into_store();
        assert_eq!(store.stored(), Some(&profile));
    }

    #[test]
    fn test_initialize_prefers_stored_profile() {
        let stored = update_predictions(UserProfile {
            last_period_start: Some(date(2024, 1, 1)),
            ..UserProfile::default()
        });
        let tracker = CycleTracker::new(MemoryStore::with_profile(stored.clone()));

        assert_eq!(tracker.initialize(date(2024, 6, 1)), SaveOutcome::Skipped);
        assert_eq!(tracker.profile(), stored);
        assert_eq!(tracker.into_store().save_count(), 0);
    }

    #[test]
    fn test_initialize_with_unreadable_store_seeds_in_memory() {
        let tracker = CycleTracker::new(BrokenStore);

        let outcome = tracker.initialize(date(2024, 3, 16));
        assert_eq!(outcome, SaveOutcome::Failed);
        assert!(!tracker.is_loading());
        assert_eq!(tracker.profile().cycle_history.len(), 3);
    }

    #[test]
    fn test_add_cycle_on_empty_history() {
        let tracker = empty_tracker();
        let _ = tracker.initialize(date(2024, 1, 20));

        let (id, outcome) =
            tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);

        let profile = tracker.profile();
        assert_eq!(profile.cycle_history.len(), 1);
        assert_eq!(profile.cycle_history[0].id, id);
        assert_eq!(profile.last_period_start, Some(date(2024, 1, 1)));
        assert_eq!(profile.last_period_end, Some(date(2024, 1, 5)));
        assert_eq!(profile.average_cycle_length, 28);
        assert_eq!(profile.average_period_length, 4);
        assert_eq!(profile.next_period_prediction, Some(date(2024, 1, 29)));
        assert_eq!(
            profile.fertile_days,
            Some(DateRange::new(date(2024, 1, 10), date(2024, 1, 16)))
        );
    }

    #[test]
    fn test_add_cycle_refreshes_averages_and_predictions() {
        let tracker = empty_tracker();
        let _ = tracker.initialize(date(2024, 1, 20));

        for start in [date(2024, 1, 1), date(2024, 1, 31), date(2024, 3, 1)] {
            let _ = tracker.add_cycle(NewCycle::new(start, add_days(start, 6), 30, 6)).unwrap();
        }

        let profile = tracker.profile();
        assert_eq!(profile.average_cycle_length, 30);
        assert_eq!(profile.average_period_length, 6);
        assert_eq!(profile.last_period_start, Some(date(2024, 3, 1)));
        assert_eq!(profile.next_period_prediction, Some(date(2024, 3, 31)));
    }

    #[test]
    fn test_add_cycle_rejects_invalid_record() {
        let tracker = empty_tracker();
        let before = tracker.profile();

        let inverted = tracker.add_cycle(NewCycle::new(date(2024, 1, 5), date(2024, 1, 1), 28, 4));
        assert!(matches!(inverted, Err(Error::InvalidProfile(_))));

        let overlong = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 3, 4));
        assert!(overlong.is_err());

        assert_eq!(tracker.profile(), before);
        assert_eq!(tracker.into_store().save_count(), 0);
    }

    #[test]
    fn test_add_cycle_ids_are_unique() {
        let tracker = empty_tracker();
        let (a, _) = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();
        let (b, _) = tracker.add_cycle(NewCycle::new(date(2024, 1, 29), date(2024, 2, 2), 28, 4)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mood_and_symptom_dropped_on_empty_history() {
        let tracker = empty_tracker();
        let _ = tracker.initialize(date(2024, 1, 20));
        let before = tracker.profile();

        assert_eq!(tracker.add_mood(mood(MoodKind::Sad)), SaveOutcome::Skipped);
        assert_eq!(
            tracker.add_symptom(symptom(SymptomKind::Cramps)),
            SaveOutcome::Skipped
        );
        assert_eq!(tracker.profile(), before);
        assert_eq!(tracker.into_store().save_count(), 0);
    }

    #[test]
    fn test_observations_append_to_current_cycle_in_order() {
        let tracker = empty_tracker();
        let _ = tracker.add_cycle(NewCycle::new(date(2023, 12, 4), date(2023, 12, 8), 28, 4)).unwrap();
        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();
        let before = tracker.profile();

        assert_eq!(tracker.add_mood(mood(MoodKind::Happy)), SaveOutcome::Saved);
        assert_eq!(tracker.add_mood(mood(MoodKind::Tired)), SaveOutcome::Saved);
        assert_eq!(
            tracker.add_symptom(symptom(SymptomKind::Headache)),
            SaveOutcome::Saved
        );

        let profile = tracker.profile();
        assert!(profile.cycle_history[0].moods.is_empty());
        let current = &profile.cycle_history[1];
        let kinds: Vec<_> = current.moods.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MoodKind::Happy, MoodKind::Tired]);
        assert_eq!(current.symptoms[0].kind, SymptomKind::Headache);

        // Observations never move predictions
        assert_eq!(profile.next_period_prediction, before.next_period_prediction);
        assert_eq!(profile.average_cycle_length, before.average_cycle_length);
    }

    #[test]
    fn test_update_profile_repredicts_without_touching_averages() {
        let tracker = empty_tracker();
        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();

        let outcome = tracker
            .update_profile(ProfilePatch {
                average_cycle_length: Some(32),
                last_period_start: Some(Some(date(2024, 2, 1))),
                last_period_end: Some(Some(date(2024, 2, 5))),
                ..ProfilePatch::default()
            })
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);

        let profile = tracker.profile();
        assert_eq!(profile.average_cycle_length, 32);
        assert_eq!(profile.average_period_length, 4);
        assert_eq!(profile.next_period_prediction, Some(date(2024, 3, 4)));
    }

    #[test]
    fn test_update_profile_rejects_out_of_range_averages() {
        let store = MemoryStore::new();
        let tracker = CycleTracker::new(store);
        assert_eq!(tracker.initialize(date(2024, 3, 16)), SaveOutcome::Saved);
        let before = tracker.profile();

        let result = tracker.update_profile(ProfilePatch {
            average_cycle_length: Some(100_000_000),
            ..ProfilePatch::default()
        });
        assert!(matches!(result, Err(Error::InvalidProfile(_))));

        let result = tracker.update_profile(ProfilePatch {
            average_period_length: Some(4_000_000_000),
            ..ProfilePatch::default()
        });
        assert!(matches!(result, Err(Error::InvalidProfile(_))));

        assert_eq!(tracker.profile(), before);
        assert_eq!(tracker.into_store().save_count(), 1);
    }

    #[test]
    fn test_update_profile_rejects_end_before_start() {
        let tracker = empty_tracker();
        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();

        let result = tracker.update_profile(ProfilePatch {
            last_period_start: Some(Some(date(2024, 2, 1))),
            ..ProfilePatch::default()
        });
        assert!(matches!(result, Err(Error::InvalidProfile(_))));
        assert_eq!(tracker.profile().last_period_start, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_clearing_last_start_clears_predictions() {
        let tracker = empty_tracker();
        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();

        tracker
            .update_profile(ProfilePatch {
                last_period_start: Some(None),
                ..ProfilePatch::default()
            })
            .unwrap();

        let profile = tracker.profile();
        assert!(profile.next_period_prediction.is_none());
        assert!(profile.ovulation_prediction.is_none());
        assert!(profile.fertile_days.is_none());
        assert!(tracker.current_period_dates().is_empty());
    }

    #[test]
    fn test_failed_persist_keeps_memory_state() {
        let tracker = CycleTracker::new(BrokenStore);
        let (_, outcome) =
            tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();

        assert!(outcome.is_failed());
        assert_eq!(tracker.profile().cycle_history.len(), 1);
        assert_eq!(tracker.add_mood(mood(MoodKind::Anxious)), SaveOutcome::Failed);
        assert_eq!(tracker.profile().cycle_history[0].moods.len(), 1);
    }

    #[test]
    fn test_current_period_dates() {
        let tracker = empty_tracker();
        assert!(tracker.current_period_dates().is_empty());

        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 30), date(2024, 2, 2), 28, 3)).unwrap();
        assert_eq!(
            tracker.current_period_dates(),
            vec![date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1)]
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let source = CycleTracker::new(MemoryStore::new());
        let _ = source.initialize(date(2024, 3, 16));
        let _ = source.add_symptom(symptom(SymptomKind::BackPain));
        let _ = source.add_mood(mood(MoodKind::Emotional));
        let original = source.profile();

        let snapshot = source.export_snapshot().unwrap();
        assert!(snapshot.contains("\"backPain\""));

        let target = empty_tracker();
        let outcome = target.import_snapshot(&snapshot).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(target.profile(), original);
    }

    #[test]
    fn test_malformed_import_leaves_profile_untouched() {
        let tracker = CycleTracker::new(MemoryStore::new());
        let _ = tracker.initialize(date(2024, 3, 16));
        let before = tracker.profile();

        assert!(tracker.import_snapshot("not json").is_err());
        assert!(tracker.import_snapshot(r#"{"cycleHistory": []}"#).is_err());
        assert!(tracker.import_snapshot("[1, 2, 3]").is_err());

        let bad_cycle = r#"{
            "averageCycleLength": 28,
            "averagePeriodLength": 5,
            "cycleHistory": [{
                "id": "6f1c1a2e-8c57-4b0e-9a59-0d7d3f3c2a11",
                "startDate": "2024-01-10",
                "endDate": "2024-01-01",
                "length": 28,
                "periodLength": 5
            }]
        }"#;
        assert!(matches!(
            tracker.import_snapshot(bad_cycle),
            Err(Error::InvalidProfile(_))
        ));

        assert_eq!(tracker.profile(), before);
    }

    #[test]
    fn test_import_rejects_out_of_range_averages() {
        let tracker = CycleTracker::new(MemoryStore::new());
        let _ = tracker.initialize(date(2024, 3, 16));
        let before = tracker.profile();

        let huge_cycle = r#"{"averageCycleLength":100000000,"averagePeriodLength":5,"cycleHistory":[],"lastPeriodStart":"2024-01-01"}"#;
        assert!(matches!(
            tracker.import_snapshot(huge_cycle),
            Err(Error::InvalidProfile(_))
        ));

        let huge_period = r#"{"averageCycleLength":28,"averagePeriodLength":4000000000,"cycleHistory":[],"lastPeriodStart":"2024-01-01"}"#;
        assert!(matches!(
            tracker.import_snapshot(huge_period),
            Err(Error::InvalidProfile(_))
        ));

        assert_eq!(tracker.profile(), before);
    }

    #[test]
    fn test_history_survives_panicking_mutation() {
        /// Store that panics on every write
        struct PanickingStore(UserProfile);

        impl ProfileStore for PanickingStore {
            fn load(&self) -> Result<Option<UserProfile>> {
                Ok(Some(self.0.clone()))
            }

            fn save(&mut self, _profile: &UserProfile) -> Result<()> {
                panic!("disk controller on fire");
            }
        }

        let tracker = CycleTracker::new(PanickingStore(seed_profile(date(2024, 3, 16))));
        assert_eq!(tracker.initialize(date(2024, 3, 16)), SaveOutcome::Skipped);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            tracker.add_mood(mood(MoodKind::Anxious))
        }));
        assert!(result.is_err());

        let profile = tracker.profile();
        assert_eq!(profile.cycle_history.len(), 3);
        assert_eq!(profile.last_period_start, Some(date(2024, 3, 1)));
        assert_eq!(profile.cycle_history[2].moods.len(), 1);
    }

    #[test]
    fn test_import_recomputes_derived_fields() {
        let snapshot = r#"{
            "averageCycleLength": 28,
            "averagePeriodLength": 5,
            "cycleHistory": [],
            "lastPeriodStart": "2024-01-01",
            "nextPeriodPrediction": "1999-01-01"
        }"#;
        let tracker = empty_tracker();
        let _ = tracker.import_snapshot(snapshot).unwrap();

        let profile = tracker.profile();
        assert_eq!(profile.next_period_prediction, Some(date(2024, 1, 29)));
        assert_eq!(profile.ovulation_prediction, Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_concurrent_mutations_are_serialized() {
        let tracker = Arc::new(empty_tracker());
        let _ = tracker.add_cycle(NewCycle::new(date(2024, 1, 1), date(2024, 1, 5), 28, 4)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for _ in 0..25 {
                        if i % 2 == 0 {
                            let _ = tracker.add_mood(mood(MoodKind::Neutral));
                        } else {
                            let _ = tracker.add_symptom(symptom(SymptomKind::Fatigue));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let profile = tracker.profile();
        assert_eq!(profile.cycle_history[0].moods.len(), 100);
        assert_eq!(profile.cycle_history[0].symptoms.len(), 100);
    }
}
