//! CSV export of the cycle history.
//!
//! One row per recorded cycle, for spreadsheets and backups that do not need
//! the full JSON snapshot.

use crate::calendar::difference_in_days;
use crate::{CycleRecord, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    number: usize,
    id: String,
    start_date: String,
    end_date: String,
    recorded_length: u32,
    observed_length: Option<i64>,
    period_length: u32,
    symptom_count: usize,
    mood_count: usize,
    notes: Option<String>,
}

impl CsvRow {
    fn new(index: usize, cycle: &CycleRecord, next: Option<&CycleRecord>) -> Self {
        CsvRow {
            number: index + 1,
            id: cycle.id.to_string(),
            start_date: cycle.start_date.to_string(),
            end_date: cycle.end_date.to_string(),
            recorded_length: cycle.length,
            observed_length: next.map(|n| difference_in_days(n.start_date, cycle.start_date)),
            period_length: cycle.period_length,
            symptom_count: cycle.symptoms.len(),
            mood_count: cycle.moods.len(),
            notes: cycle.notes.clone(),
        }
    }
}

/// Write `history` as CSV (with a header row) to `writer`.
///
/// Returns the number of cycles written.
pub fn write_history_csv<W: Write>(history: &[CycleRecord], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (index, cycle) in history.iter().enumerate() {
        csv_writer.serialize(CsvRow::new(index, cycle, history.get(index + 1)))?;
    }
    csv_writer.flush()?;

    tracing::debug!("Wrote {} cycles to CSV", history.len());
    Ok(history.len())
}

/// Write the history CSV to a file, replacing any existing one
pub fn export_history_csv(history: &[CycleRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let count = write_history_csv(history, file)?;
    tracing::info!("Exported {} cycles to {:?}", count, path);
    Ok(count)
}
