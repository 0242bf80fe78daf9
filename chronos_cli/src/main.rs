use chrono::{Datelike, Local, NaiveDate};
use chronos_core::calendar::difference_in_days;
use chronos_core::insights::{self, DayKind};
use chronos_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

/// How many symptoms/moods the stats view lists
const TOP_ENTRIES: usize = 5;

#[derive(Parser)]
#[command(name = "herchronos")]
#[command(about = "Menstrual cycle tracker with period and fertility predictions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cycle and predictions (default)
    Status,

    /// Record a completed period as a new cycle
    AddCycle {
        /// First day of the period
        #[arg(long)]
        start: NaiveDate,

        /// Day the period ended (exclusive: the day after the last bleeding day)
        #[arg(long)]
        end: NaiveDate,

        /// Cycle length in days (defaults to the current average)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CYCLE_LENGTH)))]
        length: Option<u32>,

        /// Bleeding days (defaults to the days from start up to, not including, end)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CYCLE_LENGTH)))]
        period_length: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a mood on the current cycle
    Mood {
        /// happy, sad, irritated, anxious, energetic, tired, emotional, neutral
        kind: String,

        /// 1 = mild, 2 = moderate, 3 = severe
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
        intensity: u8,

        /// Day of the observation (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a symptom on the current cycle
    Symptom {
        /// cramps, headache, bloating, back-pain, breast-tenderness, acne,
        /// fatigue, cravings, nausea, spotting, insomnia, other
        kind: String,

        /// 1 = mild, 2 = moderate, 3 = severe
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
        intensity: u8,

        /// Day of the observation (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Adjust profile settings and re-run predictions
    Set {
        /// Average cycle length in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CYCLE_LENGTH)))]
        cycle_length: Option<u32>,

        /// Average period length in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CYCLE_LENGTH)))]
        period_length: Option<u32>,

        /// Start of the most recent period
        #[arg(long, conflicts_with = "clear_last_period")]
        last_start: Option<NaiveDate>,

        /// End of the most recent period
        #[arg(long, conflicts_with = "clear_last_period")]
        last_end: Option<NaiveDate>,

        /// Forget the most recent period (disables predictions)
        #[arg(long)]
        clear_last_period: bool,
    },

    /// Show a month with period, fertile and ovulation days marked
    Calendar {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show cycle length trends and the most common symptoms and moods
    Stats,

    /// Write the full profile as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace the profile with a previously exported JSON snapshot
    Import {
        /// Snapshot file
        file: PathBuf,
    },

    /// Write the cycle history as CSV
    ExportCsv {
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    chronos_core::logging::init(&config.logging);

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let store = JsonFileStore::in_dir(&data_dir, config.store.lock_timeout());
    let tracker = CycleTracker::new(store);
    if tracker.initialize(today).is_failed() {
        eprintln!("Warning: could not save the initial profile to {}", data_dir.display());
    }

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cmd_status(&tracker, today, &config),
        Commands::AddCycle {
            start,
            end,
            length,
            period_length,
            notes,
        } => cmd_add_cycle(&tracker, start, end, length, period_length, notes),
        Commands::Mood {
            kind,
            intensity,
            date,
            notes,
        } => {
            let mood = MoodEntry {
                date: date.unwrap_or(today),
                kind: kind.parse()?,
                intensity: Intensity::try_from(intensity)?,
                notes,
            };
            let label = mood.kind.to_string();
            report_observation(tracker.add_mood(mood), "Mood", &label)
        }
        Commands::Symptom {
            kind,
            intensity,
            date,
            notes,
        } => {
            let symptom = SymptomEntry {
                date: date.unwrap_or(today),
                kind: kind.parse()?,
                intensity: Intensity::try_from(intensity)?,
                notes,
            };
            let label = symptom.kind.to_string();
            report_observation(tracker.add_symptom(symptom), "Symptom", &label)
        }
        Commands::Set {
            cycle_length,
            period_length,
            last_start,
            last_end,
            clear_last_period,
        } => {
            let patch = ProfilePatch {
                average_cycle_length: cycle_length,
                average_period_length: period_length,
                cycle_history: None,
                last_period_start: if clear_last_period {
                    Some(None)
                } else {
                    last_start.map(Some)
                },
                last_period_end: if clear_last_period {
                    Some(None)
                } else {
                    last_end.map(Some)
                },
            };
            cmd_set(&tracker, patch)
        }
        Commands::Calendar { month } => cmd_calendar(&tracker, today, month),
        Commands::Stats => cmd_stats(&tracker),
        Commands::Export { output } => cmd_export(&tracker, output),
        Commands::Import { file } => cmd_import(&tracker, file),
        Commands::ExportCsv { output } => cmd_export_csv(&tracker, output),
    }
}

/// Turn a failed persist into a non-zero exit after telling the user
fn ensure_saved(outcome: SaveOutcome) -> Result<()> {
    if outcome.is_failed() {
        eprintln!("Warning: your changes could not be saved and will be lost on exit.");
        return Err(Error::Other("profile was not saved".into()));
    }
    Ok(())
}

fn cmd_status(tracker: &CycleTracker<JsonFileStore>, today: NaiveDate, config: &Config) -> Result<()> {
    let profile = tracker.profile();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CYCLE SUMMARY");
    println!("╰─────────────────────────────────────────╯");
    println!();

    let Some(summary) = insights::summarize(&profile, today) else {
        println!("  No period data available yet.");
        println!("  Record one with `herchronos add-cycle --start <date> --end <date>`.");
        println!();
        return Ok(());
    };

    println!(
        "  Cycle day {} ({} phase)",
        summary.cycle_day, summary.phase
    );
    if let Some(last_start) = profile.last_period_start {
        println!(
            "  Last period:   {} ({} days ago)",
            last_start, summary.days_since_last_period
        );
    }
    if let (Some(next), Some(days)) = (profile.next_period_prediction, summary.days_until_next_period) {
        println!("  Next period:   {} (in {} days)", next, days);
    }
    if let Some(ovulation) = profile.ovulation_prediction {
        println!("  Ovulation:     {}", ovulation);
    }
    if let Some(fertile) = profile.fertile_days {
        println!("  Fertile days:  {} to {}", fertile.start, fertile.end);
    }

    let period_dates = tracker.current_period_dates();
    if let (Some(first), Some(last)) = (period_dates.first(), period_dates.last()) {
        println!("  Period days:   {} to {}", first, last);
    }

    println!();
    println!("  Avg. cycle length:  {} days", profile.average_cycle_length);
    println!("  Avg. period length: {} days", profile.average_period_length);

    let days_before = config.reminder.days_before;
    if insights::reminder_due(&profile, today, days_before) {
        if let Some(next) = profile.next_period_prediction {
            println!();
            println!(
                "  ⏰ Reminder: your next period is expected in {} days, on {}.",
                days_before,
                next.format("%B %-d")
            );
        }
    }

    println!();
    Ok(())
}

fn cmd_add_cycle(
    tracker: &CycleTracker<JsonFileStore>,
    start: NaiveDate,
    end: NaiveDate,
    length: Option<u32>,
    period_length: Option<u32>,
    notes: Option<String>,
) -> Result<()> {
    if end < start {
        return Err(Error::InvalidInput(format!(
            "--end ({}) is before --start ({})",
            end, start
        )));
    }

    let length = length.unwrap_or_else(|| tracker.profile().average_cycle_length);
    let period_length = period_length
        .unwrap_or_else(|| u32::try_from(difference_in_days(end, start)).unwrap_or(1).max(1));

    let mut cycle = NewCycle::new(start, end, length, period_length);
    cycle.notes = notes;

    let (id, outcome) = tracker.add_cycle(cycle)?;
    tracing::debug!("Recorded cycle {}", id);
    ensure_saved(outcome)?;

    let profile = tracker.profile();
    println!("✓ Cycle recorded ({} to {})", start, end);
    if let Some(next) = profile.next_period_prediction {
        println!("  Next period expected: {}", next);
    }
    Ok(())
}

fn report_observation(outcome: SaveOutcome, what: &str, label: &str) -> Result<()> {
    match outcome {
        SaveOutcome::Skipped => {
            println!(
                "No cycle recorded yet - {} not saved. Add a cycle first.",
                what.to_lowercase()
            );
            Ok(())
        }
        outcome => {
            ensure_saved(outcome)?;
            println!("✓ {} logged: {}", what, label);
            Ok(())
        }
    }
}

fn cmd_set(tracker: &CycleTracker<JsonFileStore>, patch: ProfilePatch) -> Result<()> {
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    ensure_saved(tracker.update_profile(patch)?)?;

    let profile = tracker.profile();
    println!("✓ Profile updated");
    match profile.next_period_prediction {
        Some(next) => println!("  Next period expected: {}", next),
        None => println!("  No predictions (last period start unknown)"),
    }
    Ok(())
}

fn cmd_calendar(
    tracker: &CycleTracker<JsonFileStore>,
    today: NaiveDate,
    month: Option<String>,
) -> Result<()> {
    let (year, month) = match month {
        Some(text) => parse_month(&text)?,
        None => (today.year(), today.month()),
    };

    let profile = tracker.profile();
    let days = insights::month_calendar(&profile, year, month)?;
    let Some((first, _)) = days.first() else {
        return Ok(());
    };

    println!("{}", first.format("%B %Y"));
    println!(" Mo  Tu  We  Th  Fr  Sa  Su");

    let offset = first.weekday().num_days_from_monday() as usize;
    let mut line = "    ".repeat(offset);
    for (date, kind) in &days {
        line.push_str(&format!("{:>3}{}", date.day(), kind.marker()));
        if date.weekday().num_days_from_monday() == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    println!(
        "{} period  {} ovulation  {} fertile  {} predicted period",
        DayKind::Period.marker(),
        DayKind::Ovulation.marker(),
        DayKind::Fertile.marker(),
        DayKind::PredictedPeriod.marker()
    );
    Ok(())
}

fn parse_month(text: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidInput(format!("expected YYYY-MM, got {:?}", text));
    let (year, month) = text.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    Ok((year, month))
}

fn cmd_stats(tracker: &CycleTracker<JsonFileStore>) -> Result<()> {
    let profile = tracker.profile();

    println!("Cycle length trends");
    let trends = insights::cycle_trends(&profile.cycle_history);
    if trends.is_empty() {
        println!("  Not enough cycle data to display trends.");
    }
    for trend in &trends {
        println!(
            "  Cycle {:>2}  {}  {:>3} days  (period {} days)",
            trend.number, trend.start_date, trend.length, trend.period_length
        );
    }

    println!();
    println!("Common symptoms");
    let symptoms = insights::top_symptoms(&profile.cycle_history, TOP_ENTRIES);
    if symptoms.is_empty() {
        println!("  No symptoms recorded yet.");
    }
    for (kind, count) in symptoms {
        println!("  {:<18} {}", kind.as_str(), count);
    }

    println!();
    println!("Common moods");
    let moods = insights::top_moods(&profile.cycle_history, TOP_ENTRIES);
    if moods.is_empty() {
        println!("  No moods recorded yet.");
    }
    for (kind, count) in moods {
        println!("  {:<18} {}", kind.as_str(), count);
    }

    Ok(())
}

fn cmd_export(tracker: &CycleTracker<JsonFileStore>, output: Option<PathBuf>) -> Result<()> {
    let snapshot = tracker.export_snapshot()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, snapshot)?;
            println!("✓ Data exported to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(snapshot.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_import(tracker: &CycleTracker<JsonFileStore>, file: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&file)?;

    let outcome = match tracker.import_snapshot(&text) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Import failed: invalid data format. Please check your data and try again.");
            return Err(e);
        }
    };
    ensure_saved(outcome)?;

    println!(
        "✓ Data imported ({} cycles)",
        tracker.profile().cycle_history.len()
    );
    Ok(())
}

fn cmd_export_csv(tracker: &CycleTracker<JsonFileStore>, output: Option<PathBuf>) -> Result<()> {
    let profile = tracker.profile();

    match output {
        Some(path) => {
            let count = chronos_core::report::export_history_csv(&profile.cycle_history, &path)?;
            println!("✓ Exported {} cycles to {}", count, path.display());
        }
        None => {
            chronos_core::report::write_history_csv(&profile.cycle_history, io::stdout().lock())?;
        }
    }
    Ok(())
}
