#![forbid(unsafe_code)]

//! Core domain model and prediction engine for HerChronos.
//!
//! This crate provides:
//! - Domain types (cycles, symptoms, moods, the user profile)
//! - Calendar arithmetic and cycle predictions
//! - The profile update engine and the session tracker
//! - Persistence (locked JSON store) and CSV export
//! - Read-only insights for presentation (phase, calendar marks, stats)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod calendar;
pub mod prediction;
pub mod engine;
pub mod insights;
pub mod report;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::update_predictions;
pub use store::{JsonFileStore, MemoryStore, ProfileStore};
pub use tracker::{CycleTracker, SaveOutcome};
