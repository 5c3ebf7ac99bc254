//! Learner progress storage
//!
//! Persists streak records and badge awards in a SQLite database
//! (`~/.studyloop/progress.db`) and applies activity to them.
//!
//! # Usage
//!
//! ```ignore
//! let recorder = ActivityRecorder::new(ProgressDb::open_default()?, tracker, thresholds);
//! let outcome = recorder.record_activity("user-42", Utc::now())?;
//! ```

mod db;
mod recorder;

pub use db::ProgressDb;
pub use recorder::{ActivityOutcome, ActivityRecorder, ProgressEvent};
