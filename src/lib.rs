//! studyloop - learning streaks and lesson content checks
//!
//! Two independent pieces sit behind the `studyloop` CLI:
//!
//! 1. **Streaks & badges**: `StreakTracker` computes a learner's
//!    consecutive-day streak from the stored record and the time of a new
//!    activity; exact-length thresholds award streak badges. `progress`
//!    persists both in SQLite.
//!
//! 2. **Content validation**: `ContentSanitizer` cleans lesson HTML against
//!    a fixed allow-list and flags XSS and code-injection signatures in
//!    HTML, text, and code samples, per string or per lesson module.

pub mod config;
pub mod content;
pub mod domain;
pub mod progress;
pub mod streak;

pub use domain::*;
