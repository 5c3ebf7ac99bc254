//! Learning streaks and streak badges
//!
//! `StreakTracker` turns a stored record plus "now" into the next record;
//! `check_badge_eligibility` decides whether the new streak length earns a
//! badge. Neither touches storage (see `crate::progress`).

mod badges;
mod error;
mod tracker;

pub use badges::{check_badge_eligibility, BadgeThresholds, BADGES};
pub use error::StreakError;
pub use tracker::{DayBoundary, StreakTracker};
