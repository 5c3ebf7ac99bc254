//! Daily streak computation
//!
//! Pure over its inputs: the caller supplies `now` and persists the
//! returned record.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::error::StreakError;
use crate::domain::UserStreakRecord;

/// Where one calendar day ends and the next begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// Midnight UTC
    #[default]
    Utc,
    /// Midnight in the host's local time zone (shifts with DST)
    Local,
    /// Midnight at a fixed offset from UTC
    Offset(FixedOffset),
}

impl DayBoundary {
    /// Fixed-offset boundary; `None` if the offset is a day or more
    pub fn offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::Offset)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Utc => "UTC".to_string(),
            Self::Local => "local time".to_string(),
            Self::Offset(offset) => format!("UTC{}", offset),
        }
    }
}

/// Computes streak transitions for a fixed day boundary
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakTracker {
    boundary: DayBoundary,
}

impl StreakTracker {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    /// Strip the time of day from `now` under this tracker's boundary
    pub fn date_only(&self, now: DateTime<Utc>) -> NaiveDate {
        match self.boundary {
            DayBoundary::Utc => now.date_naive(),
            DayBoundary::Local => now.with_timezone(&chrono::Local).date_naive(),
            DayBoundary::Offset(offset) => now.with_timezone(&offset).date_naive(),
        }
    }

    /// Apply one qualifying activity at `now` to `record`.
    ///
    /// - never active: streak starts at 1
    /// - same day: unchanged
    /// - next day: streak + 1
    /// - any later day: streak restarts at 1
    /// - earlier day: `StreakError::OutOfOrder`, nothing applied
    pub fn update_streak(
        &self,
        record: &UserStreakRecord,
        now: DateTime<Utc>,
    ) -> Result<UserStreakRecord, StreakError> {
        if !record.is_consistent() {
            return Err(StreakError::CorruptRecord {
                user_id: record.user_id.clone(),
                current_streak: record.current_streak,
                last: record.last_activity_date,
            });
        }

        let today = self.date_only(now);
        let mut next = record.clone();

        match record.last_activity_date {
            None => next.current_streak = 1,
            Some(last) => {
                let diff_days = (today - last).num_days();
                if diff_days < 0 {
                    return Err(StreakError::OutOfOrder { last, today });
                }
                match diff_days {
                    0 => return Ok(next),
                    1 => next.current_streak = record.current_streak.saturating_add(1),
                    _ => next.current_streak = 1,
                }
            }
        }

        next.last_activity_date = Some(today);
        next.longest_streak = next.longest_streak.max(next.current_streak);
        Ok(next)
    }
}
