//! Applies learning activity to stored progress
//!
//! Handles the read-modify-write of a learner's streak and the badge
//! awards that follow from it, atomically per call.

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;
use tracing::{info, warn};

use super::db::{self, ProgressDb};
use crate::domain::{BadgeId, UserStreakRecord};
use crate::streak::{check_badge_eligibility, BadgeThresholds, StreakError, StreakTracker};

/// Something that happened while recording an activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    StreakStarted,
    StreakExtended { count: u32 },
    StreakRestarted { previous: u32 },
    /// Activity already counted for this day
    AlreadyCounted { count: u32 },
    BadgeAwarded { badge: BadgeId },
    /// The update was rejected and nothing was written
    UpdateSkipped { reason: String },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreakStarted => write!(f, "Streak started"),
            Self::StreakExtended { count } => write!(f, "Streak extended to {} days", count),
            Self::StreakRestarted { previous } => {
                write!(f, "Streak restarted (previous streak: {} days)", previous)
            }
            Self::AlreadyCounted { count } => {
                write!(f, "Already counted today ({} day streak)", count)
            }
            Self::BadgeAwarded { badge } => write!(f, "Badge earned: {}", badge),
            Self::UpdateSkipped { reason } => write!(f, "Update skipped: {}", reason),
        }
    }
}

/// Result of recording one activity
#[derive(Debug, Clone)]
pub struct ActivityOutcome {
    /// The learner's record as stored after this call
    pub record: UserStreakRecord,
    pub events: Vec<ProgressEvent>,
}

impl ActivityOutcome {
    pub fn awarded(&self) -> impl Iterator<Item = &BadgeId> {
        self.events.iter().filter_map(|e| match e {
            ProgressEvent::BadgeAwarded { badge } => Some(badge),
            _ => None,
        })
    }

    pub fn skipped(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ProgressEvent::UpdateSkipped { .. }))
    }
}

/// Records qualifying activity for learners
pub struct ActivityRecorder {
    db: ProgressDb,
    tracker: StreakTracker,
    thresholds: BadgeThresholds,
}

impl ActivityRecorder {
    pub fn new(db: ProgressDb, tracker: StreakTracker, thresholds: BadgeThresholds) -> Self {
        Self {
            db,
            tracker,
            thresholds,
        }
    }

    pub fn db(&self) -> &ProgressDb {
        &self.db
    }

    /// Record one qualifying activity for `user_id` at `now`.
    ///
    /// Streak update and badge award commit together. An out-of-order or
    /// inconsistent update is logged and skipped; the stored record is
    /// left as it was.
    pub fn record_activity(&self, user_id: &str, now: DateTime<Utc>) -> Result<ActivityOutcome> {
        let now_ms = now.timestamp_millis();
        let mut conn = self.db.conn();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin progress transaction")?;

        let before = db::load_record(&tx, user_id)?;

        let after = match self.tracker.update_streak(&before, now) {
            Ok(record) => record,
            Err(err) => {
                warn!(user_id, error = %err, "Skipping streak update");
                return Ok(skipped(before, &err));
            }
        };

        let mut events = vec![streak_event(&before, &after)];
        if after != before {
            db::save_record(&tx, &after, now_ms)?;
        }

        let held = db::held_badges(&tx, user_id)?;
        if let Some(badge) = check_badge_eligibility(after.current_streak, &self.thresholds, &held) {
            if db::award_badge(&tx, user_id, &badge, now_ms)? {
                info!(user_id, badge = %badge, "Badge awarded");
                events.push(ProgressEvent::BadgeAwarded { badge });
            }
        }

        tx.commit().context("Failed to commit progress update")?;

        info!(
            user_id,
            streak = after.current_streak,
            day = ?after.last_activity_date,
            "Recorded activity"
        );
        Ok(ActivityOutcome {
            record: after,
            events,
        })
    }
}

fn streak_event(before: &UserStreakRecord, after: &UserStreakRecord) -> ProgressEvent {
    if before.last_activity_date.is_none() {
        ProgressEvent::StreakStarted
    } else if before.last_activity_date == after.last_activity_date {
        ProgressEvent::AlreadyCounted {
            count: after.current_streak,
        }
    } else if after.current_streak == before.current_streak.saturating_add(1) {
        ProgressEvent::StreakExtended {
            count: after.current_streak,
        }
    } else {
        ProgressEvent::StreakRestarted {
            previous: before.current_streak,
        }
    }
}

fn skipped(record: UserStreakRecord, err: &StreakError) -> ActivityOutcome {
    ActivityOutcome {
        record,
        events: vec![ProgressEvent::UpdateSkipped {
            reason: err.to_string(),
        }],
    }
}
