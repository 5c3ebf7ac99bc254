use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A learner's daily streak as persisted between activities.
///
/// A record with `last_activity_date` present always carries
/// `current_streak >= 1`; `current_streak == 0` means the learner
/// has never recorded a qualifying activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStreakRecord {
    pub user_id: String,
    pub current_streak: u32,
    /// Best streak ever reached
    #[serde(default)]
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl UserStreakRecord {
    /// Record for a learner with no activity yet
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
        }
    }

    /// Whether the streak can still be extended (activity today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_activity_date else {
            return false;
        };
        let days_since = (today - last).num_days();
        (0..=1).contains(&days_since)
    }

    /// Streak as it should be shown today: a lapsed streak reads as zero.
    pub fn effective_streak(&self, today: NaiveDate) -> u32 {
        if self.is_active(today) {
            self.current_streak
        } else {
            0
        }
    }

    /// True when the record satisfies the date/count invariant
    pub fn is_consistent(&self) -> bool {
        match self.last_activity_date {
            Some(_) => self.current_streak >= 1,
            None => self.current_streak == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_record_is_inactive() {
        let record = UserStreakRecord::new("u1");
        assert_eq!(record.current_streak, 0);
        assert!(record.is_consistent());
        assert!(!record.is_active(day(2024, 3, 1)));
        assert_eq!(record.effective_streak(day(2024, 3, 1)), 0);
    }

    #[test]
    fn test_effective_streak_lapses_after_a_missed_day() {
        let record = UserStreakRecord {
            user_id: "u1".to_string(),
            current_streak: 4,
            longest_streak: 4,
            last_activity_date: Some(day(2024, 3, 1)),
        };
        assert_eq!(record.effective_streak(day(2024, 3, 1)), 4);
        assert_eq!(record.effective_streak(day(2024, 3, 2)), 4);
        assert_eq!(record.effective_streak(day(2024, 3, 3)), 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = UserStreakRecord {
            user_id: "u1".to_string(),
            current_streak: 2,
            longest_streak: 5,
            last_activity_date: Some(day(2024, 3, 1)),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["currentStreak"], 2);
        assert_eq!(json["lastActivityDate"], "2024-03-01");
    }
}
