use chrono::NaiveDate;

/// Rejected streak update. Callers log it and skip the update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreakError {
    #[error("activity on {today} is older than the last recorded activity on {last}")]
    OutOfOrder { last: NaiveDate, today: NaiveDate },

    #[error("streak record for {user_id} is inconsistent (current_streak = {current_streak}, last activity = {last:?})")]
    CorruptRecord {
        user_id: String,
        current_streak: u32,
        last: Option<NaiveDate>,
    },

    #[error("malformed activity date: {0}")]
    MalformedDate(String),
}
