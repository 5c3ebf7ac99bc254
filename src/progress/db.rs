//! SQLite storage for streak records and badge awards
//!
//! Manages the `~/.studyloop/progress.db` database.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

use crate::config::Config;
use crate::domain::{BadgeId, UserStreakRecord};
use crate::streak::StreakError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shared handle to the progress database
#[derive(Clone)]
pub struct ProgressDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ProgressDb {
    /// Open or create the database at the default location (~/.studyloop/progress.db)
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::global_config_dir().join("progress.db"))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        // WAL lets the CLI read while another process records activity
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Throwaway database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize progress schema")?;
        conn.execute("INSERT OR IGNORE INTO schema_version VALUES (?1)", [SCHEMA_VERSION])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Progress DB lock poisoned")
    }

    /// Stored streak for `user_id`, or a fresh record if none exists
    pub fn load_record(&self, user_id: &str) -> Result<UserStreakRecord> {
        load_record(&self.conn(), user_id)
    }

    /// Write `record`, replacing any stored one for the same user
    pub fn save_record(&self, record: &UserStreakRecord, now_ms: i64) -> Result<()> {
        save_record(&self.conn(), record, now_ms)
    }

    /// Badge ids already awarded to `user_id`
    pub fn held_badges(&self, user_id: &str) -> Result<HashSet<BadgeId>> {
        held_badges(&self.conn(), user_id)
    }

    /// Award a badge. Returns false if the user already held it.
    pub fn award_badge(&self, user_id: &str, badge: &BadgeId, now_ms: i64) -> Result<bool> {
        award_badge(&self.conn(), user_id, badge, now_ms)
    }
}

pub(crate) fn load_record(conn: &Connection, user_id: &str) -> Result<UserStreakRecord> {
    let row = conn
        .query_row(
            "SELECT current_streak, longest_streak, last_activity_date FROM streaks WHERE user_id = ?1",
            [user_id],
            |r| Ok((r.get::<_, u32>(0)?, r.get::<_, u32>(1)?, r.get::<_, Option<String>>(2)?)),
        )
        .optional()
        .with_context(|| format!("Failed to load streak for {}", user_id))?;

    let Some((current_streak, longest_streak, last_day)) = row else {
        return Ok(UserStreakRecord::new(user_id));
    };

    let last_activity_date = last_day
        .map(|day| {
            NaiveDate::parse_from_str(&day, DATE_FORMAT)
                .map_err(|_| StreakError::MalformedDate(day))
        })
        .transpose()?;

    Ok(UserStreakRecord {
        user_id: user_id.to_string(),
        current_streak,
        longest_streak,
        last_activity_date,
    })
}

pub(crate) fn save_record(conn: &Connection, record: &UserStreakRecord, now_ms: i64) -> Result<()> {
    let last_day = record
        .last_activity_date
        .map(|d| d.format(DATE_FORMAT).to_string());
    conn.execute(
        r#"
        INSERT INTO streaks (user_id, current_streak, longest_streak, last_activity_date, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(user_id) DO UPDATE SET
            current_streak = ?2, longest_streak = ?3, last_activity_date = ?4, updated_at = ?5
        "#,
        (
            &record.user_id,
            record.current_streak,
            record.longest_streak,
            last_day,
            now_ms,
        ),
    )
    .with_context(|| format!("Failed to save streak for {}", record.user_id))?;
    Ok(())
}

pub(crate) fn held_badges(conn: &Connection, user_id: &str) -> Result<HashSet<BadgeId>> {
    let mut stmt = conn.prepare("SELECT badge_id FROM badge_awards WHERE user_id = ?1")?;
    let ids = stmt
        .query_map([user_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids.into_iter().map(BadgeId).collect())
}

pub(crate) fn award_badge(
    conn: &Connection,
    user_id: &str,
    badge: &BadgeId,
    now_ms: i64,
) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO badge_awards (user_id, badge_id, awarded_at) VALUES (?1, ?2, ?3)",
        (user_id, badge.as_str(), now_ms),
    )?;
    Ok(inserted > 0)
}

const SCHEMA_VERSION: i32 = 1;

/// SQL schema for the progress database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- One row per learner
CREATE TABLE IF NOT EXISTS streaks (
    user_id TEXT PRIMARY KEY,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_activity_date TEXT,
    updated_at INTEGER NOT NULL
);

-- Awarded badges; the primary key makes awarding idempotent
CREATE TABLE IF NOT EXISTS badge_awards (
    user_id TEXT NOT NULL,
    badge_id TEXT NOT NULL,
    awarded_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, badge_id)
);
"#;
