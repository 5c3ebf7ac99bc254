//! Activity command implementation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use studyloop::config::Config;
use studyloop::progress::{ActivityRecorder, ProgressDb, ProgressEvent};
use studyloop::Badge;

/// Record a qualifying activity for `user` at `at` (RFC 3339) or now
pub async fn activity_command(config: &Config, user: &str, at: Option<String>) -> Result<()> {
    let now = match at {
        Some(at) => DateTime::parse_from_rfc3339(&at)
            .with_context(|| format!("Invalid --at timestamp: {}", at))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let db = ProgressDb::open(&config.storage.database_path())?;
    let recorder = ActivityRecorder::new(
        db,
        config.streak.tracker()?,
        config.streak.thresholds(),
    );

    let outcome = recorder.record_activity(user, now)?;

    for event in &outcome.events {
        match event {
            ProgressEvent::BadgeAwarded { badge } => match Badge::find(badge.as_str()) {
                Some(def) => println!("{} Badge earned: {} - {}", def.icon, def.name, def.description),
                None => println!("{}", event),
            },
            _ => println!("{}", event),
        }
    }

    println!(
        "{}: {} day streak (best {})",
        outcome.record.user_id, outcome.record.current_streak, outcome.record.longest_streak
    );

    Ok(())
}
