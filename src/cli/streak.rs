//! Streak command implementation

use anyhow::Result;
use chrono::Utc;

use studyloop::config::Config;
use studyloop::progress::ProgressDb;

/// Show the stored streak for `user`
pub async fn streak_command(config: &Config, user: &str) -> Result<()> {
    let db = ProgressDb::open(&config.storage.database_path())?;
    let record = db.load_record(user)?;
    let tracker = config.streak.tracker()?;
    let today = tracker.date_only(Utc::now());

    let Some(last) = record.last_activity_date else {
        println!("{} has no recorded activity.", user);
        return Ok(());
    };

    let current = record.effective_streak(today);
    println!("User:           {}", record.user_id);
    println!("Current streak: {} day(s)", current);
    println!("Longest streak: {} day(s)", record.longest_streak);
    println!("Last activity:  {} ({})", last, tracker.boundary().label());
    if current == 0 {
        println!("Streak lapsed after {} day(s); the next activity starts a new one.", record.current_streak);
    } else if last < today {
        println!("Learn today to extend the streak.");
    }

    Ok(())
}
