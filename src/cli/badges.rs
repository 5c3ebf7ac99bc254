//! Badges command implementation

use std::collections::HashSet;

use anyhow::Result;

use studyloop::config::Config;
use studyloop::progress::ProgressDb;
use studyloop::streak::BADGES;
use studyloop::BadgeId;

/// List the badge catalog; with `user`, mark held badges
pub async fn badges_command(config: &Config, user: Option<String>) -> Result<()> {
    let held: HashSet<BadgeId> = match &user {
        Some(user) => ProgressDb::open(&config.storage.database_path())?.held_badges(user)?,
        None => HashSet::new(),
    };

    let thresholds = config.streak.thresholds();

    for badge in BADGES {
        let days = thresholds
            .iter()
            .find(|(_, id)| id.as_str() == badge.id)
            .map(|(days, _)| format!("{} days", days))
            .unwrap_or_else(|| "not configured".to_string());

        let marker = if user.is_none() {
            ""
        } else if held.contains(&BadgeId::from(badge.id)) {
            "[x] "
        } else {
            "[ ] "
        };

        println!(
            "  {}{} {} ({}) - {} [{}]",
            marker, badge.icon, badge.name, badge.id, badge.description, days
        );
    }

    if let Some(user) = &user {
        let earned = BADGES
            .iter()
            .filter(|b| held.contains(&BadgeId::from(b.id)))
            .count();
        println!("\n{} of {} badges earned by {}", earned, BADGES.len(), user);
    }

    Ok(())
}
