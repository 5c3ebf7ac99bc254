use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{Badge, BadgeId};
use crate::streak::{BadgeThresholds, DayBoundary, StreakTracker};

/// Streak settings (`[streak]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakSettings {
    /// Which clock decides where a day ends: "utc", "local", or "offset"
    #[serde(default)]
    pub day_boundary: DayBoundaryKind,

    /// Offset from UTC in minutes, used when `day_boundary = "offset"`
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Streak length -> badge table
    #[serde(default = "default_badges")]
    pub badges: Vec<BadgeThresholdConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundaryKind {
    #[default]
    Utc,
    Local,
    Offset,
}

/// One `[[streak.badges]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeThresholdConfig {
    /// Exact streak length that earns the badge
    pub days: u32,
    pub badge: String,
}

impl Default for StreakSettings {
    fn default() -> Self {
        Self {
            day_boundary: DayBoundaryKind::default(),
            utc_offset_minutes: 0,
            badges: default_badges(),
        }
    }
}

fn default_badges() -> Vec<BadgeThresholdConfig> {
    BadgeThresholds::default()
        .iter()
        .map(|(days, badge)| BadgeThresholdConfig {
            days,
            badge: badge.to_string(),
        })
        .collect()
}

impl StreakSettings {
    pub fn day_boundary(&self) -> Result<DayBoundary> {
        match self.day_boundary {
            DayBoundaryKind::Utc => Ok(DayBoundary::Utc),
            DayBoundaryKind::Local => Ok(DayBoundary::Local),
            DayBoundaryKind::Offset => match DayBoundary::offset_minutes(self.utc_offset_minutes) {
                Some(boundary) => Ok(boundary),
                None => bail!(
                    "utc_offset_minutes must be within +/-1439, got {}",
                    self.utc_offset_minutes
                ),
            },
        }
    }

    pub fn tracker(&self) -> Result<StreakTracker> {
        Ok(StreakTracker::new(self.day_boundary()?))
    }

    /// Build the threshold table; later entries win on duplicate `days`
    pub fn thresholds(&self) -> BadgeThresholds {
        let mut thresholds = BadgeThresholds::empty();
        for entry in &self.badges {
            if entry.days == 0 {
                tracing::warn!(badge = %entry.badge, "Ignoring badge threshold of 0 days");
                continue;
            }
            if Badge::find(&entry.badge).is_none() {
                tracing::warn!(badge = %entry.badge, "Badge threshold references a badge outside the catalog");
            }
            if let Some(previous) = thresholds.insert(entry.days, BadgeId::new(entry.badge.clone())) {
                tracing::warn!(days = entry.days, replaced = %previous, "Duplicate badge threshold");
            }
        }
        thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_thresholds() {
        let settings = StreakSettings::default();
        assert_eq!(settings.thresholds(), BadgeThresholds::default());
        assert_eq!(settings.day_boundary().unwrap(), DayBoundary::Utc);
    }

    #[test]
    fn test_offset_boundary() {
        let settings = StreakSettings {
            day_boundary: DayBoundaryKind::Offset,
            utc_offset_minutes: -300,
            ..Default::default()
        };
        assert_eq!(
            settings.day_boundary().unwrap(),
            DayBoundary::offset_minutes(-300).unwrap()
        );

        let bad = StreakSettings {
            day_boundary: DayBoundaryKind::Offset,
            utc_offset_minutes: 2000,
            ..Default::default()
        };
        assert!(bad.day_boundary().is_err());
    }

    #[test]
    fn test_zero_day_threshold_is_dropped() {
        let settings = StreakSettings {
            badges: vec![
                BadgeThresholdConfig { days: 0, badge: "streak-3".to_string() },
                BadgeThresholdConfig { days: 10, badge: "custom-10".to_string() },
            ],
            ..Default::default()
        };
        let thresholds = settings.thresholds();
        assert_eq!(thresholds.len(), 1);
        assert_eq!(thresholds.get(10), Some(&BadgeId::from("custom-10")));
    }
}
