//! Badge catalog and streak thresholds

use std::collections::{BTreeMap, HashSet};

use crate::domain::{Badge, BadgeId};

/// All badge definitions
pub static BADGES: &[Badge] = &[
    Badge {
        id: "streak-3",
        name: "Warming Up",
        description: "Learn three days in a row",
        icon: "🔥",
    },
    Badge {
        id: "streak-5",
        name: "On a Roll",
        description: "Learn five days in a row",
        icon: "⚡",
    },
    Badge {
        id: "streak-7",
        name: "Week Warrior",
        description: "Learn every day for a week",
        icon: "📅",
    },
    Badge {
        id: "streak-14",
        name: "Fortnight Focus",
        description: "Learn every day for two weeks",
        icon: "🎯",
    },
    Badge {
        id: "streak-30",
        name: "Habit Formed",
        description: "Learn every day for thirty days",
        icon: "🏆",
    },
];

impl Badge {
    /// Look up a badge definition by id
    pub fn find(id: &str) -> Option<&'static Badge> {
        BADGES.iter().find(|b| b.id == id)
    }
}

/// Streak length -> badge granted when the streak reaches exactly that length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeThresholds(BTreeMap<u32, BadgeId>);

impl Default for BadgeThresholds {
    fn default() -> Self {
        [
            (3, "streak-3"),
            (5, "streak-5"),
            (7, "streak-7"),
            (14, "streak-14"),
            (30, "streak-30"),
        ]
        .into_iter()
        .map(|(days, id)| (days, BadgeId::from(id)))
        .collect()
    }
}

impl BadgeThresholds {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Map `days` to `badge`, replacing any previous badge for that length
    pub fn insert(&mut self, days: u32, badge: BadgeId) -> Option<BadgeId> {
        self.0.insert(days, badge)
    }

    pub fn get(&self, days: u32) -> Option<&BadgeId> {
        self.0.get(&days)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &BadgeId)> {
        self.0.iter().map(|(days, id)| (*days, id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, BadgeId)> for BadgeThresholds {
    fn from_iter<T: IntoIterator<Item = (u32, BadgeId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Badge newly earned by a streak of `streak` days, if any.
///
/// Only an exact threshold match counts: a streak that jumps past a
/// threshold (e.g. a backfill) does not earn it retroactively.
pub fn check_badge_eligibility(
    streak: u32,
    thresholds: &BadgeThresholds,
    already_held: &HashSet<BadgeId>,
) -> Option<BadgeId> {
    let badge = thresholds.get(streak)?;
    if already_held.contains(badge) {
        return None;
    }
    Some(badge.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_day() -> BadgeThresholds {
        [(5, BadgeId::from("streak-5"))].into_iter().collect()
    }

    #[test]
    fn test_exact_threshold_awards() {
        let held = HashSet::new();
        assert_eq!(
            check_badge_eligibility(5, &five_day(), &held),
            Some(BadgeId::from("streak-5"))
        );
    }

    #[test]
    fn test_passing_threshold_does_not_award() {
        let held = HashSet::new();
        assert_eq!(check_badge_eligibility(6, &five_day(), &held), None);
        assert_eq!(check_badge_eligibility(4, &five_day(), &held), None);
    }

    #[test]
    fn test_held_badge_is_not_awarded_again() {
        let held: HashSet<BadgeId> = [BadgeId::from("streak-5")].into_iter().collect();
        assert_eq!(check_badge_eligibility(5, &five_day(), &held), None);
    }

    #[test]
    fn test_default_thresholds_reference_catalog() {
        let thresholds = BadgeThresholds::default();
        assert_eq!(thresholds.len(), 5);
        for (_, id) in thresholds.iter() {
            assert!(Badge::find(id.as_str()).is_some(), "missing badge {}", id);
        }
    }
}
