use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::progress::UserProgress;

/// XP required for [`Achievement::First100Xp`].
pub const FIRST_XP_THRESHOLD: u32 = 100;

/// Streak length required for [`Achievement::WeekStreak`].
pub const WEEK_STREAK_DAYS: u32 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown achievement: {raw}")]
pub struct ParseAchievementError {
    raw: String,
}

/// One-time unlockable flags. New achievements are added as variants here
/// together with their rule in [`Achievement::is_earned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "first-100-xp")]
    First100Xp,
    #[serde(rename = "week-streak")]
    WeekStreak,
}

impl Achievement {
    /// All achievements in evaluation order.
    pub const ALL: [Achievement; 2] = [Achievement::First100Xp, Achievement::WeekStreak];

    /// Stable kebab-case identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Achievement::First100Xp => "first-100-xp",
            Achievement::WeekStreak => "week-streak",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Achievement::First100Xp => "XP Collector",
            Achievement::WeekStreak => "Week Warrior",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Achievement::First100Xp => "Earned your first 100 XP points",
            Achievement::WeekStreak => "Maintained a 7-day learning streak",
        }
    }

    /// Whether the threshold rule for this achievement holds, regardless of
    /// whether it was already unlocked.
    #[must_use]
    pub fn is_earned(self, progress: &UserProgress) -> bool {
        match self {
            Achievement::First100Xp => progress.total_xp() >= FIRST_XP_THRESHOLD,
            Achievement::WeekStreak => progress.current_streak() >= WEEK_STREAK_DAYS,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Achievement {
    type Err = ParseAchievementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Achievement::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| ParseAchievementError { raw: s.to_owned() })
    }
}

/// Unlock every achievement whose rule now holds and that is not yet present.
///
/// Returns the newly unlocked achievements in declaration order.
pub fn evaluate(progress: &mut UserProgress) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    for achievement in Achievement::ALL {
        if achievement.is_earned(progress) && progress.unlock(achievement) {
            unlocked.push(achievement);
        }
    }
    unlocked
}
