use chrono::NaiveDate;
use serde::Serialize;

use crate::model::achievement::Achievement;

/// Daily XP target for a fresh installation.
pub const DEFAULT_DAILY_GOAL: u32 = 50;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u32 = 100;

//
// ─── STREAK ────────────────────────────────────────────────────────────────────
//

/// What a study day did to the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already studied today.
    Unchanged,
    /// Studied yesterday; streak grew to `streak`.
    Extended { streak: u32 },
    /// First session or a gap of two or more days; streak is back to 1.
    Restarted,
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Process-wide learner state: XP, streaks, completions and achievements.
///
/// Invariants kept by every mutator:
/// - `longest_streak >= current_streak`
/// - `achievements` holds each achievement at most once, in unlock order
/// - `total_xp` never decreases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProgress {
    total_xp: u32,
    current_streak: u32,
    longest_streak: u32,
    lessons_completed: u32,
    achievements: Vec<Achievement>,
    daily_goal: u32,
    // Accumulates across days; nothing resets it at a day boundary.
    daily_progress: u32,
    last_study_date: Option<NaiveDate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_GOAL)
    }
}

impl UserProgress {
    /// Fresh state with the given daily XP goal.
    #[must_use]
    pub fn new(daily_goal: u32) -> Self {
        Self {
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            lessons_completed: 0,
            achievements: Vec::new(),
            daily_goal,
            daily_progress: 0,
            last_study_date: None,
        }
    }

    #[must_use]
    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    #[must_use]
    pub fn lessons_completed(&self) -> u32 {
        self.lessons_completed
    }

    /// Unlocked achievements in unlock order.
    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    #[must_use]
    pub fn daily_progress(&self) -> u32 {
        self.daily_progress
    }

    #[must_use]
    pub fn last_study_date(&self) -> Option<NaiveDate> {
        self.last_study_date
    }

    pub fn set_daily_goal(&mut self, goal: u32) {
        self.daily_goal = goal;
    }

    /// Book a first-time lesson completion made on `today`.
    ///
    /// Adds the reward to total and daily XP, counts the lesson and runs the
    /// streak update.
    pub fn record_completion(&mut self, xp_reward: u32, today: NaiveDate) -> StreakChange {
        self.lessons_completed = self.lessons_completed.saturating_add(1);
        self.total_xp = self.total_xp.saturating_add(xp_reward);
        self.daily_progress = self.daily_progress.saturating_add(xp_reward);
        self.record_study_day(today)
    }

    /// Advance the streak machine for a study session on `today`.
    pub fn record_study_day(&mut self, today: NaiveDate) -> StreakChange {
        if self.last_study_date == Some(today) {
            return StreakChange::Unchanged;
        }

        let yesterday = today.pred_opt();
        let change = if yesterday.is_some() && self.last_study_date == yesterday {
            self.current_streak = self.current_streak.saturating_add(1);
            StreakChange::Extended {
                streak: self.current_streak,
            }
        } else {
            self.current_streak = 1;
            StreakChange::Restarted
        };

        self.last_study_date = Some(today);
        self.longest_streak = self.longest_streak.max(self.current_streak);
        change
    }

    #[must_use]
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Add an achievement unless it is already unlocked.
    ///
    /// Returns true if it was newly added.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.has_achievement(achievement) {
            return false;
        }
        self.achievements.push(achievement);
        true
    }

    /// Most recent `count` achievements, oldest first.
    #[must_use]
    pub fn recent_achievements(&self, count: usize) -> &[Achievement] {
        let start = self.achievements.len().saturating_sub(count);
        &self.achievements[start..]
    }

    /// Level derived from XP, starting at 1.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.total_xp / XP_PER_LEVEL + 1
    }

    /// XP earned inside the current level.
    #[must_use]
    pub fn xp_into_level(&self) -> u32 {
        self.total_xp % XP_PER_LEVEL
    }

    #[must_use]
    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL - self.xp_into_level()
    }

    /// Daily goal completion in percent, capped at 100.
    ///
    /// With a goal of 0 any progress counts as done.
    #[must_use]
    pub fn daily_goal_percent(&self) -> f64 {
        if self.daily_goal == 0 {
            return if self.daily_progress > 0 { 100.0 } else { 0.0 };
        }
        (f64::from(self.daily_progress) / f64::from(self.daily_goal) * 100.0).min(100.0)
    }

    #[must_use]
    pub fn daily_goal_met(&self) -> bool {
        self.daily_progress >= self.daily_goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn fresh_state_is_zeroed() {
        let progress = UserProgress::default();
        assert_eq!(progress.total_xp(), 0);
        assert_eq!(progress.current_streak(), 0);
        assert_eq!(progress.longest_streak(), 0);
        assert_eq!(progress.daily_goal(), DEFAULT_DAILY_GOAL);
        assert_eq!(progress.last_study_date(), None);
        assert!(progress.achievements().is_empty());
    }

    #[test]
    fn first_session_starts_streak() {
        let mut progress = UserProgress::default();
        assert_eq!(progress.record_study_day(day(1)), StreakChange::Restarted);
        assert_eq!(progress.current_streak(), 1);
        assert_eq!(progress.longest_streak(), 1);
        assert_eq!(progress.last_study_date(), Some(day(1)));
    }

    #[test]
    fn same_day_does_not_change_streak() {
        let mut progress = UserProgress::default();
        progress.record_study_day(day(1));
        assert_eq!(progress.record_study_day(day(1)), StreakChange::Unchanged);
        assert_eq!(progress.current_streak(), 1);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut progress = UserProgress::default();
        progress.record_study_day(day(1));
        assert_eq!(
            progress.record_study_day(day(2)),
            StreakChange::Extended { streak: 2 }
        );
        assert_eq!(progress.longest_streak(), 2);
    }

    #[test]
    fn gap_resets_streak_but_keeps_longest() {
        let mut progress = UserProgress::default();
        for d in 1..=4 {
            progress.record_study_day(day(d));
        }
        assert_eq!(progress.current_streak(), 4);

        assert_eq!(progress.record_study_day(day(6)), StreakChange::Restarted);
        assert_eq!(progress.current_streak(), 1);
        assert_eq!(progress.longest_streak(), 4);
    }

    #[test]
    fn earlier_date_restarts_streak() {
        let mut progress = UserProgress::default();
        progress.record_study_day(day(10));
        progress.record_study_day(day(11));
        assert_eq!(progress.record_study_day(day(5)), StreakChange::Restarted);
        assert_eq!(progress.current_streak(), 1);
        assert!(progress.longest_streak() >= progress.current_streak());
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let mut progress = UserProgress::default();
        progress.record_study_day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let change = progress.record_study_day(day(1));
        assert_eq!(change, StreakChange::Extended { streak: 2 });
    }

    #[test]
    fn completion_books_xp_and_count() {
        let mut progress = UserProgress::default();
        progress.record_completion(15, day(1));
        progress.record_completion(20, day(1));
        assert_eq!(progress.total_xp(), 35);
        assert_eq!(progress.daily_progress(), 35);
        assert_eq!(progress.lessons_completed(), 2);
        assert_eq!(progress.current_streak(), 1);
    }

    #[test]
    fn daily_progress_accumulates_across_days() {
        let mut progress = UserProgress::default();
        progress.record_completion(30, day(1));
        progress.record_completion(30, day(2));
        assert_eq!(progress.daily_progress(), 60);
        assert!(progress.daily_goal_met());
        assert!((progress.daily_goal_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut progress = UserProgress::default();
        assert!(progress.unlock(Achievement::WeekStreak));
        assert!(!progress.unlock(Achievement::WeekStreak));
        assert_eq!(progress.achievements(), &[Achievement::WeekStreak]);
    }

    #[test]
    fn recent_achievements_returns_tail() {
        let mut progress = UserProgress::default();
        progress.unlock(Achievement::First100Xp);
        progress.unlock(Achievement::WeekStreak);
        assert_eq!(progress.recent_achievements(1), &[Achievement::WeekStreak]);
        assert_eq!(progress.recent_achievements(3).len(), 2);
    }

    #[test]
    fn level_math_follows_xp() {
        let mut progress = UserProgress::default();
        assert_eq!(progress.level(), 1);
        progress.record_completion(135, day(1));
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.xp_into_level(), 35);
        assert_eq!(progress.xp_to_next_level(), 65);
    }

    #[test]
    fn daily_goal_percent_is_partial() {
        let mut progress = UserProgress::new(40);
        progress.record_completion(10, day(1));
        assert!((progress.daily_goal_percent() - 25.0).abs() < f64::EPSILON);
        assert!(!progress.daily_goal_met());
    }

    #[test]
    fn zero_goal_percent() {
        let mut progress = UserProgress::new(0);
        assert!(progress.daily_goal_percent().abs() < f64::EPSILON);
        progress.record_completion(5, day(1));
        assert!((progress.daily_goal_percent() - 100.0).abs() < f64::EPSILON);
    }
}
