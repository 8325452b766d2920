use chrono::NaiveDate;
use serde::Serialize;

use lingo_core::model::{Achievement, Lesson, UserProgress};
use lingo_core::stats::{self, CategoryProgress};

/// Number of achievements shown on the home screen.
pub const RECENT_ACHIEVEMENTS: usize = 3;

/// Achievement with its display texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<Achievement> for AchievementView {
    fn from(achievement: Achievement) -> Self {
        Self {
            id: achievement.id(),
            title: achievement.title(),
            description: achievement.description(),
        }
    }
}

/// Everything the home, progress and profile screens read, in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressOverview {
    pub total_xp: u32,
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_to_next_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub lessons_completed: u32,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub daily_goal_percent: f64,
    pub last_study_date: Option<NaiveDate>,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub overall_progress: f64,
    pub categories: Vec<CategoryProgress>,
    pub achievements: Vec<AchievementView>,
    pub recent_achievements: Vec<AchievementView>,
}

impl ProgressOverview {
    #[must_use]
    pub fn build(progress: &UserProgress, lessons: &[Lesson]) -> Self {
        Self {
            total_xp: progress.total_xp(),
            level: progress.level(),
            xp_into_level: progress.xp_into_level(),
            xp_to_next_level: progress.xp_to_next_level(),
            current_streak: progress.current_streak(),
            longest_streak: progress.longest_streak(),
            lessons_completed: progress.lessons_completed(),
            daily_goal: progress.daily_goal(),
            daily_progress: progress.daily_progress(),
            daily_goal_percent: progress.daily_goal_percent(),
            last_study_date: progress.last_study_date(),
            total_lessons: lessons.len(),
            completed_lessons: stats::completed_count(lessons),
            overall_progress: stats::overall_progress(lessons),
            categories: stats::category_progress(lessons),
            achievements: progress
                .achievements()
                .iter()
                .copied()
                .map(AchievementView::from)
                .collect(),
            recent_achievements: progress
                .recent_achievements(RECENT_ACHIEVEMENTS)
                .iter()
                .copied()
                .map(AchievementView::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::model::LessonId;
    use lingo_core::time::fixed_clock;

    use crate::{LessonService, ServiceConfig};

    #[test]
    fn fresh_overview_is_empty() {
        let svc = LessonService::with_seed_catalog(fixed_clock(), ServiceConfig::default());
        let overview = svc.overview();
        assert_eq!(overview.level, 1);
        assert_eq!(overview.total_lessons, 3);
        assert_eq!(overview.completed_lessons, 0);
        assert!(overview.overall_progress.abs() < f64::EPSILON);
        assert_eq!(overview.categories.len(), 3);
        assert!(overview.achievements.is_empty());
    }

    #[test]
    fn overview_reflects_completions() {
        let mut svc = LessonService::with_seed_catalog(fixed_clock(), ServiceConfig::default());
        svc.complete_lesson(&LessonId::new("1"), 100);
        svc.complete_lesson(&LessonId::new("2"), 50);

        let overview = svc.overview();
        assert_eq!(overview.total_xp, 15);
        assert_eq!(overview.completed_lessons, 1);
        assert!((overview.overall_progress - 50.0).abs() < f64::EPSILON);
        assert!((overview.daily_goal_percent - 30.0).abs() < 1e-9);
        assert_eq!(overview.categories[0].category, "Basics");
        assert!((overview.categories[0].percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(overview.last_study_date, Some(fixed_clock().today()));
    }

    #[test]
    fn achievement_view_uses_display_texts() {
        let view = AchievementView::from(Achievement::First100Xp);
        assert_eq!(view.id, "first-100-xp");
        assert_eq!(view.title, "XP Collector");
    }
}
