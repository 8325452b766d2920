//! Plain-text views of the service state.

use std::fmt::Write;

use lingo_core::model::{Lesson, LessonId};
use lingo_core::stats;
use lingo_services::{AnswerOutcome, LessonCompletion, ProgressOverview};

fn check(done: bool) -> &'static str {
    if done { "x" } else { " " }
}

#[must_use]
pub fn lessons(lessons: &[Lesson]) -> String {
    let mut out = String::new();
    for (category, members) in stats::group_by_category(lessons) {
        let _ = writeln!(out, "{category}");
        for lesson in members {
            let _ = writeln!(
                out,
                "  [{}] {:<4} {:<24} {:<12} {:>3} XP  {:>3}%",
                check(lesson.is_completed()),
                lesson.id(),
                lesson.title(),
                lesson.difficulty(),
                lesson.xp_reward(),
                lesson.progress(),
            );
        }
    }
    out
}

#[must_use]
pub fn lesson(lesson: &Lesson) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", lesson.title(), lesson.id());
    if !lesson.description().is_empty() {
        let _ = writeln!(out, "{}", lesson.description());
    }
    let _ = writeln!(
        out,
        "{} | {} | {} XP | {}% complete",
        lesson.category(),
        lesson.difficulty(),
        lesson.xp_reward(),
        lesson.progress(),
    );
    for (index, exercise) in lesson.exercises().iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", index + 1, exercise.kind(), exercise.prompt());
        if !exercise.options().is_empty() {
            let _ = writeln!(out, "   options: {}", exercise.options().join(" / "));
        }
    }
    out
}

#[must_use]
pub fn not_found(id: &LessonId) -> String {
    format!("Lesson not found: {id}\n")
}

#[must_use]
pub fn answer(outcome: &AnswerOutcome) -> String {
    let mut out = String::new();
    if outcome.correct {
        let _ = writeln!(out, "{}: correct", outcome.exercise_id);
    } else {
        let _ = writeln!(
            out,
            "{}: incorrect (expected \"{}\")",
            outcome.exercise_id, outcome.expected
        );
    }
    if let Some(explanation) = &outcome.explanation {
        let _ = writeln!(out, "   {explanation}");
    }
    out
}

#[must_use]
pub fn completion(completion: &LessonCompletion) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Lesson {} complete: {}/{} correct ({:.0}%), +{} XP",
        completion.lesson_id,
        completion.correct,
        completion.total,
        completion.score_percent,
        completion.xp_awarded,
    );
    for achievement in &completion.new_achievements {
        let _ = writeln!(
            out,
            "Achievement unlocked: {} - {}",
            achievement.title(),
            achievement.description()
        );
    }
    out
}

#[must_use]
pub fn overview(overview: &ProgressOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Level {} | {} XP ({}/100 to level {})",
        overview.level,
        overview.total_xp,
        overview.xp_into_level,
        overview.level + 1,
    );
    let _ = writeln!(
        out,
        "Streak {} day(s), longest {}",
        overview.current_streak, overview.longest_streak
    );
    let _ = writeln!(
        out,
        "Daily goal {}/{} XP ({:.0}%)",
        overview.daily_progress, overview.daily_goal, overview.daily_goal_percent
    );
    let _ = writeln!(
        out,
        "Lessons {}/{} complete, overall {:.0}%",
        overview.completed_lessons, overview.total_lessons, overview.overall_progress
    );
    for category in &overview.categories {
        let _ = writeln!(
            out,
            "  {:<12} {}/{} ({:.0}%)",
            category.category, category.completed, category.total, category.percent
        );
    }
    if overview.achievements.is_empty() {
        let _ = writeln!(
            out,
            "No achievements yet. Complete lessons and maintain streaks to earn achievements!"
        );
    } else {
        for achievement in &overview.achievements {
            let _ = writeln!(out, "* {} - {}", achievement.title, achievement.description);
        }
    }
    out
}
