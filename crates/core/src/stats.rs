//! Catalog-wide statistics shown on the progress screens.

use serde::Serialize;

use crate::model::Lesson;

/// Completion of all lessons sharing a category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

/// Mean lesson progress in percent; 0 for an empty catalog.
#[must_use]
pub fn overall_progress(lessons: &[Lesson]) -> f64 {
    if lessons.is_empty() {
        return 0.0;
    }
    let sum: u32 = lessons.iter().map(|l| u32::from(l.progress())).sum();
    f64::from(sum) / lessons.len() as f64
}

#[must_use]
pub fn completed_count(lessons: &[Lesson]) -> usize {
    lessons.iter().filter(|l| l.is_completed()).count()
}

/// Lessons grouped by category, categories in first-appearance order.
#[must_use]
pub fn group_by_category(lessons: &[Lesson]) -> Vec<(&str, Vec<&Lesson>)> {
    let mut groups: Vec<(&str, Vec<&Lesson>)> = Vec::new();
    for lesson in lessons {
        match groups.iter_mut().find(|(c, _)| *c == lesson.category()) {
            Some((_, members)) => members.push(lesson),
            None => groups.push((lesson.category(), vec![lesson])),
        }
    }
    groups
}

/// Per-category completion, categories in first-appearance order.
#[must_use]
pub fn category_progress(lessons: &[Lesson]) -> Vec<CategoryProgress> {
    group_by_category(lessons)
        .into_iter()
        .map(|(category, members)| {
            let total = members.len();
            let completed = members.iter().filter(|l| l.is_completed()).count();
            CategoryProgress {
                category: category.to_owned(),
                completed,
                total,
                percent: completed as f64 / total as f64 * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, ExerciseDraft, ExerciseId, ExerciseKind, LessonDraft, LessonId};

    fn lesson(id: &str, category: &str) -> Lesson {
        LessonDraft {
            id: LessonId::new(id),
            title: format!("Lesson {id}"),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            category: category.into(),
            xp_reward: 10,
            exercises: vec![ExerciseDraft {
                id: ExerciseId::new(format!("{id}-1")),
                kind: ExerciseKind::FillBlank,
                prompt: "Uno, dos, ___".into(),
                options: Vec::new(),
                correct_answer: "tres".into(),
                translation: None,
                explanation: None,
            }],
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn empty_catalog_has_zero_progress() {
        assert!(overall_progress(&[]).abs() < f64::EPSILON);
        assert!(category_progress(&[]).is_empty());
    }

    #[test]
    fn overall_progress_is_mean() {
        let mut lessons = vec![lesson("1", "Basics"), lesson("2", "Numbers")];
        lessons[0].record_progress(100);
        lessons[1].record_progress(50);
        assert!((overall_progress(&lessons) - 75.0).abs() < f64::EPSILON);
        assert_eq!(completed_count(&lessons), 1);
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let mut lessons = vec![
            lesson("1", "Numbers"),
            lesson("2", "Basics"),
            lesson("3", "Numbers"),
        ];
        lessons[2].record_progress(100);

        let stats = category_progress(&lessons);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "Numbers");
        assert_eq!(stats[0].completed, 1);
        assert_eq!(stats[0].total, 2);
        assert!((stats[0].percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats[1].category, "Basics");
        assert!(stats[1].percent.abs() < f64::EPSILON);
    }

    #[test]
    fn grouping_collects_members() {
        let lessons = vec![lesson("1", "A"), lesson("2", "B"), lesson("3", "A")];
        let groups = group_by_category(&lessons);
        let ids: Vec<&str> = groups[0].1.iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
