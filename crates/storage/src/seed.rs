//! Built-in Spanish starter catalog loaded when no catalog file is given.

use lingo_core::model::{Difficulty, ExerciseDraft, ExerciseId, ExerciseKind, LessonDraft, LessonId};

use crate::repository::InMemoryRepository;

fn choice(id: &str, prompt: &str, options: [&str; 4], answer: &str, explanation: &str) -> ExerciseDraft {
    ExerciseDraft {
        id: ExerciseId::new(id),
        kind: ExerciseKind::MultipleChoice,
        prompt: prompt.to_owned(),
        options: options.iter().map(|o| (*o).to_owned()).collect(),
        correct_answer: answer.to_owned(),
        translation: None,
        explanation: Some(explanation.to_owned()),
    }
}

fn free_text(
    id: &str,
    kind: ExerciseKind,
    prompt: &str,
    answer: &str,
    explanation: &str,
) -> ExerciseDraft {
    ExerciseDraft {
        id: ExerciseId::new(id),
        kind,
        prompt: prompt.to_owned(),
        options: Vec::new(),
        correct_answer: answer.to_owned(),
        translation: None,
        explanation: Some(explanation.to_owned()),
    }
}

/// The three beginner lessons, in catalog order.
#[must_use]
pub fn seed_lessons() -> Vec<LessonDraft> {
    vec![
        LessonDraft {
            id: LessonId::new("1"),
            title: "Basic Greetings".into(),
            description: "Learn how to say hello and goodbye".into(),
            difficulty: Difficulty::Beginner,
            category: "Basics".into(),
            xp_reward: 15,
            exercises: vec![
                choice(
                    "1-1",
                    "How do you say \"Hello\" in Spanish?",
                    ["Hola", "Adiós", "Gracias", "Por favor"],
                    "Hola",
                    "Hola is the most common way to say hello in Spanish.",
                ),
                free_text(
                    "1-2",
                    ExerciseKind::Translation,
                    "Translate: Good morning",
                    "Buenos días",
                    "Buenos días is used to greet someone in the morning.",
                ),
                choice(
                    "1-3",
                    "What does \"Adiós\" mean?",
                    ["Hello", "Thank you", "Goodbye", "Please"],
                    "Goodbye",
                    "Adiós means goodbye in Spanish.",
                ),
            ],
        },
        LessonDraft {
            id: LessonId::new("2"),
            title: "Numbers 1-10".into(),
            description: "Learn to count from one to ten".into(),
            difficulty: Difficulty::Beginner,
            category: "Numbers".into(),
            xp_reward: 20,
            exercises: vec![
                choice(
                    "2-1",
                    "How do you say \"one\" in Spanish?",
                    ["dos", "uno", "tres", "cuatro"],
                    "uno",
                    "Uno is the number one in Spanish.",
                ),
                free_text(
                    "2-2",
                    ExerciseKind::FillBlank,
                    "Fill in the blank: Uno, dos, ___, cuatro",
                    "tres",
                    "Tres is the number three in Spanish.",
                ),
            ],
        },
        LessonDraft {
            id: LessonId::new("3"),
            title: "Family Members".into(),
            description: "Learn words for family relationships".into(),
            difficulty: Difficulty::Beginner,
            category: "Family".into(),
            xp_reward: 25,
            exercises: vec![
                choice(
                    "3-1",
                    "How do you say \"mother\" in Spanish?",
                    ["padre", "hermano", "madre", "hijo"],
                    "madre",
                    "Madre means mother in Spanish.",
                ),
                free_text(
                    "3-2",
                    ExerciseKind::Translation,
                    "Translate: My father",
                    "Mi padre",
                    "Mi padre means my father in Spanish.",
                ),
            ],
        },
    ]
}

/// Repository holding the starter catalog.
///
/// # Panics
///
/// Panics if the built-in catalog fails validation.
#[must_use]
pub fn seed_repository() -> InMemoryRepository {
    InMemoryRepository::from_drafts(seed_lessons()).expect("built-in catalog should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::LessonRepository;

    #[test]
    fn every_seed_lesson_validates() {
        for draft in seed_lessons() {
            let id = draft.id.clone();
            assert!(draft.validate().is_ok(), "seed lesson {id} is invalid");
        }
        assert!(InMemoryRepository::from_drafts(seed_lessons()).is_ok());
    }

    #[test]
    fn seed_catalog_is_valid_and_ordered() {
        let repo = seed_repository();
        let ids: Vec<&str> = repo.list_lessons().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn seed_rewards_match_catalog() {
        let repo = seed_repository();
        let rewards: Vec<u32> = repo.list_lessons().iter().map(|l| l.xp_reward()).collect();
        assert_eq!(rewards, vec![15, 20, 25]);
    }

    #[test]
    fn seed_lessons_start_untouched() {
        let repo = seed_repository();
        assert!(
            repo.list_lessons()
                .iter()
                .all(|l| !l.is_completed() && l.progress() == 0)
        );
    }
}
