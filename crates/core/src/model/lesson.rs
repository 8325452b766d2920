use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::exercise::{Exercise, ExerciseDraft, ExerciseError};
use crate::model::ids::{ExerciseId, LessonId};

/// Progress value at which a lesson counts as completed.
pub const COMPLETE_PROGRESS: u8 = 100;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson id cannot be empty")]
    EmptyId,

    #[error("lesson {id} has an empty title")]
    EmptyTitle { id: LessonId },

    #[error("lesson {id} has an empty category")]
    EmptyCategory { id: LessonId },

    #[error("lesson {id} must reward more than 0 XP")]
    ZeroXpReward { id: LessonId },

    #[error("lesson {id} has no exercises")]
    NoExercises { id: LessonId },

    #[error("lesson {id} repeats exercise id {exercise}")]
    DuplicateExercise { id: LessonId, exercise: ExerciseId },

    #[error("lesson {id} has an invalid exercise: {source}")]
    Exercise {
        id: LessonId,
        #[source]
        source: ExerciseError,
    },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated lesson as it appears in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub category: String,
    pub xp_reward: u32,
    pub exercises: Vec<ExerciseDraft>,
}

impl LessonDraft {
    /// Validate the draft and all of its exercises.
    ///
    /// Lessons always start at progress 0 and not completed; catalog
    /// `progress`/`completed` keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if a required field is empty, the reward is zero,
    /// there are no exercises, an exercise id repeats, or an exercise is invalid.
    pub fn validate(self) -> Result<Lesson, LessonError> {
        if self.id.as_str().trim().is_empty() {
            return Err(LessonError::EmptyId);
        }
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle { id: self.id });
        }
        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(LessonError::EmptyCategory { id: self.id });
        }
        if self.xp_reward == 0 {
            return Err(LessonError::ZeroXpReward { id: self.id });
        }
        if self.exercises.is_empty() {
            return Err(LessonError::NoExercises { id: self.id });
        }

        let mut seen = HashSet::with_capacity(self.exercises.len());
        let mut exercises = Vec::with_capacity(self.exercises.len());
        for draft in self.exercises {
            if !seen.insert(draft.id.clone()) {
                return Err(LessonError::DuplicateExercise {
                    id: self.id,
                    exercise: draft.id,
                });
            }
            let exercise = draft.validate().map_err(|source| LessonError::Exercise {
                id: self.id.clone(),
                source,
            })?;
            exercises.push(exercise);
        }

        Ok(Lesson {
            id: self.id,
            title,
            description: self.description.trim().to_owned(),
            difficulty: self.difficulty,
            category,
            xp_reward: self.xp_reward,
            exercises,
            completed: false,
            progress: 0,
        })
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Result of recording progress on a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressChange {
    /// Progress stored, lesson still incomplete.
    Progressed { progress: u8 },
    /// Lesson was already completed; nothing changed.
    AlreadyCompleted,
    /// Lesson flipped from incomplete to completed.
    Completed,
}

/// Static lesson content plus its two mutable fields, `progress` and `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    difficulty: Difficulty,
    category: String,
    xp_reward: u32,
    exercises: Vec<Exercise>,
    completed: bool,
    progress: u8,
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    /// Exercises in presentation order. Never empty.
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Progress percentage in `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Store a progress percentage for this lesson.
    ///
    /// Values above 100 are clamped. A completed lesson keeps progress 100,
    /// so `completed` stays equivalent to `progress >= 100` and the lesson can
    /// only transition to completed once.
    pub fn record_progress(&mut self, value: u32) -> ProgressChange {
        if self.completed {
            return ProgressChange::AlreadyCompleted;
        }

        let progress = u8::try_from(value.min(u32::from(COMPLETE_PROGRESS)))
            .unwrap_or(COMPLETE_PROGRESS);
        self.progress = progress;

        if progress >= COMPLETE_PROGRESS {
            self.completed = true;
            ProgressChange::Completed
        } else {
            ProgressChange::Progressed { progress }
        }
    }
}
