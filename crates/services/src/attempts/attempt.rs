use chrono::{DateTime, Utc};
use std::fmt;

use lingo_core::model::{Exercise, ExerciseId, Lesson, LessonId};

use super::progress::AttemptProgress;
use crate::error::AttemptError;

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// One submitted answer within an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub exercise_id: ExerciseId,
    pub answer: String,
    pub correct: bool,
}

/// Feedback shown right after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub exercise_id: ExerciseId,
    pub correct: bool,
    pub expected: String,
    pub explanation: Option<String>,
    pub is_last: bool,
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// A single run through one lesson's exercises.
///
/// Holds its own copy of the exercises so the catalog can be borrowed
/// mutably while the attempt is in flight.
pub struct LessonAttempt {
    lesson_id: LessonId,
    title: String,
    exercises: Vec<Exercise>,
    answers: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl LessonAttempt {
    /// Start an attempt at the first exercise of `lesson`.
    ///
    /// `started_at` should come from the services layer clock.
    #[must_use]
    pub fn new(lesson: &Lesson, started_at: DateTime<Utc>) -> Self {
        Self {
            lesson_id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            exercises: lesson.exercises().to_vec(),
            answers: Vec::new(),
            started_at,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn total_exercises(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Exercise waiting for an answer, or `None` once all are answered.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.answers.len())
    }

    /// Position of the exercise on screen in percent, reaching 100 on the last one.
    #[must_use]
    pub fn position_percent(&self) -> f64 {
        let total = self.exercises.len();
        if total == 0 {
            return 100.0;
        }
        let shown = (self.answers.len() + 1).min(total);
        shown as f64 / total as f64 * 100.0
    }

    /// Share of correct answers over all exercises, in percent.
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        let total = self.exercises.len();
        if total == 0 {
            return 0.0;
        }
        self.correct_count() as f64 / total as f64 * 100.0
    }

    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        AttemptProgress {
            total: self.total_exercises(),
            answered: self.answered_count(),
            correct: self.correct_count(),
            remaining: self.total_exercises().saturating_sub(self.answered_count()),
            is_finished: self.is_finished(),
        }
    }

    /// Check `answer` against the current exercise and advance.
    ///
    /// `answered_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Finished` if every exercise is already answered
    /// and `AttemptError::BlankAnswer` if a free-text exercise gets only
    /// whitespace. A rejected answer leaves the attempt unchanged.
    pub fn submit(
        &mut self,
        answer: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, AttemptError> {
        let exercise = self.current_exercise().ok_or(AttemptError::Finished)?;
        if exercise.kind().is_free_text() && answer.trim().is_empty() {
            return Err(AttemptError::BlankAnswer {
                exercise: exercise.id().clone(),
            });
        }
        let correct = exercise.is_correct(answer);
        let record = AnswerRecord {
            exercise_id: exercise.id().clone(),
            answer: answer.to_owned(),
            correct,
        };
        let mut outcome = AnswerOutcome {
            exercise_id: exercise.id().clone(),
            correct,
            expected: exercise.correct_answer().to_owned(),
            explanation: exercise.explanation().map(str::to_owned),
            is_last: false,
        };

        self.answers.push(record);
        if self.answers.len() >= self.exercises.len() {
            self.finished_at = Some(answered_at);
            outcome.is_last = true;
        }
        Ok(outcome)
    }
}

impl fmt::Debug for LessonAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonAttempt")
            .field("lesson_id", &self.lesson_id)
            .field("exercises_len", &self.exercises.len())
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
