//! Shared error types for the services crate.

use thiserror::Error;

use lingo_core::model::{ExerciseId, LessonId};
use lingo_storage::StorageError;

/// Errors emitted while stepping through or finishing a lesson attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("all exercises of this attempt are already answered")]
    Finished,
    #[error("exercise {exercise} needs a non-blank answer")]
    BlankAnswer { exercise: ExerciseId },
    #[error("attempt is not finished: {answered} of {total} exercises answered")]
    Unfinished { answered: usize, total: usize },
    #[error("lesson {0} is not in the catalog")]
    UnknownLesson(LessonId),
}

/// Errors emitted while bootstrapping `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
