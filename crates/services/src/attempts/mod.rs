mod attempt;
mod progress;

// Public API of the attempt subsystem.
pub use crate::error::AttemptError;
pub use attempt::{AnswerOutcome, AnswerRecord, LessonAttempt};
pub use progress::AttemptProgress;
