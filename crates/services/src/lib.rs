#![forbid(unsafe_code)]

pub mod attempts;
pub mod error;
pub mod lesson_service;
pub mod overview;

pub use lingo_core::Clock;

pub use error::{AttemptError, ServiceError};
pub use lesson_service::{LessonCompletion, LessonService, LessonUpdate, ServiceConfig};
pub use overview::{AchievementView, ProgressOverview};

pub use attempts::{AnswerOutcome, AnswerRecord, AttemptProgress, LessonAttempt};
