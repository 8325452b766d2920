pub mod achievement;
mod exercise;
mod ids;
mod lesson;
mod progress;

pub use ids::{ExerciseId, LessonId, ParseIdError};

pub use achievement::{Achievement, ParseAchievementError};
pub use exercise::{Exercise, ExerciseDraft, ExerciseError, ExerciseKind};
pub use lesson::{COMPLETE_PROGRESS, Difficulty, Lesson, LessonDraft, LessonError, ProgressChange};
pub use progress::{DEFAULT_DAILY_GOAL, StreakChange, UserProgress, XP_PER_LEVEL};
