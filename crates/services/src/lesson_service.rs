use serde::Serialize;
use tracing::{debug, info};

use lingo_core::model::{
    Achievement, DEFAULT_DAILY_GOAL, Lesson, LessonId, ProgressChange, StreakChange,
    UserProgress, achievement,
};
use lingo_storage::{InMemoryRepository, LessonRepository, seed_repository};

use crate::Clock;
use crate::attempts::{AnswerOutcome, LessonAttempt};
use crate::error::{AttemptError, ServiceError};
use crate::overview::ProgressOverview;

/// Service-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub daily_goal: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
        }
    }
}

/// What `complete_lesson` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonUpdate {
    /// No lesson with that id; nothing changed.
    NotFound,
    /// Progress stored, lesson still open.
    Progressed { progress: u8 },
    /// Lesson was already completed; no XP awarded.
    AlreadyCompleted,
    /// First completion: XP awarded and streak updated.
    Completed {
        xp_awarded: u32,
        streak: StreakChange,
    },
}

impl LessonUpdate {
    #[must_use]
    pub fn xp_awarded(&self) -> u32 {
        match self {
            LessonUpdate::Completed { xp_awarded, .. } => *xp_awarded,
            _ => 0,
        }
    }
}

/// Result of finishing an attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonCompletion {
    pub lesson_id: LessonId,
    pub correct: usize,
    pub total: usize,
    pub score_percent: f64,
    pub xp_awarded: u32,
    pub new_achievements: Vec<Achievement>,
}

/// Owns the lesson catalog and the learner's progress.
///
/// There is one instance per process; the presentation layer holds it and
/// passes it by reference. Nothing here is persisted.
pub struct LessonService {
    clock: Clock,
    lessons: Box<dyn LessonRepository>,
    progress: UserProgress,
}

impl LessonService {
    #[must_use]
    pub fn new(clock: Clock, lessons: Box<dyn LessonRepository>, config: ServiceConfig) -> Self {
        Self {
            clock,
            lessons,
            progress: UserProgress::new(config.daily_goal),
        }
    }

    /// Service over the built-in starter catalog.
    #[must_use]
    pub fn with_seed_catalog(clock: Clock, config: ServiceConfig) -> Self {
        Self::new(clock, Box::new(seed_repository()), config)
    }

    /// Service over a catalog given as JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the catalog cannot be parsed or validated.
    pub fn from_catalog_json(
        clock: Clock,
        json: &str,
        config: ServiceConfig,
    ) -> Result<Self, ServiceError> {
        let repo = InMemoryRepository::from_json(json)?;
        Ok(Self::new(clock, Box::new(repo), config))
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// All lessons in catalog order.
    #[must_use]
    pub fn list_lessons(&self) -> &[Lesson] {
        self.lessons.list_lessons()
    }

    /// Fetch a lesson by ID. Returns `None` when it does not exist.
    #[must_use]
    pub fn get_lesson(&self, id: &LessonId) -> Option<&Lesson> {
        let lesson = self.lessons.get_lesson(id);
        if lesson.is_none() {
            debug!(lesson_id = %id, "lesson not found");
        }
        lesson
    }

    #[must_use]
    pub fn get_user_progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn set_daily_goal(&mut self, goal: u32) {
        self.progress.set_daily_goal(goal);
    }

    /// Record `progress` percent on a lesson.
    ///
    /// Reaching 100 for the first time awards the lesson's XP, counts the
    /// lesson and updates the streak. Unknown ids are a no-op.
    pub fn complete_lesson(&mut self, id: &LessonId, progress: u32) -> LessonUpdate {
        let Some(lesson) = self.lessons.get_lesson_mut(id) else {
            debug!(lesson_id = %id, "ignoring progress for unknown lesson");
            return LessonUpdate::NotFound;
        };

        match lesson.record_progress(progress) {
            ProgressChange::Progressed { progress } => {
                debug!(lesson_id = %id, progress, "lesson progress stored");
                LessonUpdate::Progressed { progress }
            }
            ProgressChange::AlreadyCompleted => {
                debug!(lesson_id = %id, "lesson already completed; no XP awarded");
                LessonUpdate::AlreadyCompleted
            }
            ProgressChange::Completed => {
                let xp_awarded = lesson.xp_reward();
                let streak = self.progress.record_completion(xp_awarded, self.clock.today());
                info!(
                    lesson_id = %id,
                    xp_awarded,
                    total_xp = self.progress.total_xp(),
                    "lesson completed"
                );
                match streak {
                    StreakChange::Extended { streak } => info!(streak, "streak extended"),
                    StreakChange::Restarted => info!("streak started"),
                    StreakChange::Unchanged => {}
                }
                LessonUpdate::Completed { xp_awarded, streak }
            }
        }
    }

    /// Unlock achievements whose thresholds are now met.
    ///
    /// Returns only the newly unlocked ones; repeated calls never duplicate.
    pub fn evaluate_achievements(&mut self) -> Vec<Achievement> {
        let unlocked = achievement::evaluate(&mut self.progress);
        for achievement in &unlocked {
            info!(achievement = %achievement, "achievement unlocked");
        }
        unlocked
    }

    /// Begin an attempt at a lesson. Returns `None` when it does not exist.
    #[must_use]
    pub fn start_attempt(&self, id: &LessonId) -> Option<LessonAttempt> {
        let lesson = self.get_lesson(id)?;
        debug!(lesson_id = %id, exercises = lesson.exercises().len(), "attempt started");
        Some(LessonAttempt::new(lesson, self.clock.now()))
    }

    /// Submit an answer to the attempt's current exercise using the service clock.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Finished` if every exercise is already answered
    /// and `AttemptError::BlankAnswer` for a blank free-text answer.
    pub fn submit_answer(
        &self,
        attempt: &mut LessonAttempt,
        answer: &str,
    ) -> Result<AnswerOutcome, AttemptError> {
        attempt.submit(answer, self.clock.now())
    }

    /// Finish a fully answered attempt.
    ///
    /// The lesson is completed at 100 regardless of score, then achievements
    /// are evaluated.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Unfinished` if exercises remain unanswered and
    /// `AttemptError::UnknownLesson` if the lesson left the catalog.
    pub fn finish_attempt(
        &mut self,
        attempt: LessonAttempt,
    ) -> Result<LessonCompletion, AttemptError> {
        if !attempt.is_finished() {
            return Err(AttemptError::Unfinished {
                answered: attempt.answered_count(),
                total: attempt.total_exercises(),
            });
        }

        let lesson_id = attempt.lesson_id().clone();
        let update = self.complete_lesson(&lesson_id, 100);
        if update == LessonUpdate::NotFound {
            return Err(AttemptError::UnknownLesson(lesson_id));
        }
        let new_achievements = self.evaluate_achievements();

        Ok(LessonCompletion {
            lesson_id,
            correct: attempt.correct_count(),
            total: attempt.total_exercises(),
            score_percent: attempt.score_percent(),
            xp_awarded: update.xp_awarded(),
            new_achievements,
        })
    }

    /// Snapshot for the progress and profile screens.
    #[must_use]
    pub fn overview(&self) -> ProgressOverview {
        ProgressOverview::build(&self.progress, self.lessons.list_lessons())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
