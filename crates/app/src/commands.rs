//! Command bodies that return their printable output.

use std::fmt::{self, Write};

use lingo_core::model::LessonId;
use lingo_services::{AttemptError, LessonService};

use crate::render;

#[derive(Debug)]
pub enum StudyError {
    AnswerCount {
        lesson: LessonId,
        expected: usize,
        given: usize,
    },
    Attempt(AttemptError),
    Json(serde_json::Error),
}

impl fmt::Display for StudyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyError::AnswerCount {
                lesson,
                expected,
                given,
            } => write!(
                f,
                "lesson {lesson} has {expected} exercises but {given} --answer values were given"
            ),
            StudyError::Attempt(err) => write!(f, "{err}"),
            StudyError::Json(err) => write!(f, "cannot encode output: {err}"),
        }
    }
}

impl std::error::Error for StudyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudyError::AnswerCount { .. } => None,
            StudyError::Attempt(err) => Some(err),
            StudyError::Json(err) => Some(err),
        }
    }
}

impl From<AttemptError> for StudyError {
    fn from(err: AttemptError) -> Self {
        StudyError::Attempt(err)
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        StudyError::Json(err)
    }
}

/// Run a full attempt at lesson `id`, one answer per exercise in order.
///
/// Nothing is recorded unless every answer is accepted.
///
/// # Errors
///
/// Returns `StudyError::AnswerCount` if the answers do not match the
/// exercises one to one, and `StudyError::Attempt` if an answer is rejected.
pub fn study(
    service: &mut LessonService,
    id: &LessonId,
    answers: &[String],
    json: bool,
) -> Result<String, StudyError> {
    let Some(mut attempt) = service.start_attempt(id) else {
        return Ok(if json {
            "null\n".to_owned()
        } else {
            render::not_found(id)
        });
    };

    if answers.len() != attempt.total_exercises() {
        return Err(StudyError::AnswerCount {
            lesson: id.clone(),
            expected: attempt.total_exercises(),
            given: answers.len(),
        });
    }

    let mut out = String::new();
    for answer in answers {
        if !json {
            if let Some(exercise) = attempt.current_exercise() {
                let _ = writeln!(out, "{}", exercise.prompt());
            }
        }
        let outcome = service.submit_answer(&mut attempt, answer)?;
        if !json {
            out.push_str(&render::answer(&outcome));
        }
    }

    let completion = service.finish_attempt(attempt)?;
    if json {
        let mut encoded = serde_json::to_string_pretty(&completion)?;
        encoded.push('\n');
        Ok(encoded)
    } else {
        out.push_str(&render::completion(&completion));
        Ok(out)
    }
}
