use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::ExerciseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise id cannot be empty")]
    EmptyId,

    #[error("exercise {id} has an empty prompt")]
    EmptyPrompt { id: ExerciseId },

    #[error("exercise {id} has an empty correct answer")]
    EmptyAnswer { id: ExerciseId },

    #[error("multiple-choice exercise {id} has no options")]
    MissingOptions { id: ExerciseId },

    #[error("exercise {id} has an empty option")]
    EmptyOption { id: ExerciseId },

    #[error("correct answer of exercise {id} is not among its options")]
    AnswerNotInOptions { id: ExerciseId },
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// How an exercise is presented and how its answer is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    /// Pick one of the listed options. Compared exactly.
    MultipleChoice,
    /// Type the translation of the prompt.
    Translation,
    /// Type the missing word.
    FillBlank,
}

impl ExerciseKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::MultipleChoice => "multiple-choice",
            ExerciseKind::Translation => "translation",
            ExerciseKind::FillBlank => "fill-blank",
        }
    }

    /// Free-text kinds accept answers regardless of case and surrounding spaces.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        !matches!(self, ExerciseKind::MultipleChoice)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated exercise as it appears in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub id: ExerciseId,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ExerciseDraft {
    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` if a required text is empty, or if a
    /// multiple-choice exercise lacks options containing the correct answer.
    pub fn validate(self) -> Result<Exercise, ExerciseError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ExerciseError::EmptyId);
        }
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(ExerciseError::EmptyPrompt { id: self.id });
        }
        let correct_answer = self.correct_answer.trim().to_owned();
        if correct_answer.is_empty() {
            return Err(ExerciseError::EmptyAnswer { id: self.id });
        }

        let mut options = Vec::with_capacity(self.options.len());
        for option in self.options {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(ExerciseError::EmptyOption { id: self.id });
            }
            options.push(option);
        }

        if self.kind == ExerciseKind::MultipleChoice {
            if options.is_empty() {
                return Err(ExerciseError::MissingOptions { id: self.id });
            }
            if !options.iter().any(|o| *o == correct_answer) {
                return Err(ExerciseError::AnswerNotInOptions { id: self.id });
            }
        }

        Ok(Exercise {
            id: self.id,
            kind: self.kind,
            prompt,
            options,
            correct_answer,
            translation: normalize_optional(self.translation),
            explanation: normalize_optional(self.explanation),
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// A single question inside a lesson. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    id: ExerciseId,
    kind: ExerciseKind,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    translation: Option<String>,
    explanation: Option<String>,
}

impl Exercise {
    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answer options in display order. Empty for free-text exercises.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Returns true if `answer` is accepted for this exercise.
    ///
    /// Multiple choice requires the exact option text; free-text kinds ignore
    /// case and surrounding whitespace.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        if self.kind.is_free_text() {
            answer.trim().to_lowercase() == self.correct_answer.to_lowercase()
        } else {
            answer == self.correct_answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: ExerciseKind, options: &[&str], answer: &str) -> ExerciseDraft {
        ExerciseDraft {
            id: ExerciseId::new("1-1"),
            kind,
            prompt: "How do you say \"Hello\" in Spanish?".into(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_answer: answer.into(),
            translation: None,
            explanation: Some("  ".into()),
        }
    }

    #[test]
    fn multiple_choice_requires_exact_option() {
        let exercise = draft(ExerciseKind::MultipleChoice, &["Hola", "Adiós"], "Hola")
            .validate()
            .unwrap();
        assert!(exercise.is_correct("Hola"));
        assert!(!exercise.is_correct("hola"));
        assert!(!exercise.is_correct(" Hola"));
    }

    #[test]
    fn translation_ignores_case_and_padding() {
        let exercise = draft(ExerciseKind::Translation, &[], "Buenos días")
            .validate()
            .unwrap();
        assert!(exercise.is_correct("  buenos DÍAS "));
        assert!(!exercise.is_correct("buenas noches"));
    }

    #[test]
    fn blank_explanation_is_dropped() {
        let exercise = draft(ExerciseKind::FillBlank, &[], "tres")
            .validate()
            .unwrap();
        assert_eq!(exercise.explanation(), None);
    }

    #[test]
    fn multiple_choice_without_options_is_rejected() {
        let err = draft(ExerciseKind::MultipleChoice, &[], "Hola")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ExerciseError::MissingOptions { .. }));
    }

    #[test]
    fn answer_must_be_listed_for_multiple_choice() {
        let err = draft(ExerciseKind::MultipleChoice, &["Adiós", "Gracias"], "Hola")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ExerciseError::AnswerNotInOptions { .. }));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let mut d = draft(ExerciseKind::Translation, &[], "Mi padre");
        d.prompt = "   ".into();
        assert!(matches!(
            d.validate().unwrap_err(),
            ExerciseError::EmptyPrompt { .. }
        ));
    }

    #[test]
    fn kind_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&ExerciseKind::FillBlank).unwrap();
        assert_eq!(json, "\"fill-blank\"");
    }
}
