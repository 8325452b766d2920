use lingo_core::model::{Lesson, LessonDraft, LessonError, LessonId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced while building a lesson catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("cannot read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] LessonError),

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("catalog contains no lessons")]
    Empty,
}

/// Read access to the lesson catalog plus the one write path the updater needs.
///
/// Lookups by unknown id yield `None`; callers treat that as an empty state.
pub trait LessonRepository: Send + Sync {
    /// All lessons in catalog order.
    fn list_lessons(&self) -> &[Lesson];

    /// Fetch a lesson by ID.
    fn get_lesson(&self, id: &LessonId) -> Option<&Lesson>;

    /// Fetch a lesson for in-place progress updates.
    fn get_lesson_mut(&mut self, id: &LessonId) -> Option<&mut Lesson>;
}

/// Wrapped catalog shape, `{"lessons": [...]}`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    lessons: Vec<LessonDraft>,
}

/// Accepts either a wrapped catalog or a bare array of lessons. The shape is
/// picked up front so serde reports the offending field, not a shape mismatch.
fn parse_drafts(json: &str) -> Result<Vec<LessonDraft>, serde_json::Error> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json)
    } else {
        serde_json::from_str::<CatalogFile>(json).map(|file| file.lessons)
    }
}

/// Ordered in-memory catalog. Lives for the process lifetime only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    lessons: Vec<Lesson>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from already validated lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DuplicateLesson` if two lessons share an id.
    pub fn from_lessons(lessons: Vec<Lesson>) -> Result<Self, StorageError> {
        let mut seen = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !seen.insert(lesson.id().clone()) {
                return Err(StorageError::DuplicateLesson(lesson.id().clone()));
            }
        }
        Ok(Self { lessons })
    }

    /// Validate drafts and build a repository from them, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Invalid` for the first invalid lesson and
    /// `StorageError::DuplicateLesson` if ids repeat.
    pub fn from_drafts(drafts: Vec<LessonDraft>) -> Result<Self, StorageError> {
        let lessons = drafts
            .into_iter()
            .map(LessonDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_lessons(lessons)
    }

    /// Load a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON,
    /// `StorageError::Empty` if no lessons are listed, and validation errors
    /// as in [`InMemoryRepository::from_drafts`].
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let drafts = parse_drafts(json)?;
        if drafts.is_empty() {
            return Err(StorageError::Empty);
        }
        Self::from_drafts(drafts)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read, otherwise the
    /// errors of [`InMemoryRepository::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

impl LessonRepository for InMemoryRepository {
    fn list_lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    fn get_lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id() == id)
    }

    fn get_lesson_mut(&mut self, id: &LessonId) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| l.id() == id)
    }
}
