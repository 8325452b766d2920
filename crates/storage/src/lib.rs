#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use repository::{InMemoryRepository, LessonRepository, StorageError};
pub use seed::{seed_lessons, seed_repository};
