//! Shared error types for the services crate.

use thiserror::Error;

use smart_learn_core::model::{LessonId, ScoreError, SubjectId};
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress has not been loaded yet")]
    NotLoaded,
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `NavigationController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("the subjects screen needs a selected class")]
    MissingClass,
    #[error("the lesson screen needs a selected subject and lesson")]
    MissingLesson,
}

/// Errors emitted by `MoodDetector`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoodError {
    #[error("mood detection is already running")]
    AlreadyDetecting,
    #[error("a mood was already detected; reset before detecting again")]
    AlreadyDetected,
    #[error("mood detection was reset before it finished")]
    Cancelled,
}

/// Failures reported by a camera backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CameraError {
    #[error("camera access denied")]
    PermissionDenied,
    #[error("no camera available")]
    Unavailable,
    #[error("camera error: {0}")]
    Device(String),
}

/// Failures reported by a speech engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech synthesis is not supported")]
    Unsupported,
    #[error("speech synthesis failed: {0}")]
    Engine(String),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("lesson has no quiz questions")]
    NoQuestions,
    #[error("option {option} does not exist (question has {options} options)")]
    InvalidOption { option: usize, options: usize },
    #[error("select an answer before submitting")]
    NoAnswerSelected,
    #[error("submit the current answer first")]
    NotSubmitted,
    #[error("the current answer was already submitted")]
    AlreadySubmitted,
    #[error("quiz already completed")]
    Completed,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Errors emitted by `LessonFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson {lesson} is not part of subject {subject}")]
    NotFound { subject: SubjectId, lesson: LessonId },
    #[error("no quiz is open")]
    NoQuiz,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted while loading the content catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    /// Malformed JSON, or JSON describing an inconsistent catalog.
    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
