#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod language_service;
pub mod lesson_flow;
pub mod mood_detector;
pub mod navigation;
pub mod platform;
pub mod progress_service;
pub mod quiz_session;
pub mod screen_view;
pub mod speech_service;

pub use smart_learn_core::Clock;

pub use app_services::{AppServices, ServicesConfig};
pub use catalog_service::{bundled_catalog, load_catalog, load_catalog_file};
pub use error::{
    AppServicesError, CameraError, CatalogLoadError, LessonError, MoodError, NavigationError,
    ProgressError, QuizError, SpeechError,
};
pub use language_service::LanguageService;
pub use lesson_flow::{LessonFlow, QuizStart};
pub use mood_detector::{
    DetectionState, MoodDetector, MoodDetectorConfig, MoodReading, MoodSource,
};
pub use navigation::{NavParams, NavigationController, Selections};
pub use platform::{Camera, LogSpeech, NoCamera, SpeechEngine, Utterance};
pub use progress_service::{CompletedLessonDetail, ProgressTracker};
pub use quiz_session::{AnswerFeedback, QuizOutcome, QuizSession, QuizStep};
pub use screen_view::{ScreenContent, SubjectSummary, resolve_screen};
pub use speech_service::{SpeechService, SpeechSettings};
