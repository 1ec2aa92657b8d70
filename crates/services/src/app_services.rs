use std::sync::Arc;

use smart_learn_core::model::{Catalog, LessonId, ProgressRecord, SubjectId};
use storage::{KeyValueStore, Storage};
use tracing::info;

use crate::Clock;
use crate::catalog_service::bundled_catalog;
use crate::error::{AppServicesError, LessonError};
use crate::language_service::LanguageService;
use crate::lesson_flow::LessonFlow;
use crate::mood_detector::{MoodDetector, MoodDetectorConfig};
use crate::navigation::NavigationController;
use crate::platform::{LogSpeech, SpeechEngine};
use crate::progress_service::ProgressTracker;
use crate::screen_view::{ScreenContent, resolve_screen};
use crate::speech_service::{SpeechService, SpeechSettings};

/// Tunables for the services built by `AppServices`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesConfig {
    pub mood: MoodDetectorConfig,
    pub speech: SpeechSettings,
}

/// Explicit application context: one instance of each service, sharing a
/// store, a clock and the content catalog.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressTracker>,
    language: Arc<LanguageService>,
    mood: Arc<MoodDetector>,
    speech: Arc<SpeechService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and load progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the progress
    /// load fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Catalog,
        config: ServicesConfig,
        speech: Arc<dyn SpeechEngine>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, catalog, config, speech).await
    }

    /// In-memory services over the bundled catalog, for tests and demos.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled catalog is invalid.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(
            Storage::in_memory(),
            clock,
            bundled_catalog()?,
            ServicesConfig::default(),
            Arc::new(LogSpeech::new()),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if progress cannot be loaded.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        catalog: Catalog,
        config: ServicesConfig,
        speech: Arc<dyn SpeechEngine>,
    ) -> Result<Self, AppServicesError> {
        let progress = Arc::new(ProgressTracker::new(clock, Arc::clone(&storage.kv)));
        let record = progress.load().await?;
        info!(
            streak = record.streak(),
            completed = record.completed_lessons().len(),
            "progress loaded"
        );

        Ok(Self {
            language: Arc::new(LanguageService::new(Arc::clone(&storage.kv))),
            mood: Arc::new(MoodDetector::new(config.mood)),
            speech: Arc::new(SpeechService::new(speech, config.speech)),
            store: storage.kv,
            catalog: Arc::new(catalog),
            progress,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn language(&self) -> Arc<LanguageService> {
        Arc::clone(&self.language)
    }

    #[must_use]
    pub fn mood(&self) -> Arc<MoodDetector> {
        Arc::clone(&self.mood)
    }

    #[must_use]
    pub fn speech(&self) -> Arc<SpeechService> {
        Arc::clone(&self.speech)
    }

    /// Open a lesson for reading.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NotFound` if the subject does not contain the lesson.
    pub async fn open_lesson(
        &self,
        subject_id: SubjectId,
        lesson_id: LessonId,
    ) -> Result<LessonFlow, LessonError> {
        LessonFlow::open(
            Arc::clone(&self.catalog),
            Arc::clone(&self.progress),
            Arc::clone(&self.store),
            subject_id,
            lesson_id,
        )
        .await
    }

    /// Content of the navigator's current screen, using the latest progress.
    pub async fn current_screen(&self, navigation: &NavigationController) -> ScreenContent<'_> {
        let record: ProgressRecord = self.progress.snapshot().await;
        resolve_screen(
            navigation.screen(),
            &self.catalog,
            &record,
            navigation.current_mood(),
        )
    }
}
