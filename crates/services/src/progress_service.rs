use std::sync::Arc;

use smart_learn_core::model::{
    Achievement, BilingualText, Catalog, ClassId, LessonId, LoginOutcome, OverallProgress,
    ProgressRecord, QuizScore, SubjectId,
};
use storage::{KeyValueStore, StorageKey};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::ProgressError;

/// A completed lesson joined with its catalog entry, for the progress screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLessonDetail {
    pub lesson_id: LessonId,
    pub lesson_title: BilingualText,
    pub subject_name: BilingualText,
    pub subject_icon: String,
    pub score: Option<QuizScore>,
}

/// Join the completed lessons of `record` with `catalog`, in completion order.
#[must_use]
pub fn lesson_details(record: &ProgressRecord, catalog: &Catalog) -> Vec<CompletedLessonDetail> {
    record
        .completed_lessons()
        .iter()
        .filter_map(|lesson_id| {
            let found = catalog.find_lesson(lesson_id)?;
            Some(CompletedLessonDetail {
                lesson_id: lesson_id.clone(),
                lesson_title: found.lesson.title.clone(),
                subject_name: found.subject.name.clone(),
                subject_icon: found.subject.icon.clone(),
                score: record.quiz_score(lesson_id),
            })
        })
        .collect()
}

/// Every achievement paired with whether `overall` unlocks it.
#[must_use]
pub fn achievement_board(overall: &OverallProgress) -> Vec<(Achievement, bool)> {
    Achievement::ALL
        .into_iter()
        .map(|achievement| (achievement, achievement.is_unlocked(overall)))
        .collect()
}

struct TrackerState {
    record: ProgressRecord,
    loaded: bool,
}

/// Owns the learner's progress record and keeps the stored copy in sync.
///
/// Every mutation clones the current record, applies the change, writes the
/// whole record back under `learningProgress`, and only then swaps the new
/// snapshot in. The state lock is held across the write so concurrent
/// callers cannot lose each other's updates.
pub struct ProgressTracker {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<TrackerState>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            store,
            state: Mutex::new(TrackerState {
                record: ProgressRecord::new(),
                loaded: false,
            }),
        }
    }

    /// Read the stored record (or start fresh) and count today's login.
    ///
    /// A missing or unparseable blob falls back to defaults with a streak of 1.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read or written.
    pub async fn load(&self) -> Result<ProgressRecord, ProgressError> {
        let mut state = self.state.lock().await;
        let today = self.clock.today();

        let stored = match self.store.get(StorageKey::Progress).await? {
            Some(blob) => match serde_json::from_str::<ProgressRecord>(&blob) {
                Ok(record) => Some(record.normalized()),
                Err(err) => {
                    warn!(error = %err, "stored progress is unreadable, starting fresh");
                    None
                }
            },
            None => None,
        };

        let mut record = stored.unwrap_or_default();
        match record.register_login(today) {
            LoginOutcome::AlreadyCounted => {
                debug!(streak = record.streak(), "login already counted today");
            }
            outcome => {
                info!(?outcome, streak = record.streak(), %today, "login recorded");
                self.persist(&record).await?;
            }
        }

        state.record = record.clone();
        state.loaded = true;
        Ok(record)
    }

    /// Current snapshot of the record.
    pub async fn snapshot(&self) -> ProgressRecord {
        self.state.lock().await.record.clone()
    }

    /// Add a lesson to the completed set. Completing it again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if progress was not loaded or cannot be stored.
    pub async fn mark_lesson_complete(
        &self,
        lesson_id: LessonId,
    ) -> Result<ProgressRecord, ProgressError> {
        let mut state = self.loaded_state().await?;
        if state.record.is_lesson_complete(&lesson_id) {
            return Ok(state.record.clone());
        }
        let mut next = state.record.clone();
        next.mark_lesson_complete(lesson_id.clone());
        self.persist(&next).await?;
        info!(lesson = %lesson_id, total = next.completed_lessons().len(), "lesson completed");
        state.record = next.clone();
        Ok(next)
    }

    /// Record the latest quiz score for a lesson.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if progress was not loaded or cannot be stored.
    pub async fn save_quiz_score(
        &self,
        lesson_id: LessonId,
        score: QuizScore,
    ) -> Result<ProgressRecord, ProgressError> {
        self.update(|record| {
            debug!(lesson = %lesson_id, %score, "saving quiz score");
            record.set_quiz_score(lesson_id, score);
        })
        .await
    }

    /// Remember where the learner was. `None` keeps the previous lesson.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if progress was not loaded or cannot be stored.
    pub async fn set_last_visited(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        lesson_id: Option<LessonId>,
    ) -> Result<ProgressRecord, ProgressError> {
        self.update(|record| record.set_last_visited(class_id, subject_id, lesson_id))
            .await
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if progress was not loaded or cannot be stored.
    pub async fn add_time_spent(&self, minutes: u32) -> Result<ProgressRecord, ProgressError> {
        self.update(|record| record.add_time_spent(minutes)).await
    }

    pub async fn is_lesson_complete(&self, lesson_id: &LessonId) -> bool {
        self.state.lock().await.record.is_lesson_complete(lesson_id)
    }

    pub async fn quiz_score(&self, lesson_id: &LessonId) -> Option<QuizScore> {
        self.state.lock().await.record.quiz_score(lesson_id)
    }

    pub async fn overall_progress(&self) -> OverallProgress {
        self.state.lock().await.record.overall()
    }

    /// Every achievement paired with whether it is unlocked.
    pub async fn achievements(&self) -> Vec<(Achievement, bool)> {
        achievement_board(&self.overall_progress().await)
    }

    /// Completed lessons in completion order, skipping ids the catalog does not know.
    pub async fn completed_lesson_details(&self, catalog: &Catalog) -> Vec<CompletedLessonDetail> {
        lesson_details(&self.snapshot().await, catalog)
    }

    /// Delete the stored record and go back to defaults (streak 0, no dates).
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the stored record cannot be removed.
    pub async fn reset(&self) -> Result<ProgressRecord, ProgressError> {
        let mut state = self.state.lock().await;
        self.store.remove(StorageKey::Progress).await?;
        state.record = ProgressRecord::new();
        info!("progress reset");
        Ok(state.record.clone())
    }

    async fn loaded_state(&self) -> Result<tokio::sync::MutexGuard<'_, TrackerState>, ProgressError> {
        let state = self.state.lock().await;
        if !state.loaded {
            return Err(ProgressError::NotLoaded);
        }
        Ok(state)
    }

    async fn update<F>(&self, apply: F) -> Result<ProgressRecord, ProgressError>
    where
        F: FnOnce(&mut ProgressRecord),
    {
        let mut state = self.loaded_state().await?;
        let mut next = state.record.clone();
        apply(&mut next);
        self.persist(&next).await?;
        state.record = next.clone();
        Ok(next)
    }

    async fn persist(&self, record: &ProgressRecord) -> Result<(), ProgressError> {
        let blob = serde_json::to_string(record)?;
        self.store.set(StorageKey::Progress, &blob).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storage::InMemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn lesson(id: &str) -> LessonId {
        LessonId::new(id).unwrap()
    }

    fn tracker_on(store: &InMemoryStore, today: NaiveDate) -> ProgressTracker {
        ProgressTracker::new(Clock::fixed_on(today), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn mutations_before_load_are_rejected() {
        let store = InMemoryStore::new();
        let tracker = tracker_on(&store, day(10));
        let err = tracker.mark_lesson_complete(lesson("L1")).await.unwrap_err();
        assert!(matches!(err, ProgressError::NotLoaded));
        assert_eq!(store.get(StorageKey::Progress).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unchanged_completion_does_not_rewrite_the_blob() {
        let store = InMemoryStore::new();
        let tracker = tracker_on(&store, day(10));
        tracker.load().await.unwrap();
        tracker.mark_lesson_complete(lesson("L1")).await.unwrap();

        store.set(StorageKey::Progress, "sentinel").await.unwrap();
        tracker.mark_lesson_complete(lesson("L1")).await.unwrap();
        assert_eq!(
            store.get(StorageKey::Progress).await.unwrap().as_deref(),
            Some("sentinel")
        );
    }

    #[tokio::test]
    async fn reloading_on_the_same_day_keeps_the_streak() {
        let store = InMemoryStore::new();
        tracker_on(&store, day(10)).load().await.unwrap();
        let again = tracker_on(&store, day(10)).load().await.unwrap();
        assert_eq!(again.streak(), 1);
        assert_eq!(again.last_login_date(), Some(day(10)));
    }

    #[tokio::test]
    async fn details_skip_unknown_lessons() {
        let store = InMemoryStore::new();
        let tracker = tracker_on(&store, day(10));
        tracker.load().await.unwrap();
        tracker.mark_lesson_complete(lesson("ghost")).await.unwrap();
        let details = tracker.completed_lesson_details(&Catalog::default()).await;
        assert!(details.is_empty());
    }
}
