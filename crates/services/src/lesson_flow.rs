use std::sync::Arc;

use smart_learn_core::model::{
    Catalog, Lesson, LessonId, ProgressRecord, QuizScore, SubjectId,
};
use storage::{KeyValueStore, StorageKey};
use tracing::{debug, warn};

use crate::error::LessonError;
use crate::progress_service::ProgressTracker;
use crate::quiz_session::QuizSession;

/// What `take_quiz` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStart {
    Started,
    /// The lesson has no questions, so it was marked complete directly.
    CompletedWithoutQuiz(ProgressRecord),
}

/// Reading position inside one subject, with an optional open quiz.
pub struct LessonFlow {
    catalog: Arc<Catalog>,
    tracker: Arc<ProgressTracker>,
    store: Arc<dyn KeyValueStore>,
    subject_id: SubjectId,
    lessons: Vec<LessonId>,
    index: usize,
    quiz: Option<QuizSession>,
}

impl LessonFlow {
    /// Open `lesson_id` within the ordered lessons of `subject_id`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NotFound` if the subject does not contain the lesson.
    pub async fn open(
        catalog: Arc<Catalog>,
        tracker: Arc<ProgressTracker>,
        store: Arc<dyn KeyValueStore>,
        subject_id: SubjectId,
        lesson_id: LessonId,
    ) -> Result<Self, LessonError> {
        let lessons: Vec<LessonId> = catalog
            .subject_lessons(&subject_id)
            .into_iter()
            .map(|lesson| lesson.id.clone())
            .collect();
        let Some(index) = lessons.iter().position(|id| *id == lesson_id) else {
            return Err(LessonError::NotFound {
                subject: subject_id,
                lesson: lesson_id,
            });
        };

        let flow = Self {
            catalog,
            tracker,
            store,
            subject_id,
            lessons,
            index,
            quiz: None,
        };
        flow.remember_position().await;
        Ok(flow)
    }

    #[must_use]
    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lessons[self.index]
    }

    #[must_use]
    pub fn lesson(&self) -> Option<&Lesson> {
        self.catalog
            .find_lesson(self.lesson_id())
            .map(|found| found.lesson)
    }

    /// Zero-based index and total number of lessons in the subject.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.index, self.lessons.len())
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.lessons.len()
    }

    /// Move to the previous lesson. Returns `false` on the first lesson.
    pub async fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index -= 1;
        self.moved().await;
        true
    }

    /// Move to the next lesson. Returns `false` on the last lesson.
    pub async fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        self.moved().await;
        true
    }

    pub async fn is_complete(&self) -> bool {
        self.tracker.is_lesson_complete(self.lesson_id()).await
    }

    /// # Errors
    ///
    /// Returns `LessonError::Progress` if progress cannot be stored.
    pub async fn complete(&self) -> Result<ProgressRecord, LessonError> {
        Ok(self
            .tracker
            .mark_lesson_complete(self.lesson_id().clone())
            .await?)
    }

    /// Open the lesson's quiz, or complete the lesson if it has none.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Progress` if completing a quiz-less lesson fails.
    pub async fn take_quiz(&mut self) -> Result<QuizStart, LessonError> {
        let questions = self.catalog.quiz(self.lesson_id());
        if questions.is_empty() {
            return Ok(QuizStart::CompletedWithoutQuiz(self.complete().await?));
        }
        self.quiz = Some(QuizSession::new(
            self.lesson_id().clone(),
            questions.to_vec(),
        )?);
        Ok(QuizStart::Started)
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizSession> {
        self.quiz.as_mut()
    }

    /// Record a finished quiz: the score is saved and the lesson completed.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NoQuiz` if no quiz is open, or
    /// `LessonError::Progress` if progress cannot be stored.
    pub async fn finish_quiz(&mut self, score: QuizScore) -> Result<ProgressRecord, LessonError> {
        if self.quiz.is_none() {
            return Err(LessonError::NoQuiz);
        }
        let lesson_id = self.lesson_id().clone();
        let record = self.tracker.save_quiz_score(lesson_id.clone(), score).await?;
        if record.is_lesson_complete(&lesson_id) {
            return Ok(record);
        }
        Ok(self.tracker.mark_lesson_complete(lesson_id).await?)
    }

    /// Leave the quiz and go back to reading.
    pub fn close_quiz(&mut self) {
        self.quiz = None;
    }

    async fn moved(&mut self) {
        self.quiz = None;
        debug!(lesson = %self.lesson_id(), index = self.index, "lesson changed");
        self.remember_position().await;
    }

    // Resume keys are a convenience; failing to write them is not an error.
    async fn remember_position(&self) {
        let writes = [
            (StorageKey::LastLesson, self.lesson_id().as_str()),
            (StorageKey::LastSubject, self.subject_id.as_str()),
        ];
        for (key, value) in writes {
            if let Err(err) = self.store.set(key, value).await {
                warn!(%key, error = %err, "failed to remember lesson position");
            }
        }
    }
}
