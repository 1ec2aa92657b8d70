use smart_learn_core::model::{ClassId, LessonId, Mood, Screen, ScreenKind, SubjectId};
use tracing::debug;

use crate::error::NavigationError;

/// Optional selection updates carried by a transition.
///
/// Fields left unset keep their previous value in the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams {
    class: Option<ClassId>,
    subject: Option<SubjectId>,
    lesson: Option<LessonId>,
    mood: Option<Option<Mood>>,
}

impl NavParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(mut self, class_id: ClassId) -> Self {
        self.class = Some(class_id);
        self
    }

    #[must_use]
    pub fn subject(mut self, subject_id: SubjectId) -> Self {
        self.subject = Some(subject_id);
        self
    }

    #[must_use]
    pub fn lesson(mut self, lesson_id: LessonId) -> Self {
        self.lesson = Some(lesson_id);
        self
    }

    /// Set the current mood; `None` clears it.
    #[must_use]
    pub fn mood(mut self, mood: Option<Mood>) -> Self {
        self.mood = Some(mood);
        self
    }
}

/// Remembered selections, independent of the active screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub class: Option<ClassId>,
    pub subject: Option<SubjectId>,
    pub lesson: Option<LessonId>,
    pub mood: Option<Mood>,
}

impl Selections {
    fn merged(&self, params: NavParams) -> Self {
        Self {
            class: params.class.or(self.class),
            subject: params.subject.or_else(|| self.subject.clone()),
            lesson: params.lesson.or_else(|| self.lesson.clone()),
            mood: params.mood.unwrap_or(self.mood),
        }
    }

    fn screen_for(&self, kind: ScreenKind) -> Result<Screen, NavigationError> {
        Ok(match kind {
            ScreenKind::Home => Screen::Home,
            ScreenKind::Subjects => Screen::Subjects {
                class_id: self.class.ok_or(NavigationError::MissingClass)?,
            },
            ScreenKind::Lesson => match (&self.subject, &self.lesson) {
                (Some(subject_id), Some(lesson_id)) => Screen::Lesson {
                    subject_id: subject_id.clone(),
                    lesson_id: lesson_id.clone(),
                },
                _ => return Err(NavigationError::MissingLesson),
            },
            ScreenKind::Mood => Screen::Mood,
            ScreenKind::Progress => Screen::Progress,
            ScreenKind::About => Screen::About,
        })
    }
}

/// In-memory screen state machine. Starts on `Home` and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    screen: Screen,
    selections: Selections,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    #[must_use]
    pub fn current_mood(&self) -> Option<Mood> {
        self.selections.mood
    }

    /// Switch to `kind`, merging `params` into the remembered selections.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` if the target screen still lacks a required
    /// selection after the merge. The controller is left unchanged.
    pub fn navigate(&mut self, kind: ScreenKind, params: NavParams) -> Result<&Screen, NavigationError> {
        let selections = self.selections.merged(params);
        let screen = selections.screen_for(kind)?;
        debug!(from = %self.screen, to = %screen, "navigate");
        self.selections = selections;
        self.screen = screen;
        Ok(&self.screen)
    }

    /// Open the subject list of a class.
    pub fn select_class(&mut self, class_id: ClassId) -> &Screen {
        self.go(ScreenKind::Subjects, NavParams::new().class(class_id))
    }

    pub fn select_lesson(&mut self, lesson_id: LessonId, subject_id: SubjectId) -> &Screen {
        self.go(
            ScreenKind::Lesson,
            NavParams::new().lesson(lesson_id).subject(subject_id),
        )
    }

    /// Leave the mood flow for home. `None` means the learner skipped it.
    pub fn finish_mood(&mut self, mood: Option<Mood>) -> &Screen {
        self.go(ScreenKind::Home, NavParams::new().mood(mood))
    }

    pub fn open_mood(&mut self) -> &Screen {
        self.go(ScreenKind::Mood, NavParams::new())
    }

    pub fn open_progress(&mut self) -> &Screen {
        self.go(ScreenKind::Progress, NavParams::new())
    }

    pub fn open_about(&mut self) -> &Screen {
        self.go(ScreenKind::About, NavParams::new())
    }

    pub fn back_to_home(&mut self) -> &Screen {
        self.go(ScreenKind::Home, NavParams::new())
    }

    /// The back action of the current screen: lesson returns to its subject
    /// list, every other screen returns home.
    pub fn back(&mut self) -> &Screen {
        let to_subjects =
            matches!(self.screen, Screen::Lesson { .. }) && self.selections.class.is_some();
        if to_subjects {
            self.go(ScreenKind::Subjects, NavParams::new())
        } else {
            self.back_to_home()
        }
    }

    // Transitions whose params always satisfy the target screen.
    fn go(&mut self, kind: ScreenKind, params: NavParams) -> &Screen {
        let selections = self.selections.merged(params);
        match selections.screen_for(kind) {
            Ok(screen) => {
                debug!(from = %self.screen, to = %screen, "navigate");
                self.selections = selections;
                self.screen = screen;
            }
            Err(err) => debug!(%err, target = %kind, "transition ignored"),
        }
        &self.screen
    }
}
