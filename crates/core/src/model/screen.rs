use std::fmt;

use super::ids::{ClassId, LessonId, SubjectId};

/// The active screen together with exactly the data it needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Subjects {
        class_id: ClassId,
    },
    Lesson {
        subject_id: SubjectId,
        lesson_id: LessonId,
    },
    Mood,
    Progress,
    About,
}

/// Screen discriminant, used to request a transition before its data is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Home,
    Subjects,
    Lesson,
    Mood,
    Progress,
    About,
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Home => ScreenKind::Home,
            Screen::Subjects { .. } => ScreenKind::Subjects,
            Screen::Lesson { .. } => ScreenKind::Lesson,
            Screen::Mood => ScreenKind::Mood,
            Screen::Progress => ScreenKind::Progress,
            Screen::About => ScreenKind::About,
        }
    }
}

impl ScreenKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ScreenKind::Home => "home",
            ScreenKind::Subjects => "subjects",
            ScreenKind::Lesson => "lesson",
            ScreenKind::Mood => "mood",
            ScreenKind::Progress => "progress",
            ScreenKind::About => "about",
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Subjects { class_id } => write!(f, "subjects(class {class_id})"),
            Screen::Lesson {
                subject_id,
                lesson_id,
            } => write!(f, "lesson({subject_id}/{lesson_id})"),
            other => f.write_str(other.kind().name()),
        }
    }
}
