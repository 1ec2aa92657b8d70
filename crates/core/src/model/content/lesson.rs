use serde::{Deserialize, Serialize};

use crate::model::ids::{ChapterId, ClassId, LessonId, SubjectId};
use crate::model::language::BilingualText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> BilingualText {
        match self {
            Difficulty::Easy => BilingualText::new("Easy", "எளிது"),
            Difficulty::Medium => BilingualText::new("Medium", "நடுத்தரம்"),
            Difficulty::Hard => BilingualText::new("Hard", "கடினம்"),
        }
    }
}

/// Smallest unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: BilingualText,
    pub content: BilingualText,
    pub difficulty: Difficulty,
}

/// Ordered group of lessons inside a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: BilingualText,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: BilingualText,
    #[serde(default)]
    pub icon: String,
    pub chapters: Vec<Chapter>,
}

impl Subject {
    /// All lessons of the subject in reading order (chapter by chapter).
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.chapters.iter().flat_map(|chapter| chapter.lessons.iter())
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.lessons.len()).sum()
    }

    /// A subject with a single chapter skips the chapter list and opens lessons directly.
    #[must_use]
    pub fn single_chapter(&self) -> Option<&Chapter> {
        match self.chapters.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Top-level grade grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub id: ClassId,
    pub name: BilingualText,
    pub subjects: Vec<Subject>,
}

impl ClassLevel {
    #[must_use]
    pub fn subject(&self, subject_id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| &subject.id == subject_id)
    }
}
