use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::lesson::{Chapter, ClassLevel, Lesson, Subject};
use super::quiz::QuizQuestion;
use crate::model::ids::{ClassId, LessonId, SubjectId};
use crate::model::progress::ProgressRecord;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("class {0} is defined more than once")]
    DuplicateClass(ClassId),

    #[error("subject {0} is defined more than once")]
    DuplicateSubject(SubjectId),

    #[error("lesson {0} is defined more than once")]
    DuplicateLesson(LessonId),

    #[error("quiz refers to unknown lesson {0}")]
    QuizForUnknownLesson(LessonId),

    #[error("question {index} of lesson {lesson} needs at least two options")]
    TooFewOptions { lesson: LessonId, index: usize },

    #[error("question {index} of lesson {lesson} marks option {correct} correct but has {options} options")]
    CorrectAnswerOutOfRange {
        lesson: LessonId,
        index: usize,
        correct: usize,
        options: usize,
    },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogData {
    classes: Vec<ClassLevel>,
    #[serde(default)]
    quizzes: BTreeMap<LessonId, Vec<QuizQuestion>>,
}

/// Immutable lookup table of classes, subjects, chapters, lessons and quizzes.
///
/// Subject and lesson identifiers are unique across the whole catalog, so a
/// subject or lesson can be resolved without knowing its class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    classes: Vec<ClassLevel>,
    quizzes: BTreeMap<LessonId, Vec<QuizQuestion>>,
}

/// Where a lesson lives inside the catalog.
#[derive(Debug, Clone, Copy)]
pub struct LessonLocation<'a> {
    pub class: &'a ClassLevel,
    pub subject: &'a Subject,
    pub chapter: &'a Chapter,
    pub lesson: &'a Lesson,
}

impl Catalog {
    /// Builds a catalog after checking identifier uniqueness and quiz consistency.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` describing the first inconsistency found.
    pub fn new(
        classes: Vec<ClassLevel>,
        quizzes: BTreeMap<LessonId, Vec<QuizQuestion>>,
    ) -> Result<Self, CatalogError> {
        let mut class_ids = HashSet::new();
        let mut subject_ids = HashSet::new();
        let mut lesson_ids = HashSet::new();

        for class in &classes {
            if !class_ids.insert(class.id) {
                return Err(CatalogError::DuplicateClass(class.id));
            }
            for subject in &class.subjects {
                if !subject_ids.insert(subject.id.clone()) {
                    return Err(CatalogError::DuplicateSubject(subject.id.clone()));
                }
                for lesson in subject.lessons() {
                    if !lesson_ids.insert(lesson.id.clone()) {
                        return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
                    }
                }
            }
        }

        for (lesson, questions) in &quizzes {
            if !lesson_ids.contains(lesson) {
                return Err(CatalogError::QuizForUnknownLesson(lesson.clone()));
            }
            for (index, question) in questions.iter().enumerate() {
                if question.options.len() < 2 {
                    return Err(CatalogError::TooFewOptions {
                        lesson: lesson.clone(),
                        index,
                    });
                }
                if question.correct_answer >= question.options.len() {
                    return Err(CatalogError::CorrectAnswerOutOfRange {
                        lesson: lesson.clone(),
                        index,
                        correct: question.correct_answer,
                        options: question.options.len(),
                    });
                }
            }
        }

        Ok(Self { classes, quizzes })
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassLevel] {
        &self.classes
    }

    #[must_use]
    pub fn class(&self, class_id: ClassId) -> Option<&ClassLevel> {
        self.classes.iter().find(|class| class.id == class_id)
    }

    #[must_use]
    pub fn subject(&self, class_id: ClassId, subject_id: &SubjectId) -> Option<&Subject> {
        self.class(class_id)?.subject(subject_id)
    }

    /// Finds a subject in any class.
    #[must_use]
    pub fn find_subject(&self, subject_id: &SubjectId) -> Option<(&ClassLevel, &Subject)> {
        self.classes.iter().find_map(|class| {
            class
                .subject(subject_id)
                .map(|subject| (class, subject))
        })
    }

    #[must_use]
    pub fn find_lesson(&self, lesson_id: &LessonId) -> Option<LessonLocation<'_>> {
        for class in &self.classes {
            for subject in &class.subjects {
                for chapter in &subject.chapters {
                    if let Some(lesson) = chapter.lessons.iter().find(|l| &l.id == lesson_id) {
                        return Some(LessonLocation {
                            class,
                            subject,
                            chapter,
                            lesson,
                        });
                    }
                }
            }
        }
        None
    }

    /// Lessons of a subject in reading order; empty when the subject is unknown.
    #[must_use]
    pub fn subject_lessons(&self, subject_id: &SubjectId) -> Vec<&Lesson> {
        self.find_subject(subject_id)
            .map(|(_, subject)| subject.lessons().collect())
            .unwrap_or_default()
    }

    /// Quiz questions for a lesson; empty when the lesson has no quiz.
    #[must_use]
    pub fn quiz(&self, lesson_id: &LessonId) -> &[QuizQuestion] {
        self.quizzes.get(lesson_id).map_or(&[], Vec::as_slice)
    }

    /// `(completed, total)` lesson counts for a subject.
    #[must_use]
    pub fn subject_completion(&self, subject: &Subject, progress: &ProgressRecord) -> (usize, usize) {
        subject.lessons().fold((0, 0), |(done, total), lesson| {
            let done = done + usize::from(progress.is_lesson_complete(&lesson.id));
            (done, total + 1)
        })
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = CatalogError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Catalog::new(data.classes, data.quizzes)
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            classes: catalog.classes,
            quizzes: catalog.quizzes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::Difficulty;
    use crate::model::ids::ChapterId;
    use crate::model::language::BilingualText;

    fn text(s: &str) -> BilingualText {
        BilingualText::new(s, s)
    }

    fn lesson(id: &str) -> Lesson {
        Lesson {
            id: LessonId::new(id).unwrap(),
            title: text(id),
            content: text("body"),
            difficulty: Difficulty::Easy,
        }
    }

    fn chapter(id: &str, lessons: &[&str]) -> Chapter {
        Chapter {
            id: ChapterId::new(id).unwrap(),
            title: text(id),
            lessons: lessons.iter().map(|l| lesson(l)).collect(),
        }
    }

    fn subject(id: &str, chapters: Vec<Chapter>) -> Subject {
        Subject {
            id: SubjectId::new(id).unwrap(),
            name: text(id),
            icon: String::new(),
            chapters,
        }
    }

    fn class(id: u32, subjects: Vec<Subject>) -> ClassLevel {
        ClassLevel {
            id: ClassId::new(id).unwrap(),
            name: text("class"),
            subjects,
        }
    }

    fn question(options: usize, correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: text("q"),
            options: (0..options).map(|i| text(&i.to_string())).collect(),
            correct_answer: correct,
            explanation: text("because"),
        }
    }

    fn sample() -> Catalog {
        let science = subject(
            "science",
            vec![chapter("ch1", &["L1", "L2"]), chapter("ch2", &["L3"])],
        );
        let maths = subject("maths", vec![chapter("m1", &["M1"])]);
        let mut quizzes = BTreeMap::new();
        quizzes.insert(LessonId::new("L1").unwrap(), vec![question(4, 2)]);
        Catalog::new(vec![class(6, vec![science, maths])], quizzes).unwrap()
    }

    #[test]
    fn subject_lessons_follow_chapter_order() {
        let catalog = sample();
        let ids: Vec<_> = catalog
            .subject_lessons(&SubjectId::new("science").unwrap())
            .into_iter()
            .map(|l| l.id.as_str().to_owned())
            .collect();
        assert_eq!(ids, ["L1", "L2", "L3"]);
        assert!(catalog
            .subject_lessons(&SubjectId::new("history").unwrap())
            .is_empty());
    }

    #[test]
    fn find_lesson_reports_location() {
        let catalog = sample();
        let found = catalog.find_lesson(&LessonId::new("L3").unwrap()).unwrap();
        assert_eq!(found.chapter.id.as_str(), "ch2");
        assert_eq!(found.subject.id.as_str(), "science");
        assert_eq!(found.class.id.value(), 6);
        assert!(catalog.find_lesson(&LessonId::new("nope").unwrap()).is_none());
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        let catalog = sample();
        assert!(catalog.class(ClassId::new(9).unwrap()).is_none());
        assert!(catalog
            .subject(ClassId::new(6).unwrap(), &SubjectId::new("art").unwrap())
            .is_none());
        assert!(catalog.quiz(&LessonId::new("L2").unwrap()).is_empty());
        assert_eq!(catalog.quiz(&LessonId::new("L1").unwrap()).len(), 1);
    }

    #[test]
    fn single_chapter_subjects_are_detected() {
        let catalog = sample();
        let (_, maths) = catalog
            .find_subject(&SubjectId::new("maths").unwrap())
            .unwrap();
        assert!(maths.single_chapter().is_some());
        let (_, science) = catalog
            .find_subject(&SubjectId::new("science").unwrap())
            .unwrap();
        assert!(science.single_chapter().is_none());
        assert_eq!(science.lesson_count(), 3);
    }

    #[test]
    fn subject_completion_counts_completed_lessons() {
        let catalog = sample();
        let mut progress = ProgressRecord::new();
        progress.mark_lesson_complete(LessonId::new("L2").unwrap());
        progress.mark_lesson_complete(LessonId::new("M1").unwrap());
        let (_, science) = catalog
            .find_subject(&SubjectId::new("science").unwrap())
            .unwrap();
        assert_eq!(catalog.subject_completion(science, &progress), (1, 3));
    }

    #[test]
    fn rejects_duplicate_lessons_across_subjects() {
        let a = subject("a", vec![chapter("c", &["L1"])]);
        let b = subject("b", vec![chapter("c", &["L1"])]);
        let err = Catalog::new(vec![class(1, vec![a, b])], BTreeMap::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLesson(LessonId::new("L1").unwrap()));
    }

    #[test]
    fn rejects_inconsistent_quizzes() {
        let classes = vec![class(1, vec![subject("a", vec![chapter("c", &["L1"])])])];

        let mut unknown = BTreeMap::new();
        unknown.insert(LessonId::new("L9").unwrap(), vec![question(2, 0)]);
        assert!(matches!(
            Catalog::new(classes.clone(), unknown),
            Err(CatalogError::QuizForUnknownLesson(_))
        ));

        let mut out_of_range = BTreeMap::new();
        out_of_range.insert(LessonId::new("L1").unwrap(), vec![question(3, 3)]);
        assert!(matches!(
            Catalog::new(classes.clone(), out_of_range),
            Err(CatalogError::CorrectAnswerOutOfRange { correct: 3, .. })
        ));

        let mut too_few = BTreeMap::new();
        too_few.insert(LessonId::new("L1").unwrap(), vec![question(1, 0)]);
        assert!(matches!(
            Catalog::new(classes, too_few),
            Err(CatalogError::TooFewOptions { index: 0, .. })
        ));
    }

    #[test]
    fn deserializing_validates() {
        let json = r#"{
            "classes": [{
                "id": 1,
                "name": {"en": "Class 1", "ta": "வகுப்பு 1"},
                "subjects": []
            }, {
                "id": 1,
                "name": {"en": "Again", "ta": "Again"},
                "subjects": []
            }]
        }"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
