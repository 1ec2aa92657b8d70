use smart_learn_core::model::{
    Achievement, BilingualText, Catalog, ClassLevel, LessonLocation, Mood, OverallProgress,
    ProgressRecord, QuizScore, Screen, Subject,
};
use tracing::debug;

use crate::progress_service::{CompletedLessonDetail, achievement_board, lesson_details};

#[derive(Debug, Clone, Copy)]
pub struct SubjectSummary<'a> {
    pub subject: &'a Subject,
    pub completed: usize,
    pub total: usize,
}

/// Everything a front end needs to draw one screen.
#[derive(Debug, Clone)]
pub enum ScreenContent<'a> {
    Home {
        classes: &'a [ClassLevel],
        mood: Option<Mood>,
        suggestion: Option<BilingualText>,
        overall: OverallProgress,
    },
    Subjects {
        class: &'a ClassLevel,
        subjects: Vec<SubjectSummary<'a>>,
    },
    Lesson {
        location: LessonLocation<'a>,
        /// Zero-based position within the subject.
        position: usize,
        total: usize,
        completed: bool,
        has_quiz: bool,
        score: Option<QuizScore>,
    },
    Mood {
        current: Option<Mood>,
    },
    Progress {
        overall: OverallProgress,
        achievements: Vec<(Achievement, bool)>,
        completed: Vec<CompletedLessonDetail>,
    },
    About,
    /// The screen names content the catalog does not have.
    NotFound {
        screen: Screen,
    },
}

/// Resolve `screen` against the catalog and a progress snapshot.
#[must_use]
pub fn resolve_screen<'a>(
    screen: &Screen,
    catalog: &'a Catalog,
    progress: &ProgressRecord,
    mood: Option<Mood>,
) -> ScreenContent<'a> {
    let content = match screen {
        Screen::Home => Some(ScreenContent::Home {
            classes: catalog.classes(),
            mood,
            suggestion: mood.map(Mood::suggestion),
            overall: progress.overall(),
        }),
        Screen::Subjects { class_id } => catalog.class(*class_id).map(|class| {
            let subjects = class
                .subjects
                .iter()
                .map(|subject| {
                    let (completed, total) = catalog.subject_completion(subject, progress);
                    SubjectSummary {
                        subject,
                        completed,
                        total,
                    }
                })
                .collect();
            ScreenContent::Subjects { class, subjects }
        }),
        Screen::Lesson {
            subject_id,
            lesson_id,
        } => catalog
            .find_lesson(lesson_id)
            .filter(|location| &location.subject.id == subject_id)
            .and_then(|location| {
                let position = location
                    .subject
                    .lessons()
                    .position(|lesson| &lesson.id == lesson_id)?;
                Some(ScreenContent::Lesson {
                    location,
                    position,
                    total: location.subject.lesson_count(),
                    completed: progress.is_lesson_complete(lesson_id),
                    has_quiz: !catalog.quiz(lesson_id).is_empty(),
                    score: progress.quiz_score(lesson_id),
                })
            }),
        Screen::Mood => Some(ScreenContent::Mood { current: mood }),
        Screen::Progress => {
            let overall = progress.overall();
            Some(ScreenContent::Progress {
                overall,
                achievements: achievement_board(&overall),
                completed: lesson_details(progress, catalog),
            })
        }
        Screen::About => Some(ScreenContent::About),
    };

    content.unwrap_or_else(|| {
        debug!(%screen, "screen refers to unknown content");
        ScreenContent::NotFound {
            screen: screen.clone(),
        }
    })
}
