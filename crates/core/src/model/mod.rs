pub mod content;
mod ids;
mod language;
mod mood;
mod progress;
mod score;
mod screen;

pub use content::{
    Catalog, CatalogError, Chapter, ClassLevel, Difficulty, Lesson, LessonLocation, QuizQuestion,
    Subject,
};
pub use ids::{ChapterId, ClassId, IdError, LessonId, SubjectId};
pub use language::{BilingualText, Language};
pub use mood::Mood;
pub use progress::{Achievement, LoginOutcome, OverallProgress, ProgressRecord};
pub use score::{QuizScore, ScoreError};
pub use screen::{Screen, ScreenKind};
