mod catalog;
mod lesson;
mod quiz;

pub use catalog::{Catalog, CatalogError, LessonLocation};
pub use lesson::{Chapter, ClassLevel, Difficulty, Lesson, Subject};
pub use quiz::QuizQuestion;
