use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::ids::{ClassId, LessonId, SubjectId};
use super::language::BilingualText;
use super::score::QuizScore;

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Everything the learner has done, persisted as a single JSON blob.
///
/// Field names serialize in camelCase so the stored blob keeps the
/// `completedLessons` / `quizScores` / `lastLoginDate` layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    completed_lessons: Vec<LessonId>,
    quiz_scores: BTreeMap<LessonId, QuizScore>,
    last_visited_class: Option<ClassId>,
    last_visited_subject: Option<SubjectId>,
    last_visited_lesson: Option<LessonId>,
    total_time_spent: u32,
    streak: u32,
    last_login_date: Option<NaiveDate>,
}

/// What happened to the streak when a login was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A login was already recorded for today.
    AlreadyCounted,
    /// The previous login was yesterday; the streak grew.
    Continued { streak: u32 },
    /// First login ever, or a gap of two days or more.
    Restarted,
}

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops duplicate completed lessons, keeping first occurrences in order.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut seen = HashSet::with_capacity(self.completed_lessons.len());
        self.completed_lessons.retain(|id| seen.insert(id.clone()));
        self
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &[LessonId] {
        &self.completed_lessons
    }

    #[must_use]
    pub fn quiz_scores(&self) -> &BTreeMap<LessonId, QuizScore> {
        &self.quiz_scores
    }

    #[must_use]
    pub fn last_visited_class(&self) -> Option<ClassId> {
        self.last_visited_class
    }

    #[must_use]
    pub fn last_visited_subject(&self) -> Option<&SubjectId> {
        self.last_visited_subject.as_ref()
    }

    #[must_use]
    pub fn last_visited_lesson(&self) -> Option<&LessonId> {
        self.last_visited_lesson.as_ref()
    }

    /// Minutes spent learning.
    #[must_use]
    pub fn total_time_spent(&self) -> u32 {
        self.total_time_spent
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn last_login_date(&self) -> Option<NaiveDate> {
        self.last_login_date
    }

    #[must_use]
    pub fn is_lesson_complete(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    #[must_use]
    pub fn quiz_score(&self, lesson_id: &LessonId) -> Option<QuizScore> {
        self.quiz_scores.get(lesson_id).copied()
    }

    /// Marks a lesson complete. Returns `false` if it already was.
    ///
    /// The lesson also becomes the last visited one on first completion.
    pub fn mark_lesson_complete(&mut self, lesson_id: LessonId) -> bool {
        if self.is_lesson_complete(&lesson_id) {
            return false;
        }
        self.last_visited_lesson = Some(lesson_id.clone());
        self.completed_lessons.push(lesson_id);
        true
    }

    /// Stores the score of the latest attempt, replacing any earlier one.
    pub fn set_quiz_score(&mut self, lesson_id: LessonId, score: QuizScore) -> Option<QuizScore> {
        self.quiz_scores.insert(lesson_id, score)
    }

    /// Updates the resume position. A `None` lesson keeps the previous one.
    pub fn set_last_visited(
        &mut self,
        class_id: ClassId,
        subject_id: SubjectId,
        lesson_id: Option<LessonId>,
    ) {
        self.last_visited_class = Some(class_id);
        self.last_visited_subject = Some(subject_id);
        if let Some(lesson_id) = lesson_id {
            self.last_visited_lesson = Some(lesson_id);
        }
    }

    pub fn add_time_spent(&mut self, minutes: u32) {
        self.total_time_spent = self.total_time_spent.saturating_add(minutes);
    }

    /// Applies the daily login streak rule for `today`.
    pub fn register_login(&mut self, today: NaiveDate) -> LoginOutcome {
        let yesterday = today.pred_opt();
        match self.last_login_date {
            Some(last) if last == today => LoginOutcome::AlreadyCounted,
            Some(last) if Some(last) == yesterday => {
                self.streak = self.streak.saturating_add(1);
                self.last_login_date = Some(today);
                LoginOutcome::Continued {
                    streak: self.streak,
                }
            }
            _ => {
                self.streak = 1;
                self.last_login_date = Some(today);
                LoginOutcome::Restarted
            }
        }
    }

    /// Aggregate numbers shown on the home and progress screens.
    #[must_use]
    pub fn overall(&self) -> OverallProgress {
        OverallProgress {
            total_completed: self.completed_lessons.len(),
            average_score: self.average_score(),
            total_time_spent: self.total_time_spent,
            streak: self.streak,
        }
    }

    fn average_score(&self) -> u8 {
        let count = self.quiz_scores.len() as u64;
        if count == 0 {
            return 0;
        }
        let sum: u64 = self
            .quiz_scores
            .values()
            .map(|score| u64::from(score.value()))
            .sum();
        // Round half up; the mean of values <= 100 always fits in a u8.
        u8::try_from((sum * 2 + count) / (count * 2)).unwrap_or(100)
    }
}

//
// ─── OVERALL PROGRESS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverallProgress {
    pub total_completed: usize,
    pub average_score: u8,
    pub total_time_spent: u32,
    pub streak: u32,
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstLesson,
    QuizMaster,
    Consistent,
    Dedicated,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::FirstLesson,
        Achievement::QuizMaster,
        Achievement::Consistent,
        Achievement::Dedicated,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstLesson => "first_lesson",
            Achievement::QuizMaster => "quiz_master",
            Achievement::Consistent => "consistent",
            Achievement::Dedicated => "dedicated",
        }
    }

    #[must_use]
    pub fn title(self) -> BilingualText {
        match self {
            Achievement::FirstLesson => BilingualText::new("First Lesson", "முதல் பாடம்"),
            Achievement::QuizMaster => BilingualText::new("Quiz Master", "வினா வல்லுநர்"),
            Achievement::Consistent => BilingualText::new("Consistent", "தொடர்ச்சி"),
            Achievement::Dedicated => BilingualText::new("Dedicated", "அர்ப்பணிப்பு"),
        }
    }

    #[must_use]
    pub fn description(self) -> BilingualText {
        match self {
            Achievement::FirstLesson => {
                BilingualText::new("Completed your first lesson", "முதல் பாடத்தை முடித்தது")
            }
            Achievement::QuizMaster => BilingualText::new("Scored above 80%", "80% மேல் மதிப்பெண்"),
            Achievement::Consistent => BilingualText::new("3 day streak", "3 நாள் தொடர்ச்சி"),
            Achievement::Dedicated => {
                BilingualText::new("Completed 5 lessons", "5 பாடங்கள் முடித்தது")
            }
        }
    }

    #[must_use]
    pub fn is_unlocked(self, overall: &OverallProgress) -> bool {
        match self {
            Achievement::FirstLesson => overall.total_completed >= 1,
            Achievement::QuizMaster => overall.average_score >= 80,
            Achievement::Consistent => overall.streak >= 3,
            Achievement::Dedicated => overall.total_completed >= 5,
        }
    }
}
