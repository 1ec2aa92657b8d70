use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("quiz score must be within 0..=100, got {0}")]
    OutOfRange(u32),

    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("correct answers ({correct}) exceed question count ({total})")]
    TooManyCorrect { correct: usize, total: usize },
}

/// Percentage score of a quiz attempt, always within `0..=100`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuizScore(u8);

impl QuizScore {
    /// Minimum score that counts as a passed quiz.
    pub const PASS_MARK: u8 = 70;

    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` if `percent > 100`.
    pub fn new(percent: u32) -> Result<Self, ScoreError> {
        match u8::try_from(percent) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ScoreError::OutOfRange(percent)),
        }
    }

    /// Score for `correct` right answers out of `total`, rounded to the nearest percent.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NoQuestions` when `total == 0` and
    /// `ScoreError::TooManyCorrect` when `correct > total`.
    pub fn from_answers(correct: usize, total: usize) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::NoQuestions);
        }
        if correct > total {
            return Err(ScoreError::TooManyCorrect { correct, total });
        }
        // Integer round-half-up of correct * 100 / total.
        let percent = (correct * 200 + total) / (total * 2);
        Self::new(u32::try_from(percent).unwrap_or(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS_MARK
    }
}

impl TryFrom<u32> for QuizScore {
    type Error = ScoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuizScore> for u32 {
    fn from(score: QuizScore) -> Self {
        u32::from(score.0)
    }
}

impl fmt::Debug for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuizScore({})", self.0)
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
