use serde::{Deserialize, Serialize};

use crate::model::language::BilingualText;

/// One multiple-choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: BilingualText,
    pub options: Vec<BilingualText>,
    pub correct_answer: usize,
    pub explanation: BilingualText,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&BilingualText> {
        self.options.get(self.correct_answer)
    }
}
