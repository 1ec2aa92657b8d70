use smart_learn_core::model::{BilingualText, LessonId, QuizQuestion, QuizScore};
use tracing::debug;

use crate::error::QuizError;

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: usize,
    pub explanation: BilingualText,
}

impl AnswerFeedback {
    /// Short phrase read aloud after an answer.
    #[must_use]
    pub fn spoken_text(&self) -> BilingualText {
        if self.correct {
            BilingualText::new("Correct! Great job!", "சரி! நல்ல வேலை!")
        } else {
            BilingualText::new(
                "Incorrect. Try again next time.",
                "தவறு. மீண்டும் முயற்சி செய்யுங்கள்.",
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub correct: usize,
    pub total: usize,
}

impl QuizOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.score.is_pass()
    }

    #[must_use]
    pub fn verdict(&self) -> BilingualText {
        match self.score.value() {
            80.. => BilingualText::new("Excellent!", "அருமை!"),
            60.. => BilingualText::new("Good Job!", "நல்ல வேலை!"),
            _ => BilingualText::new("Keep Practicing!", "பயிற்சியைத் தொடருங்கள்!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Question(usize),
    Completed(QuizOutcome),
}

/// One pass through a lesson's questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    lesson_id: LessonId,
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<usize>,
    submitted: bool,
    answers: Vec<Option<usize>>,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty question list.
    pub fn new(lesson_id: LessonId, questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            lesson_id,
            questions,
            index: 0,
            selected: None,
            submitted: false,
            answers,
            outcome: None,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.index]
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.outcome
    }

    /// Choose an option for the current question. Changing the choice is
    /// allowed until it is submitted.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the option does not exist, the answer was
    /// already submitted, or the quiz is over.
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        self.ensure_open()?;
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let options = self.current_question().options.len();
        if option >= options {
            return Err(QuizError::InvalidOption { option, options });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Lock in the selected answer and reveal whether it was right.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if nothing is selected, the answer was already
    /// submitted, or the quiz is over.
    pub fn submit(&mut self) -> Result<AnswerFeedback, QuizError> {
        self.ensure_open()?;
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let selected = self.selected.ok_or(QuizError::NoAnswerSelected)?;
        self.answers[self.index] = Some(selected);
        self.submitted = true;

        let question = self.current_question();
        Ok(AnswerFeedback {
            correct: question.is_correct(selected),
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        })
    }

    /// Advance past a submitted answer. After the last question the quiz
    /// completes with the rounded percentage of correct answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSubmitted` before the current answer is
    /// submitted, and `QuizError::Completed` once the quiz is over.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        self.ensure_open()?;
        if !self.submitted {
            return Err(QuizError::NotSubmitted);
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.selected = None;
            self.submitted = false;
            return Ok(QuizStep::Question(self.index));
        }

        let correct = self
            .answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, question)| answer.is_some_and(|a| question.is_correct(a)))
            .count();
        let total = self.questions.len();
        let outcome = QuizOutcome {
            score: QuizScore::from_answers(correct, total)?,
            correct,
            total,
        };
        debug!(lesson = %self.lesson_id, score = %outcome.score, "quiz completed");
        self.outcome = Some(outcome);
        Ok(QuizStep::Completed(outcome))
    }

    /// Start over from the first question with no answers.
    pub fn retake(&mut self) {
        self.index = 0;
        self.selected = None;
        self.submitted = false;
        self.answers.fill(None);
        self.outcome = None;
    }

    fn ensure_open(&self) -> Result<(), QuizError> {
        if self.outcome.is_some() {
            Err(QuizError::Completed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> BilingualText {
        BilingualText::new(s, s)
    }

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: text("q"),
            options: vec![text("a"), text("b"), text("c")],
            correct_answer: correct,
            explanation: text("because"),
        }
    }

    fn session(n: usize) -> QuizSession {
        let questions = (0..n).map(|i| question(i % 3)).collect();
        QuizSession::new(LessonId::new("L1").unwrap(), questions).unwrap()
    }

    fn answer(quiz: &mut QuizSession, option: usize) -> (AnswerFeedback, QuizStep) {
        quiz.select(option).unwrap();
        let feedback = quiz.submit().unwrap();
        (feedback, quiz.next().unwrap())
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = QuizSession::new(LessonId::new("L1").unwrap(), Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::NoQuestions));
    }

    #[test]
    fn two_of_three_rounds_to_67_and_fails() {
        let mut quiz = session(3);
        let (feedback, step) = answer(&mut quiz, 0);
        assert!(feedback.correct);
        assert_eq!(step, QuizStep::Question(1));
        let (feedback, _) = answer(&mut quiz, 0);
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, 1);
        let (_, step) = answer(&mut quiz, 2);

        let QuizStep::Completed(outcome) = step else {
            panic!("expected completion, got {step:?}");
        };
        assert_eq!(outcome.score.value(), 67);
        assert_eq!((outcome.correct, outcome.total), (2, 3));
        assert!(!outcome.passed());
        assert_eq!(outcome.verdict().en, "Good Job!");
    }

    #[test]
    fn submit_and_next_enforce_order() {
        let mut quiz = session(2);
        assert!(matches!(quiz.submit(), Err(QuizError::NoAnswerSelected)));
        assert!(matches!(quiz.next(), Err(QuizError::NotSubmitted)));
        assert!(matches!(
            quiz.select(5),
            Err(QuizError::InvalidOption { option: 5, options: 3 })
        ));

        quiz.select(1).unwrap();
        quiz.select(0).unwrap();
        quiz.submit().unwrap();
        assert!(matches!(quiz.select(1), Err(QuizError::AlreadySubmitted)));
        assert!(matches!(quiz.submit(), Err(QuizError::AlreadySubmitted)));
    }

    #[test]
    fn retake_clears_answers() {
        let mut quiz = session(1);
        let (_, step) = answer(&mut quiz, 0);
        assert!(matches!(step, QuizStep::Completed(o) if o.score.value() == 100 && o.passed()));
        assert!(matches!(quiz.select(0), Err(QuizError::Completed)));

        quiz.retake();
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.outcome(), None);
        let (_, step) = answer(&mut quiz, 2);
        assert!(matches!(step, QuizStep::Completed(o) if o.score.value() == 0));
    }
}
