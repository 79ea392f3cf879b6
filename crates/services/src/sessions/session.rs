use std::fmt;

use quiz_core::model::Question;

use super::progress::SessionProgress;
use crate::error::SessionError;

/// Navigation direction, reported in out-of-bounds errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "back"),
        }
    }
}

/// The forward control a UI should offer at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardAction {
    Next,
    Submit,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a test set.
///
/// Holds the questions, one answer slot per question and the current
/// position. The question list never changes after construction. Submitting
/// consumes the session, see `QuizEngine::submit`.
#[derive(Clone)]
pub struct TestSession {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    position: usize,
}

impl TestSession {
    /// Start a session at the first question with every slot unanswered.
    ///
    /// An empty question list is allowed (retrying a perfect test); such a
    /// session can only be submitted.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            position: 0,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.position).copied().flatten()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.position + 1 < self.questions.len()
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.position > 0
    }

    /// Submission is available from every position.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        true
    }

    #[must_use]
    pub fn is_at_last(&self) -> bool {
        !self.questions.is_empty() && self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn forward_action(&self) -> ForwardAction {
        if self.can_go_next() {
            ForwardAction::Next
        } else {
            ForwardAction::Submit
        }
    }

    /// Record `option` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` on an empty session.
    /// Returns `SessionError::InvalidOption` if the question has no such option.
    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        let Some(question) = self.questions.get(self.position) else {
            return Err(SessionError::NoQuestion);
        };
        let available = question.option_count();
        if option >= available {
            return Err(SessionError::InvalidOption { option, available });
        }
        self.answers[self.position] = Some(option);
        Ok(())
    }

    /// Move to the next question and return the new position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NavigationOutOfBounds` at the last question.
    pub fn next(&mut self) -> Result<usize, SessionError> {
        if !self.can_go_next() {
            return Err(self.out_of_bounds(Direction::Next));
        }
        self.position += 1;
        Ok(self.position)
    }

    /// Move to the previous question and return the new position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NavigationOutOfBounds` at the first question.
    pub fn prev(&mut self) -> Result<usize, SessionError> {
        if !self.can_go_prev() {
            return Err(self.out_of_bounds(Direction::Prev));
        }
        self.position -= 1;
        Ok(self.position)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.total(),
            answered,
            remaining: self.total().saturating_sub(answered),
            position: self.position,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Question>, Vec<Option<usize>>) {
        (self.questions, self.answers)
    }

    fn out_of_bounds(&self, direction: Direction) -> SessionError {
        SessionError::NavigationOutOfBounds {
            direction,
            position: self.position,
            total: self.questions.len(),
        }
    }
}

impl fmt::Debug for TestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSession")
            .field("questions_len", &self.questions.len())
            .field("answered", &self.answered_count())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
