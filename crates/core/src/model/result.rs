use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestResultError {
    #[error("score ({score}) plus incorrect ({incorrect}) does not match total ({total})")]
    CountMismatch {
        score: usize,
        incorrect: usize,
        total: usize,
    },

    #[error("{answers} answers recorded for {questions} questions")]
    AnswerLengthMismatch { questions: usize, answers: usize },
}

/// Scored outcome of a submitted test.
///
/// Holds its own copy of the questions and answers as they were at submission,
/// so later sessions cannot change what history shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    score: usize,
    total: usize,
    incorrect_count: usize,
    timestamp: DateTime<Utc>,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
}

impl TestResult {
    /// Assemble a result from already-scored parts.
    ///
    /// `total` is taken from `questions.len()`.
    ///
    /// # Errors
    ///
    /// Returns `TestResultError::AnswerLengthMismatch` if answers and questions differ in length.
    /// Returns `TestResultError::CountMismatch` if `score + incorrect_count != total`.
    pub fn from_parts(
        score: usize,
        incorrect_count: usize,
        timestamp: DateTime<Utc>,
        questions: Vec<Question>,
        answers: Vec<Option<usize>>,
    ) -> Result<Self, TestResultError> {
        let total = questions.len();
        if answers.len() != total {
            return Err(TestResultError::AnswerLengthMismatch {
                questions: total,
                answers: answers.len(),
            });
        }
        if score.checked_add(incorrect_count) != Some(total) {
            return Err(TestResultError::CountMismatch {
                score,
                incorrect: incorrect_count,
                total,
            });
        }

        Ok(Self {
            score,
            total,
            incorrect_count,
            timestamp,
            questions,
            answers,
        })
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Score as a percentage of the total; `0.0` for an empty test.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }

    /// Questions answered wrongly or left blank, in test order.
    #[must_use]
    pub fn incorrect_questions(&self) -> Vec<Question> {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| !q.is_correct(**a))
            .map(|(q, _)| q.clone())
            .collect()
    }
}
