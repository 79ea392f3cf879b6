use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::topic::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("correct index {index} is outside the {count} options")]
    CorrectIndexOutOfRange { index: usize, count: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question fields, as read from a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub topic: Topic,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft and attach the bank-assigned identity.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are fewer than two
    /// options, an option is blank, or `correct_index` does not point at an option.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let question = self.question.trim().to_string();
        if question.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let count = self.options.len();
        if count < 2 {
            return Err(QuestionError::TooFewOptions { count });
        }
        if let Some(index) = self.options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::BlankOption { index });
        }
        if self.correct_index >= count {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                count,
            });
        }

        Ok(Question {
            id,
            topic: self.topic,
            question,
            options: self.options,
            correct_index: self.correct_index,
            explanation: self.explanation.trim().to_string(),
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// `correct_index` always points into `options`. The type owns all of its
/// data, so a clone is a full structural copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    topic: Topic,
    question: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        // Validation guarantees the index is in range.
        self.options
            .get(self.correct_index)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether an answer slot holds the correct option. Unanswered is never correct.
    #[must_use]
    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_index)
    }
}
