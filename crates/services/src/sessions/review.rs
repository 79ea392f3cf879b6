use std::fmt;
use std::str::FromStr;

use quiz_core::model::{Question, TestResult};

/// Text shown for an unanswered slot.
pub const NO_ANSWER: &str = "None";

/// Which reviewed questions to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    #[default]
    All,
    Correct,
    Incorrect,
}

impl ReviewMode {
    #[must_use]
    pub fn admits(self, is_correct: bool) -> bool {
        match self {
            ReviewMode::All => true,
            ReviewMode::Correct => is_correct,
            ReviewMode::Incorrect => !is_correct,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewMode::All => "all",
            ReviewMode::Correct => "correct",
            ReviewMode::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReviewModeError(String);

impl fmt::Display for ParseReviewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown review filter: {}", self.0)
    }
}

impl std::error::Error for ParseReviewModeError {}

impl FromStr for ReviewMode {
    type Err = ParseReviewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "correct" => Ok(Self::Correct),
            "incorrect" => Ok(Self::Incorrect),
            _ => Err(ParseReviewModeError(s.to_string())),
        }
    }
}

/// One reviewed question, ready for display.
///
/// Plain data with no formatting beyond substituting `NO_ANSWER` for a
/// blank slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// Position in the test, 0-based.
    pub index: usize,
    pub question: String,
    pub selected: Option<usize>,
    pub your_answer: String,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

impl ReviewItem {
    /// 1-based question number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Project questions and answer slots into review items, keeping test order.
///
/// Missing slots count as unanswered.
#[must_use]
pub fn filter(questions: &[Question], answers: &[Option<usize>], mode: ReviewMode) -> Vec<ReviewItem> {
    questions
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let selected = answers.get(index).copied().flatten();
            let is_correct = question.is_correct(selected);
            if !mode.admits(is_correct) {
                return None;
            }
            let your_answer = selected
                .and_then(|i| question.option(i))
                .unwrap_or(NO_ANSWER)
                .to_string();
            Some(ReviewItem {
                index,
                question: question.question().to_string(),
                selected,
                your_answer,
                correct_answer: question.correct_option().to_string(),
                explanation: question.explanation().to_string(),
                is_correct,
            })
        })
        .collect()
}

#[must_use]
pub fn filter_result(result: &TestResult, mode: ReviewMode) -> Vec<ReviewItem> {
    filter(result.questions(), result.answers(), mode)
}
