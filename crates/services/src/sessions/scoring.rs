use chrono::{DateTime, Utc};

use quiz_core::model::{Question, TestResult};

use super::session::TestSession;
use crate::error::SessionError;

/// Outcome of scoring one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub result: TestResult,
    /// Wrong or unanswered questions in test order; seeds a retry.
    pub incorrect: Vec<Question>,
}

/// Positions of the questions whose slot does not hold the correct option.
#[must_use]
pub fn incorrect_positions(questions: &[Question], answers: &[Option<usize>]) -> Vec<usize> {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| !q.is_correct(answers.get(*i).copied().flatten()))
        .map(|(i, _)| i)
        .collect()
}

/// Score a finished session.
///
/// The session is consumed; its questions and answers move into the result,
/// so nothing outside the result can reach them afterwards. The incorrect
/// list is a separate copy.
///
/// # Errors
///
/// Returns `SessionError::Result` if the counts fail the result invariants.
pub fn score(session: TestSession, completed_at: DateTime<Utc>) -> Result<Scored, SessionError> {
    let (questions, answers) = session.into_parts();
    let wrong = incorrect_positions(&questions, &answers);
    let incorrect: Vec<Question> = wrong.iter().map(|&i| questions[i].clone()).collect();
    let score = questions.len() - incorrect.len();

    let result = TestResult::from_parts(score, incorrect.len(), completed_at, questions, answers)?;
    Ok(Scored { result, incorrect })
}
