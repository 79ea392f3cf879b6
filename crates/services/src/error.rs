//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::TestResultError;
use storage::StorageError;

use crate::sessions::Direction;

/// Errors emitted by test sessions and the quiz engine's session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// A test was requested with zero questions. Zero is rejected rather than
    /// clamped; counts above the bank size clamp to the bank.
    #[error("question count must be > 0")]
    InvalidSampleCount,
    #[error("cannot move {direction} from question {} of {total}", .position + 1)]
    NavigationOutOfBounds {
        direction: Direction,
        position: usize,
        total: usize,
    },
    #[error("option {option} does not exist (question has {available} options)")]
    InvalidOption { option: usize, available: usize },
    #[error("session has no questions")]
    NoQuestion,
    #[error("no test has been submitted yet")]
    NoSubmission,
    #[error("no history session is open")]
    NoViewedSession,
    #[error(transparent)]
    Result(#[from] TestResultError),
}

/// Errors emitted by `QuizEngine` operations that touch storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
