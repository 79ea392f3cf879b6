#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{EngineError, SessionError};
pub use sessions::{
    HistoryListItem, QuizEngine, ReviewItem, ReviewMode, SelectionStrategy, SessionProgress,
    TestSession,
};
