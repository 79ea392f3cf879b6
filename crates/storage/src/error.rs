use quiz_core::model::{QuestionError, TopicError};
use thiserror::Error;

/// Errors surfaced while loading the question bank or reading history.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read questions for topic {topic}: {source}")]
    Io {
        topic: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question document for topic {topic}: {source}")]
    Parse {
        topic: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("question {index} of topic {topic} is invalid: {source}")]
    InvalidQuestion {
        topic: String,
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error(transparent)]
    InvalidTopic(#[from] TopicError),

    #[error("no question source for topic {0}")]
    TopicNotFound(String),

    #[error("question bank is empty")]
    EmptyBank,

    #[error("duplicate question id {0}")]
    DuplicateQuestion(u64),

    #[error("history index {index} not found (ledger holds {len} sessions)")]
    HistoryIndexNotFound { index: usize, len: usize },
}
