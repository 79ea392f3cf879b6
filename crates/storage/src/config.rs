use std::path::PathBuf;

use quiz_core::model::Topic;

use crate::bank::{QuestionBank, load_bank};
use crate::error::StorageError;
use crate::source::FsQuestionSource;

/// Env var overriding the directory that holds `<topic>.json` documents.
pub const QUESTIONS_DIR_ENV: &str = "QUIZ_QUESTIONS_DIR";
/// Env var overriding the topic list (comma-separated).
pub const TOPICS_ENV: &str = "QUIZ_TOPICS";

pub const DEFAULT_QUESTIONS_DIR: &str = "questions";
pub const DEFAULT_TOPICS: [&str; 8] = [
    "rights",
    "history",
    "government",
    "geography",
    "symbols",
    "economy",
    "law",
    "indigenous",
];

/// Where the question bank comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub questions_dir: PathBuf,
    pub topics: Vec<Topic>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            questions_dir: PathBuf::from(DEFAULT_QUESTIONS_DIR),
            topics: DEFAULT_TOPICS
                .iter()
                .filter_map(|t| Topic::new(*t).ok())
                .collect(),
        }
    }
}

impl BankConfig {
    /// Defaults overridden by `QUIZ_QUESTIONS_DIR` and `QUIZ_TOPICS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// Blank values fall back to the defaults, as does a topic list with no
    /// usable entries.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(QUESTIONS_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.questions_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(TOPICS_ENV) {
            let topics: Vec<Topic> = raw.split(',').filter_map(|t| Topic::new(t).ok()).collect();
            if !topics.is_empty() {
                config.topics = topics;
            }
        }

        config
    }

    #[must_use]
    pub fn source(&self) -> FsQuestionSource {
        FsQuestionSource::new(&self.questions_dir)
    }

    /// Load every configured topic from disk.
    ///
    /// # Errors
    ///
    /// Propagates the `StorageError` of the first failing topic.
    pub async fn load(&self) -> Result<QuestionBank, StorageError> {
        load_bank(&self.source(), &self.topics).await
    }
}
