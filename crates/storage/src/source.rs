use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quiz_core::model::{QuestionDraft, Topic, TopicError};

use crate::error::StorageError;

/// Wire shape of a question inside a topic document.
///
/// A document is a JSON array of these records. `topic` may be omitted, in
/// which case the topic the document was fetched for is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(default)]
    pub topic: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// Convert into a domain draft, falling back to `document_topic` when the
    /// record carries no topic of its own.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Empty` if the record's topic is blank.
    pub fn into_draft(self, document_topic: &Topic) -> Result<QuestionDraft, TopicError> {
        let topic = match self.topic {
            Some(raw) => Topic::new(raw)?,
            None => document_topic.clone(),
        };
        Ok(QuestionDraft {
            topic,
            question: self.question,
            options: self.options,
            correct_index: self.correct_index,
            explanation: self.explanation,
        })
    }
}

/// Provider of per-topic question documents.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every record of one topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the topic document cannot be read or parsed.
    async fn fetch_topic(&self, topic: &Topic) -> Result<Vec<QuestionRecord>, StorageError>;
}

/// Reads `<root>/<topic>.json` from the filesystem.
#[derive(Debug, Clone)]
pub struct FsQuestionSource {
    root: PathBuf,
}

impl FsQuestionSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn topic_path(&self, topic: &Topic) -> PathBuf {
        self.root.join(format!("{topic}.json"))
    }
}

#[async_trait]
impl QuestionSource for FsQuestionSource {
    async fn fetch_topic(&self, topic: &Topic) -> Result<Vec<QuestionRecord>, StorageError> {
        let path = self.topic_path(topic);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StorageError::Io {
                topic: topic.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            topic: topic.to_string(),
            source,
        })
    }
}

/// In-memory source for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    topics: HashMap<Topic, Vec<QuestionRecord>>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_topic(mut self, topic: Topic, records: Vec<QuestionRecord>) -> Self {
        self.topics.insert(topic, records);
        self
    }

    /// Register a topic from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Parse` if the document is not a record array.
    pub fn with_json(self, topic: Topic, json: &str) -> Result<Self, StorageError> {
        let records = serde_json::from_str(json).map_err(|source| StorageError::Parse {
            topic: topic.to_string(),
            source,
        })?;
        Ok(self.with_topic(topic, records))
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch_topic(&self, topic: &Topic) -> Result<Vec<QuestionRecord>, StorageError> {
        self.topics
            .get(topic)
            .cloned()
            .ok_or_else(|| StorageError::TopicNotFound(topic.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"[
        {
            "topic": "economy",
            "question": "Which sector employs the most people?",
            "options": ["Services", "Mining", "Fishing"],
            "correctIndex": 0,
            "explanation": "Most jobs are in services."
        },
        {
            "question": "What is the currency?",
            "options": ["Dollar", "Euro"],
            "correctIndex": 0
        }
    ]"#;

    #[tokio::test]
    async fn fs_source_reads_topic_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("economy.json"), DOC).unwrap();
        let source = FsQuestionSource::new(dir.path());

        let records = source
            .fetch_topic(&Topic::new("economy").unwrap())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].correct_index, 0);
        assert_eq!(records[1].topic, None);
        assert_eq!(records[1].explanation, "");
    }

    #[tokio::test]
    async fn fs_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsQuestionSource::new(dir.path());

        let err = source
            .fetch_topic(&Topic::new("law").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { ref topic, .. } if topic == "law"));
    }

    #[tokio::test]
    async fn fs_source_reports_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("law.json"), "{ not json").unwrap();
        let source = FsQuestionSource::new(dir.path());

        let err = source
            .fetch_topic(&Topic::new("law").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn record_without_topic_uses_document_topic() {
        let records: Vec<QuestionRecord> = serde_json::from_str(DOC).unwrap();
        let fallback = Topic::new("fallback").unwrap();

        let first = records[0].clone().into_draft(&fallback).unwrap();
        let second = records[1].clone().into_draft(&fallback).unwrap();

        assert_eq!(first.topic.as_str(), "economy");
        assert_eq!(second.topic, fallback);
    }

    #[tokio::test]
    async fn in_memory_source_reports_unknown_topic() {
        let source = InMemoryQuestionSource::new();
        let err = source
            .fetch_topic(&Topic::new("rights").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::TopicNotFound(_)));
    }
}
