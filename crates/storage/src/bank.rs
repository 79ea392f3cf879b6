use futures::future::try_join_all;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, instrument, warn};

use quiz_core::model::{Question, QuestionId, Topic};

use crate::error::StorageError;
use crate::source::QuestionSource;

/// Immutable pool of questions, loaded once per run.
///
/// Never empty and never holds two questions with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from already validated questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::EmptyBank` if `questions` is empty.
    /// Returns `StorageError::DuplicateQuestion` if two questions share an id.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, StorageError> {
        if questions.is_empty() {
            return Err(StorageError::EmptyBank);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(StorageError::DuplicateQuestion(question.id().value()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Distinct topics in sorted order.
    #[must_use]
    pub fn topics(&self) -> Vec<&Topic> {
        self.by_topic().into_keys().collect()
    }

    /// Questions grouped by topic, topics in sorted order, bank order within each.
    #[must_use]
    pub fn by_topic(&self) -> BTreeMap<&Topic, Vec<&Question>> {
        group_by_topic(&self.questions)
    }
}

/// Group a question slice by topic. Topic order is sorted so seeded sampling
/// is reproducible.
#[must_use]
pub fn group_by_topic(questions: &[Question]) -> BTreeMap<&Topic, Vec<&Question>> {
    let mut groups: BTreeMap<&Topic, Vec<&Question>> = BTreeMap::new();
    for question in questions {
        groups.entry(question.topic()).or_default().push(question);
    }
    groups
}

/// Fetch every topic concurrently and concatenate them into one bank.
///
/// The load is all-or-nothing: if any topic fails to fetch or contains an
/// invalid question, no bank is produced. Ids are assigned in topic order,
/// then document order.
///
/// # Errors
///
/// Returns the first `StorageError` raised by the source, `InvalidQuestion`
/// for a record that fails validation, or `EmptyBank` if nothing was loaded.
#[instrument(skip_all, fields(topics = topics.len()))]
pub async fn load_bank(
    source: &dyn QuestionSource,
    topics: &[Topic],
) -> Result<QuestionBank, StorageError> {
    let fetches = topics.iter().map(|topic| async move {
        let records = source.fetch_topic(topic).await.inspect_err(|err| {
            warn!(%topic, error = %err, "topic fetch failed");
        })?;
        Ok::<_, StorageError>((topic, records))
    });
    let documents = try_join_all(fetches).await?;

    let mut questions = Vec::new();
    let mut next_id = 0_u64;
    for (topic, records) in documents {
        for (index, record) in records.into_iter().enumerate() {
            let draft = record.into_draft(topic)?;
            let question = draft
                .validate(QuestionId::new(next_id))
                .map_err(|source| StorageError::InvalidQuestion {
                    topic: topic.to_string(),
                    index,
                    source,
                })?;
            next_id += 1;
            questions.push(question);
        }
    }

    let bank = QuestionBank::from_questions(questions)?;
    info!(questions = bank.len(), "question bank loaded");
    Ok(bank)
}
