use chrono::{DateTime, Utc};

use quiz_core::model::TestResult;

/// Presentation-agnostic history entry.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings,
/// no localization. The UI formats `completed_at` as it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryListItem {
    /// Ledger index, the key for detail and review lookups.
    pub index: usize,
    /// 1-based number shown as "Session N".
    pub session_number: usize,
    pub score: usize,
    pub total: usize,
    pub incorrect: usize,
    pub completed_at: DateTime<Utc>,
}

impl HistoryListItem {
    #[must_use]
    pub fn from_result(index: usize, result: &TestResult) -> Self {
        Self {
            index,
            session_number: index + 1,
            score: result.score(),
            total: result.total(),
            incorrect: result.incorrect_count(),
            completed_at: result.timestamp(),
        }
    }
}
