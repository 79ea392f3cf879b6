use quiz_core::model::TestResult;

use crate::error::StorageError;

/// Append-only, process-lifetime record of submitted tests.
///
/// Insertion order is chronological and an index, once returned, always
/// refers to the same result.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    results: Vec<TestResult>,
}

impl HistoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result and return its index.
    pub fn append(&mut self, result: TestResult) -> usize {
        self.results.push(result);
        self.results.len() - 1
    }

    #[must_use]
    pub fn all(&self) -> &[TestResult] {
        &self.results
    }

    /// # Errors
    ///
    /// Returns `StorageError::HistoryIndexNotFound` if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<&TestResult, StorageError> {
        self.results
            .get(index)
            .ok_or(StorageError::HistoryIndexNotFound {
                index,
                len: self.results.len(),
            })
    }

    #[must_use]
    pub fn latest(&self) -> Option<&TestResult> {
        self.results.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
