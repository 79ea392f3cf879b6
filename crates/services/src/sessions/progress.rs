/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub position: usize,
}

impl SessionProgress {
    /// Share of questions answered, in percent. `0.0` for an empty session.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_answered(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f64 / self.total as f64 * 100.0
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.remaining == 0
    }
}
