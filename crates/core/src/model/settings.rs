use thiserror::Error;

/// Default number of questions per test.
pub const DEFAULT_QUESTION_COUNT: usize = 20;

/// Test-start preferences: how many questions and which sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_count: usize,
    balanced: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSettingsDraft {
    pub question_count: Option<usize>,
    pub balanced: Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be > 0")]
    InvalidQuestionCount,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionCount` for a zero count.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let defaults = QuizSettings::default();
        let question_count = self.question_count.unwrap_or(defaults.question_count);
        if question_count == 0 {
            return Err(SettingsError::InvalidQuestionCount);
        }

        Ok(QuizSettings {
            question_count,
            balanced: self.balanced.unwrap_or(defaults.balanced),
        })
    }
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionCount` for a zero count.
    pub fn new(question_count: usize, balanced: bool) -> Result<Self, SettingsError> {
        QuizSettingsDraft {
            question_count: Some(question_count),
            balanced: Some(balanced),
        }
        .validate()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn balanced(&self) -> bool {
        self.balanced
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            balanced: true,
        }
    }
}
