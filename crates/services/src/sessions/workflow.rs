use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info};

use quiz_core::model::{Question, QuizSettings, TestResult};
use storage::{BankConfig, HistoryLedger, QuestionBank};

use super::review::{ReviewItem, ReviewMode, filter_result};
use super::sampler::{SelectionStrategy, TestBuilder};
use super::scoring::score;
use super::session::TestSession;
use super::view::HistoryListItem;
use crate::Clock;
use crate::error::{EngineError, SessionError};

/// Owns everything a quiz run needs: the bank, the history ledger, the
/// incorrect list of the last submission and the history entry being viewed.
///
/// Sessions are handed out by value and handed back on submit.
pub struct QuizEngine {
    bank: QuestionBank,
    clock: Clock,
    settings: QuizSettings,
    rng: StdRng,
    ledger: HistoryLedger,
    last_incorrect: Option<Vec<Question>>,
    viewed: Option<usize>,
}

impl QuizEngine {
    #[must_use]
    pub fn new(bank: QuestionBank, clock: Clock) -> Self {
        Self {
            bank,
            clock,
            settings: QuizSettings::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            ledger: HistoryLedger::new(),
            last_incorrect: None,
            viewed: None,
        }
    }

    /// Load the bank described by `config` and build an engine over it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if any topic fails to load.
    pub async fn load(config: &BankConfig, clock: Clock) -> Result<Self, EngineError> {
        let bank = config.load().await?;
        Ok(Self::new(bank, clock))
    }

    /// Make sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Sample a new test and start a session on it.
    ///
    /// A `count` above the bank size yields the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSampleCount` when `count` is zero.
    pub fn start_test(&mut self, count: usize, balanced: bool) -> Result<TestSession, SessionError> {
        if count == 0 {
            return Err(SessionError::InvalidSampleCount);
        }
        if count > self.bank.len() {
            debug!(requested = count, available = self.bank.len(), "clamping test size to bank");
        }

        let strategy = SelectionStrategy::from_balanced(balanced);
        let plan = TestBuilder::new(self.bank.questions())
            .with_strategy(strategy)
            .build(count, &mut self.rng);
        debug!(
            ?strategy,
            total = plan.total(),
            per_topic = plan.per_topic,
            topic_selected = plan.topic_selected,
            fill_selected = plan.fill_selected,
            "test started"
        );

        Ok(TestSession::new(plan.questions))
    }

    /// Start a test using the configured count and strategy.
    ///
    /// # Errors
    ///
    /// See `start_test`.
    pub fn start_default_test(&mut self) -> Result<TestSession, SessionError> {
        self.start_test(self.settings.question_count(), self.settings.balanced())
    }

    /// Score the session, append the result to history and remember its
    /// incorrect questions for `retry_incorrect`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the scored counts are inconsistent.
    pub fn submit(&mut self, session: TestSession) -> Result<&TestResult, SessionError> {
        let scored = score(session, self.clock.now())?;
        info!(
            score = scored.result.score(),
            total = scored.result.total(),
            incorrect = scored.result.incorrect_count(),
            "test submitted"
        );

        self.last_incorrect = Some(scored.incorrect);
        let index = self.ledger.append(scored.result);
        debug!(index, "result appended to history");

        self.ledger.latest().ok_or(SessionError::NoSubmission)
    }

    /// Incorrect questions of the most recent submission, if any.
    #[must_use]
    pub fn last_incorrect(&self) -> Option<&[Question]> {
        self.last_incorrect.as_deref()
    }

    /// Start a session over the questions missed in the last submission,
    /// in their original order.
    ///
    /// A perfect last submission gives an empty session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubmission` before the first submit.
    pub fn retry_incorrect(&self) -> Result<TestSession, SessionError> {
        let incorrect = self
            .last_incorrect
            .as_ref()
            .ok_or(SessionError::NoSubmission)?;
        debug!(questions = incorrect.len(), "retrying incorrect questions");
        Ok(TestSession::new(incorrect.clone()))
    }

    /// Review the most recent submission.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSubmission` before the first submit.
    pub fn review_current(&self, mode: ReviewMode) -> Result<Vec<ReviewItem>, SessionError> {
        let result = self.ledger.latest().ok_or(SessionError::NoSubmission)?;
        Ok(filter_result(result, mode))
    }

    /// Review a past submission by ledger index.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the index is not in the ledger.
    pub fn review_session(
        &self,
        index: usize,
        mode: ReviewMode,
    ) -> Result<Vec<ReviewItem>, EngineError> {
        let result = self.ledger.get(index)?;
        Ok(filter_result(result, mode))
    }

    /// Summaries of every submission, oldest first.
    #[must_use]
    pub fn list_history(&self) -> Vec<HistoryListItem> {
        self.ledger
            .all()
            .iter()
            .enumerate()
            .map(|(index, result)| HistoryListItem::from_result(index, result))
            .collect()
    }

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the index is not in the ledger.
    pub fn get_session_detail(&self, index: usize) -> Result<&TestResult, EngineError> {
        Ok(self.ledger.get(index)?)
    }

    /// Mark a history entry as the one being viewed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the index is not in the ledger; the
    /// previously viewed entry is kept in that case.
    pub fn open_session(&mut self, index: usize) -> Result<&TestResult, EngineError> {
        let result = self.ledger.get(index)?;
        self.viewed = Some(index);
        Ok(result)
    }

    #[must_use]
    pub fn viewed_index(&self) -> Option<usize> {
        self.viewed
    }

    #[must_use]
    pub fn viewed_session(&self) -> Option<&TestResult> {
        self.viewed.and_then(|index| self.ledger.get(index).ok())
    }

    pub fn close_session(&mut self) {
        self.viewed = None;
    }

    /// Review the history entry opened with `open_session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoViewedSession` if no entry is open.
    pub fn review_viewed(&self, mode: ReviewMode) -> Result<Vec<ReviewItem>, EngineError> {
        let index = self.viewed.ok_or(SessionError::NoViewedSession)?;
        self.review_session(index, mode)
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("bank_len", &self.bank.len())
            .field("settings", &self.settings)
            .field("history_len", &self.ledger.len())
            .field(
                "last_incorrect_len",
                &self.last_incorrect.as_ref().map(Vec::len),
            )
            .field("viewed", &self.viewed)
            .finish_non_exhaustive()
    }
}
