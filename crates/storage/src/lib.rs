#![forbid(unsafe_code)]

pub mod bank;
pub mod config;
pub mod error;
pub mod ledger;
pub mod source;

pub use bank::{QuestionBank, load_bank};
pub use config::BankConfig;
pub use error::StorageError;
pub use ledger::HistoryLedger;
pub use source::{FsQuestionSource, InMemoryQuestionSource, QuestionRecord, QuestionSource};
