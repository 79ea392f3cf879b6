mod ids;
mod question;
mod result;
mod settings;
mod topic;

pub use ids::{ParseIdError, QuestionId};
pub use question::{Question, QuestionDraft, QuestionError};
pub use result::{TestResult, TestResultError};
pub use settings::{DEFAULT_QUESTION_COUNT, QuizSettings, QuizSettingsDraft, SettingsError};
pub use topic::{Topic, TopicError};
