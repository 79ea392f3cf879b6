mod progress;
mod review;
mod sampler;
mod scoring;
mod session;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use review::{NO_ANSWER, ParseReviewModeError, ReviewItem, ReviewMode, filter, filter_result};
pub use sampler::{
    SelectionStrategy, TestBuilder, TestPlan, balanced_selection, random_selection,
};
pub use scoring::{Scored, incorrect_positions, score};
pub use session::{Direction, ForwardAction, TestSession};
pub use view::HistoryListItem;
pub use workflow::QuizEngine;
