//! Error types for cardify-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Input rejected before any store or AI call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deck title is required")]
    EmptyTitle,

    #[error("at least one card is required")]
    NoCards,

    #[error("card {index} is missing its front text")]
    EmptyFront { index: usize },

    #[error("card {index} is missing its back text")]
    EmptyBack { index: usize },

    #[error("topic is required")]
    EmptyTopic,

    #[error("card count must be between {min} and {max}, got {count}")]
    CountOutOfRange { count: usize, min: usize, max: usize },

    #[error("chat message is required")]
    EmptyMessage,
}
