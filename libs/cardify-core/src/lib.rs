//! Core flashcard library shared by the backend and its clients.
//!
//! Provides:
//! - AI response parser (ordered extraction strategies)
//! - Offline mock card generator
//! - Count normalization and prompt templates for card generation
//! - Review state machine and the client-side study session
//! - Shared types (CardDraft, Progress, ReviewAction, etc.)

pub mod error;
pub mod generation;
pub mod mock;
pub mod parser;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{Result, ValidationError};
pub use generation::{fit_to_count, CONTINUED_SUFFIX};
pub use parser::{parse, parse_outcome, questions_only, ParseOutcome, Strategy};
pub use session::{ChatTurn, PendingReview, StudySession};
pub use types::{
    mastered_percent, CardDraft, ChatMessage, ChatRole, Progress, ProgressStatus, ReviewAction,
    StudyCard,
};
