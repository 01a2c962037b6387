//! Core types for the flashcard application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card content before it is stored (generated, parsed, or typed by hand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            image_url: None,
        }
    }
}

/// Per-user review status of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    New,
    Mastered,
    Struggling,
}

impl Default for ProgressStatus {
    fn default() -> Self {
        Self::New
    }
}

impl ProgressStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Mastered => "MASTERED",
            Self::Struggling => "STRUGGLING",
        }
    }

    /// Parse from the storage representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "MASTERED" => Some(Self::Mastered),
            "STRUGGLING" => Some(Self::Struggling),
            _ => None,
        }
    }
}

/// Outcome the learner reports for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewAction {
    Mastered,
    Struggling,
}

impl ReviewAction {
    /// Status a card ends up in after this action.
    pub fn status(self) -> ProgressStatus {
        match self {
            Self::Mastered => ProgressStatus::Mastered,
            Self::Struggling => ProgressStatus::Struggling,
        }
    }
}

/// Review counters for one (user, card) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub status: ProgressStatus,
    pub times_reviewed: u32,
    pub times_mastered: u32,
    pub times_struggled: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// Stored card together with the viewing user's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub progress: Progress,
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One line of the tutor chat transcript. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Percentage of mastered cards, 0 for an empty deck.
pub fn mastered_percent(mastered: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        mastered as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_string() {
        for status in [
            ProgressStatus::New,
            ProgressStatus::Mastered,
            ProgressStatus::Struggling,
        ] {
            assert_eq!(ProgressStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ProgressStatus::from_str("LEARNING"), None);
    }

    #[test]
    fn action_maps_to_matching_status() {
        assert_eq!(ReviewAction::Mastered.status(), ProgressStatus::Mastered);
        assert_eq!(ReviewAction::Struggling.status(), ProgressStatus::Struggling);
    }

    #[test]
    fn mastered_percent_handles_empty_deck() {
        assert_eq!(mastered_percent(0, 0), 0.0);
        assert_eq!(mastered_percent(1, 1), 100.0);
        assert_eq!(mastered_percent(1, 4), 25.0);
    }
}
