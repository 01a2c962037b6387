//! Client-side study session.
//!
//! Holds the cards of one deck, a cursor, and the tutor chat transcript for
//! the card under the cursor. Reviews are applied in two phases: locally
//! first via [`StudySession::begin_review`], then either confirmed with the
//! stored record or rolled back when the store rejects the write.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::progress;
use crate::types::{ChatMessage, ChatRole, Progress, ProgressStatus, ReviewAction, StudyCard};
use crate::validation::validate_chat_message;

/// A review applied locally and not yet acknowledged by the store.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending review must be confirmed or rolled back"]
pub struct PendingReview {
    pub card_id: Uuid,
    pub action: ReviewAction,
    previous: Progress,
}

/// A chat question waiting for the tutor's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub card_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct StudySession {
    cards: Vec<StudyCard>,
    position: usize,
    transcript: Vec<ChatMessage>,
}

impl StudySession {
    pub fn new(cards: Vec<StudyCard>) -> Self {
        Self {
            cards,
            position: 0,
            transcript: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[StudyCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Zero-based index of the current card.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&StudyCard> {
        self.cards.get(self.position)
    }

    pub fn is_last(&self) -> bool {
        !self.cards.is_empty() && self.position == self.cards.len() - 1
    }

    pub fn mastered_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.progress.status == ProgressStatus::Mastered)
            .count()
    }

    /// Move forward, wrapping from the last card to the first.
    pub fn next_card(&mut self) -> Option<&StudyCard> {
        if self.cards.is_empty() {
            return None;
        }
        self.position = (self.position + 1) % self.cards.len();
        self.transcript.clear();
        self.current()
    }

    /// Move back, wrapping from the first card to the last.
    pub fn prev_card(&mut self) -> Option<&StudyCard> {
        if self.cards.is_empty() {
            return None;
        }
        self.position = if self.position == 0 {
            self.cards.len() - 1
        } else {
            self.position - 1
        };
        self.transcript.clear();
        self.current()
    }

    /// Apply `action` to the current card locally.
    pub fn begin_review(&mut self, action: ReviewAction, now: DateTime<Utc>) -> Option<PendingReview> {
        let card = self.cards.get_mut(self.position)?;
        let previous = card.progress.clone();
        card.progress = progress::review(&previous, action, now);

        Some(PendingReview {
            card_id: card.id,
            action,
            previous,
        })
    }

    /// Replace the optimistic value with the record the store returned.
    pub fn confirm(&mut self, pending: PendingReview, stored: Progress) {
        if let Some(card) = self.card_mut(pending.card_id) {
            card.progress = stored;
        }
    }

    /// Restore the progress the card had before the review was applied.
    pub fn rollback(&mut self, pending: PendingReview) {
        if let Some(card) = self.card_mut(pending.card_id) {
            card.progress = pending.previous;
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Record a user question about the current card.
    pub fn ask(&mut self, message: &str) -> Result<ChatTurn> {
        validate_chat_message(message)?;
        let card_id = self.current().ok_or(ValidationError::NoCards)?.id;
        let message = message.trim().to_string();

        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: message.clone(),
        });

        Ok(ChatTurn { card_id, message })
    }

    /// Append the tutor's reply. Replies for a card the learner has already
    /// left are dropped along with that card's transcript.
    pub fn record_reply(&mut self, turn: &ChatTurn, reply: impl Into<String>) -> bool {
        if self.current().map(|c| c.id) != Some(turn.card_id) {
            return false;
        }
        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            text: reply.into(),
        });
        true
    }

    fn card_mut(&mut self, card_id: Uuid) -> Option<&mut StudyCard> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }
}
