//! Input checks shared by every entry point.

use crate::error::{Result, ValidationError};
use crate::types::CardDraft;

/// Smallest number of cards a generation request may ask for.
pub const MIN_GENERATE_COUNT: usize = 1;
/// Largest number of cards a generation request may ask for.
pub const MAX_GENERATE_COUNT: usize = 20;

/// Check a deck before it is written: non-blank title, at least one card,
/// and no blank card sides.
pub fn validate_new_deck(title: &str, cards: &[CardDraft]) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if cards.is_empty() {
        return Err(ValidationError::NoCards);
    }
    for (index, card) in cards.iter().enumerate() {
        if card.front.trim().is_empty() {
            return Err(ValidationError::EmptyFront { index });
        }
        if card.back.trim().is_empty() {
            return Err(ValidationError::EmptyBack { index });
        }
    }
    Ok(())
}

/// Check a card generation request.
pub fn validate_generation(topic: &str, count: usize) -> Result<()> {
    if topic.trim().is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    if !(MIN_GENERATE_COUNT..=MAX_GENERATE_COUNT).contains(&count) {
        return Err(ValidationError::CountOutOfRange {
            count,
            min: MIN_GENERATE_COUNT,
            max: MAX_GENERATE_COUNT,
        });
    }
    Ok(())
}

/// Check a tutor chat message.
pub fn validate_chat_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_without_cards_is_rejected() {
        let result = validate_new_deck("Biology Terms", &[]);
        assert_eq!(result, Err(ValidationError::NoCards));
    }

    #[test]
    fn blank_title_is_rejected_first() {
        let result = validate_new_deck("   ", &[]);
        assert_eq!(result, Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn blank_card_side_reports_its_index() {
        let cards = vec![CardDraft::new("X", "Y"), CardDraft::new("Front", " ")];
        let result = validate_new_deck("Deck", &cards);
        assert_eq!(result, Err(ValidationError::EmptyBack { index: 1 }));
    }

    #[test]
    fn single_card_deck_is_accepted() {
        let cards = vec![CardDraft::new("X", "Y")];
        assert!(validate_new_deck("Biology Terms", &cards).is_ok());
    }

    #[test]
    fn generation_count_bounds() {
        assert!(validate_generation("animals", 1).is_ok());
        assert!(validate_generation("animals", 20).is_ok());
        assert!(matches!(
            validate_generation("animals", 0),
            Err(ValidationError::CountOutOfRange { count: 0, .. })
        ));
        assert!(matches!(
            validate_generation("animals", 21),
            Err(ValidationError::CountOutOfRange { count: 21, .. })
        ));
        assert_eq!(validate_generation(" ", 5), Err(ValidationError::EmptyTopic));
    }

    #[test]
    fn blank_chat_message_is_rejected() {
        assert_eq!(
            validate_chat_message("\n\t"),
            Err(ValidationError::EmptyMessage)
        );
        assert!(validate_chat_message("why?").is_ok());
    }
}
