//! Count normalization for generated cards.

use crate::types::CardDraft;

/// Appended to the front of every padding duplicate.
pub const CONTINUED_SUFFIX: &str = " (continued)";

/// Bring a non-empty card list to exactly `count` entries.
///
/// Longer lists are truncated from the end. Shorter lists are padded by
/// cycling through the original cards, each copy marked with
/// [`CONTINUED_SUFFIX`]. An empty list stays empty; the caller falls back to
/// the mock generator in that case.
pub fn fit_to_count(mut cards: Vec<CardDraft>, count: usize) -> Vec<CardDraft> {
    if cards.len() >= count {
        cards.truncate(count);
        return cards;
    }
    if cards.is_empty() {
        return cards;
    }

    let originals = cards.len();
    for i in 0..count - originals {
        let source = &cards[i % originals];
        let duplicate = CardDraft {
            front: format!("{}{}", source.front, CONTINUED_SUFFIX),
            back: source.back.clone(),
            image_url: None,
        };
        cards.push(duplicate);
    }
    cards
}
