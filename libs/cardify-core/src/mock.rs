//! Offline card generator used when the AI service is unavailable.
//!
//! Topics are classified by keyword into one of two curated banks. Any other
//! topic gets numbered placeholder cards, capped at 20 regardless of the
//! requested count.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::CardDraft;

/// Upper bound on placeholder cards for unrecognised topics.
pub const GENERIC_CARD_LIMIT: usize = 20;

const ANIMAL_KEYWORDS: &[&str] = &["animal", "zoo"];
const CHEMISTRY_KEYWORDS: &[&str] = &["chem", "acid", "base"];

const ANIMAL_BANK: &[(&str, &str)] = &[
    ("What is the largest mammal?", "Blue whale"),
    ("What is the fastest land animal?", "Cheetah"),
    ("What animal is known as the king of the jungle?", "Lion"),
    ("What is a group of lions called?", "Pride"),
    ("What is the smallest mammal?", "Bumblebee bat"),
    ("What animal has the longest neck?", "Giraffe"),
    ("What is a baby kangaroo called?", "Joey"),
    ("What is the largest bird?", "Ostrich"),
    ("What animal is known for changing colors?", "Chameleon"),
    ("What is a group of elephants called?", "Herd"),
];

const CHEMISTRY_BANK: &[(&str, &str)] = &[
    ("What is the chemical symbol for water?", "H2O"),
    ("What is the pH of a neutral solution?", "7"),
    ("What is the most abundant element in the universe?", "Hydrogen"),
    ("What is the chemical formula for table salt?", "NaCl"),
    ("What is the pH of an acid?", "Less than 7"),
    ("What is the pH of a base?", "Greater than 7"),
    ("What is the chemical symbol for gold?", "Au"),
    ("What is the atomic number of carbon?", "6"),
    ("What is the chemical formula for carbon dioxide?", "CO2"),
    ("What is the most common gas in Earth's atmosphere?", "Nitrogen"),
];

/// Which template bank a topic falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicBank {
    Animals,
    Chemistry,
    Generic,
}

impl TopicBank {
    /// Classify a topic by case-insensitive keyword containment.
    pub fn classify(topic: &str) -> Self {
        let topic = topic.to_lowercase();
        if ANIMAL_KEYWORDS.iter().any(|k| topic.contains(k)) {
            Self::Animals
        } else if CHEMISTRY_KEYWORDS.iter().any(|k| topic.contains(k)) {
            Self::Chemistry
        } else {
            Self::Generic
        }
    }
}

/// Generate up to `count` cards for `topic` without touching the network.
pub fn generate(topic: &str, count: usize) -> Vec<CardDraft> {
    generate_with_rng(topic, count, &mut rand::thread_rng())
}

/// Same as [`generate`] with a caller-supplied random source.
pub fn generate_with_rng<R: Rng + ?Sized>(topic: &str, count: usize, rng: &mut R) -> Vec<CardDraft> {
    let mut templates: Vec<CardDraft> = match TopicBank::classify(topic) {
        TopicBank::Animals => from_bank(ANIMAL_BANK),
        TopicBank::Chemistry => from_bank(CHEMISTRY_BANK),
        TopicBank::Generic => (1..=count.min(GENERIC_CARD_LIMIT))
            .map(|i| {
                CardDraft::new(
                    format!("What is {} {}?", topic, i),
                    format!("Definition or answer for {} {}", topic, i),
                )
            })
            .collect(),
    };

    templates.shuffle(rng);
    templates.truncate(count);
    templates
}

fn from_bank(bank: &[(&str, &str)]) -> Vec<CardDraft> {
    bank.iter()
        .map(|(front, back)| CardDraft::new(*front, *back))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn classifies_by_keyword() {
        assert_eq!(TopicBank::classify("Zoo Animals"), TopicBank::Animals);
        assert_eq!(TopicBank::classify("Organic CHEMISTRY"), TopicBank::Chemistry);
        assert_eq!(TopicBank::classify("acids and bases"), TopicBank::Chemistry);
        assert_eq!(TopicBank::classify("Rust lifetimes"), TopicBank::Generic);
    }

    #[test]
    fn animals_draw_distinct_cards_from_bank() {
        let cards = generate_with_rng("animals", 5, &mut rng());
        assert_eq!(cards.len(), 5);

        let fronts: HashSet<_> = cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts.len(), 5);
        for card in &cards {
            assert!(ANIMAL_BANK.iter().any(|(f, b)| *f == card.front && *b == card.back));
            assert!(card.image_url.is_none());
        }
    }

    #[test]
    fn curated_bank_caps_output_at_ten() {
        let cards = generate_with_rng("chemistry", 20, &mut rng());
        assert_eq!(cards.len(), CHEMISTRY_BANK.len());
    }

    #[test]
    fn generic_topic_uses_numbered_placeholders() {
        let mut cards = generate_with_rng("Rust", 3, &mut rng());
        cards.sort_by(|a, b| a.front.cmp(&b.front));
        assert_eq!(cards[0].front, "What is Rust 1?");
        assert_eq!(cards[0].back, "Definition or answer for Rust 1");
        assert_eq!(cards[2].front, "What is Rust 3?");
    }

    #[test]
    fn generic_topic_is_capped() {
        let cards = generate_with_rng("Rust", 25, &mut rng());
        assert_eq!(cards.len(), GENERIC_CARD_LIMIT);
    }

    #[test]
    fn length_matches_bank_for_every_count() {
        for count in 1..=20 {
            for topic in ["animals", "chemistry", "geography"] {
                let cards = generate(topic, count);
                let bank_size = match TopicBank::classify(topic) {
                    TopicBank::Generic => count.min(GENERIC_CARD_LIMIT),
                    _ => 10,
                };
                assert_eq!(cards.len(), count.min(bank_size), "{topic} x {count}");
                assert!(cards
                    .iter()
                    .all(|c| !c.front.is_empty() && !c.back.is_empty()));
            }
        }
    }
}
