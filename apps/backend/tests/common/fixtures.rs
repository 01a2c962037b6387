//! Test fixtures and factory functions for creating test data.

#![allow(dead_code)]

use serde_json::json;
use uuid::Uuid;

/// Create a deck request body with `num_cards` numbered cards.
pub fn create_deck_request(title: &str, num_cards: usize) -> serde_json::Value {
    let cards: Vec<_> = (1..=num_cards)
        .map(|i| json!({ "front": format!("Question {}?", i), "back": format!("Answer {}.", i) }))
        .collect();
    json!({ "title": title, "cards": cards })
}

/// Create a deck request body from explicit (front, back) pairs.
pub fn create_deck_with_cards(title: &str, subject: Option<&str>, cards: &[(&str, &str)]) -> serde_json::Value {
    let cards: Vec<_> = cards
        .iter()
        .map(|(front, back)| json!({ "front": front, "back": back }))
        .collect();
    json!({ "title": title, "subject": subject, "cards": cards })
}

/// Create a review request body.
pub fn review_request(action: &str) -> serde_json::Value {
    json!({ "action": action })
}

/// Create a register request body.
pub fn register_request(display_name: Option<&str>) -> serde_json::Value {
    match display_name {
        Some(n) => json!({ "display_name": n }),
        None => json!({}),
    }
}

/// Create a generate request body.
pub fn generate_request(topic: &str, count: usize) -> serde_json::Value {
    json!({ "topic": topic, "count": count })
}

/// Create a chat request body.
pub fn chat_request(question: &str, answer: &str, message: &str) -> serde_json::Value {
    json!({ "question": question, "answer": answer, "message": message })
}

/// Generate a unique deck title to avoid collisions.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Card ids of a deck detail response.
pub fn card_ids(deck: &serde_json::Value) -> Vec<String> {
    deck["cards"]
        .as_array()
        .expect("deck has cards")
        .iter()
        .map(|c| c["id"].as_str().expect("card has id").to_string())
        .collect()
}
