//! Test data builders for API payloads.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Deck creation payload with `count` fresh cards.
pub fn create_deck_request(name: &str, count: usize) -> Value {
    let cards: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "prompt": format!("Prompt {i}"),
                "answer": format!("Answer {i}"),
            })
        })
        .collect();
    json!({
        "name": name,
        "description": format!("{name} practice deck"),
        "tags": ["testing"],
        "cards": cards,
    })
}

/// Deck creation payload whose cards are all due in the future, each one
/// a day later than the previous.
pub fn future_deck_request(name: &str, count: usize, now: DateTime<Utc>) -> Value {
    let cards: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "prompt": format!("Prompt {i}"),
                "answer": format!("Answer {i}"),
                "due_date": now + Duration::days(i as i64 + 1),
            })
        })
        .collect();
    json!({
        "name": name,
        "description": format!("{name} practice deck"),
        "tags": ["testing"],
        "cards": cards,
    })
}

/// Review submission payload.
pub fn review_request(rating: u8) -> Value {
    json!({ "rating": rating })
}
