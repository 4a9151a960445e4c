//! Seed decks loaded at startup.
//!
//! The demo deck gives a fresh install something to study right away;
//! the community decks back the explore feed, which would normally come
//! from an API.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use flashlearn_core::{Card, Deck};

/// Decks a fresh install starts with.
pub fn initial_decks(now: DateTime<Utc>) -> Vec<Deck> {
    vec![Deck {
        id: Uuid::new_v4(),
        name: "React Fundamentals".to_string(),
        description: "Key concepts for building modern React applications.".to_string(),
        tags: vec!["react".to_string(), "frontend".to_string()],
        cards: vec![
            Card::new(
                "What hook lets you add state to a functional component?",
                "The `useState` hook.",
                now,
            ),
            Card::new(
                "What problem does React Context solve?",
                "Prop drilling by providing a way to share values between components \
                 without passing props explicitly.",
                now,
            ),
        ],
        created_at: now,
        updated_at: now,
        is_community: false,
        author: Some("FlashLearn".to_string()),
        likes: None,
    }]
}

/// The fixed community catalog shown on the explore feed.
pub fn community_decks() -> Vec<Deck> {
    vec![
        community_deck(
            "Web Accessibility Essentials",
            "Ensure that your interfaces work for everyone with these quick checks.",
            &["accessibility", "frontend", "ux"],
            "Inclusive Devs",
            92,
            Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 5, 9, 0, 0).unwrap(),
        ),
        community_deck(
            "JavaScript Pitfalls",
            "Common mistakes that catch developers off guard and how to avoid them.",
            &["javascript", "fundamentals"],
            "CodeClinic",
            138,
            Utc.with_ymd_and_hms(2025, 1, 10, 14, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 12, 8, 20, 0).unwrap(),
        ),
        community_deck(
            "Productivity Habits",
            "Daily routines to keep your learning momentum high.",
            &["productivity", "habits"],
            "GrowthLab",
            64,
            Utc.with_ymd_and_hms(2025, 2, 1, 6, 45, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 1, 6, 45, 0).unwrap(),
        ),
    ]
}

fn community_deck(
    name: &str,
    description: &str,
    tags: &[&str],
    author: &str,
    likes: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Deck {
    Deck {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        cards: Vec::new(),
        created_at,
        updated_at,
        is_community: true,
        author: Some(author.to_string()),
        likes: Some(likes),
    }
}
