//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from flashlearn-core
pub use flashlearn_core::{Card, CreateCardInput, CreateDeckInput, Deck, Quality};

/// Deck with derived counts for list views.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub card_count: usize,
    pub due_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_community: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

impl DeckSummary {
    pub fn from_deck(deck: &Deck, now: DateTime<Utc>) -> Self {
        Self {
            id: deck.id,
            name: deck.name.clone(),
            description: deck.description.clone(),
            tags: deck.tags.clone(),
            card_count: deck.cards.len(),
            due_count: deck.due_count(now),
            created_at: deck.created_at,
            updated_at: deck.updated_at,
            is_community: deck.is_community,
            author: deck.author.clone(),
            likes: deck.likes,
        }
    }
}

/// Response for deck list endpoints.
#[derive(Debug, Serialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckSummary>,
}

/// Query parameters for GET /api/decks.
#[derive(Debug, Deserialize)]
pub struct DeckListQuery {
    pub search: Option<String>,
}

/// Response for GET /api/decks/:id/stats.
#[derive(Debug, Serialize)]
pub struct DeckStatsResponse {
    pub card_count: usize,
    pub due_count: usize,
    pub new_count: usize,
}

/// Query parameters for GET /api/explore.
#[derive(Debug, Deserialize)]
pub struct ExploreQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// Response for GET /api/explore/tags.
#[derive(Debug, Serialize)]
pub struct TagListResponse {
    pub tags: Vec<String>,
}

/// One entry of the fixed rating scale offered to the learner.
#[derive(Debug, Serialize)]
pub struct RatingOption {
    pub value: u8,
    pub label: &'static str,
    pub hint: &'static str,
}

/// Response for GET /api/study/rating-scale.
#[derive(Debug, Serialize)]
pub struct RatingScaleResponse {
    pub ratings: Vec<RatingOption>,
}

/// The card currently presented to the learner. The answer is withheld
/// until it has been revealed.
#[derive(Debug, Serialize)]
pub struct CurrentCard {
    pub id: Uuid,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// Snapshot of an active study session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub deck_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<CurrentCard>,
    pub remaining: usize,
    pub completed_count: usize,
    pub answer_revealed: bool,
    pub finished: bool,
}

/// Request body for POST /api/study/:deck_id/session/review.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: u8,
}

/// Response after submitting a review.
#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    /// The card's persisted state after the scheduler transition.
    pub card: Card,
    pub next_due: DateTime<Utc>,
    /// Whether the card returns later in this session.
    pub recycled: bool,
    pub session: SessionResponse,
}
