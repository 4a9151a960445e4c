//! Deck endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DeckListQuery>,
) -> Result<Json<DeckListResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");

    let decks = match query.search.as_deref() {
        Some(term) => store.search(term),
        None => store.list().iter().collect(),
    };

    Ok(Json(DeckListResponse {
        decks: decks
            .into_iter()
            .map(|deck| DeckSummary::from_deck(deck, now))
            .collect(),
    }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckInput>,
) -> Result<(StatusCode, Json<Deck>)> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("deck name is required".to_string()));
    }

    let deck = state
        .store
        .write()
        .expect("store lock")
        .insert(payload, Utc::now());
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/decks/:id
pub async fn get(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<Deck>> {
    let store = state.store.read().expect("store lock");
    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
    Ok(Json(deck.clone()))
}

/// PUT /api/decks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<CreateDeckInput>,
) -> Result<Json<Deck>> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("deck name is required".to_string()));
    }

    let now = Utc::now();
    let deck = state
        .store
        .write()
        .expect("store lock")
        .update(deck_id, now, |deck| {
            deck.name = payload.name;
            deck.description = payload.description;
            deck.tags = payload.tags;
            deck.cards = payload
                .cards
                .into_iter()
                .map(|card| card.into_card(now))
                .collect();
        })
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
    Ok(Json(deck))
}

/// DELETE /api/decks/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<StatusCode> {
    let removed = state.store.write().expect("store lock").remove(deck_id);
    if !removed {
        return Err(ApiError::NotFound(format!("deck {deck_id}")));
    }

    // Any in-flight study session over this deck is discarded with it.
    state
        .sessions
        .write()
        .expect("sessions lock")
        .remove(&deck_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/decks/:id/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<DeckStatsResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");
    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;

    Ok(Json(DeckStatsResponse {
        card_count: deck.cards.len(),
        due_count: deck.due_count(now),
        new_count: deck.new_count(),
    }))
}
