//! Community deck endpoints

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

/// GET /api/explore
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ExploreQuery>,
) -> Result<Json<DeckListResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");

    let decks = store.search_community(query.search.as_deref(), query.tag.as_deref());
    Ok(Json(DeckListResponse {
        decks: decks
            .into_iter()
            .map(|deck| DeckSummary::from_deck(deck, now))
            .collect(),
    }))
}

/// GET /api/explore/tags
pub async fn tags(State(state): State<AppState>) -> Result<Json<TagListResponse>> {
    let store = state.store.read().expect("store lock");
    Ok(Json(TagListResponse {
        tags: store.community_tags(),
    }))
}

/// POST /api/explore/:id/clone
pub async fn clone_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Deck>)> {
    let deck = state
        .store
        .write()
        .expect("store lock")
        .clone_community(deck_id, Utc::now())
        .ok_or_else(|| ApiError::NotFound(format!("community deck {deck_id}")))?;
    Ok((StatusCode::CREATED, Json(deck)))
}
