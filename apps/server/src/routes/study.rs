//! Study session endpoints
//!
//! One active session per deck. The session queue decides recycle vs
//! retire from the rating alone; the deck's persisted scheduling state
//! always advances through the SM-2 scheduler, even on a lapse.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use flashlearn_core::StudySession;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/study/rating-scale
///
/// The fixed 0-5 scale the rating UI offers; the values are the only
/// ratings the review endpoint accepts.
pub async fn rating_scale() -> Json<RatingScaleResponse> {
    Json(RatingScaleResponse {
        ratings: Quality::ALL
            .iter()
            .map(|quality| RatingOption {
                value: quality.to_value(),
                label: quality.label(),
                hint: quality.hint(),
            })
            .collect(),
    })
}

/// POST /api/study/:deck_id/session
///
/// Starts a session over the deck, replacing any previous one. An empty
/// deck yields an already-finished session rather than an error.
pub async fn start(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");
    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;

    let session = StudySession::new(&deck.cards, now);
    let response = session_response(deck, &session);
    state
        .sessions
        .write()
        .expect("sessions lock")
        .insert(deck_id, session);
    Ok(Json(response))
}

/// GET /api/study/:deck_id/session
pub async fn session(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");
    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;

    let mut sessions = state.sessions.write().expect("sessions lock");
    let session = active_session(&mut sessions, deck_id)?;
    recover_stale_head(session, deck, now);
    Ok(Json(session_response(deck, session)))
}

/// POST /api/study/:deck_id/session/reveal
pub async fn reveal(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let now = Utc::now();
    let store = state.store.read().expect("store lock");
    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;

    let mut sessions = state.sessions.write().expect("sessions lock");
    let session = active_session(&mut sessions, deck_id)?;
    recover_stale_head(session, deck, now);
    session.reveal_answer();
    Ok(Json(session_response(deck, session)))
}

/// POST /api/study/:deck_id/session/review
pub async fn review(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let quality = Quality::from_value(payload.rating)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid rating: {}", payload.rating)))?;

    let now = Utc::now();
    let mut store = state.store.write().expect("store lock");
    let mut sessions = state.sessions.write().expect("sessions lock");
    let session = active_session(&mut sessions, deck_id)?;

    {
        let deck = store
            .get(deck_id)
            .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
        recover_stale_head(session, deck, now);
    }

    // Queue advance and persisted scheduling are driven by the same
    // quality, but independently: the recycle decision is transient
    // while the scheduler's transition is written back to the deck.
    let card_id = session.rate(quality)?;
    let card = store
        .log_review(deck_id, card_id, quality, now)
        .ok_or_else(|| ApiError::Internal(format!("card {card_id} vanished during review")))?;

    let deck = store
        .get(deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
    Ok(Json(SubmitReviewResponse {
        next_due: card.due_date,
        card,
        recycled: quality.is_lapse(),
        session: session_response(deck, session),
    }))
}

/// DELETE /api/study/:deck_id/session
///
/// Abandon the session. Ratings already submitted keep their effect on
/// card scheduling; the queue itself is discarded without penalty.
pub async fn abandon(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<StatusCode> {
    let removed = state
        .sessions
        .write()
        .expect("sessions lock")
        .remove(&deck_id);
    if removed.is_none() {
        return Err(ApiError::NotFound(format!(
            "no active session for deck {deck_id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn active_session(
    sessions: &mut std::collections::HashMap<Uuid, StudySession>,
    deck_id: Uuid,
) -> Result<&mut StudySession> {
    sessions
        .get_mut(&deck_id)
        .ok_or_else(|| ApiError::NotFound(format!("no active session for deck {deck_id}")))
}

/// Rebuild the queue when the current card no longer resolves, e.g.
/// after a concurrent deck edit removed it.
fn recover_stale_head(session: &mut StudySession, deck: &Deck, now: DateTime<Utc>) {
    if let Some(card_id) = session.current() {
        if deck.find_card(card_id).is_none() {
            session.rebuild(&deck.cards, now);
        }
    }
}

fn session_response(deck: &Deck, session: &StudySession) -> SessionResponse {
    let current_card = session
        .current()
        .and_then(|card_id| deck.find_card(card_id))
        .map(|card| CurrentCard {
            id: card.id,
            prompt: card.prompt.clone(),
            answer: session
                .answer_revealed()
                .then(|| card.answer.clone()),
        });

    SessionResponse {
        deck_id: deck.id,
        current_card,
        remaining: session.remaining(),
        completed_count: session.completed_count(),
        answer_revealed: session.answer_revealed(),
        finished: session.is_finished(),
    }
}
