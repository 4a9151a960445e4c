//! Study session API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

async fn seeded_deck_id(server: &TestServer) -> String {
    let body: Value = server.get("/api/decks").await.json();
    body["decks"][0]["id"].as_str().unwrap().to_string()
}

async fn create_deck(server: &TestServer, payload: &Value) -> String {
    let deck: Value = server.post("/api/decks").json(payload).await.json();
    deck["id"].as_str().unwrap().to_string()
}

/// The rating scale is the closed six-value contract of the review API.
#[tokio::test]
async fn test_rating_scale() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/study/rating-scale").await;
    response.assert_status_ok();
    let body: Value = response.json();

    let ratings = body["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 6);
    assert_eq!(ratings[0]["value"], 0);
    assert_eq!(ratings[0]["label"], "Again");
    assert_eq!(ratings[5]["value"], 5);
    assert_eq!(ratings[5]["label"], "Easy");
}

/// Starting a session queues every due card with the answer hidden.
#[tokio::test]
async fn test_start_session() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;

    let response = server.post(&format!("/api/study/{deck_id}/session")).await;
    response.assert_status_ok();
    let session: Value = response.json();

    assert_eq!(session["remaining"], 2);
    assert_eq!(session["completed_count"], 0);
    assert_eq!(session["answer_revealed"], false);
    assert_eq!(session["finished"], false);
    assert!(session["current_card"]["prompt"].is_string());
    // Answer stays hidden until revealed.
    assert!(session["current_card"]["answer"].is_null());
}

/// An empty deck yields an already-finished session, not an error.
#[tokio::test]
async fn test_session_on_empty_deck() {
    let ctx = TestContext::empty();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = create_deck(&server, &fixtures::create_deck_request("Empty", 0)).await;

    let response = server.post(&format!("/api/study/{deck_id}/session")).await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["finished"], true);
    assert_eq!(session["remaining"], 0);
    assert!(session["current_card"].is_null());
}

/// Without a started session, session endpoints return 404.
#[tokio::test]
async fn test_no_active_session() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;

    let response = server.get(&format!("/api/study/{deck_id}/session")).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(4))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Revealing is idempotent and unlocks the answer.
#[tokio::test]
async fn test_reveal_answer() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;
    let _ = server.post(&format!("/api/study/{deck_id}/session")).await;

    let response = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["answer_revealed"], true);
    assert!(session["current_card"]["answer"].is_string());

    // Revealing twice has no additional effect.
    let again: Value = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await
        .json();
    assert_eq!(again["answer_revealed"], true);
}

/// Rating before reveal is a policy error.
#[tokio::test]
async fn test_review_before_reveal_rejected() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;
    let _ = server.post(&format!("/api/study/{deck_id}/session")).await;

    let response = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(4))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "session_error");
}

/// Ratings outside 0-5 never reach the scheduler.
#[tokio::test]
async fn test_invalid_rating_rejected() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;
    let _ = server.post(&format!("/api/study/{deck_id}/session")).await;
    let _ = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await;

    let response = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(6))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Full walkthrough: a lapse recycles in-session while the persisted
/// card state still advances through the scheduler; good ratings retire
/// cards until the queue is exhausted.
#[tokio::test]
async fn test_session_walkthrough_with_recycling() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;

    let session: Value = server
        .post(&format!("/api/study/{deck_id}/session"))
        .await
        .json();
    let first_card_id = session["current_card"]["id"].as_str().unwrap().to_string();

    // First card rated well: retired from the session.
    let _ = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await;
    let review: Value = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(5))
        .await
        .json();
    assert_eq!(review["recycled"], false);
    assert_eq!(review["card"]["repetitions"], 1);
    assert_eq!(review["card"]["interval"], 1);
    assert_eq!(review["session"]["remaining"], 1);
    assert_eq!(review["session"]["completed_count"], 1);

    // Second card rated poorly: recycled to the back of the queue.
    let second_card_id = review["session"]["current_card"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let _ = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await;
    let review: Value = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(1))
        .await
        .json();
    assert_eq!(review["recycled"], true);
    // The lapse still advances persisted scheduling: one-day interval.
    assert_eq!(review["card"]["repetitions"], 0);
    assert_eq!(review["card"]["interval"], 1);
    assert_eq!(review["session"]["remaining"], 1);
    assert_eq!(review["session"]["completed_count"], 2);
    assert_eq!(
        review["session"]["current_card"]["id"].as_str().unwrap(),
        second_card_id
    );
    // Answer is hidden again for the recycled presentation.
    assert_eq!(review["session"]["answer_revealed"], false);

    // Rated well on the second pass: the session completes.
    let _ = server
        .post(&format!("/api/study/{deck_id}/session/reveal"))
        .await;
    let review: Value = server
        .post(&format!("/api/study/{deck_id}/session/review"))
        .json(&fixtures::review_request(4))
        .await
        .json();
    assert_eq!(review["session"]["finished"], true);
    assert_eq!(review["session"]["remaining"], 0);
    assert_eq!(review["session"]["completed_count"], 3);

    // The deck's persisted state reflects every scheduler transition.
    let deck: Value = server.get(&format!("/api/decks/{deck_id}")).await.json();
    for card in deck["cards"].as_array().unwrap() {
        assert_eq!(card["interval"], 1);
        assert!(card["last_reviewed"].is_string());
    }
    let first = deck["cards"]
        .as_array()
        .unwrap()
        .iter()
        .find(|card| card["id"] == first_card_id.as_str())
        .unwrap();
    assert_eq!(first["repetitions"], 1);
}

/// With nothing due, the queue falls back to the ten earliest-due cards.
#[tokio::test]
async fn test_preview_batch_when_nothing_due() {
    let ctx = TestContext::empty();
    let server = TestServer::new(ctx.router()).unwrap();
    let now = chrono::Utc::now();

    let deck_id = create_deck(
        &server,
        &fixtures::future_deck_request("Future", 15, now),
    )
    .await;
    let session: Value = server
        .post(&format!("/api/study/{deck_id}/session"))
        .await
        .json();
    assert_eq!(session["remaining"], 10);
    assert_eq!(session["finished"], false);
    // The earliest-due card comes first.
    assert_eq!(session["current_card"]["prompt"], "Prompt 0");
}

/// The preview batch is capped at ten but never padded.
#[tokio::test]
async fn test_preview_batch_small_deck() {
    let ctx = TestContext::empty();
    let server = TestServer::new(ctx.router()).unwrap();
    let now = chrono::Utc::now();

    let deck_id = create_deck(&server, &fixtures::future_deck_request("Soon", 3, now)).await;
    let session: Value = server
        .post(&format!("/api/study/{deck_id}/session"))
        .await
        .json();
    assert_eq!(session["remaining"], 3);
}

/// Abandoning a session discards it without touching card scheduling.
#[tokio::test]
async fn test_abandon_session() {
    let ctx = TestContext::seeded();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = seeded_deck_id(&server).await;
    let _ = server.post(&format!("/api/study/{deck_id}/session")).await;

    let response = server
        .delete(&format!("/api/study/{deck_id}/session"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let deck_uuid = Uuid::parse_str(&deck_id).unwrap();
    assert!(!ctx
        .state
        .sessions
        .read()
        .unwrap()
        .contains_key(&deck_uuid));

    let response = server.get(&format!("/api/study/{deck_id}/session")).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/study/{deck_id}/session"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// If the current card is deleted by a deck edit, the session rebuilds
/// its queue instead of crashing.
#[tokio::test]
async fn test_stale_card_rebuilds_queue() {
    let ctx = TestContext::empty();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = create_deck(&server, &fixtures::create_deck_request("Editable", 2)).await;

    let session: Value = server
        .post(&format!("/api/study/{deck_id}/session"))
        .await
        .json();
    let old_card_id = session["current_card"]["id"].as_str().unwrap().to_string();

    // Replace every card while the session is running.
    let _ = server
        .put(&format!("/api/decks/{deck_id}"))
        .json(&fixtures::create_deck_request("Editable", 2))
        .await;

    let session: Value = server
        .get(&format!("/api/study/{deck_id}/session"))
        .await
        .json();
    assert_eq!(session["remaining"], 2);
    assert_eq!(session["answer_revealed"], false);
    let current = session["current_card"]["id"].as_str().unwrap();
    assert_ne!(current, old_card_id);
    assert!(Uuid::parse_str(current).is_ok());
}

/// Deleting a deck also discards its active session.
#[tokio::test]
async fn test_delete_deck_discards_session() {
    let ctx = TestContext::empty();
    let server = TestServer::new(ctx.router()).unwrap();
    let deck_id = create_deck(&server, &fixtures::create_deck_request("Short-lived", 1)).await;
    let _ = server.post(&format!("/api/study/{deck_id}/session")).await;

    let response = server.delete(&format!("/api/decks/{deck_id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/study/{deck_id}/session")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
