pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use flashlearn_core::StudySession;

use crate::store::DeckStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DeckStore>>,
    /// At most one active study session per deck.
    pub sessions: Arc<RwLock<HashMap<Uuid, StudySession>>>,
}

impl AppState {
    /// State preloaded with the demo deck and community catalog.
    pub fn seeded() -> Self {
        Self {
            store: Arc::new(RwLock::new(DeckStore::seeded(Utc::now()))),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// State with no decks at all, for tests that need a clean slate.
    pub fn empty() -> Self {
        Self {
            store: Arc::new(RwLock::new(DeckStore::default())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Deck routes
        .route("/api/decks", get(routes::decks::list))
        .route("/api/decks", post(routes::decks::create))
        .route("/api/decks/{id}", get(routes::decks::get))
        .route("/api/decks/{id}", put(routes::decks::update))
        .route("/api/decks/{id}", delete(routes::decks::remove))
        .route("/api/decks/{id}/stats", get(routes::decks::stats))
        // Explore routes
        .route("/api/explore", get(routes::explore::list))
        .route("/api/explore/tags", get(routes::explore::tags))
        .route("/api/explore/{id}/clone", post(routes::explore::clone_deck))
        // Study routes
        .route("/api/study/rating-scale", get(routes::study::rating_scale))
        .route("/api/study/{deck_id}/session", post(routes::study::start))
        .route("/api/study/{deck_id}/session", get(routes::study::session))
        .route("/api/study/{deck_id}/session", delete(routes::study::abandon))
        .route(
            "/api/study/{deck_id}/session/reveal",
            post(routes::study::reveal),
        )
        .route(
            "/api/study/{deck_id}/session/review",
            post(routes::study::review),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::seeded();

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
