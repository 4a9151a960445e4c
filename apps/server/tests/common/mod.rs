//! Common test utilities for integration tests.
//!
//! The server state is fully in-memory, so every test builds its own
//! application and drives it through axum-test; no external services
//! are required.

pub mod fixtures;

use axum::Router;

use flashlearn_server::{router, AppState};

/// Test harness wrapping a freshly built application state.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Context seeded with the demo deck and community catalog.
    pub fn seeded() -> Self {
        let state = AppState::seeded();
        let app = router(state.clone());
        Self { state, app }
    }

    /// Context with no decks at all, for tests that need a clean slate.
    pub fn empty() -> Self {
        let state = AppState::empty();
        let app = router(state.clone());
        Self { state, app }
    }

    /// Router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}
