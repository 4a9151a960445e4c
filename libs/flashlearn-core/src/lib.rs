//! Core library for the FlashLearn spaced-repetition application.
//!
//! Provides:
//! - SM-2 review scheduler (pure state transition)
//! - Study session queue (due-date ordering, in-session recycling)
//! - Shared types (Card, Deck, Quality)
//!
//! The core is storage-agnostic and free of I/O: the host application
//! owns the deck collection and persists the card records the scheduler
//! returns.

pub mod error;
pub mod scheduler;
pub mod session;
pub mod types;

pub use error::{Result, SessionError};
pub use scheduler::{next_state, Sm2, INITIAL_EASINESS, MIN_EASINESS};
pub use session::{build_queue, StudySession, PREVIEW_BATCH_SIZE};
pub use types::{Card, CreateCardInput, CreateDeckInput, Deck, Quality};
