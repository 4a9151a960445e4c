//! Study session queue.
//!
//! Sequences which card of a deck is presented next during one study
//! session. Cards are ordered by due date; low-rated cards are recycled
//! to the back of the queue so weak recall is reinforced before the
//! session ends. Session state is transient: dropping it has no effect
//! on card scheduling beyond the ratings already submitted.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::types::{Card, Quality};

/// Number of not-yet-due cards offered when nothing is due.
pub const PREVIEW_BATCH_SIZE: usize = 10;

/// Build the initial review queue for a deck's cards.
///
/// Cards are sorted by due date ascending (stable, ties keep deck
/// order). If any card is due at `now` the queue holds exactly the due
/// cards; otherwise it falls back to the first [`PREVIEW_BATCH_SIZE`]
/// cards of the sorted list, so a non-empty deck always yields a
/// session. An empty deck yields an empty queue.
pub fn build_queue(cards: &[Card], now: DateTime<Utc>) -> Vec<Uuid> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by_key(|card| card.due_date);

    let due: Vec<Uuid> = sorted
        .iter()
        .filter(|card| card.is_due(now))
        .map(|card| card.id)
        .collect();
    if !due.is_empty() {
        return due;
    }

    sorted
        .iter()
        .take(PREVIEW_BATCH_SIZE)
        .map(|card| card.id)
        .collect()
}

/// In-session review queue over one deck.
#[derive(Debug, Clone)]
pub struct StudySession {
    queue: VecDeque<Uuid>,
    completed_count: usize,
    answer_revealed: bool,
}

impl StudySession {
    /// Start a session over `cards`, queueing per [`build_queue`].
    pub fn new(cards: &[Card], now: DateTime<Utc>) -> Self {
        Self {
            queue: build_queue(cards, now).into(),
            completed_count: 0,
            answer_revealed: false,
        }
    }

    /// Id of the card currently being presented, if any.
    pub fn current(&self) -> Option<Uuid> {
        self.queue.front().copied()
    }

    /// Reveal the current card's answer. Idempotent; a no-op once the
    /// session is finished.
    pub fn reveal_answer(&mut self) {
        if !self.queue.is_empty() {
            self.answer_revealed = true;
        }
    }

    /// Whether the current card's answer has been revealed.
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Ratings submitted so far, counting repeats of recycled cards.
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    /// Cards left in the queue, counting recycled cards once.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// The session is over once the queue is empty.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Rate the current card and advance the queue.
    ///
    /// A lapse (quality below 3) sends the card to the back of the queue
    /// to be seen again this session; otherwise it is retired. The answer
    /// must have been revealed first. Returns the id of the rated card so
    /// the caller can feed the same quality to the scheduler.
    pub fn rate(&mut self, quality: Quality) -> Result<Uuid> {
        let card_id = self
            .queue
            .front()
            .copied()
            .ok_or(SessionError::SessionFinished)?;
        if !self.answer_revealed {
            return Err(SessionError::AnswerHidden);
        }

        self.queue.pop_front();
        if quality.is_lapse() {
            self.queue.push_back(card_id);
        }
        self.completed_count += 1;
        self.answer_revealed = false;
        Ok(card_id)
    }

    /// Rebuild the queue after the deck changed under the session, e.g.
    /// when the current card was deleted by a concurrent edit.
    ///
    /// Keeps `completed_count`; the answer is hidden again.
    pub fn rebuild(&mut self, cards: &[Card], now: DateTime<Utc>) {
        self.queue = build_queue(cards, now).into();
        self.answer_revealed = false;
    }
}
