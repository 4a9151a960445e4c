//! SM-2 review scheduler.
//!
//! Pure state transition from (card, quality, now) to the card's next
//! scheduling state. Quality grades below 3 reset the streak and collapse
//! the interval to one day; grades 3 and above grow the interval
//! (1 day, 6 days, then previous interval times the easiness factor).

use chrono::{DateTime, Duration, Utc};

use crate::types::{Card, Quality};

/// Easiness factor assigned to brand-new cards.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Lower bound on the easiness factor.
pub const MIN_EASINESS: f64 = 1.3;

/// SM-2 scheduler with a configurable easiness floor.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_easiness: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_easiness: MIN_EASINESS,
        }
    }
}

impl Sm2 {
    /// Compute the card's state after a review with `quality` at `now`.
    ///
    /// The input card is never mutated and identical inputs always
    /// produce identical outputs. `now` is the timestamp the transition
    /// treats as the moment of review; the new due date is
    /// `now + interval` whole 24-hour days.
    pub fn next_state(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> Card {
        let (repetitions, interval) = if quality.is_lapse() {
            (0, 1)
        } else {
            let repetitions = card.repetitions + 1;
            let interval = match repetitions {
                1 => 1,
                2 => 6,
                // Interval growth uses the easiness factor from before
                // this review's adjustment.
                _ => (card.interval as f64 * card.easiness).round() as u32,
            };
            (repetitions, interval)
        };

        let q = quality.to_value() as f64;
        let easiness = card.easiness + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
        let easiness = easiness.max(self.minimum_easiness);

        Card {
            easiness,
            interval,
            repetitions,
            due_date: now + Duration::days(i64::from(interval)),
            last_reviewed: Some(now),
            ..card.clone()
        }
    }
}

/// Compute a card's next state with the default SM-2 parameters.
pub fn next_state(card: &Card, quality: Quality, now: DateTime<Utc>) -> Card {
    Sm2::default().next_state(card, quality, now)
}
