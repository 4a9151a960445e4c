//! Core types for the FlashLearn application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recall quality for one review, on the fixed 0-5 scale.
///
/// The scale is closed: these six variants are the only valid ratings,
/// so an out-of-range rating cannot reach the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Total blackout.
    Again,
    /// Couldn't recall.
    Miss,
    /// Barely remembered.
    Hard,
    /// Needed some thought.
    Ok,
    /// Minor recall effort.
    Good,
    /// Knew it instantly.
    Easy,
}

impl Quality {
    /// All six ratings, from total blackout to effortless recall.
    pub const ALL: [Quality; 6] = [
        Self::Again,
        Self::Miss,
        Self::Hard,
        Self::Ok,
        Self::Good,
        Self::Easy,
    ];

    /// Convert to the numeric 0-5 value.
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 0,
            Self::Miss => 1,
            Self::Hard => 2,
            Self::Ok => 3,
            Self::Good => 4,
            Self::Easy => 5,
        }
    }

    /// Create from the numeric 0-5 value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Again),
            1 => Some(Self::Miss),
            2 => Some(Self::Hard),
            3 => Some(Self::Ok),
            4 => Some(Self::Good),
            5 => Some(Self::Easy),
            _ => None,
        }
    }

    /// A rating below 3 is a lapse: it collapses the interval and resets
    /// the repetition streak.
    pub fn is_lapse(self) -> bool {
        self.to_value() < 3
    }

    /// Rating button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Again => "Again",
            Self::Miss => "Miss",
            Self::Hard => "Hard",
            Self::Ok => "OK",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }

    /// Rating button hint.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Again => "Total blackout",
            Self::Miss => "Couldn't recall",
            Self::Hard => "Barely remembered",
            Self::Ok => "Needed some thought",
            Self::Good => "Minor recall effort",
            Self::Easy => "I knew it instantly",
        }
    }
}

/// A single flashcard together with its scheduling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub prompt: String,
    pub answer: String,
    /// SM-2 easiness factor, never below 1.3. Starts at 2.5.
    pub easiness: f64,
    /// Days until the next scheduled review.
    pub interval: u32,
    /// Consecutive successful reviews since the last lapse.
    pub repetitions: u32,
    /// When the card next becomes due.
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a card in the new-card state: due immediately, never reviewed.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            answer: answer.into(),
            easiness: crate::scheduler::INITIAL_EASINESS,
            interval: 0,
            repetitions: 0,
            due_date: now,
            last_reviewed: None,
        }
    }

    /// Whether the card is eligible for ordinary review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }
}

/// A named, tagged collection of cards.
///
/// The scheduler only ever looks at `cards`; the remaining fields are
/// descriptive metadata for list views and the community catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Marks decks that come from the community explore feed.
    #[serde(default)]
    pub is_community: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

impl Deck {
    /// Look up a card by id.
    pub fn find_card(&self, card_id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    /// Number of cards due at `now`.
    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|card| card.is_due(now)).count()
    }

    /// Number of cards that have never been reviewed.
    pub fn new_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.last_reviewed.is_none())
            .count()
    }
}

/// Input for creating a card. Unset scheduling fields default to the
/// new-card state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCardInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub prompt: String,
    pub answer: String,
    #[serde(default)]
    pub easiness: Option<f64>,
    #[serde(default)]
    pub interval: Option<u32>,
    #[serde(default)]
    pub repetitions: Option<u32>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl CreateCardInput {
    /// Materialize the card, filling unset fields with defaults.
    pub fn into_card(self, now: DateTime<Utc>) -> Card {
        Card {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            prompt: self.prompt,
            answer: self.answer,
            easiness: self.easiness.unwrap_or(crate::scheduler::INITIAL_EASINESS),
            interval: self.interval.unwrap_or(0),
            repetitions: self.repetitions.unwrap_or(0),
            due_date: self.due_date.unwrap_or(now),
            last_reviewed: self.last_reviewed,
        }
    }
}

/// Input for creating a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeckInput {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cards: Vec<CreateCardInput>,
    #[serde(default)]
    pub is_community: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub likes: Option<u32>,
}

impl CreateDeckInput {
    /// Materialize the deck with a fresh id and `now` timestamps.
    pub fn into_deck(self, now: DateTime<Utc>) -> Deck {
        Deck {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            tags: self.tags,
            cards: self
                .cards
                .into_iter()
                .map(|card| card.into_card(now))
                .collect(),
            created_at: now,
            updated_at: now,
            is_community: self.is_community,
            author: self.author,
            likes: self.likes,
        }
    }
}
