//! In-memory deck repository.
//!
//! The application owns all deck data and passes card collections into
//! the core scheduler and session queue; neither core component ever
//! sees this store. Writes to a card's persisted state are serialized
//! behind the caller's lock.

pub mod seed;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use flashlearn_core::{next_state, Card, CreateDeckInput, Deck, Quality};

/// Repository of the user's decks plus the fixed community catalog.
#[derive(Debug, Default)]
pub struct DeckStore {
    decks: Vec<Deck>,
    community: Vec<Deck>,
}

impl DeckStore {
    /// Store preloaded with the demo deck and the community catalog.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            decks: seed::initial_decks(now),
            community: seed::community_decks(),
        }
    }

    /// All of the user's decks, newest first.
    pub fn list(&self) -> &[Deck] {
        &self.decks
    }

    pub fn get(&self, deck_id: Uuid) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == deck_id)
    }

    /// Insert a new deck at the front of the list.
    pub fn insert(&mut self, input: CreateDeckInput, now: DateTime<Utc>) -> Deck {
        let deck = input.into_deck(now);
        self.decks.insert(0, deck.clone());
        deck
    }

    /// Apply `update` to a deck and bump its `updated_at`.
    pub fn update<F>(&mut self, deck_id: Uuid, now: DateTime<Utc>, update: F) -> Option<Deck>
    where
        F: FnOnce(&mut Deck),
    {
        let deck = self.decks.iter_mut().find(|deck| deck.id == deck_id)?;
        update(deck);
        deck.updated_at = now;
        Some(deck.clone())
    }

    /// Remove a deck. Returns whether it existed.
    pub fn remove(&mut self, deck_id: Uuid) -> bool {
        let before = self.decks.len();
        self.decks.retain(|deck| deck.id != deck_id);
        self.decks.len() < before
    }

    /// Apply one SM-2 review to a card and bump the deck's `updated_at`.
    ///
    /// Returns the card's updated state, or `None` when deck or card is
    /// gone.
    pub fn log_review(
        &mut self,
        deck_id: Uuid,
        card_id: Uuid,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Option<Card> {
        let deck = self.decks.iter_mut().find(|deck| deck.id == deck_id)?;
        let card = deck.cards.iter_mut().find(|card| card.id == card_id)?;
        *card = next_state(card, quality, now);
        let updated = card.clone();
        deck.updated_at = now;
        Some(updated)
    }

    /// Case-insensitive filter over name, description and tags.
    pub fn search(&self, term: &str) -> Vec<&Deck> {
        let term = term.trim().to_lowercase();
        self.decks
            .iter()
            .filter(|deck| term.is_empty() || deck_matches(deck, &term))
            .collect()
    }

    /// The community catalog, optionally filtered by search term and tag.
    pub fn search_community(&self, term: Option<&str>, tag: Option<&str>) -> Vec<&Deck> {
        let term = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();
        self.community
            .iter()
            .filter(|deck| term.is_empty() || deck_matches(deck, &term))
            .filter(|deck| tag.map_or(true, |tag| deck.tags.iter().any(|t| t == tag)))
            .collect()
    }

    /// Sorted distinct tags across the community catalog.
    pub fn community_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .community
            .iter()
            .flat_map(|deck| deck.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Clone a community deck into the user's decks.
    pub fn clone_community(&mut self, deck_id: Uuid, now: DateTime<Utc>) -> Option<Deck> {
        let source = self.community.iter().find(|deck| deck.id == deck_id)?;
        let deck = Deck {
            id: Uuid::new_v4(),
            name: format!("{} (clone)", source.name),
            description: source.description.clone(),
            tags: source.tags.clone(),
            cards: source.cards.clone(),
            created_at: now,
            updated_at: now,
            is_community: false,
            author: Some("You".to_string()),
            likes: Some(source.likes.unwrap_or(0)),
        };
        self.decks.insert(0, deck.clone());
        Some(deck)
    }
}

fn deck_matches(deck: &Deck, term: &str) -> bool {
    deck.name.to_lowercase().contains(term)
        || deck.description.to_lowercase().contains(term)
        || deck
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term))
}
