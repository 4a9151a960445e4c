//! HTTP route handlers

pub mod decks;
pub mod explore;
pub mod study;
