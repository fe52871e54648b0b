// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local document store.
//!
//! Mirrors the subset of Firestore behavior the service relies on: documents
//! keyed by ID per collection, and `games` listed by `date` descending.

use crate::models::{Game, Session, TeamPreference};
use dashmap::DashMap;

/// In-memory collections.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) games: DashMap<String, Game>,
    pub(crate) sessions: DashMap<String, Session>,
    pub(crate) preferences: DashMap<String, TeamPreference>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All dated games, newest date first.
    ///
    /// Games with an empty `date` are left out, as a Firestore order on `date`
    /// leaves out documents without the field. Ties on `date` fall back to
    /// document ID in the same direction, which is what Firestore does for a
    /// single descending order clause.
    pub fn games_by_date_desc(&self) -> Vec<Game> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|e| !e.value().date.is_empty())
            .map(|e| e.value().clone())
            .collect();
        games.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        games
    }
}
