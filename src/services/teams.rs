// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team lookup service over the static team list.

use crate::models::{Team, TEAMS};

/// Read-only lookup of teams by ID.
#[derive(Clone)]
pub struct TeamDirectory {
    teams: &'static [Team],
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self { teams: TEAMS }
    }
}

impl TeamDirectory {
    /// Directory over a custom team list.
    pub fn new(teams: &'static [Team]) -> Self {
        Self { teams }
    }

    /// Get the list of teams.
    pub fn teams(&self) -> &[Team] {
        self.teams
    }

    /// Find a team by ID.
    pub fn find(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Check that an ID belongs to a known team.
    pub fn require(&self, id: &str) -> Result<&Team, TeamError> {
        self.find(id)
            .ok_or_else(|| TeamError::UnknownTeam(id.to_string()))
    }

    /// Name to show for a team ID.
    ///
    /// Games can reference teams that are not in the static list (renamed
    /// clubs, typos in imported schedules); those show the raw ID.
    pub fn display_name<'a>(&self, id: &'a str) -> &'a str {
        self.find(id).map(|t| t.name).unwrap_or(id)
    }
}

/// Errors from team lookups.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
}
