// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin game list: load, filter by month, delete with confirmation.

use crate::models::{AppRoute, Game};
use crate::services::TeamDirectory;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::future::Future;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Years offered as filter pills.
pub const YEAR_OPTIONS: [i32; 3] = [2024, 2025, 2026];
/// Months offered as filter pills.
pub const MONTH_OPTIONS: std::ops::RangeInclusive<u32> = 1..=12;

/// Game storage seam for the list screen.
pub trait GameRepository {
    type Error: std::fmt::Display;

    /// All games, newest date first.
    fn list_games(&self) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send;

    fn delete_game(&self, id: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Selected year/month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MonthFilter {
    pub year: i32,
    pub month: u32,
}

impl MonthFilter {
    /// Filter for a given month. Months outside 1..=12 are rejected.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        MONTH_OPTIONS
            .contains(&month)
            .then_some(Self { year, month })
    }

    /// Filter for the current local month.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Keep a game iff its date falls in this year and month.
    ///
    /// Games with a missing or malformed date never match.
    pub fn matches(&self, game: &Game) -> bool {
        game.year_month() == Some((self.year, self.month))
    }

    /// Apply the filter, keeping the input order.
    pub fn apply<'a>(&self, games: &'a [Game]) -> Vec<&'a Game> {
        games.iter().filter(|g| self.matches(g)).collect()
    }
}

impl Default for MonthFilter {
    fn default() -> Self {
        Self::current()
    }
}

/// One table row as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GameRow {
    pub id: String,
    /// "date time"
    pub date_time: String,
    /// "Away vs Home"
    pub matchup: String,
    pub stadium: String,
}

impl GameRow {
    pub fn new(game: &Game, teams: &TeamDirectory) -> Self {
        Self {
            id: game.id.clone(),
            date_time: format!("{} {}", game.date, game.time),
            matchup: format!(
                "{} vs {}",
                teams.display_name(&game.away_team_id),
                teams.display_name(&game.home_team_id)
            ),
            stadium: game.stadium.clone(),
        }
    }
}

/// User-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn error(message: &str) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.to_string(),
        }
    }
}

/// Confirmation prompt shown before deleting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub game_id: String,
    pub title: &'static str,
    pub message: &'static str,
}

/// The user's answer to a [`DeletePrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Cancel,
    Delete,
}

/// Outcome of resolving a delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
    /// Nothing was awaiting confirmation.
    NoPrompt,
}

/// State behind the admin game list screen.
pub struct GameListController<R> {
    repo: R,
    teams: TeamDirectory,
    games: Vec<Game>,
    filter: MonthFilter,
    loading: bool,
    alert: Option<Alert>,
    pending_delete: Option<String>,
}

impl<R: GameRepository> GameListController<R> {
    /// Controller filtered to the current month. Call [`load`](Self::load) on mount.
    pub fn new(repo: R, teams: TeamDirectory) -> Self {
        Self::with_filter(repo, teams, MonthFilter::current())
    }

    pub fn with_filter(repo: R, teams: TeamDirectory, filter: MonthFilter) -> Self {
        Self {
            repo,
            teams,
            games: Vec::new(),
            filter,
            loading: true,
            alert: None,
            pending_delete: None,
        }
    }

    /// Fetch the full list.
    ///
    /// On failure an alert is raised and the previous list is kept.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = self.repo.list_games().await;
        self.loading = false;

        match result {
            Ok(games) => {
                tracing::debug!(count = games.len(), "Loaded games");
                self.games = games;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load games");
                self.alert = Some(Alert::error("Failed to load games"));
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every loaded game, unfiltered.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn filter(&self) -> MonthFilter {
        self.filter
    }

    /// Select a year pill. Years without a pill are ignored.
    pub fn select_year(&mut self, year: i32) {
        if YEAR_OPTIONS.contains(&year) {
            self.filter.year = year;
        }
    }

    /// Select a month pill. Out-of-range months are ignored.
    pub fn select_month(&mut self, month: u32) {
        if MONTH_OPTIONS.contains(&month) {
            self.filter.month = month;
        }
    }

    /// Games in the selected month, newest first.
    pub fn visible_games(&self) -> Vec<&Game> {
        self.filter.apply(&self.games)
    }

    /// Table rows for the selected month.
    pub fn rows(&self) -> Vec<GameRow> {
        self.visible_games()
            .into_iter()
            .map(|g| GameRow::new(g, &self.teams))
            .collect()
    }

    /// Message for an empty table, or `None` when there are rows.
    pub fn empty_message(&self) -> Option<String> {
        if self.visible_games().is_empty() {
            Some(format!(
                "No games found for {}-{}",
                self.filter.year, self.filter.month
            ))
        } else {
            None
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Take the current alert once it has been shown.
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Ask for confirmation before deleting a game.
    pub fn request_delete(&mut self, game_id: &str) -> DeletePrompt {
        self.pending_delete = Some(game_id.to_string());
        DeletePrompt {
            game_id: game_id.to_string(),
            title: "Delete",
            message: "Are you sure?",
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Resolve the pending prompt.
    ///
    /// A confirmed delete re-fetches the whole list rather than removing the
    /// row locally.
    pub async fn resolve_delete(&mut self, answer: Confirmation) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NoPrompt;
        };

        if answer == Confirmation::Cancel {
            return DeleteOutcome::Cancelled;
        }

        if let Err(e) = self.repo.delete_game(&id).await {
            tracing::error!(error = %e, game_id = %id, "Failed to delete game");
            self.alert = Some(Alert::error("Delete failed"));
            return DeleteOutcome::Failed;
        }

        tracing::info!(game_id = %id, "Deleted game");
        self.load().await;
        DeleteOutcome::Deleted
    }

    /// Route of the edit screen for a game.
    pub fn edit_route(&self, game_id: &str) -> AppRoute {
        AppRoute::AdminGame(game_id.to_string())
    }

    /// Route of the add-game screen.
    pub fn new_route(&self) -> AppRoute {
        AppRoute::AdminGamesNew
    }
}
