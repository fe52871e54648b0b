// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin routes for managing the game schedule.

use crate::db::generate_id;
use crate::error::{AppError, Result};
use crate::models::{Game, GameInput};
use crate::services::game_list::{GameRow, MonthFilter, MONTH_OPTIONS, YEAR_OPTIONS};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Largest schedule accepted by one import request (a full season is ~720 games).
const MAX_IMPORT_GAMES: usize = 1000;

/// Admin routes (require the admin key).
/// The admin middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/games", get(list_games).post(create_game))
        .route("/admin/games/import", post(import_games))
        .route(
            "/admin/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
}

// ─── List ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GamesQuery {
    year: Option<i32>,
    month: Option<u32>,
}

/// Game list response.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GamesResponse {
    /// Games matching the filter (all games when unfiltered), newest first
    pub games: Vec<Game>,
    /// Display rows for `games`, with team names resolved
    #[serde(default)]
    pub rows: Vec<GameRow>,
    /// Number of games stored, before filtering
    pub total: usize,
    pub filter: Option<MonthFilter>,
    /// Year pills for the filter bar
    #[serde(default)]
    pub years: Vec<i32>,
    /// Month pills for the filter bar
    #[serde(default)]
    pub months: Vec<u32>,
}

fn parse_filter(params: &GamesQuery) -> Result<Option<MonthFilter>> {
    match (params.year, params.month) {
        (None, None) => Ok(None),
        (Some(year), Some(month)) => MonthFilter::new(year, month).map(Some).ok_or_else(|| {
            AppError::BadRequest("Invalid 'month' parameter: must be 1-12".to_string())
        }),
        _ => Err(AppError::BadRequest(
            "'year' and 'month' must be given together".to_string(),
        )),
    }
}

/// List games, newest first, optionally narrowed to one month.
///
/// The whole collection is fetched and filtered in memory.
async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GamesQuery>,
) -> Result<Json<GamesResponse>> {
    let filter = parse_filter(&params)?;

    let all = state.db.list_games().await?;
    let total = all.len();

    let games: Vec<Game> = match filter {
        Some(f) => all.into_iter().filter(|g| f.matches(g)).collect(),
        None => all,
    };

    tracing::debug!(
        total,
        shown = games.len(),
        filter = ?filter,
        "Listing games"
    );

    let rows = games
        .iter()
        .map(|g| GameRow::new(g, &state.teams))
        .collect();

    Ok(Json(GamesResponse {
        games,
        rows,
        total,
        filter,
        years: YEAR_OPTIONS.to_vec(),
        months: MONTH_OPTIONS.collect(),
    }))
}

// ─── Single Game ─────────────────────────────────────────────

async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Game>> {
    let game = state
        .db
        .get_game(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Game {} not found", id)))?;

    Ok(Json(game))
}

/// Team IDs are free text on purpose (unknown IDs display raw), but a
/// mismatch is worth a warning in the logs.
fn warn_unknown_teams(state: &AppState, input: &GameInput) {
    for team_id in [&input.home_team_id, &input.away_team_id] {
        if state.teams.find(team_id).is_none() {
            tracing::warn!(team_id = %team_id, "Game references unknown team");
        }
    }
}

async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(input): Json<GameInput>,
) -> Result<(StatusCode, Json<Game>)> {
    input.validate()?;
    warn_unknown_teams(&state, &input);

    let game = input.into_game(generate_id()?);
    state.db.set_game(&game).await?;

    tracing::info!(game_id = %game.id, date = %game.date, "Game created");
    Ok((StatusCode::CREATED, Json(game)))
}

async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<GameInput>,
) -> Result<Json<Game>> {
    input.validate()?;

    if state.db.get_game(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Game {} not found", id)));
    }
    warn_unknown_teams(&state, &input);

    let game = input.into_game(id);
    state.db.set_game(&game).await?;

    tracing::info!(game_id = %game.id, "Game updated");
    Ok(Json(game))
}

async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.db.delete_game(&id).await?;
    tracing::info!(game_id = %id, "Game deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Import ──────────────────────────────────────────────────

/// One game in a schedule import. A missing ID creates a new game.
#[derive(Deserialize)]
struct ImportGame {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    game: GameInput,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportResponse {
    pub imported: usize,
}

/// Bulk upsert a schedule. The whole batch is validated before anything is written.
async fn import_games(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<ImportGame>>,
) -> Result<Json<ImportResponse>> {
    if batch.len() > MAX_IMPORT_GAMES {
        return Err(AppError::BadRequest(format!(
            "Too many games: {} (max {})",
            batch.len(),
            MAX_IMPORT_GAMES
        )));
    }

    let mut games = Vec::with_capacity(batch.len());
    for (index, item) in batch.into_iter().enumerate() {
        item.game
            .validate()
            .map_err(|e| AppError::BadRequest(format!("Game {}: {}", index, e)))?;
        warn_unknown_teams(&state, &item.game);

        let id = match item.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => generate_id()?,
        };
        games.push(item.game.into_game(id));
    }

    let imported = state.db.batch_set_games(&games).await?;
    Ok(Json(ImportResponse { imported }))
}
