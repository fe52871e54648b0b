// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for signed-in sessions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{AppRoute, Session, Team, TeamPreference};
use crate::services::gate::{decide_redirect, GateState};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest route path accepted by the gate endpoint.
const MAX_ROUTE_LEN: usize = 256;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route(
            "/api/preferences",
            get(get_preferences)
                .put(put_preferences)
                .delete(delete_preferences),
        )
        .route("/api/teams", get(get_teams))
        .route("/api/gate", get(get_gate))
}

// ─── Session ─────────────────────────────────────────────────

/// Get the current session.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Session>> {
    let session = state
        .db
        .get_session(&user.session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", user.session_id)))?;

    Ok(Json(session))
}

// ─── Team Preference ─────────────────────────────────────────

/// Selected team for the session.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PreferenceResponse {
    pub selected_team: Option<String>,
}

async fn load_selected_team(state: &AppState, session_id: &str) -> Result<Option<String>> {
    Ok(state
        .db
        .get_preference(session_id)
        .await?
        .and_then(|p| p.selected_team))
}

async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PreferenceResponse>> {
    let selected_team = load_selected_team(&state, &user.session_id).await?;
    Ok(Json(PreferenceResponse { selected_team }))
}

/// Save the selected team. Only teams from the static list are accepted.
async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PreferenceResponse>,
) -> Result<Json<PreferenceResponse>> {
    let team_id = body
        .selected_team
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("selected_team is required".to_string()))?;

    let team = state
        .teams
        .require(&team_id)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let preference = TeamPreference {
        selected_team: Some(team.id.to_string()),
        updated_at: now_rfc3339(),
    };
    state
        .db
        .set_preference(&user.session_id, &preference)
        .await?;

    tracing::info!(session_id = %user.session_id, team = team.id, "Team selected");

    Ok(Json(PreferenceResponse {
        selected_team: preference.selected_team,
    }))
}

/// Clear the selected team so the app returns to onboarding.
async fn delete_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode> {
    state.db.delete_preference(&user.session_id).await?;
    tracing::info!(session_id = %user.session_id, "Team selection cleared");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Teams ───────────────────────────────────────────────────

async fn get_teams(State(state): State<Arc<AppState>>) -> Json<Vec<Team>> {
    Json(state.teams.teams().to_vec())
}

// ─── Gate ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GateQuery {
    /// Current app route, e.g. `/(app)/(tabs)`
    #[serde(default)]
    route: String,
}

/// Routing decision for the current screen.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GateResponse {
    pub state: String,
    pub selected_team: Option<String>,
    /// Path to replace the current screen with, if any
    pub redirect: Option<String>,
}

/// Evaluate the onboarding gate for a session.
///
/// A request that reaches this handler already has a session and the
/// preference is read synchronously, so the gate is always ready here.
async fn get_gate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<GateQuery>,
) -> Result<Json<GateResponse>> {
    if params.route.len() > MAX_ROUTE_LEN {
        return Err(AppError::BadRequest("route too long".to_string()));
    }

    let route = AppRoute::parse(&params.route);
    let selected_team = load_selected_team(&state, &user.session_id).await?;
    let redirect = decide_redirect(selected_team.as_deref(), &route);

    tracing::debug!(
        session_id = %user.session_id,
        route = %route,
        redirect = ?redirect,
        "Gate evaluated"
    );

    Ok(Json(GateResponse {
        state: gate_state_name(GateState::Ready).to_string(),
        selected_team,
        redirect: redirect.map(|r| r.path()),
    }))
}

fn gate_state_name(state: GateState) -> &'static str {
    match state {
        GateState::Initializing => "initializing",
        GateState::Ready => "ready",
    }
}
