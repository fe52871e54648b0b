// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Anonymous sign-in routes.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::generate_id;
use crate::error::Result;
use crate::middleware::auth::{create_jwt, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::models::Session;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/anonymous", post(sign_in_anonymously))
}

/// Response for a new anonymous session.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SignInResponse {
    pub session_id: String,
    pub token: String,
}

/// Start a new anonymous session.
///
/// The token is returned in the body for the mobile app and also set as a
/// cookie for browser clients.
async fn sign_in_anonymously(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SignInResponse>)> {
    let session_id = generate_id()?;
    let now = now_rfc3339();

    let session = Session {
        session_id: session_id.clone(),
        anonymous: true,
        created_at: now.clone(),
        last_active: now,
    };
    state.db.upsert_session(&session).await?;

    let token = create_jwt(&session_id, &state.config.jwt_signing_key)?;

    tracing::info!(session_id = %session_id, "Anonymous session created");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(!state.config.frontend_url.starts_with("http://localhost"))
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build();

    Ok((
        jar.add(cookie),
        Json(SignInResponse { session_id, token }),
    ))
}
