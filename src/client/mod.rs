// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the schedule API, as used by the app.
//!
//! [`ApiClient`] is the auth provider, preference source and game repository
//! that the gate and the admin list are driven with.

use crate::models::{AuthSession, Game, GameInput};
use crate::routes::admin::{GamesResponse, ADMIN_KEY_HEADER};
use crate::routes::api::PreferenceResponse;
use crate::routes::auth::SignInResponse;
use crate::services::gate::{AuthProvider, PreferenceSource};
use crate::services::game_list::GameRepository;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

/// Errors from API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("No admin key configured")]
    MissingAdminKey,
}

/// Client for the schedule API.
///
/// Clones share the session channel, so signing in through one clone is seen
/// by every subscriber.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: watch::Sender<Option<AuthSession>>,
    admin_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            admin_key: None,
        }
    }

    /// Use a stored session (for example one persisted by the app between launches).
    pub fn with_session(self, session: AuthSession) -> Self {
        self.session.send_replace(Some(session));
        self
    }

    pub fn with_admin_key(mut self, key: impl Into<String>) -> Self {
        self.admin_key = Some(key.into());
        self
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<AuthSession> {
        self.session.borrow().clone()
    }

    /// Forget the session; subscribers see it go away.
    pub fn sign_out(&self) {
        self.session.send_replace(None);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn game_url(&self, id: &str) -> String {
        self.url(&format!("/admin/games/{}", urlencoding::encode(id)))
    }

    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self
            .session
            .borrow()
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotSignedIn)?;
        Ok(builder.bearer_auth(token))
    }

    fn admin(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let key = self.admin_key.as_ref().ok_or(ClientError::MissingAdminKey)?;
        Ok(builder.header(ADMIN_KEY_HEADER, key))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), ClientError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    // ─── Session ─────────────────────────────────────────────────

    async fn create_anonymous_session(&self) -> Result<AuthSession, ClientError> {
        let response: SignInResponse = Self::send(self.http.post(self.url("/auth/anonymous"))).await?;
        let session = AuthSession {
            session_id: response.session_id,
            token: response.token,
        };
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    // ─── Preferences ─────────────────────────────────────────────

    async fn fetch_selected_team(&self) -> Result<Option<String>, ClientError> {
        let request = self.authed(self.http.get(self.url("/api/preferences")))?;
        let response: PreferenceResponse = Self::send(request).await?;
        Ok(response.selected_team)
    }

    /// Save the selected team (end of onboarding).
    pub async fn set_selected_team(&self, team_id: &str) -> Result<(), ClientError> {
        let body = PreferenceResponse {
            selected_team: Some(team_id.to_string()),
        };
        let request = self.authed(self.http.put(self.url("/api/preferences")).json(&body))?;
        Self::send_empty(request).await
    }

    /// Clear the selected team, sending the user back to onboarding.
    pub async fn clear_selected_team(&self) -> Result<(), ClientError> {
        let request = self.authed(self.http.delete(self.url("/api/preferences")))?;
        Self::send_empty(request).await
    }

    // ─── Admin Games ─────────────────────────────────────────────

    async fn fetch_games(&self) -> Result<Vec<Game>, ClientError> {
        let request = self.admin(self.http.get(self.url("/admin/games")))?;
        let response: GamesResponse = Self::send(request).await?;
        Ok(response.games)
    }

    async fn remove_game(&self, id: &str) -> Result<(), ClientError> {
        let request = self.admin(self.http.delete(self.game_url(id)))?;
        Self::send_empty(request).await
    }

    pub async fn get_game(&self, id: &str) -> Result<Game, ClientError> {
        let request = self.admin(self.http.get(self.game_url(id)))?;
        Self::send(request).await
    }

    pub async fn create_game(&self, input: &GameInput) -> Result<Game, ClientError> {
        let request = self.admin(self.http.post(self.url("/admin/games")).json(input))?;
        Self::send(request).await
    }

    pub async fn update_game(&self, id: &str, input: &GameInput) -> Result<Game, ClientError> {
        let request = self.admin(self.http.put(self.game_url(id)).json(input))?;
        Self::send(request).await
    }

    pub async fn import_games<T: Serialize + ?Sized>(&self, games: &T) -> Result<(), ClientError> {
        let request = self.admin(self.http.post(self.url("/admin/games/import")).json(games))?;
        Self::send_empty(request).await
    }
}

impl AuthProvider for ApiClient {
    type Error = ClientError;

    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.session.subscribe()
    }

    async fn sign_in_anonymously(&self) -> Result<AuthSession, ClientError> {
        self.create_anonymous_session().await
    }
}

impl PreferenceSource for ApiClient {
    type Error = ClientError;

    async fn selected_team(&self) -> Result<Option<String>, ClientError> {
        self.fetch_selected_team().await
    }
}

impl GameRepository for ApiClient {
    type Error = ClientError;

    async fn list_games(&self) -> Result<Vec<Game>, ClientError> {
        self.fetch_games().await
    }

    async fn delete_game(&self, id: &str) -> Result<(), ClientError> {
        self.remove_game(id).await
    }
}
