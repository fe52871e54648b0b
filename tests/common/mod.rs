// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use game_schedule::config::Config;
use game_schedule::db::FirestoreDb;
use game_schedule::middleware::auth::create_jwt;
use game_schedule::models::Game;
use game_schedule::routes::create_router;
use game_schedule::services::TeamDirectory;
use game_schedule::AppState;
use std::sync::Arc;

/// Admin key used by [`Config::test_default`].
#[allow(dead_code)]
pub const ADMIN_KEY: &str = "test_admin_key";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over an in-memory store.
/// Returns the router and the shared state (seed data through `state.db`).
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        db: FirestoreDb::new_in_memory(),
        teams: TeamDirectory::default(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app whose database is offline (every DB call fails).
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: FirestoreDb::new_mock(),
        teams: TeamDirectory::default(),
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(session_id: &str, signing_key: &[u8]) -> String {
    create_jwt(session_id, signing_key).unwrap()
}

#[allow(dead_code)]
pub fn game(id: &str, date: &str, home: &str, away: &str) -> Game {
    Game {
        id: id.to_string(),
        date: date.to_string(),
        time: "18:30".to_string(),
        home_team_id: home.to_string(),
        away_team_id: away.to_string(),
        stadium: "Jamsil".to_string(),
    }
}

/// Serve the app on an ephemeral local port. Returns the base URL.
#[allow(dead_code)]
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
