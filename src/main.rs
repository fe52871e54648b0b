// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game-Schedule API Server
//!
//! Serves anonymous sessions, team preferences and the admin game schedule
//! for the mobile app.

use game_schedule::{
    config::{Config, StorageBackend},
    db::FirestoreDb,
    services::TeamDirectory,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, storage = ?config.storage, "Starting Game-Schedule API");

    if config.admin_api_key.is_none() {
        tracing::warn!("ADMIN_API_KEY not set, admin routes are disabled");
    }

    let db = match config.storage {
        StorageBackend::Firestore => FirestoreDb::new(&config.gcp_project_id).await?,
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            FirestoreDb::new_in_memory()
        }
    };

    let teams = TeamDirectory::default();
    tracing::info!(count = teams.teams().len(), "Team list loaded");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        teams,
    });

    // Build router
    let app = game_schedule::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("game_schedule=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
