// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Games (the season schedule)
//! - Sessions (anonymous sign-ins)
//! - Preferences (selected team per session)

use crate::db::collections;
use crate::db::memory::MemoryStore;
use crate::error::AppError;
use crate::models::{Game, GameInput, Session, TeamPreference};
use futures_util::{stream, StreamExt};
use std::sync::Arc;

const MAX_CONCURRENT_DB_OPS: usize = 50;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<MemoryStore>),
    Offline,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a store that keeps all documents in process memory.
    pub fn new_in_memory() -> Self {
        Self::with_memory_store(Arc::new(MemoryStore::new()))
    }

    /// Create a store over an existing in-memory store (tests share it to seed data).
    pub fn with_memory_store(store: Arc<MemoryStore>) -> Self {
        Self {
            backend: Backend::Memory(store),
        }
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── Game Operations ─────────────────────────────────────────

    /// List every game, newest date first.
    pub async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .from(collections::GAMES)
                .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.games_by_date_desc()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Get a game by document ID.
    pub async fn get_game(&self, id: &str) -> Result<Option<Game>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::GAMES)
                .obj()
                .one(id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.games.get(id).map(|g| g.value().clone())),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create or replace a game.
    ///
    /// The document ID is not stored as a field; reads take it from the
    /// document name.
    pub async fn set_game(&self, game: &Game) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let document = GameInput::from(game.clone());
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::GAMES)
                    .document_id(&game.id)
                    .object(&document)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.games.insert(game.id.clone(), game.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Delete a game. Deleting a missing game is not an error.
    pub async fn delete_game(&self, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::GAMES)
                    .document_id(id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.games.remove(id);
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Store multiple games.
    ///
    /// Uses concurrent writes with a limit to avoid overloading Firestore.
    pub async fn batch_set_games(&self, games: &[Game]) -> Result<usize, AppError> {
        stream::iter(games.to_vec())
            .map(|game| async move { self.set_game(&game).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::info!(count = games.len(), "Stored game batch");
        Ok(games.len())
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Get an anonymous session.
    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::SESSIONS)
                .obj()
                .one(session_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.sessions.get(session_id).map(|s| s.value().clone())),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create or update a session.
    pub async fn upsert_session(&self, session: &Session) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::SESSIONS)
                    .document_id(&session.session_id)
                    .object(session)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store
                    .sessions
                    .insert(session.session_id.clone(), session.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    // ─── Preference Operations ───────────────────────────────────

    /// Get the team preference for a session.
    pub async fn get_preference(
        &self,
        session_id: &str,
    ) -> Result<Option<TeamPreference>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::PREFERENCES)
                .obj()
                .one(session_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store
                .preferences
                .get(session_id)
                .map(|p| p.value().clone())),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Store the team preference for a session.
    pub async fn set_preference(
        &self,
        session_id: &str,
        preference: &TeamPreference,
    ) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::PREFERENCES)
                    .document_id(session_id)
                    .object(preference)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store
                    .preferences
                    .insert(session_id.to_string(), preference.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Remove the team preference for a session.
    pub async fn delete_preference(&self, session_id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::PREFERENCES)
                    .document_id(session_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.preferences.remove(session_id);
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }
}
