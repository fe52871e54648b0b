//! Database layer (Firestore, with an in-process fallback).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};

/// Collection names as constants.
pub mod collections {
    pub const GAMES: &str = "games";
    /// Anonymous sessions (keyed by session_id)
    pub const SESSIONS: &str = "sessions";
    /// Selected-team preference (keyed by session_id)
    pub const PREFERENCES: &str = "preferences";
}

/// Generate a random document ID (20 hex chars, like Firestore auto IDs in length).
pub fn generate_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 10];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}
