//! Anonymous session and team preference models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Anonymous session stored in Firestore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Session {
    /// Random session ID (also used as document ID and JWT subject)
    pub session_id: String,
    /// Always true today; kept so linked accounts can be told apart later
    pub anonymous: bool,
    /// When the session was created (RFC3339)
    pub created_at: String,
    /// Last time the session was seen (RFC3339)
    pub last_active: String,
}

/// Selected-team preference, keyed by session ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPreference {
    /// Team ID from the static team list; `None` until onboarding completes
    #[serde(default)]
    pub selected_team: Option<String>,
    #[serde(default)]
    pub updated_at: String,
}

/// Client-side view of a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub session_id: String,
    /// Bearer token for `/api/*` requests
    pub token: String,
}
