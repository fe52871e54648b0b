// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game-Schedule: season schedules and team preferences for the app.
//!
//! This crate provides the backend API (anonymous sessions, selected team,
//! admin game management on Firestore) and the app-side pieces that drive it:
//! the auth/onboarding gate and the admin game list.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::TeamDirectory;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub teams: TeamDirectory,
}
