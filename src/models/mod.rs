// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod game;
pub mod route;
pub mod session;
pub mod team;

pub use game::{Game, GameInput};
pub use route::AppRoute;
pub use session::{AuthSession, Session, TeamPreference};
pub use team::{Team, TEAMS};
