// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod game_list;
pub mod gate;
pub mod teams;

pub use game_list::{GameListController, GameRepository, MonthFilter};
pub use gate::{AuthProvider, Gate, GateRunner, GateState, PreferenceSource};
pub use teams::TeamDirectory;
