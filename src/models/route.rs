// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! App navigation routes.
//!
//! Paths follow the file-based layout of the mobile app: segments wrapped in
//! parentheses are route groups and do not change which screen is shown.

use std::fmt;

/// A navigation target in the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// `/(app)/onboarding`
    Onboarding,
    /// `/(app)/(tabs)`
    Tabs,
    /// `/admin/games/new`
    AdminGamesNew,
    /// `/admin/games/:id`
    AdminGame(String),
    /// Any other screen, kept as the raw path.
    Other(String),
}

impl AppRoute {
    /// Parse a path such as `/(app)/onboarding` or `onboarding`.
    pub fn parse(path: &str) -> Self {
        let segments = screen_segments(path);

        match segments.as_slice() {
            ["onboarding"] => AppRoute::Onboarding,
            [] => AppRoute::Tabs,
            ["admin", "games", "new"] => AppRoute::AdminGamesNew,
            ["admin", "games", id] => AppRoute::AdminGame(
                urlencoding::decode(id)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| (*id).to_string()),
            ),
            _ => AppRoute::Other(path.to_string()),
        }
    }

    /// Whether this is the onboarding screen.
    ///
    /// Matching is on whole segments, so `/settings/onboarding-tips` is not
    /// onboarding.
    pub fn is_onboarding(&self) -> bool {
        matches!(self, AppRoute::Onboarding)
    }

    /// Canonical path for navigation.
    pub fn path(&self) -> String {
        match self {
            AppRoute::Onboarding => "/(app)/onboarding".to_string(),
            AppRoute::Tabs => "/(app)/(tabs)".to_string(),
            AppRoute::AdminGamesNew => "/admin/games/new".to_string(),
            AppRoute::AdminGame(id) => format!("/admin/games/{}", urlencoding::encode(id)),
            AppRoute::Other(path) => path.clone(),
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path segments with route groups removed.
fn screen_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| !(s.starts_with('(') && s.ends_with(')')))
        .collect()
}
