// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game schedule model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Stored game record in Firestore.
///
/// Field names are camelCase to match the documents the app already writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Game {
    /// Document ID (filled from the Firestore document name on reads)
    #[serde(default, alias = "_firestore_id")]
    pub id: String,
    /// Game date ("YYYY-MM-DD")
    #[serde(default)]
    pub date: String,
    /// First pitch time ("HH:MM")
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub home_team_id: String,
    #[serde(default)]
    pub away_team_id: String,
    #[serde(default)]
    pub stadium: String,
}

impl Game {
    /// Year and month of the game date, if the date is well formed enough.
    ///
    /// Only the first two `-`-separated parts are looked at. The year part
    /// must be written exactly as the year (no padding or spaces). The month
    /// part is read as its leading number, so "01", "1" and "01x" are all
    /// January.
    pub fn year_month(&self) -> Option<(i32, u32)> {
        let mut parts = self.date.split('-');
        let year_part = parts.next()?;
        let year: i32 = year_part.parse().ok()?;
        if year.to_string() != year_part {
            return None;
        }
        let month = leading_number(parts.next()?)?;
        Some((year, month))
    }
}

/// Parse the number at the start of `s`, ignoring leading whitespace and
/// anything after the digits.
fn leading_number(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Create/update payload for a game.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_distinct_teams"))]
pub struct GameInput {
    #[validate(custom(function = "validate_date"))]
    pub date: String,
    #[validate(custom(function = "validate_time"))]
    pub time: String,
    #[validate(length(min = 1, max = 64))]
    pub home_team_id: String,
    #[validate(length(min = 1, max = 64))]
    pub away_team_id: String,
    #[validate(length(min = 1, max = 128))]
    pub stadium: String,
}

impl GameInput {
    /// Attach a document ID.
    pub fn into_game(self, id: String) -> Game {
        Game {
            id,
            date: self.date,
            time: self.time,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            stadium: self.stadium,
        }
    }
}

impl From<Game> for GameInput {
    fn from(game: Game) -> Self {
        Self {
            date: game.date,
            time: game.time,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            stadium: game.stadium,
        }
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date_format"))
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time_format"))
}

fn validate_distinct_teams(input: &GameInput) -> Result<(), ValidationError> {
    if input.home_team_id == input.away_team_id {
        return Err(ValidationError::new("same_team"));
    }
    Ok(())
}
