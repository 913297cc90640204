// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Year-in-review summary produced by the match aggregator.
//!
//! The summary is a derived, disposable value: computed once per request
//! from an immutable slice of match records and rendered by the frontend
//! as-is. Fields that are meaningless for an empty input window are
//! `Option` rather than defaulted to misleading zeros.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Games played on one champion, in descending order of games.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChampionCount {
    pub champion: String,
    pub games: u32,
    /// Splash art URL from Data Dragon (absent if art lookup was skipped)
    pub splash_url: Option<String>,
    /// Square icon URL from Data Dragon
    pub icon_url: Option<String>,
}

/// Per-champion aggregate row (games, winrate, KDA and per-game averages).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChampionDetail {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub winrate_percent: f64,
    pub kda: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
}

/// A single match singled out as the best or worst of the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GameHighlight {
    pub champion: String,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kda: f64,
    pub win: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub damage_dealt: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: DateTime<Utc>,
    /// Splash art URL from Data Dragon (absent if art lookup was skipped)
    pub splash_url: Option<String>,
}

/// Time-of-day buckets in declaration order; ties resolve to the earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TimeOfDay {
    /// 06:00-12:00
    Morning,
    /// 12:00-19:00
    Afternoon,
    /// 19:00-24:00
    Evening,
    /// 00:00-06:00
    LateNight,
}

impl TimeOfDay {
    /// All buckets in tie-break order.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::LateNight,
    ];

    /// Bucket a local hour of day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=18 => TimeOfDay::Afternoon,
            19..=23 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }
}

/// Month with the highest match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthActivity {
    pub month: String,
    pub games: u32,
}

/// Weekday with the highest match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekdayActivity {
    pub weekday: String,
    pub games: u32,
}

/// When the player was most active during the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TemporalInsights {
    pub most_active_month: MonthActivity,
    pub favorite_time_of_day: TimeOfDay,
    pub favorite_weekday: WeekdayActivity,
}

/// Aggregated year-in-review statistics for one player.
///
/// Invariants: `wins + losses == total_games`, `winrate_percent` in [0, 100],
/// every rate finite and non-negative. For an empty input window all counts
/// are zero and `best_game`/`worst_game`/`temporal` are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerYearSummary {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub winrate_percent: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_kda: f64,
    pub total_playtime_minutes: f64,
    pub pentakills: u32,
    pub quadrakills: u32,
    pub triplekills: u32,
    /// Matches played in ranked queues (solo + flex)
    pub ranked_games: u32,
    pub top_champions: Vec<ChampionCount>,
    pub champion_details: Vec<ChampionDetail>,
    pub best_game: Option<GameHighlight>,
    pub worst_game: Option<GameHighlight>,
    pub temporal: Option<TemporalInsights>,
}
