// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: player profile and year-in-review summary.

use crate::error::{AppError, Result};
use crate::models::player::RiotId;
use crate::models::summary::PlayerYearSummary;
use crate::services::aggregator::{aggregate, AggregateOptions, DEFAULT_TOP_N};
use crate::services::riot::{self, RiotAccount};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Riot never returns more than 100 ids per history page, and a development
/// key cannot realistically fetch more match details per request anyway.
const MAX_ANALYZED_MATCHES: u32 = 100;
const MAX_TOP_N: usize = 10;
/// Largest UTC offset in use is UTC+14 (Line Islands).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;
/// Match-v5 history starts in 2021; anything earlier returns nothing.
const MIN_YEAR: i32 = 2021;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/players/{game_name}/{tag_line}", get(get_player_profile))
        .route(
            "/api/players/{game_name}/{tag_line}/wrapped",
            get(get_player_wrapped),
        )
}

// ─── Response types ──────────────────────────────────────────

/// Player identity and profile basics shared by both endpoints.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerResponse {
    pub game_name: String,
    pub tag_line: String,
    pub puuid: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub summoner_level: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub profile_icon_id: i64,
    pub profile_icon_url: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub mastery_score: i64,
}

/// One ranked queue standing.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RankedEntryResponse {
    pub queue_type: String,
    pub tier: Option<String>,
    pub rank: Option<String>,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
}

/// One champion mastery row, decorated with name and icon when available.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MasteryResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub champion_id: i64,
    pub champion_name: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub champion_level: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub champion_points: i64,
    pub icon_url: Option<String>,
}

/// Full profile response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub player: PlayerResponse,
    pub ranked: Vec<RankedEntryResponse>,
    pub top_masteries: Vec<MasteryResponse>,
}

/// Year-in-review response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WrappedResponse {
    pub player: PlayerResponse,
    pub year: i32,
    /// Exact number of matches the player played in the year
    pub total_matches_in_year: u32,
    /// Matches actually fetched and aggregated (capped by `max_matches`)
    pub matches_analyzed: u32,
    pub summary: PlayerYearSummary,
    pub generated_at: String,
}

// ─── Query validation ────────────────────────────────────────

#[derive(Deserialize)]
struct ProfileQuery {
    region: Option<String>,
}

#[derive(Deserialize)]
struct WrappedQuery {
    region: Option<String>,
    year: Option<i32>,
    max_matches: Option<u32>,
    top_n: Option<usize>,
    utc_offset_minutes: Option<i32>,
}

/// Pick the request region or fall back to the configured default, rejecting
/// unknown regions before any Riot call is made.
fn resolve_region(state: &AppState, region: Option<String>) -> Result<String> {
    let region = region.unwrap_or_else(|| state.config.default_region.clone());
    riot::validate_region(&region)?;
    Ok(region.to_ascii_lowercase())
}

fn validate_year(year: Option<i32>) -> Result<i32> {
    let year = year.unwrap_or_else(|| {
        use chrono::Datelike;
        chrono::Utc::now().year()
    });
    if !(MIN_YEAR..=2100).contains(&year) {
        return Err(AppError::BadRequest(format!(
            "Year must be between {} and 2100",
            MIN_YEAR
        )));
    }
    Ok(year)
}

fn validate_top_n(top_n: Option<usize>) -> Result<usize> {
    let top_n = top_n.unwrap_or(DEFAULT_TOP_N);
    if !(1..=MAX_TOP_N).contains(&top_n) {
        return Err(AppError::BadRequest(format!(
            "top_n must be between 1 and {}",
            MAX_TOP_N
        )));
    }
    Ok(top_n)
}

fn validate_utc_offset(minutes: Option<i32>) -> Result<i32> {
    let minutes = minutes.unwrap_or(0);
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(AppError::BadRequest(format!(
            "utc_offset_minutes must be within ±{}",
            MAX_UTC_OFFSET_MINUTES
        )));
    }
    Ok(minutes)
}

// ─── Handlers ────────────────────────────────────────────────

/// Get a player's profile (account, level, ranked standings, masteries).
async fn get_player_profile(
    State(state): State<Arc<AppState>>,
    Path((game_name, tag_line)): Path<(String, String)>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>> {
    let riot_id = RiotId::new(&game_name, &tag_line)?;
    let region = resolve_region(&state, params.region)?;

    tracing::debug!(riot_id = %riot_id, region = %region, "Fetching player profile");

    let (account, player) = fetch_player(&state, &riot_id, &region).await?;

    let ranked = state
        .riot
        .get_league_entries(&account.puuid, &region)
        .await?
        .into_iter()
        .map(|e| RankedEntryResponse {
            queue_type: e.queue_type,
            tier: e.tier,
            rank: e.rank,
            league_points: e.league_points,
            wins: e.wins,
            losses: e.losses,
        })
        .collect();

    let masteries = state
        .riot
        .get_top_masteries(&account.puuid, 5, &region)
        .await?;

    let version = state.ddragon.latest_version().await.ok();
    let mut top_masteries = Vec::with_capacity(masteries.len());
    for m in masteries {
        // Best effort: a mastery row without a resolvable name still renders.
        let champion_name = state
            .ddragon
            .champion_name(m.champion_id)
            .await
            .unwrap_or(None);
        let icon_url = match (&champion_name, &version) {
            (Some(name), Some(v)) => Some(state.ddragon.icon_url(name, v)),
            _ => None,
        };
        top_masteries.push(MasteryResponse {
            champion_id: m.champion_id,
            champion_name,
            champion_level: m.champion_level,
            champion_points: m.champion_points,
            icon_url,
        });
    }

    Ok(Json(ProfileResponse {
        player,
        ranked,
        top_masteries,
    }))
}

/// Get a player's year-in-review summary.
///
/// Orchestration: resolve the account, page every match id for the year
/// (so `total_matches_in_year` is exact), fetch details for up to
/// `max_matches` of them, aggregate, then decorate with champion art.
async fn get_player_wrapped(
    State(state): State<Arc<AppState>>,
    Path((game_name, tag_line)): Path<(String, String)>,
    Query(params): Query<WrappedQuery>,
) -> Result<Json<WrappedResponse>> {
    let riot_id = RiotId::new(&game_name, &tag_line)?;
    let region = resolve_region(&state, params.region)?;
    let year = validate_year(params.year)?;
    let max_matches = params
        .max_matches
        .unwrap_or(MAX_ANALYZED_MATCHES)
        .clamp(1, MAX_ANALYZED_MATCHES);
    let options = AggregateOptions {
        top_n: validate_top_n(params.top_n)?,
        utc_offset_minutes: validate_utc_offset(params.utc_offset_minutes)?,
    };

    tracing::info!(
        riot_id = %riot_id,
        region = %region,
        year,
        max_matches,
        "Generating year-in-review"
    );

    let (account, player) = fetch_player(&state, &riot_id, &region).await?;

    let all_match_ids = state
        .riot
        .list_year_match_ids(&account.puuid, &region, year)
        .await?;
    let total_matches_in_year = all_match_ids.len() as u32;

    // Fetch details sequentially: a development key allows ~100 requests
    // per 2 minutes, so fanning out buys nothing but 429s.
    let analyze = all_match_ids.len().min(max_matches as usize);
    let mut stats = Vec::with_capacity(analyze);
    for match_id in &all_match_ids[..analyze] {
        match state.riot.get_match(match_id, &region).await {
            Ok(riot_match) => {
                if let Some(stat) = riot_match.participant_stat(&account.puuid) {
                    stats.push(stat);
                }
            }
            Err(e) => {
                tracing::warn!(match_id = %match_id, error = %e, "Skipping unfetchable match");
            }
        }
    }
    let matches_analyzed = stats.len() as u32;

    let mut summary = aggregate(&stats, &options)?;
    decorate_with_art(&state, &mut summary).await;

    Ok(Json(WrappedResponse {
        player,
        year,
        total_matches_in_year,
        matches_analyzed,
        summary,
        generated_at: format_utc_rfc3339(chrono::Utc::now()),
    }))
}

/// Resolve account + summoner + mastery score into the shared player block.
async fn fetch_player(
    state: &AppState,
    riot_id: &RiotId,
    region: &str,
) -> Result<(RiotAccount, PlayerResponse)> {
    let account = state.riot.get_account_by_riot_id(riot_id, region).await?;
    let summoner = state
        .riot
        .get_summoner_by_puuid(&account.puuid, region)
        .await?;
    let mastery_score = state
        .riot
        .get_mastery_score(&account.puuid, region)
        .await?;

    let profile_icon_url = match state.ddragon.latest_version().await {
        Ok(version) => Some(
            state
                .ddragon
                .profile_icon_url(summoner.profile_icon_id, &version),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Data Dragon version lookup failed, omitting icon URL");
            None
        }
    };

    let player = PlayerResponse {
        game_name: account.game_name.clone(),
        tag_line: account.tag_line.clone(),
        puuid: account.puuid.clone(),
        summoner_level: summoner.summoner_level,
        profile_icon_id: summoner.profile_icon_id,
        profile_icon_url,
        mastery_score,
    };

    Ok((account, player))
}

/// Attach splash/icon URLs to the summary. Art is optional; any Data Dragon
/// failure leaves the summary unchanged.
async fn decorate_with_art(state: &AppState, summary: &mut PlayerYearSummary) {
    let version = match state.ddragon.latest_version().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping champion art decoration");
            return;
        }
    };

    for entry in &mut summary.top_champions {
        entry.splash_url = Some(state.ddragon.splash_url(&entry.champion));
        entry.icon_url = Some(state.ddragon.icon_url(&entry.champion, &version));
    }
    if let Some(best) = &mut summary.best_game {
        best.splash_url = Some(state.ddragon.splash_url(&best.champion));
    }
    if let Some(worst) = &mut summary.worst_game {
        worst.splash_url = Some(state.ddragon.splash_url(&worst.champion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_year_bounds() {
        assert_eq!(validate_year(Some(2025)).unwrap(), 2025);
        assert!(validate_year(Some(1999)).is_err());
        assert!(validate_year(Some(2101)).is_err());
        // Default is the current year, which is always in range.
        assert!(validate_year(None).is_ok());
    }

    #[test]
    fn test_validate_top_n() {
        assert_eq!(validate_top_n(None).unwrap(), DEFAULT_TOP_N);
        assert_eq!(validate_top_n(Some(10)).unwrap(), 10);
        assert!(validate_top_n(Some(0)).is_err());
        assert!(validate_top_n(Some(11)).is_err());
    }

    #[test]
    fn test_validate_utc_offset() {
        assert_eq!(validate_utc_offset(None).unwrap(), 0);
        assert_eq!(validate_utc_offset(Some(-360)).unwrap(), -360);
        assert!(validate_utc_offset(Some(900)).is_err());
        assert!(validate_utc_offset(Some(-900)).is_err());
    }
}
