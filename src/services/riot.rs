// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Riot Games API client.
//!
//! Handles:
//! - Platform vs. regional-cluster routing for the different API families
//! - Account/summoner/league/mastery lookups
//! - Match-v5 id listing (paginated) and match detail fetching
//! - Rate limit handling with `Retry-After` backoff (development key limits)

use crate::error::AppError;
use crate::models::match_stats::MatchParticipantStat;
use crate::models::player::RiotId;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Riot caps a single match-id page at 100 entries.
pub const MATCH_ID_PAGE_SIZE: usize = 100;

/// Attempts per request before giving up on 429s.
const MAX_ATTEMPTS: u32 = 3;

/// Resolve a platform region (e.g. "na1") to its API host.
///
/// Summoner, league, mastery and spectator endpoints are served per
/// platform; account and match-v5 endpoints are served per regional
/// cluster (see [`cluster_for_platform`]).
pub fn platform_host(region: &str) -> Option<&'static str> {
    Some(match region.to_ascii_lowercase().as_str() {
        "br1" => "br1.api.riotgames.com",
        "eun1" => "eun1.api.riotgames.com",
        "euw1" => "euw1.api.riotgames.com",
        "jp1" => "jp1.api.riotgames.com",
        "kr" => "kr.api.riotgames.com",
        "la1" => "la1.api.riotgames.com",
        "la2" => "la2.api.riotgames.com",
        "na1" => "na1.api.riotgames.com",
        "oc1" => "oc1.api.riotgames.com",
        "ph2" => "ph2.api.riotgames.com",
        "ru" => "ru.api.riotgames.com",
        "sg2" => "sg2.api.riotgames.com",
        "th2" => "th2.api.riotgames.com",
        "tr1" => "tr1.api.riotgames.com",
        "tw2" => "tw2.api.riotgames.com",
        "vn2" => "vn2.api.riotgames.com",
        _ => return None,
    })
}

/// Regional cluster serving account and match-v5 endpoints for a platform.
pub fn cluster_for_platform(region: &str) -> &'static str {
    match region.to_ascii_lowercase().as_str() {
        "br1" | "la1" | "la2" | "na1" | "oc1" => "americas",
        "kr" | "jp1" => "asia",
        "eun1" | "euw1" | "tr1" | "ru" => "europe",
        "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas",
    }
}

/// Reject unknown platform regions before any network call.
pub fn validate_region(region: &str) -> Result<(), AppError> {
    if platform_host(region).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown region '{}'",
            region
        )));
    }
    Ok(())
}

/// Riot Games API client.
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
}

impl RiotClient {
    /// Create a new Riot client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Resolve a Riot ID to an account (puuid) via the regional cluster.
    pub async fn get_account_by_riot_id(
        &self,
        riot_id: &RiotId,
        region: &str,
    ) -> Result<RiotAccount, AppError> {
        let cluster = cluster_for_platform(region);
        let url = format!(
            "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
            cluster,
            urlencoding::encode(riot_id.game_name()),
            urlencoding::encode(riot_id.tag_line()),
        );
        self.get_json(&url, &format!("account for {}", riot_id))
            .await
    }

    /// Get summoner info (level, profile icon) by puuid.
    pub async fn get_summoner_by_puuid(
        &self,
        puuid: &str,
        region: &str,
    ) -> Result<Summoner, AppError> {
        let url = format!(
            "https://{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform(region)?,
            puuid
        );
        self.get_json(&url, "summoner").await
    }

    /// Get ranked league entries (solo/duo, flex) by puuid.
    pub async fn get_league_entries(
        &self,
        puuid: &str,
        region: &str,
    ) -> Result<Vec<LeagueEntry>, AppError> {
        let url = format!(
            "https://{}/lol/league/v4/entries/by-puuid/{}",
            self.platform(region)?,
            puuid
        );
        self.get_json(&url, "league entries").await
    }

    /// Get the player's total champion mastery score.
    pub async fn get_mastery_score(&self, puuid: &str, region: &str) -> Result<i64, AppError> {
        let url = format!(
            "https://{}/lol/champion-mastery/v4/scores/by-puuid/{}",
            self.platform(region)?,
            puuid
        );
        self.get_json(&url, "mastery score").await
    }

    /// Get the player's top champion masteries (`count` capped at 10 by Riot).
    pub async fn get_top_masteries(
        &self,
        puuid: &str,
        count: u32,
        region: &str,
    ) -> Result<Vec<ChampionMastery>, AppError> {
        let url = format!(
            "https://{}/lol/champion-mastery/v4/champion-masteries/by-puuid/{}/top?count={}",
            self.platform(region)?,
            puuid,
            count.min(10)
        );
        self.get_json(&url, "top masteries").await
    }

    /// List one page of match ids, optionally bounded by epoch-second filters.
    pub async fn list_match_ids(
        &self,
        puuid: &str,
        region: &str,
        start: usize,
        count: usize,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Vec<String>, AppError> {
        let cluster = cluster_for_platform(region);
        let mut url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}",
            cluster,
            puuid,
            start,
            count.min(MATCH_ID_PAGE_SIZE)
        );
        if let Some(t) = start_time {
            url.push_str(&format!("&startTime={}", t));
        }
        if let Some(t) = end_time {
            url.push_str(&format!("&endTime={}", t));
        }
        self.get_json(&url, "match ids").await
    }

    /// List ALL match ids for a calendar year, paging until exhausted, so the
    /// caller knows the exact total even when it only analyzes a prefix.
    pub async fn list_year_match_ids(
        &self,
        puuid: &str,
        region: &str,
        year: i32,
    ) -> Result<Vec<String>, AppError> {
        let (start_time, end_time) = year_bounds(year)?;

        let mut all_ids = Vec::new();
        let mut offset = 0;
        loop {
            let batch = self
                .list_match_ids(
                    puuid,
                    region,
                    offset,
                    MATCH_ID_PAGE_SIZE,
                    Some(start_time),
                    Some(end_time),
                )
                .await?;
            if batch.is_empty() {
                break;
            }
            offset += batch.len();
            let last_page = batch.len() < MATCH_ID_PAGE_SIZE;
            all_ids.extend(batch);
            if last_page {
                break;
            }
        }

        tracing::debug!(year, total = all_ids.len(), "Fetched match ids for year");
        Ok(all_ids)
    }

    /// Get the full detail of one match.
    pub async fn get_match(&self, match_id: &str, region: &str) -> Result<RiotMatch, AppError> {
        let cluster = cluster_for_platform(region);
        let url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
            cluster, match_id
        );
        self.get_json(&url, "match detail").await
    }

    fn platform(&self, region: &str) -> Result<&'static str, AppError> {
        platform_host(region)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown region '{}'", region)))
    }

    /// GET with auth header, JSON decoding and bounded 429 backoff.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, AppError> {
        for attempt in 0..MAX_ATTEMPTS {
            let response = self
                .http
                .get(url)
                .header("X-Riot-Token", &self.api_key)
                .send()
                .await
                .map_err(|e| AppError::RiotApi(e.to_string()))?;

            let status = response.status();
            if status.as_u16() == 429 {
                if attempt + 1 == MAX_ATTEMPTS {
                    return Err(AppError::RateLimited);
                }
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(2);
                let wait = retry_after << attempt;
                tracing::warn!(attempt, wait_secs = wait, "Riot rate limit hit (429)");
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }
            if status.as_u16() == 404 {
                return Err(AppError::NotFound(what.to_string()));
            }
            if status.as_u16() == 403 {
                return Err(AppError::RiotApi(
                    "403 Forbidden: RIOT_API_KEY is invalid or expired".to_string(),
                ));
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::RiotApi(format!("HTTP {}: {}", status, body)));
            }

            return response
                .json()
                .await
                .map_err(|e| AppError::RiotApi(format!("JSON parse error: {}", e)));
        }

        Err(AppError::RateLimited)
    }
}

/// Epoch-second [start, end) bounds of a calendar year (UTC).
pub fn year_bounds(year: i32) -> Result<(i64, i64), AppError> {
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::BadRequest(format!("Invalid year {}", year)))?;
    let end = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::BadRequest(format!("Invalid year {}", year)))?;
    Ok((start.timestamp(), end.timestamp()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Riot API response models
// ─────────────────────────────────────────────────────────────────────────────

/// Account from the account-v1 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotAccount {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

/// Summoner from the summoner-v4 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub puuid: String,
    pub summoner_level: i64,
    pub profile_icon_id: i64,
}

/// One ranked queue entry from the league-v4 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    pub queue_type: String,
    pub tier: Option<String>,
    pub rank: Option<String>,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
}

/// Champion mastery entry from the champion-mastery-v4 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMastery {
    pub champion_id: i64,
    pub champion_level: i64,
    pub champion_points: i64,
}

/// Full match detail from the match-v5 API.
#[derive(Debug, Clone, Deserialize)]
pub struct RiotMatch {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Match start, epoch milliseconds
    pub game_start_timestamp: i64,
    /// Match length in seconds
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub queue_id: i64,
    pub participants: Vec<RiotParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotParticipant {
    pub puuid: String,
    pub champion_name: String,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub win: bool,
    #[serde(default)]
    pub penta_kills: i32,
    #[serde(default)]
    pub quadra_kills: i32,
    #[serde(default)]
    pub triple_kills: i32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: i64,
}

impl RiotMatch {
    /// Extract the tracked player's contribution as a flat stat record.
    ///
    /// Returns `None` if the player was not a participant (e.g. the match id
    /// came from a stale history page).
    pub fn participant_stat(&self, puuid: &str) -> Option<MatchParticipantStat> {
        let p = self.info.participants.iter().find(|p| p.puuid == puuid)?;
        let timestamp: DateTime<Utc> =
            DateTime::from_timestamp_millis(self.info.game_start_timestamp)
                .unwrap_or_else(|| DateTime::from_timestamp_millis(0).unwrap_or_default());

        Some(MatchParticipantStat {
            champion_name: p.champion_name.clone(),
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            win: p.win,
            duration_seconds: self.info.game_duration,
            damage_dealt: p.total_damage_dealt_to_champions,
            penta_kills: p.penta_kills,
            quadra_kills: p.quadra_kills,
            triple_kills: p.triple_kills,
            timestamp,
            queue_id: self.info.queue_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_host_known_regions() {
        assert_eq!(platform_host("na1"), Some("na1.api.riotgames.com"));
        assert_eq!(platform_host("KR"), Some("kr.api.riotgames.com"));
        assert_eq!(platform_host("mars"), None);
    }

    #[test]
    fn test_cluster_routing() {
        assert_eq!(cluster_for_platform("na1"), "americas");
        assert_eq!(cluster_for_platform("euw1"), "europe");
        assert_eq!(cluster_for_platform("kr"), "asia");
        assert_eq!(cluster_for_platform("vn2"), "sea");
    }

    #[test]
    fn test_year_bounds() {
        let (start, end) = year_bounds(2025).unwrap();
        assert_eq!(start, 1735689600); // 2025-01-01T00:00:00Z
        assert_eq!(end - start, 365 * 86400);
    }

    #[test]
    fn test_participant_stat_extraction() {
        let json = serde_json::json!({
            "metadata": { "matchId": "NA1_1234" },
            "info": {
                "gameStartTimestamp": 1_700_000_000_000i64,
                "gameDuration": 1800,
                "queueId": 420,
                "participants": [
                    {
                        "puuid": "other",
                        "championName": "Jinx",
                        "kills": 1, "deaths": 2, "assists": 3, "win": false
                    },
                    {
                        "puuid": "me",
                        "championName": "Ahri",
                        "kills": 5, "deaths": 2, "assists": 10, "win": true,
                        "pentaKills": 1,
                        "totalDamageDealtToChampions": 25000
                    }
                ]
            }
        });
        let riot_match: RiotMatch = serde_json::from_value(json).unwrap();

        let stat = riot_match.participant_stat("me").unwrap();
        assert_eq!(stat.champion_name, "Ahri");
        assert_eq!(stat.kills, 5);
        assert_eq!(stat.penta_kills, 1);
        assert_eq!(stat.damage_dealt, 25000);
        assert!(stat.win);
        assert_eq!(stat.timestamp.timestamp(), 1_700_000_000);

        assert!(riot_match.participant_stat("absent").is_none());
    }
}
