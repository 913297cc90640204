// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data Dragon client for champion names and art URLs.
//!
//! Data Dragon is Riot's asset CDN; it costs no rate limit, so failures here
//! must never fail a summary — callers fall back to raw champion names.

use crate::error::AppError;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

const BASE_URL: &str = "https://ddragon.leagueoflegends.com";

/// Data Dragon client with in-memory caches shared across requests.
pub struct DataDragonClient {
    http: reqwest::Client,
    base_url: String,
    /// Latest patch version, fetched once and reused.
    latest_version: RwLock<Option<String>>,
    /// champion_id -> champion name, populated lazily from champion.json.
    champion_names: DashMap<i64, String>,
}

impl Default for DataDragonClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataDragonClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            latest_version: RwLock::new(None),
            champion_names: DashMap::new(),
        }
    }

    /// All published Data Dragon versions, most recent first.
    pub async fn versions(&self) -> Result<Vec<String>, AppError> {
        let url = format!("{}/api/versions.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RiotApi(format!("Data Dragon: {}", e)))?;
        if !response.status().is_success() {
            return Err(AppError::RiotApi(format!(
                "Data Dragon HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::RiotApi(format!("Data Dragon JSON: {}", e)))
    }

    /// Latest patch version, cached after the first successful fetch.
    pub async fn latest_version(&self) -> Result<String, AppError> {
        if let Some(version) = self.latest_version.read().await.clone() {
            return Ok(version);
        }

        let versions = self.versions().await?;
        let latest = versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::RiotApi("Data Dragon returned no versions".to_string()))?;

        *self.latest_version.write().await = Some(latest.clone());
        Ok(latest)
    }

    /// Resolve a numeric champion id to its Data Dragon name, populating the
    /// shared cache from champion.json on the first miss.
    pub async fn champion_name(&self, champion_id: i64) -> Result<Option<String>, AppError> {
        if let Some(name) = self.champion_names.get(&champion_id) {
            return Ok(Some(name.clone()));
        }

        let version = self.latest_version().await?;
        let url = format!(
            "{}/cdn/{}/data/en_US/champion.json",
            self.base_url, version
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RiotApi(format!("Data Dragon: {}", e)))?;
        let champions: ChampionsFile = response
            .json()
            .await
            .map_err(|e| AppError::RiotApi(format!("Data Dragon JSON: {}", e)))?;

        for (name, entry) in champions.data {
            if let Ok(id) = entry.key.parse::<i64>() {
                self.champion_names.insert(id, name);
            }
        }

        Ok(self.champion_names.get(&champion_id).map(|n| n.clone()))
    }

    /// Splash art URL for a champion's default skin. Splash art is not
    /// versioned on the CDN.
    pub fn splash_url(&self, champion_name: &str) -> String {
        format!(
            "{}/cdn/img/champion/splash/{}_0.jpg",
            self.base_url, champion_name
        )
    }

    /// Square champion icon URL for a given patch version.
    pub fn icon_url(&self, champion_name: &str, version: &str) -> String {
        format!(
            "{}/cdn/{}/img/champion/{}.png",
            self.base_url, version, champion_name
        )
    }

    /// Profile icon URL for a given patch version.
    pub fn profile_icon_url(&self, icon_id: i64, version: &str) -> String {
        format!(
            "{}/cdn/{}/img/profileicon/{}.png",
            self.base_url, version, icon_id
        )
    }
}

/// champion.json: `{ "data": { "Ahri": { "key": "103", ... }, ... } }`
#[derive(Deserialize)]
struct ChampionsFile {
    data: HashMap<String, ChampionEntry>,
}

#[derive(Deserialize)]
struct ChampionEntry {
    key: String,
}
