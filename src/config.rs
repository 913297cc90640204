//! Application configuration loaded from environment variables.
//!
//! The Riot API key is read once at startup and kept in memory; every
//! outgoing Riot request reuses it via the shared client.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Riot Games API key (development or production)
    pub riot_api_key: String,
    /// Platform region used when a request does not specify one (e.g. "na1")
    pub default_region: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            riot_api_key: "RGAPI-test-key".to_string(),
            default_region: "na1".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let default_region = env::var("DEFAULT_REGION").unwrap_or_else(|_| "na1".to_string());
        if crate::services::riot::platform_host(&default_region).is_none() {
            return Err(ConfigError::Invalid("DEFAULT_REGION"));
        }

        Ok(Self {
            riot_api_key: env::var("RIOT_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("RIOT_API_KEY"))?,
            default_region,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
