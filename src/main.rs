// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rift Rewind API Server
//!
//! Serves year-in-review summaries by aggregating a player's season of
//! matches from the Riot Games API.

use rift_rewind::{
    config::Config,
    services::{DataDragonClient, RiotClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        default_region = %config.default_region,
        "Starting Rift Rewind API"
    );

    // Initialize the Riot API client
    let riot = RiotClient::new(config.riot_api_key.clone());

    // Initialize the Data Dragon client (asset CDN, no rate limits)
    let ddragon = DataDragonClient::new();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        riot,
        ddragon,
    });

    // Build router
    let app = rift_rewind::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rift_rewind=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
