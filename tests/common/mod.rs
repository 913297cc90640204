// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use rift_rewind::config::Config;
use rift_rewind::routes::create_router;
use rift_rewind::services::{DataDragonClient, RiotClient};
use rift_rewind::AppState;
use std::sync::Arc;

/// Create a test app with a dummy API key. Requests that fail validation
/// never reach the network, so these tests run fully offline.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let riot = RiotClient::new(config.riot_api_key.clone());
    let ddragon = DataDragonClient::new();

    let state = Arc::new(AppState {
        config,
        riot,
        ddragon,
    });

    (create_router(state.clone()), state)
}
