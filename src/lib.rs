// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rift Rewind: a year-in-review summary service for League of Legends
//!
//! This crate provides the backend API that fetches a player's season of
//! matches from the Riot Games API and reduces them into a single
//! year-in-review summary for the web frontend.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{DataDragonClient, RiotClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub riot: RiotClient,
    pub ddragon: DataDragonClient,
}
