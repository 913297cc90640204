// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod match_stats;
pub mod player;
pub mod summary;

pub use match_stats::MatchParticipantStat;
pub use player::RiotId;
pub use summary::PlayerYearSummary;
