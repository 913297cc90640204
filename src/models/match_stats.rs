// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-match statistics for the tracked player.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranked solo/duo queue id.
pub const QUEUE_RANKED_SOLO: i64 = 420;
/// Ranked flex queue id.
pub const QUEUE_RANKED_FLEX: i64 = 440;

/// One completed match's statistics for a single tracked player.
///
/// Numeric fields are signed so that structural validation can reject
/// negative values explicitly instead of letting them wrap at the
/// deserialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchParticipantStat {
    /// Champion played in this match
    pub champion_name: String,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub win: bool,
    /// Match length in seconds (playtime contribution)
    pub duration_seconds: i64,
    /// Total damage dealt to champions
    pub damage_dealt: i64,
    pub penta_kills: i32,
    pub quadra_kills: i32,
    pub triple_kills: i32,
    /// Match start time (used for temporal bucketing)
    pub timestamp: DateTime<Utc>,
    /// Matchmaking queue id (420 = ranked solo, 440 = ranked flex)
    pub queue_id: i64,
}

impl MatchParticipantStat {
    /// Per-match KDA ratio with deaths floored at 1.
    pub fn kda(&self) -> f64 {
        f64::from(self.kills + self.assists) / f64::from(self.deaths.max(1))
    }

    /// Whether this match was played in a ranked queue.
    pub fn is_ranked(&self) -> bool {
        self.queue_id == QUEUE_RANKED_SOLO || self.queue_id == QUEUE_RANKED_FLEX
    }

    /// Return the first required numeric field holding a negative value,
    /// if any, together with that value.
    pub fn first_invalid_field(&self) -> Option<(&'static str, i64)> {
        [
            ("kills", i64::from(self.kills)),
            ("deaths", i64::from(self.deaths)),
            ("assists", i64::from(self.assists)),
            ("duration_seconds", self.duration_seconds),
            ("damage_dealt", self.damage_dealt),
            ("penta_kills", i64::from(self.penta_kills)),
            ("quadra_kills", i64::from(self.quadra_kills)),
            ("triple_kills", i64::from(self.triple_kills)),
        ]
        .into_iter()
        .find(|(_, value)| *value < 0)
    }
}
