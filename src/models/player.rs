// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player identity as an explicit value type.
//!
//! Riot identifies players by a `gameName#tagLine` pair. Carrying it as a
//! validated type instead of a concatenated string keeps malformed keys out
//! of URLs and lookups.

use crate::error::AppError;
use std::fmt;

/// Maximum length Riot accepts for a game name.
const MAX_GAME_NAME_LEN: usize = 16;
/// Maximum length Riot accepts for a tag line.
const MAX_TAG_LINE_LEN: usize = 5;

/// A validated `gameName#tagLine` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RiotId {
    game_name: String,
    tag_line: String,
}

impl RiotId {
    /// Build a Riot ID from its two halves, rejecting malformed input.
    pub fn new(game_name: &str, tag_line: &str) -> Result<Self, AppError> {
        let game_name = game_name.trim();
        let tag_line = tag_line.trim();

        if game_name.is_empty() || game_name.chars().count() > MAX_GAME_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "Game name must be 1-{} characters",
                MAX_GAME_NAME_LEN
            )));
        }
        if tag_line.is_empty() || tag_line.chars().count() > MAX_TAG_LINE_LEN {
            return Err(AppError::BadRequest(format!(
                "Tag line must be 1-{} characters",
                MAX_TAG_LINE_LEN
            )));
        }
        if game_name.contains(['#', '/']) || tag_line.contains(['#', '/']) {
            return Err(AppError::BadRequest(
                "Riot ID must not contain '#' or '/'".to_string(),
            ));
        }

        Ok(Self {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn tag_line(&self) -> &str {
        &self.tag_line
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}
