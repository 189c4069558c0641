//! Final game result consumed by season-level aggregation.

use super::play::TeamSide;
use super::stats::GameStatistics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    /// `None` for a regulation/overtime tie (regular season only).
    pub winner: Option<TeamSide>,
    pub went_to_overtime: bool,
    pub total_plays: u32,
    pub statistics: GameStatistics,
}

impl GameResult {
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    pub fn score_for(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    /// Score differential from the home team's perspective.
    pub fn margin(&self) -> i64 {
        self.home_score as i64 - self.away_score as i64
    }
}
