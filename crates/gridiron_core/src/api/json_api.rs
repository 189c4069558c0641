//! Versioned JSON API.
//!
//! The franchise layer (season scheduler, UI shells) talks to the engine
//! through JSON strings: one request, one fully simulated game, one
//! response. Nothing here keeps state between calls.

use serde::{Deserialize, Serialize};

use crate::engine::GameSimulator;
use crate::error::{Result, SimError};
use crate::models::{GameSettings, GameStatistics, PlayResult, SimTeam, TeamSide};
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: SimTeam,
    pub away_team: SimTeam,
    #[serde(default)]
    pub settings: GameSettings,
    /// Include the full ordered play log in the response (large).
    #[serde(default)]
    pub include_play_log: bool,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u32,
    pub score_away: u32,
    /// `None` for a regular-season tie.
    pub winner: Option<TeamSide>,
    pub went_to_overtime: bool,
    pub total_plays: u32,
    pub statistics: GameStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_log: Option<Vec<PlayResult>>,
}

/// Simulate one game from a typed request.
pub fn simulate_game(request: GameRequest) -> Result<GameResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::SchemaVersionMismatch {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let mut sim = GameSimulator::new(request.settings, request.seed);
    sim.set_teams(request.home_team, request.away_team)?;
    sim.initialize_game_modifiers()?;
    let play_log = sim.simulate_game()?;

    // simulate_game() only returns once `is_over` is set.
    let result = sim
        .game_result()
        .ok_or_else(|| SimError::Serialization("game did not finish".to_string()))?;

    Ok(GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        home_team: result.home_team,
        away_team: result.away_team,
        score_home: result.home_score,
        score_away: result.away_score,
        winner: result.winner,
        went_to_overtime: result.went_to_overtime,
        total_plays: result.total_plays,
        statistics: result.statistics,
        play_log: request.include_play_log.then_some(play_log),
    })
}

/// JSON-string front door: parse, simulate, serialize.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let response = simulate_game(request)?;
    Ok(serde_json::to_string(&response)?)
}
