//! # gridiron_core - Deterministic American Football Game Simulation Engine
//!
//! This library simulates a single American-football game play by play for
//! a franchise-management game. Given two team descriptors (rosters with
//! per-player ratings, badges, coaching/facility bundles) and a game
//! configuration (game type, weather, home-field intensity), it produces a
//! deterministic-with-randomness play log, a final score, and per-player /
//! per-team statistics.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Replayable at three granularities (play, drive, quarter/game) with
//!   identical cumulative output
//! - Situational badge system (clutch, red zone, prime time)
//! - JSON API for easy integration with game shells
//!
//! ## Typical use
//!
//! ```
//! use gridiron_core::{GameSettings, GameSimulator};
//! # use gridiron_core::models::{Player, PlayerAttributes, Position, SimTeam, TraitSlots};
//! # fn roster(prefix: &str) -> Vec<Player> {
//! #     [Position::QB, Position::RB, Position::WR, Position::TE, Position::OL,
//! #      Position::DL, Position::LB, Position::CB, Position::S, Position::K, Position::P]
//! #         .iter().map(|&position| Player {
//! #             id: format!("{}-{}", prefix, position.code()),
//! #             name: position.code().to_string(),
//! #             position,
//! #             overall: 72,
//! #             attributes: Some(PlayerAttributes::flat(72)),
//! #             traits: TraitSlots::default(),
//! #         }).collect()
//! # }
//! # fn team(prefix: &str) -> SimTeam {
//! #     SimTeam { id: prefix.into(), name: prefix.to_uppercase(), abbreviation: prefix.to_uppercase(),
//! #         players: roster(prefix), coaching: Default::default(), facilities: Default::default() }
//! # }
//! let mut sim = GameSimulator::new(GameSettings::default(), 42);
//! sim.set_teams(team("hm"), team("aw"))?;
//! sim.initialize_game_modifiers()?;
//! let plays = sim.simulate_game()?;
//! let result = sim.game_result().expect("game finished");
//! assert_eq!(plays.len() as u32, result.total_plays);
//! # Ok::<(), gridiron_core::SimError>(())
//! ```

// Game engine APIs often require many parameters for ratings and state.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{simulate_game, simulate_game_json, GameRequest, GameResponse};
pub use error::{Result, SimError};

// Re-export the engine surface
pub use engine::{
    DriveSummary, GameFlowState, GameSimulator, GameState, Personnel, TeamGameModifiers,
};

// Re-export core model types
pub use models::{
    GameResult, GameSettings, GameStatistics, GameType, HomeFieldIntensity, OvertimeRule,
    PlayOutcome, PlayResult, PlayType, Player, PlayerGameStats, SimTeam, TeamGameStats, TeamSide,
    TriggeredEffect, Weather,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
