//! Game Simulation Engine
//!
//! Core play-by-play simulation module. This module orchestrates an entire
//! game:
//!
//! - Game state management (score, clock, down/distance, possession)
//! - Per-snap play selection and outcome resolution
//! - Statistics accumulation and the ordered play log
//!
//! ## Architecture
//!
//! The simulation is layered; lower layers never reach upward:
//! - L1: `probability.rs` - stateless rating/probability math
//! - L2: `play_resolution.rs` - pure resolution (context + RNG -> result)
//! - L3: `GameSimulator` (this module) - stateful orchestration
//!
//! ```text
//! [INPUT]  SimTeam x2 + GameSettings + seed
//!     |
//!     v
//! GameSimulator::play()
//!     modifiers  -> situational badge evaluation (clutch/red zone/prime)
//!     selection  -> play-call policy (4th-down chart, two-minute, kneel)
//!     resolution -> one PlayResult from the injected ChaCha8 RNG
//!     clock/down -> deterministic state transition (quarters, overtime)
//!     drive      -> running DriveSummary
//!     stats      -> per-player and per-team accumulation
//!     |
//!     v
//! [OUTPUT] PlayResult log + GameStatistics + GameResult
//! ```
//!
//! Batch helpers (`simulate_drive`, `simulate_quarter`, `simulate_game`)
//! are plain loops over `play()`, so any granularity produces identical
//! final state and statistics for the same seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod clock;
pub mod constants;
pub mod deterministic;
pub mod drive;
pub mod game_state;
pub mod modifiers;
pub mod play_resolution;
pub mod play_selection;
pub mod probability;
pub mod stat_accumulator;

#[cfg(test)]
mod sim_tests;

pub use clock::ClockDownManager;
pub use drive::{drive_ended, DriveSummary, DriveTracker};
pub use game_state::{GameFlowState, GameState, OvertimeLedger};
pub use modifiers::{
    active_situations, effective_attr, initialize_team_modifiers, is_clutch, Personnel,
    TeamGameModifiers,
};
pub use play_resolution::{resolve_play, ResolutionContext};
pub use play_selection::select_play;
pub use stat_accumulator::StatAccumulator;

use crate::error::{Result, SimError};
use crate::models::{
    GameResult, GameSettings, GameStatistics, PlayResult, PlayerGameStats, SimTeam, TeamSide,
};

/// Runaway guard for pathological matchups; a real game is ~120-180 plays.
const MAX_PLAYS: usize = 2048;

/// Per-side data built by `initialize_game_modifiers()`.
#[derive(Debug, Clone)]
struct SideContext {
    modifiers: TeamGameModifiers,
    personnel: Personnel,
}

/// One game, one instance. All state is instance-scoped: independent
/// simulators with independent seeds produce statistically independent
/// games, which Monte Carlo season projection relies on.
pub struct GameSimulator {
    settings: GameSettings,
    seed: u64,
    rng: ChaCha8Rng,
    home: Option<SimTeam>,
    away: Option<SimTeam>,
    home_ctx: Option<SideContext>,
    away_ctx: Option<SideContext>,
    state: GameState,
    clock_manager: ClockDownManager,
    drive_tracker: DriveTracker,
    accumulator: StatAccumulator,
    stats: GameStatistics,
    play_log: Vec<PlayResult>,
}

impl GameSimulator {
    /// Create a simulator for one game. The seed fully determines the
    /// outcome once teams are assigned.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            home: None,
            away: None,
            home_ctx: None,
            away_ctx: None,
            state: GameState::new(TeamSide::Home),
            clock_manager: ClockDownManager::new(settings.overtime_rule()),
            drive_tracker: DriveTracker::new(),
            accumulator: StatAccumulator::new(),
            stats: GameStatistics::default(),
            play_log: Vec::new(),
        }
    }

    /// Assign the two teams. Rosters are validated here, up front.
    pub fn set_teams(&mut self, home: SimTeam, away: SimTeam) -> Result<()> {
        for team in [&home, &away] {
            team.validate().map_err(|reason| SimError::InvalidRoster {
                team: team.name.clone(),
                reason,
            })?;
        }
        self.home = Some(home);
        self.away = Some(away);
        Ok(())
    }

    /// Clear game state, statistics, play log, and drive tracking, and
    /// re-seed the RNG. Team assignment is kept; call
    /// `initialize_game_modifiers()` again before the next `play()`.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.state = GameState::new(TeamSide::Home);
        self.home_ctx = None;
        self.away_ctx = None;
        self.drive_tracker.reset();
        self.stats = GameStatistics::default();
        self.play_log.clear();
    }

    /// Change the seed for the next `reset()` + game.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build both modifier bundles and personnel snapshots, and perform
    /// the opening coin toss. Must be called after team assignment and
    /// before the first play.
    pub fn initialize_game_modifiers(&mut self) -> Result<()> {
        let (home, away) = match (&self.home, &self.away) {
            (Some(h), Some(a)) => (h, a),
            _ => return Err(SimError::TeamsNotAssigned("initialize_game_modifiers")),
        };

        let home_personnel = Personnel::from_team(home);
        let away_personnel = Personnel::from_team(away);
        let home_mods =
            initialize_team_modifiers(home, &home_personnel, &self.settings, true);
        let away_mods =
            initialize_team_modifiers(away, &away_personnel, &self.settings, false);

        log::debug!(
            "modifiers initialized: {} pass_off={:.1} vs {} pass_def={:.1}",
            home.abbreviation,
            home_mods.pass_offense,
            away.abbreviation,
            away_mods.pass_defense
        );

        self.home_ctx = Some(SideContext {
            modifiers: home_mods,
            personnel: home_personnel,
        });
        self.away_ctx = Some(SideContext {
            modifiers: away_mods,
            personnel: away_personnel,
        });

        // Coin toss: loser of the toss kicks off. Drawn from the game RNG
        // so it is reproducible per seed.
        let kicking_team = if self.rng.gen::<bool>() {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        self.state = GameState::new(kicking_team);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    /// Close, late-game situation (scales clutch badges; exposed for UI).
    pub fn is_clutch(&self) -> bool {
        is_clutch(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn drive_summary(&self) -> &DriveSummary {
        self.drive_tracker.current()
    }

    pub fn play_log(&self) -> &[PlayResult] {
        &self.play_log
    }

    pub fn game_stats(&self) -> &GameStatistics {
        &self.stats
    }

    /// Snapshot of one player's line, if they have registered anything.
    pub fn player_game_stats(&self, player_id: &str) -> Option<&PlayerGameStats> {
        self.stats.players.get(player_id)
    }

    /// Final result; `None` while the game is still live.
    pub fn game_result(&self) -> Option<GameResult> {
        if !self.state.is_over {
            return None;
        }
        let (home, away) = (self.home.as_ref()?, self.away.as_ref()?);
        let winner = match self.state.home_score.cmp(&self.state.away_score) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        };
        Some(GameResult {
            home_team: home.name.clone(),
            away_team: away.name.clone(),
            home_score: self.state.home_score,
            away_score: self.state.away_score,
            winner,
            went_to_overtime: self.state.overtime,
            total_plays: self.play_log.len() as u32,
            statistics: self.stats.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Resolve exactly one play end-to-end. Returns `None` once the game
    /// is over; errors only on setup mistakes (no teams / no modifiers).
    pub fn play(&mut self) -> Result<Option<PlayResult>> {
        if self.home.is_none() || self.away.is_none() {
            return Err(SimError::TeamsNotAssigned("play"));
        }
        let (home_ctx, away_ctx) = match (&self.home_ctx, &self.away_ctx) {
            (Some(h), Some(a)) => (h, a),
            _ => return Err(SimError::ModifiersNotInitialized),
        };
        if self.state.is_over {
            return Ok(None);
        }

        let offense_side = self.state.possession;
        let (offense_ctx, defense_ctx) = match offense_side {
            TeamSide::Home => (home_ctx, away_ctx),
            TeamSide::Away => (away_ctx, home_ctx),
        };

        let situations = active_situations(&self.state, &self.settings);
        let play_type = select_play(&self.state, &offense_ctx.modifiers, &mut self.rng);

        let ctx = ResolutionContext {
            state: &self.state,
            offense_mods: &offense_ctx.modifiers,
            defense_mods: &defense_ctx.modifiers,
            offense: &offense_ctx.personnel,
            defense: &defense_ctx.personnel,
            situations: &situations,
            seed: self.seed,
            play_number: self.play_log.len() as u32,
        };
        let result = resolve_play(play_type, &ctx, &mut self.rng);

        self.clock_manager.apply(&mut self.state, &result);
        self.drive_tracker.observe(&result, &self.state);
        self.accumulator.record(
            &mut self.stats,
            &result,
            &offense_ctx.personnel,
            &defense_ctx.personnel,
        );

        self.play_log.push(result.clone());

        if !self.state.is_over && self.play_log.len() >= MAX_PLAYS {
            log::warn!("play cap reached after {} plays, forcing game end", MAX_PLAYS);
            self.state.is_over = true;
            self.state.flow = GameFlowState::GameOver;
        }

        Ok(Some(result))
    }

    /// Run plays until the current drive ends (score, possession change,
    /// period boundary, or game end). Empty once the game is over.
    pub fn simulate_drive(&mut self) -> Result<Vec<PlayResult>> {
        let mut results = Vec::new();
        while let Some(result) = self.play()? {
            let ended = drive_ended(&result, &self.state);
            results.push(result);
            if ended {
                break;
            }
        }
        Ok(results)
    }

    /// Run plays until the quarter advances or the game ends.
    pub fn simulate_quarter(&mut self) -> Result<Vec<PlayResult>> {
        let start_quarter = self.state.quarter;
        let mut results = Vec::new();
        while !self.state.is_over && self.state.quarter == start_quarter {
            match self.play()? {
                Some(result) => results.push(result),
                None => break,
            }
        }
        Ok(results)
    }

    /// Run the remainder of the game.
    pub fn simulate_game(&mut self) -> Result<Vec<PlayResult>> {
        let mut results = Vec::new();
        while let Some(result) = self.play()? {
            results.push(result);
        }
        Ok(results)
    }
}
