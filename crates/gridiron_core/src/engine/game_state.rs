//! Canonical game state.
//!
//! Exactly one `GameState` exists per game, exclusively owned and mutated
//! by the `GameSimulator` and its sub-components. It is never shared across
//! concurrent games; Monte Carlo callers instantiate independent
//! simulators.

use crate::engine::constants::{clock, field};
use crate::models::TeamSide;
use serde::{Deserialize, Serialize};

/// Explicit game-flow state. The clock & down manager owns all
/// transitions; they are deterministic given a `PlayResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameFlowState {
    /// A kickoff is pending (game start, after a score, half/overtime
    /// start, free kick after a safety).
    PreKickoff { kicking_team: TeamSide },
    /// Normal scrimmage down.
    LiveDown,
    /// Terminal; no further plays resolve.
    GameOver,
}

/// Guaranteed-possession overtime bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLedger {
    pub home_possessed: bool,
    pub away_possessed: bool,
}

impl OvertimeLedger {
    pub fn mark(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home_possessed = true,
            TeamSide::Away => self.away_possessed = true,
        }
    }

    pub fn both_possessed(&self) -> bool {
        self.home_possessed && self.away_possessed
    }
}

/// The canonical mutable entity advanced one play at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// 1-4 in regulation; 5+ are overtime periods.
    pub quarter: u8,
    pub overtime: bool,
    /// Seconds remaining in the current quarter; monotonically
    /// non-increasing between quarter boundaries.
    pub clock: u16,
    pub possession: TeamSide,
    /// Offense-relative ball position: 0 = own goal line, 100 = opponent's.
    pub ball_position: u8,
    /// 1-4.
    pub down: u8,
    /// Yards to gain for a first down.
    pub distance: u8,
    pub home_score: u32,
    pub away_score: u32,
    pub is_over: bool,
    pub flow: GameFlowState,
    /// Team that kicked off to open the game; it receives after halftime.
    pub opening_kickoff_team: TeamSide,
    pub overtime_ledger: OvertimeLedger,
}

impl GameState {
    /// Fresh pre-kickoff state. `kicking_team` opens the game.
    pub fn new(kicking_team: TeamSide) -> Self {
        Self {
            quarter: 1,
            overtime: false,
            clock: clock::QUARTER_SECS,
            possession: kicking_team.opponent(),
            ball_position: field::KICKOFF_TOUCHBACK_SPOT,
            down: 1,
            distance: field::FIRST_DOWN_DISTANCE,
            home_score: 0,
            away_score: 0,
            is_over: false,
            flow: GameFlowState::PreKickoff { kicking_team },
            opening_kickoff_team: kicking_team,
            overtime_ledger: OvertimeLedger::default(),
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn add_points(&mut self, side: TeamSide, points: u32) {
        match side {
            TeamSide::Home => self.home_score += points,
            TeamSide::Away => self.away_score += points,
        }
    }

    /// Margin from `side`'s perspective (positive = leading).
    pub fn margin_for(&self, side: TeamSide) -> i32 {
        self.score(side) as i32 - self.score(side.opponent()) as i32
    }

    pub fn is_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Final regulation quarter or later.
    pub fn is_final_period(&self) -> bool {
        self.quarter >= clock::REGULATION_QUARTERS
    }

    /// Offense inside the opponent 20.
    pub fn in_red_zone(&self) -> bool {
        self.ball_position >= field::RED_ZONE
    }

    /// Yards between the ball and the opponent goal line.
    pub fn yards_to_goal(&self) -> u8 {
        field::OPPONENT_GOAL.saturating_sub(self.ball_position)
    }

    /// Distance of a field goal attempted from the current spot.
    pub fn field_goal_distance(&self) -> u8 {
        self.yards_to_goal() + field::FIELD_GOAL_PAD_YARDS
    }

    /// Inside the two-minute mark of the 2nd or 4th quarter.
    pub fn in_two_minute_drill(&self) -> bool {
        (self.quarter == 2 || self.quarter == 4) && self.clock <= clock::TWO_MINUTE_SECS
    }

    /// Flip possession to the other team at the given offense-relative spot
    /// for the new offense, with a fresh set of downs.
    pub fn change_possession(&mut self, new_offense_spot: u8) {
        self.possession = self.possession.opponent();
        self.ball_position = new_offense_spot.min(99);
        self.down = 1;
        self.distance = first_down_distance_at(self.ball_position);
        if self.overtime {
            self.overtime_ledger.mark(self.possession);
        }
    }

    /// Defensive invariant check used by tests: every documented bound in
    /// one place.
    pub fn invariants_hold(&self) -> bool {
        self.ball_position <= 100
            && (1..=4).contains(&self.down)
            && self.distance >= 1
            && self.clock <= clock::QUARTER_SECS.max(clock::OVERTIME_SECS)
            && self.quarter >= 1
    }
}

/// First-down distance from a spot, shortened by goal-to-go situations.
#[inline]
pub fn first_down_distance_at(ball_position: u8) -> u8 {
    let to_goal = field::OPPONENT_GOAL.saturating_sub(ball_position);
    field::FIRST_DOWN_DISTANCE.min(to_goal.max(1))
}
