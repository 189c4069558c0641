//! Drive & possession tracking.
//!
//! A presentation/analytics aid: detects possession changes, resets the
//! running `DriveSummary`, and accumulates plays/yards/time otherwise. Not
//! part of game-result correctness; the summary for a finished drive is
//! discarded when the next one starts.

use crate::engine::game_state::{GameFlowState, GameState};
use crate::models::{PlayResult, PlayType, TeamSide};
use serde::{Deserialize, Serialize};

/// Running summary of the drive in progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct DriveSummary {
    pub side: TeamSide,
    /// Scrimmage snaps this drive (kickoffs excluded).
    pub plays: u32,
    pub net_yards: i32,
    pub elapsed_secs: u32,
    /// Offense-relative spot the drive started from.
    pub start_position: u8,
}

/// True when `result` ended the drive it belonged to.
///
/// `state` is the game state after the result was applied. A drive ends on
/// a score, any possession change, or the end of the game; a queued kickoff
/// (score or period boundary) also closes it.
pub fn drive_ended(result: &PlayResult, state: &GameState) -> bool {
    state.is_over
        || result.outcome.is_score()
        || matches!(state.flow, GameFlowState::PreKickoff { .. })
        || result.offense != state.possession
}

/// Tracks the drive in progress for the whole game.
#[derive(Debug, Clone, Default)]
pub struct DriveTracker {
    current: DriveSummary,
}

impl DriveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.current = DriveSummary::default();
    }

    pub fn current(&self) -> &DriveSummary {
        &self.current
    }

    /// Fold one applied play into the tracker.
    pub fn observe(&mut self, result: &PlayResult, state_after: &GameState) {
        if result.play_type == PlayType::Kickoff {
            // The return starts the receiving team's drive.
            self.current = DriveSummary {
                side: result.offense,
                plays: 0,
                net_yards: 0,
                elapsed_secs: 0,
                start_position: state_after.ball_position,
            };
            return;
        }

        self.current.plays += 1;
        self.current.elapsed_secs += result.elapsed as u32;
        if result.is_scrimmage_play() {
            self.current.net_yards += result.yards as i32;
        }

        // Possession flipped in the field of play: the new offense starts a
        // fresh drive from wherever it took over.
        if !state_after.is_over
            && state_after.flow == GameFlowState::LiveDown
            && state_after.possession != result.offense
        {
            self.current = DriveSummary {
                side: state_after.possession,
                plays: 0,
                net_yards: 0,
                elapsed_secs: 0,
                start_position: state_after.ball_position,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeyPlayers, PlayOutcome, SnapContext};

    fn state_with(possession: TeamSide, ball: u8) -> GameState {
        let mut state = GameState::new(TeamSide::Home);
        state.flow = GameFlowState::LiveDown;
        state.possession = possession;
        state.ball_position = ball;
        state
    }

    fn play(offense: TeamSide, play_type: PlayType, outcome: PlayOutcome, yards: i16) -> PlayResult {
        PlayResult {
            play_number: 0,
            offense,
            play_type,
            outcome,
            yards,
            points: 0,
            scoring_side: None,
            elapsed: 30,
            snap: SnapContext {
                quarter: 1,
                overtime: false,
                clock: 900,
                down: 1,
                distance: 10,
                ball_position: 30,
            },
            players: KeyPlayers::default(),
            try_result: None,
            end_spot: None,
            turnover_spot: None,
            description: String::new(),
            triggered_effects: Vec::new(),
        }
    }

    #[test]
    fn test_accumulates_scrimmage_plays() {
        let mut tracker = DriveTracker::new();
        let state = state_with(TeamSide::Home, 38);
        tracker.observe(&play(TeamSide::Home, PlayType::Run, PlayOutcome::Normal, 8), &state);
        tracker.observe(&play(TeamSide::Home, PlayType::Pass, PlayOutcome::Normal, 12), &state);
        assert_eq!(tracker.current().plays, 2);
        assert_eq!(tracker.current().net_yards, 20);
        assert_eq!(tracker.current().elapsed_secs, 60);
    }

    #[test]
    fn test_kickoff_starts_new_drive() {
        let mut tracker = DriveTracker::new();
        let state = state_with(TeamSide::Away, 27);
        tracker.observe(
            &play(TeamSide::Away, PlayType::Kickoff, PlayOutcome::Normal, 22),
            &state,
        );
        assert_eq!(tracker.current().side, TeamSide::Away);
        assert_eq!(tracker.current().plays, 0);
        assert_eq!(tracker.current().start_position, 27);
    }

    #[test]
    fn test_turnover_resets_for_new_offense() {
        let mut tracker = DriveTracker::new();
        // Home threw a pick; Away now has it at its own 45.
        let state = state_with(TeamSide::Away, 45);
        tracker.observe(
            &play(TeamSide::Home, PlayType::Pass, PlayOutcome::Interception, 0),
            &state,
        );
        assert_eq!(tracker.current().side, TeamSide::Away);
        assert_eq!(tracker.current().plays, 0);
        assert_eq!(tracker.current().start_position, 45);
    }

    #[test]
    fn test_drive_ended_detection() {
        let mut state = state_with(TeamSide::Home, 30);
        let run = play(TeamSide::Home, PlayType::Run, PlayOutcome::Normal, 5);
        assert!(!drive_ended(&run, &state));

        let punt = play(TeamSide::Home, PlayType::Punt, PlayOutcome::Normal, 44);
        state.possession = TeamSide::Away;
        assert!(drive_ended(&punt, &state));

        let mut td = play(TeamSide::Home, PlayType::Pass, PlayOutcome::Touchdown, 25);
        td.points = 7;
        assert!(drive_ended(&td, &state));
    }
}
