//! Clock & down management.
//!
//! Applies a resolved `PlayResult` to the `GameState`: ball position,
//! down/distance progression, possession changes, clock runoff, quarter
//! and overtime transitions, and game termination. Transitions are
//! deterministic given the result - no randomness at this layer.

use crate::engine::constants::{clock, field};
use crate::engine::game_state::{first_down_distance_at, GameFlowState, GameState};
use crate::models::{OvertimeRule, PlayOutcome, PlayResult, PlayType, TeamSide};

/// Deterministic state-transition controller for one game.
#[derive(Debug, Clone, Copy)]
pub struct ClockDownManager {
    overtime_rule: OvertimeRule,
}

impl ClockDownManager {
    pub fn new(overtime_rule: OvertimeRule) -> Self {
        Self { overtime_rule }
    }

    /// Advance the game state by one resolved play.
    pub fn apply(&self, state: &mut GameState, result: &PlayResult) {
        if state.is_over {
            return;
        }

        // Scoreboard first: end-of-period logic depends on it.
        if result.points > 0 {
            if let Some(side) = result.scoring_side {
                state.add_points(side, result.points as u32);
            }
        }

        self.apply_ball_and_possession(state, result);
        self.apply_clock(state, result);

        // Overtime scores end things before any period bookkeeping.
        if state.overtime && result.points > 0 && self.overtime_score_ends_game(state, result) {
            self.finish(state);
            return;
        }

        if state.clock == 0 {
            self.on_period_end(state);
        }
    }

    // ------------------------------------------------------------------
    // Ball / possession
    // ------------------------------------------------------------------

    fn apply_ball_and_possession(&self, state: &mut GameState, result: &PlayResult) {
        match result.outcome {
            // After any score the possessing team kicks (or free-kicks,
            // after conceding a safety) to its opponent.
            PlayOutcome::Touchdown
            | PlayOutcome::ReturnTouchdown
            | PlayOutcome::FieldGoalGood
            | PlayOutcome::Safety => {
                let kicking_team = state.possession;
                self.setup_kickoff(state, kicking_team);
            }
            PlayOutcome::Interception
            | PlayOutcome::Fumble
            | PlayOutcome::FieldGoalMissed => {
                let spot = result
                    .turnover_spot
                    .unwrap_or(field::OPPONENT_GOAL - state.ball_position.clamp(1, 99));
                state.change_possession(spot);
            }
            PlayOutcome::Touchback if result.play_type == PlayType::Punt => {
                state.change_possession(field::PUNT_TOUCHBACK_SPOT);
            }
            PlayOutcome::Normal if result.play_type == PlayType::Punt => {
                let spot = result.turnover_spot.unwrap_or(field::PUNT_TOUCHBACK_SPOT);
                state.change_possession(spot);
            }
            PlayOutcome::Touchback | PlayOutcome::Normal
                if result.play_type == PlayType::Kickoff =>
            {
                // Receiving team already holds possession; take the spot.
                let spot = result.end_spot.unwrap_or(field::KICKOFF_TOUCHBACK_SPOT);
                state.ball_position = spot;
                state.down = 1;
                state.distance = first_down_distance_at(spot);
                state.flow = GameFlowState::LiveDown;
                if state.overtime {
                    state.overtime_ledger.mark(state.possession);
                }
            }
            PlayOutcome::Penalty => {
                self.apply_penalty_yards(state, result.yards);
            }
            _ => {
                // Run / pass / sack / incompletion / kneel.
                self.apply_scrimmage_yards(state, result.yards);
            }
        }
    }

    /// Down/distance progression for an ordinary scrimmage result.
    fn apply_scrimmage_yards(&self, state: &mut GameState, yards: i16) {
        let new_pos = (state.ball_position as i16 + yards).clamp(0, 100) as u8;
        state.ball_position = new_pos;

        if yards >= state.distance as i16 {
            // Moved the chains.
            state.down = 1;
            state.distance = first_down_distance_at(new_pos);
            return;
        }

        // Penalties keep the down; everything else burns one.
        state.distance = ((state.distance as i16 - yards).max(1) as u8)
            .min(state.yards_to_goal().max(1));

        if state.down >= 4 {
            // Turnover on downs at the dead-ball spot.
            state.change_possession(field::OPPONENT_GOAL - new_pos.clamp(1, 99));
        } else {
            state.down += 1;
        }
    }

    /// Penalty yardage: the down is replayed, but a defensive flag that
    /// moves the ball past the sticks still awards a first down.
    fn apply_penalty_yards(&self, state: &mut GameState, yards: i16) {
        let new_pos = (state.ball_position as i16 + yards).clamp(0, 100) as u8;
        state.ball_position = new_pos;

        if yards >= state.distance as i16 {
            state.down = 1;
            state.distance = first_down_distance_at(new_pos);
        } else {
            state.distance = ((state.distance as i16 - yards).max(1) as u8)
                .min(state.yards_to_goal().max(1));
        }
    }

    /// Queue a kickoff: `kicking_team` kicks, opponent receives.
    fn setup_kickoff(&self, state: &mut GameState, kicking_team: TeamSide) {
        state.possession = kicking_team.opponent();
        state.ball_position = field::KICKOFF_TOUCHBACK_SPOT;
        state.down = 1;
        state.distance = field::FIRST_DOWN_DISTANCE;
        state.flow = GameFlowState::PreKickoff { kicking_team };
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    fn apply_clock(&self, state: &mut GameState, result: &PlayResult) {
        let mut remaining = state.clock.saturating_sub(result.elapsed);

        // Two-minute warning: the runoff cannot carry play through the
        // 2:00 mark of the 2nd or 4th quarter.
        if (state.quarter == 2 || state.quarter == 4)
            && state.clock > clock::TWO_MINUTE_SECS
            && remaining < clock::TWO_MINUTE_SECS
        {
            remaining = clock::TWO_MINUTE_SECS;
        }

        state.clock = remaining;
    }

    // ------------------------------------------------------------------
    // Period / game end
    // ------------------------------------------------------------------

    fn on_period_end(&self, state: &mut GameState) {
        if state.quarter < clock::REGULATION_QUARTERS {
            state.quarter += 1;
            state.clock = clock::QUARTER_SECS;
            if state.quarter == 3 {
                // The opening kicking team receives the second half.
                let second_half_kicker = state.opening_kickoff_team.opponent();
                self.setup_kickoff(state, second_half_kicker);
            }
            return;
        }

        if !state.overtime {
            // End of regulation.
            if state.is_tied() {
                self.start_overtime(state);
            } else {
                self.finish(state);
            }
            return;
        }

        // End of an overtime period.
        match self.overtime_rule {
            OvertimeRule::SuddenDeath => {
                // One period; a tie stands in the regular season.
                self.finish(state);
            }
            OvertimeRule::GuaranteedPossession => {
                if state.is_tied() {
                    // Play on: fresh period, state carries over.
                    state.quarter += 1;
                    state.clock = clock::OVERTIME_SECS;
                } else {
                    self.finish(state);
                }
            }
        }
    }

    fn start_overtime(&self, state: &mut GameState) {
        state.overtime = true;
        state.quarter += 1;
        state.clock = clock::OVERTIME_SECS;
        // Deterministic in place of a coin toss: the team that kicked off
        // to open the game receives in overtime.
        let receiving = state.opening_kickoff_team;
        self.setup_kickoff(state, receiving.opponent());
    }

    /// Does this overtime score end the game under the configured rule?
    fn overtime_score_ends_game(&self, state: &GameState, result: &PlayResult) -> bool {
        match self.overtime_rule {
            OvertimeRule::SuddenDeath => true,
            OvertimeRule::GuaranteedPossession => {
                let scoring_side = match result.scoring_side {
                    Some(side) => side,
                    None => return false,
                };
                // A defensive score (safety) always ends it.
                if scoring_side != result.offense {
                    return true;
                }
                // Otherwise both teams must have possessed the ball and the
                // score must actually break the tie.
                state.overtime_ledger.both_possessed() && !state.is_tied()
            }
        }
    }

    fn finish(&self, state: &mut GameState) {
        state.is_over = true;
        state.flow = GameFlowState::GameOver;
    }
}
