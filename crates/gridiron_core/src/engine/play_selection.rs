//! Play-call policy.
//!
//! Run/pass mix is weighted-random; coaching edge cases (4th down,
//! victory formation, desperation) use explicit threshold rules so the
//! simulated coach never makes a statistically absurd call.

use crate::engine::constants::situations;
use crate::engine::game_state::{GameFlowState, GameState};
use crate::engine::modifiers::TeamGameModifiers;
use crate::models::PlayType;
use rand::Rng;

/// Choose the next play for the current offense.
pub fn select_play<R: Rng>(
    state: &GameState,
    offense: &TeamGameModifiers,
    rng: &mut R,
) -> PlayType {
    if let GameFlowState::PreKickoff { .. } = state.flow {
        return PlayType::Kickoff;
    }

    if should_kneel(state) {
        return PlayType::Kneel;
    }

    if state.down == 4 {
        return fourth_down_call(state, offense);
    }

    let pass_prob = pass_probability(state);
    if rng.gen::<f32>() < pass_prob {
        PlayType::Pass
    } else {
        PlayType::Run
    }
}

/// Victory formation: leading in the 4th quarter with few enough seconds
/// that kneeling out the remaining downs ends the game.
fn should_kneel(state: &GameState) -> bool {
    if state.quarter != 4 || state.margin_for(state.possession) <= 0 {
        return false;
    }
    let kneels_left = (4 - state.down) as u16;
    kneels_left > 0 && state.clock <= kneels_left * situations::KNEEL_SECS_PER_DOWN
}

/// Explicit 4th-down decision chart.
///
/// Thresholds rather than probabilities: 4th-and-inches at midfield is a
/// judgment call, not a coin flip. Coach aggressiveness widens or narrows
/// the go-for-it window.
fn fourth_down_call(state: &GameState, offense: &TeamGameModifiers) -> PlayType {
    let margin = state.margin_for(state.possession);
    let fg_distance = state.field_goal_distance();
    let in_fg_range = fg_distance <= situations::MAX_FIELD_GOAL_ATTEMPT;

    // Desperation: trailing late, a punt is a concession.
    let desperate = state.quarter >= 4
        && state.clock <= situations::CLUTCH_CLOCK_SECS
        && margin < 0;
    if desperate {
        // A makeable field goal that ties or takes the lead is still the
        // percentage play.
        if in_fg_range && margin >= -situations::DESPERATION_MARGIN {
            return PlayType::FieldGoal;
        }
        return if in_fg_range && state.distance > 10 {
            PlayType::FieldGoal
        } else {
            PlayType::Pass
        };
    }

    // Go-for-it window: short distance in opponent territory, widened by
    // an aggressive head coach.
    let go_distance =
        situations::FOURTH_DOWN_GO_DISTANCE as f32 + (offense.aggressiveness - 0.5) * 4.0;
    let in_go_territory = state.ball_position >= 50;
    if in_go_territory && (state.distance as f32) <= go_distance {
        return if state.distance <= 1 {
            PlayType::Run
        } else {
            PlayType::Pass
        };
    }

    if in_fg_range {
        return PlayType::FieldGoal;
    }

    PlayType::Punt
}

/// Pass probability for downs 1-3.
fn pass_probability(state: &GameState) -> f32 {
    let mut prob: f32 = match state.distance {
        0..=2 => 0.35,
        3..=7 => 0.55,
        _ => 0.70,
    };

    // 3rd-and-long is an obvious passing down.
    if state.down == 3 && state.distance >= 5 {
        prob = 0.85;
    }

    let margin = state.margin_for(state.possession);

    // Two-minute drill while trailing: throw.
    if state.in_two_minute_drill() && margin < 0 {
        prob = prob.max(0.85);
    }

    // Leading late: kill clock on the ground.
    if state.quarter >= 4 && state.clock <= situations::CLOCK_KILL_SECS && margin > 0 {
        prob = prob.min(0.25);
    }

    // Big leads and deficits skew the mix even outside the endgame.
    if margin <= -14 {
        prob += 0.15;
    } else if margin >= 14 {
        prob -= 0.15;
    }

    prob.clamp(0.10, 0.90)
}
