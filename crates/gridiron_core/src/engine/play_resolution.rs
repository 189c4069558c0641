//! Play outcome resolution.
//!
//! Given the chosen play type, the current state, and both teams' modifier
//! bundles, draws one statistical outcome: yardage, turnovers, penalties,
//! scoring. All randomness comes from the simulator's injected RNG;
//! commentary phrasing uses the hash-based deterministic pick so it never
//! perturbs the outcome stream.
//!
//! Every resolver returns exactly one `PlayResult`. Ball-position updates
//! are described by the result (`yards`, `end_spot`, `turnover_spot`) and
//! applied by the clock & down manager, never here.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::engine::constants::{clock, field, outcomes, scoring, situations};
use crate::engine::deterministic::{pick_phrase, subcase};
use crate::engine::game_state::GameState;
use crate::engine::modifiers::{
    effective_attr, situational_effects_for, Personnel, TeamGameModifiers,
};
use crate::engine::probability;
use crate::models::{
    ActionType, BonusStat, KeyPlayers, PlayOutcome, PlayResult, PlayType, Player, SituationTag,
    SnapContext, TeamSide, TryResult,
};

/// Everything a single resolution needs, borrowed from the orchestrator.
pub struct ResolutionContext<'a> {
    pub state: &'a GameState,
    pub offense_mods: &'a TeamGameModifiers,
    pub defense_mods: &'a TeamGameModifiers,
    pub offense: &'a Personnel,
    pub defense: &'a Personnel,
    pub situations: &'a [SituationTag],
    pub seed: u64,
    pub play_number: u32,
}

impl<'a> ResolutionContext<'a> {
    fn offense_side(&self) -> TeamSide {
        self.state.possession
    }

    /// Trailing late enough that the offense is forcing deep balls.
    fn desperation(&self) -> bool {
        self.state.quarter >= 4
            && self.state.clock <= situations::CLUTCH_CLOCK_SECS
            && self.state.margin_for(self.state.possession) < 0
    }

    fn snap(&self) -> SnapContext {
        SnapContext {
            quarter: self.state.quarter,
            overtime: self.state.overtime,
            clock: self.state.clock,
            down: self.state.down,
            distance: self.state.distance,
            ball_position: self.state.ball_position,
        }
    }

    fn blank_result(&self, play_type: PlayType) -> PlayResult {
        PlayResult {
            play_number: self.play_number,
            offense: self.offense_side(),
            play_type,
            outcome: PlayOutcome::Normal,
            yards: 0,
            points: 0,
            scoring_side: None,
            elapsed: 0,
            snap: self.snap(),
            players: KeyPlayers::default(),
            try_result: None,
            end_spot: None,
            turnover_spot: None,
            description: String::new(),
            triggered_effects: Vec::new(),
        }
    }

    /// Record badge activations for a player participating in this play.
    fn push_effects(&self, result: &mut PlayResult, player: &Player, side: TeamSide) {
        result
            .triggered_effects
            .extend(situational_effects_for(player, side, self.situations));
    }
}

/// Resolve one play. The only entry point of this module.
pub fn resolve_play<R: Rng>(
    play_type: PlayType,
    ctx: &ResolutionContext<'_>,
    rng: &mut R,
) -> PlayResult {
    match play_type {
        PlayType::Kickoff => resolve_kickoff(ctx, rng),
        PlayType::Run => resolve_run(ctx, rng),
        PlayType::Pass => resolve_pass(ctx, rng),
        PlayType::Punt => resolve_punt(ctx, rng),
        PlayType::FieldGoal => resolve_field_goal(ctx, rng),
        PlayType::Kneel => resolve_kneel(ctx),
    }
}

// ============================================================================
// Sampling helpers
// ============================================================================

fn sample_normal<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

fn elapsed_between<R: Rng>(rng: &mut R, min: u16, max: u16) -> u16 {
    rng.gen_range(min..=max)
}

/// Pre-snap penalty roll shared by scrimmage plays. Returns a complete
/// penalty result when a flag wipes the play out.
fn check_penalty<R: Rng>(
    ctx: &ResolutionContext<'_>,
    play_type: PlayType,
    rng: &mut R,
) -> Option<PlayResult> {
    let rate = outcomes::BASE_PENALTY_RATE
        * (ctx.offense_mods.penalty_mult + ctx.defense_mods.penalty_mult)
        / 2.0;
    if rng.gen::<f32>() >= rate {
        return None;
    }

    let mut result = ctx.blank_result(play_type);
    result.outcome = PlayOutcome::Penalty;
    result.elapsed = elapsed_between(rng, 5, 10);

    // Offensive holding or defensive offside, weighted by discipline.
    let offense_share = ctx.offense_mods.penalty_mult
        / (ctx.offense_mods.penalty_mult + ctx.defense_mods.penalty_mult);
    if rng.gen::<f32>() < offense_share {
        let yards = -(10_i16.min(ctx.state.ball_position as i16 / 2).max(1));
        result.yards = yards;
        result.description = format!(
            "Holding on the offense, {} yard penalty",
            -yards
        );
    } else {
        result.yards = 5_i16.min(ctx.state.yards_to_goal().saturating_sub(1).max(1) as i16);
        result.description = "Offside on the defense, 5 yard penalty".to_string();
    }
    Some(result)
}

/// Clip a raw scrimmage gain to the field and classify touchdown/safety.
///
/// Returns (yards, outcome override). Yardage is always consistent with the
/// ball-position update the clock manager will perform.
fn clip_gain(state: &GameState, raw_gain: f32) -> (i16, Option<PlayOutcome>) {
    let gain = raw_gain.round() as i32;
    let ball = state.ball_position as i32;

    if ball + gain >= field::OPPONENT_GOAL as i32 {
        return (state.yards_to_goal() as i16, Some(PlayOutcome::Touchdown));
    }
    if ball + gain <= field::OWN_GOAL as i32 {
        return (-(ball as i16), Some(PlayOutcome::Safety));
    }
    (gain as i16, None)
}

// ============================================================================
// Touchdown try (extra point / two-point chart)
// ============================================================================

/// Go for two only when the chart says so: the deficit after six makes two
/// points structurally better (down 2 -> tie; late: down 5 -> field goal
/// game, down 10 -> one-possession game).
fn should_go_for_two(state: &GameState, offense: TeamSide) -> bool {
    let deficit_after_td = -(state.margin_for(offense) + scoring::TOUCHDOWN as i32);
    if deficit_after_td == 2 {
        return true;
    }
    let late = state.quarter >= 4 && state.clock <= situations::CLUTCH_CLOCK_SECS;
    late && matches!(deficit_after_td, 5 | 10)
}

fn resolve_try<R: Rng>(
    ctx: &ResolutionContext<'_>,
    result: &mut PlayResult,
    rng: &mut R,
) {
    let offense_side = ctx.offense_side();

    if should_go_for_two(ctx.state, offense_side) {
        let prob = probability::two_point_probability(
            (ctx.offense_mods.pass_offense + ctx.offense_mods.rush_offense) / 2.0,
            (ctx.defense_mods.pass_defense + ctx.defense_mods.rush_defense) / 2.0,
        );
        result.try_result = Some(if rng.gen::<f32>() < prob {
            TryResult::TwoPointGood
        } else {
            TryResult::TwoPointFailed
        });
    } else {
        let kicker = &ctx.offense.kicker;
        let accuracy = effective_attr(kicker, BonusStat::KickAccuracy, ctx.situations);
        let prob = probability::extra_point_probability(accuracy, ctx.offense_mods.kicking_mult);
        result.players.kicker = Some(kicker.id.clone());
        result.try_result = Some(if rng.gen::<f32>() < prob {
            TryResult::ExtraPointGood
        } else {
            TryResult::ExtraPointMissed
        });
    }

    let try_points = result.try_result.map(|t| t.points()).unwrap_or(0);
    result.points = scoring::TOUCHDOWN + try_points;
    result.scoring_side = Some(offense_side);

    let suffix = match result.try_result {
        Some(TryResult::ExtraPointGood) => " (kick good)",
        Some(TryResult::ExtraPointMissed) => " (kick no good)",
        Some(TryResult::TwoPointGood) => " (two-point conversion good)",
        Some(TryResult::TwoPointFailed) => " (two-point conversion failed)",
        None => "",
    };
    result.description.push_str(suffix);
}

// ============================================================================
// Kickoff
// ============================================================================

fn resolve_kickoff<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> PlayResult {
    let mut result = ctx.blank_result(PlayType::Kickoff);
    // The receiving team already holds `possession` in the pre-kickoff
    // state, so `offense` is the returning side.
    let receiving = ctx.offense_side();
    let returner = &ctx.offense.returner;

    let kicker_power = ctx.defense_mods.kicking;
    let touchback_prob = (outcomes::KICKOFF_TOUCHBACK
        + (kicker_power - 60.0) / 200.0)
        * ctx.defense_mods.kicking_mult;

    if rng.gen::<f32>() < touchback_prob.clamp(0.2, 0.85) {
        result.outcome = PlayOutcome::Touchback;
        result.end_spot = Some(field::KICKOFF_TOUCHBACK_SPOT);
        result.elapsed = clock::KICK_PLAY_SECS;
        result.description = "Kickoff sails through the end zone, touchback".to_string();
        return result;
    }

    // Return from inside the 5.
    let catch_spot = rng.gen_range(0..=5u8);
    let return_mult = returner
        .traits
        .action_multiplier_in(ActionType::Return, ctx.situations);
    let return_yards = (sample_normal(
        rng,
        outcomes::KICK_RETURN_MEAN,
        outcomes::KICK_RETURN_STDDEV,
    ) * return_mult)
        .max(0.0);

    let td_chance = outcomes::RETURN_TD_CHANCE * return_mult;
    if rng.gen::<f32>() < td_chance {
        result.outcome = PlayOutcome::ReturnTouchdown;
        result.yards = (field::OPPONENT_GOAL - catch_spot) as i16;
        result.players.returner = Some(returner.id.clone());
        ctx.push_effects(&mut result, returner, receiving);
        result.elapsed = clock::KICK_PLAY_SECS + 13;
        result.description = format!(
            "{} takes the kickoff back {} yards for a touchdown!",
            returner.name, result.yards
        );
        resolve_try(ctx, &mut result, rng);
        // resolve_try stamps TOUCHDOWN points; outcome stays ReturnTouchdown.
        return result;
    }

    let end = (catch_spot as f32 + return_yards).clamp(1.0, 49.0) as u8;
    result.yards = end.saturating_sub(catch_spot) as i16;
    result.end_spot = Some(end);
    result.players.returner = Some(returner.id.clone());
    result.elapsed = clock::KICK_PLAY_SECS + elapsed_between(rng, 4, 8);
    let phrase = pick_phrase(
        ctx.seed,
        ctx.play_number,
        subcase::KICK_PHRASE,
        &["returns the kickoff", "brings the kick out", "fields the kick and returns it"],
    );
    result.description = format!(
        "{} {} {} yards to the {}",
        returner.name, phrase, result.yards, end
    );
    result
}

// ============================================================================
// Run
// ============================================================================

fn resolve_run<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> PlayResult {
    if let Some(penalty) = check_penalty(ctx, PlayType::Run, rng) {
        return penalty;
    }

    let mut result = ctx.blank_result(PlayType::Run);
    let offense_side = ctx.offense_side();

    // Lead back takes ~70% of carries.
    let rusher = if ctx.offense.rushers.len() > 1 && rng.gen::<f32>() < 0.3 {
        &ctx.offense.rushers[1]
    } else {
        &ctx.offense.rushers[0]
    };
    result.players.rusher = Some(rusher.id.clone());
    ctx.push_effects(&mut result, rusher, offense_side);

    let run_mult = rusher
        .traits
        .action_multiplier_in(ActionType::Run, ctx.situations);
    let mean = probability::expected_rush_gain(
        ctx.offense_mods.rush_offense,
        ctx.defense_mods.rush_defense,
    );
    let mut gain = sample_normal(rng, mean, outcomes::RUSH_STDDEV);
    if gain > 0.0 {
        gain *= run_mult;
    }
    if rng.gen::<f32>() < outcomes::BREAKAWAY_CHANCE {
        gain += rng.gen_range(15.0..50.0);
    }

    // Ball security check before the gain is banked.
    let carrying = effective_attr(rusher, BonusStat::Carrying, ctx.situations);
    let tackler_idx = rng.gen_range(0..ctx.defense.defenders.len());
    let tackler = &ctx.defense.defenders[tackler_idx];
    let tackling = effective_attr(tackler, BonusStat::Tackling, ctx.situations);
    let fumble_prob = probability::fumble_probability(
        carrying,
        tackling,
        ctx.offense_mods.fumble_chance_add,
    );

    if rng.gen::<f32>() < fumble_prob && rng.gen::<f32>() < outcomes::FUMBLE_LOST_SHARE {
        // Ball comes out near the line; recovery spot stays in the field of
        // play and the yardage always matches it.
        let advance = gain.min(3.0).round() as i32;
        let spot = (ctx.state.ball_position as i32 + advance).clamp(1, 99) as u8;
        result.outcome = PlayOutcome::Fumble;
        result.yards = spot as i16 - ctx.state.ball_position as i16;
        result.players.defender = Some(tackler.id.clone());
        result.turnover_spot = Some(field::OPPONENT_GOAL - spot);
        result.elapsed = elapsed_between(rng, clock::RUN_PLAY_MIN, clock::RUN_PLAY_MAX);
        result.description = format!(
            "{} fumbles, recovered by {} at the {}",
            rusher.name, tackler.name, spot
        );
        return result;
    }

    let (yards, outcome_override) = clip_gain(ctx.state, gain);
    result.yards = yards;
    result.elapsed = run_elapsed(ctx, rng);

    match outcome_override {
        Some(PlayOutcome::Touchdown) => {
            result.outcome = PlayOutcome::Touchdown;
            result.description = format!("{} rushes {} yards for a touchdown", rusher.name, yards);
            resolve_try(ctx, &mut result, rng);
        }
        Some(PlayOutcome::Safety) => {
            result.outcome = PlayOutcome::Safety;
            result.points = scoring::SAFETY;
            result.scoring_side = Some(offense_side.opponent());
            result.players.defender = Some(tackler.id.clone());
            result.description = format!("{} tackled in the end zone, safety", rusher.name);
        }
        _ => {
            result.players.defender = Some(tackler.id.clone());
            let phrase = pick_phrase(
                ctx.seed,
                ctx.play_number,
                subcase::RUN_PHRASE,
                &["up the middle", "off tackle", "around the end", "on a draw"],
            );
            result.description = if yards >= 0 {
                format!("{} runs {} for {} yards", rusher.name, phrase, yards)
            } else {
                format!("{} stuffed {} for a loss of {}", rusher.name, phrase, -yards)
            };
        }
    }
    result
}

fn run_elapsed<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> u16 {
    if ctx.state.in_two_minute_drill() && ctx.state.margin_for(ctx.state.possession) < 0 {
        elapsed_between(rng, clock::HURRY_UP_MIN, clock::HURRY_UP_MAX)
    } else {
        elapsed_between(rng, clock::RUN_PLAY_MIN, clock::RUN_PLAY_MAX)
    }
}

// ============================================================================
// Pass
// ============================================================================

fn resolve_pass<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> PlayResult {
    if let Some(penalty) = check_penalty(ctx, PlayType::Pass, rng) {
        return penalty;
    }

    let mut result = ctx.blank_result(PlayType::Pass);
    let offense_side = ctx.offense_side();
    let passer = &ctx.offense.quarterback;
    result.players.passer = Some(passer.id.clone());
    ctx.push_effects(&mut result, passer, offense_side);

    // Protection first: a sack ends the dropback.
    let sack_prob =
        probability::sack_probability(ctx.defense_mods.pass_rush, ctx.offense_mods.pass_block);
    if rng.gen::<f32>() < sack_prob {
        let loss = rng.gen_range(outcomes::SACK_LOSS_MIN..=outcomes::SACK_LOSS_MAX);
        let (yards, outcome_override) = clip_gain(ctx.state, -loss);
        let sacker_idx = rng.gen_range(0..ctx.defense.defenders.len());
        let sacker = &ctx.defense.defenders[sacker_idx];
        result.players.defender = Some(sacker.id.clone());
        result.yards = yards;
        result.elapsed = elapsed_between(rng, clock::COMPLETE_PASS_MIN, clock::COMPLETE_PASS_MAX);

        if outcome_override == Some(PlayOutcome::Safety) {
            result.outcome = PlayOutcome::Safety;
            result.points = scoring::SAFETY;
            result.scoring_side = Some(offense_side.opponent());
            result.description =
                format!("{} sacked in the end zone by {}, safety", passer.name, sacker.name);
        } else {
            result.outcome = PlayOutcome::Sack;
            let phrase = pick_phrase(
                ctx.seed,
                ctx.play_number,
                subcase::SACK_PHRASE,
                &["brought down", "dropped", "buried"],
            );
            result.description = format!(
                "{} {} by {} for a loss of {}",
                passer.name, phrase, sacker.name, -yards
            );
        }
        return result;
    }

    let desperation = ctx.desperation();
    let throw_accuracy = effective_attr(passer, BonusStat::ThrowAccuracy, ctx.situations);

    // Air yards for this attempt; desperation mode airs it out.
    let air_mean = if desperation {
        outcomes::PASS_AIR_MEAN + outcomes::DEEP_SHOT_BONUS
    } else {
        outcomes::PASS_AIR_MEAN
    };
    let air = sample_normal(rng, air_mean, outcomes::PASS_AIR_STDDEV).max(-3.0);

    // Interception roll is independent of the completion roll.
    let defender_idx = rng.gen_range(0..ctx.defense.defenders.len());
    let defender = &ctx.defense.defenders[defender_idx];
    let int_prob = probability::interception_probability(
        throw_accuracy,
        effective_attr(defender, BonusStat::Awareness, ctx.situations),
        desperation,
    );
    if rng.gen::<f32>() < int_prob {
        result.outcome = PlayOutcome::Interception;
        result.players.defender = Some(defender.id.clone());
        result.elapsed = elapsed_between(rng, clock::INCOMPLETE_PASS_MIN, clock::COMPLETE_PASS_MIN);

        let catch_spot = (ctx.state.ball_position as i32 + air.round() as i32).clamp(0, 100);
        // Picked off in the end zone: touchback for the new offense.
        let new_offense_spot = if catch_spot >= 100 {
            field::PUNT_TOUCHBACK_SPOT
        } else {
            (field::OPPONENT_GOAL as i32 - catch_spot).clamp(1, 99) as u8
        };
        result.turnover_spot = Some(new_offense_spot);
        let phrase = pick_phrase(
            ctx.seed,
            ctx.play_number,
            subcase::TURNOVER_PHRASE,
            &["picked off", "intercepted", "jumped"],
        );
        result.description = format!("{}'s pass {} by {}", passer.name, phrase, defender.name);
        return result;
    }

    // Target selection: depth-weighted among the receiving corps.
    let receiver = pick_receiver(ctx, rng);
    result.players.receiver = Some(receiver.id.clone());
    ctx.push_effects(&mut result, receiver, offense_side);

    let completion_prob = probability::completion_probability(
        throw_accuracy,
        effective_attr(receiver, BonusStat::Catching, ctx.situations),
        ctx.defense_mods.pass_defense,
        ctx.offense_mods.pass_accuracy_mult,
        desperation,
    );

    if rng.gen::<f32>() >= completion_prob {
        result.outcome = PlayOutcome::Incompletion;
        result.elapsed =
            elapsed_between(rng, clock::INCOMPLETE_PASS_MIN, clock::INCOMPLETE_PASS_MAX);
        let phrase = pick_phrase(
            ctx.seed,
            ctx.play_number,
            subcase::PASS_PHRASE,
            &["falls incomplete", "batted down", "off his fingertips", "overthrown"],
        );
        result.description = format!("{} to {}, {}", passer.name, receiver.name, phrase);
        return result;
    }

    // Completion: air plus YAC, badge-scaled.
    let catch_mult = receiver
        .traits
        .action_multiplier_in(ActionType::Catch, ctx.situations);
    let yac = (sample_normal(rng, outcomes::YAC_MEAN, outcomes::YAC_STDDEV) * catch_mult).max(0.0);
    let (yards, outcome_override) = clip_gain(ctx.state, air + yac);
    result.yards = yards;
    result.elapsed = if ctx.state.in_two_minute_drill()
        && ctx.state.margin_for(offense_side) < 0
    {
        elapsed_between(rng, clock::HURRY_UP_MIN, clock::HURRY_UP_MAX)
    } else {
        elapsed_between(rng, clock::COMPLETE_PASS_MIN, clock::COMPLETE_PASS_MAX)
    };

    match outcome_override {
        Some(PlayOutcome::Touchdown) => {
            result.outcome = PlayOutcome::Touchdown;
            result.description = format!(
                "{} hits {} for a {} yard touchdown",
                passer.name, receiver.name, yards
            );
            resolve_try(ctx, &mut result, rng);
        }
        Some(PlayOutcome::Safety) => {
            // Completed behind the line and tackled in the end zone.
            result.outcome = PlayOutcome::Safety;
            result.points = scoring::SAFETY;
            result.scoring_side = Some(offense_side.opponent());
            result.description =
                format!("{} caught behind the line, tackled for a safety", receiver.name);
        }
        _ => {
            result.outcome = PlayOutcome::Normal;
            result.description = format!(
                "{} complete to {} for {} yards",
                passer.name, receiver.name, yards
            );
        }
    }
    result
}

/// Depth-weighted target pick: the top of the depth chart sees most looks.
fn pick_receiver<'a, R: Rng>(ctx: &'a ResolutionContext<'_>, rng: &mut R) -> &'a Player {
    let receivers = &ctx.offense.receivers;
    let weights = [0.36, 0.27, 0.20, 0.17];
    let roll: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (i, receiver) in receivers.iter().enumerate() {
        cumulative += weights.get(i).copied().unwrap_or(0.1);
        if roll < cumulative {
            return receiver;
        }
    }
    &receivers[receivers.len() - 1]
}

// ============================================================================
// Punt
// ============================================================================

fn resolve_punt<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> PlayResult {
    let mut result = ctx.blank_result(PlayType::Punt);
    let punter = &ctx.offense.punter;
    result.players.kicker = Some(punter.id.clone());

    let mean = probability::expected_punt_distance(
        effective_attr(punter, BonusStat::KickPower, ctx.situations),
        ctx.offense_mods.kicking_mult,
    );
    let gross = sample_normal(rng, mean, outcomes::PUNT_STDDEV).clamp(20.0, 70.0);
    let landing = ctx.state.ball_position as i32 + gross.round() as i32;

    result.yards = gross.round() as i16;
    result.elapsed = clock::KICK_PLAY_SECS + elapsed_between(rng, 3, 6);

    if landing >= field::OPPONENT_GOAL as i32 {
        result.outcome = PlayOutcome::Touchback;
        result.turnover_spot = Some(field::PUNT_TOUCHBACK_SPOT);
        result.description = format!("{} punts into the end zone, touchback", punter.name);
    } else {
        result.outcome = PlayOutcome::Normal;
        result.turnover_spot = Some((field::OPPONENT_GOAL as i32 - landing).clamp(1, 99) as u8);
        result.description = format!(
            "{} punts {} yards, downed at the {}",
            punter.name,
            result.yards,
            field::OPPONENT_GOAL as i32 - landing
        );
    }
    result
}

// ============================================================================
// Field Goal
// ============================================================================

fn resolve_field_goal<R: Rng>(ctx: &ResolutionContext<'_>, rng: &mut R) -> PlayResult {
    let mut result = ctx.blank_result(PlayType::FieldGoal);
    let kicker = &ctx.offense.kicker;
    result.players.kicker = Some(kicker.id.clone());
    ctx.push_effects(&mut result, kicker, ctx.offense_side());

    let distance = ctx.state.field_goal_distance();
    let kick_mult = kicker
        .traits
        .action_multiplier_in(ActionType::Kick, ctx.situations);
    let prob = probability::field_goal_probability(
        effective_attr(kicker, BonusStat::KickAccuracy, ctx.situations),
        effective_attr(kicker, BonusStat::KickPower, ctx.situations),
        distance as f32,
        ctx.offense_mods.kicking_mult,
    ) * kick_mult;

    result.elapsed = clock::KICK_PLAY_SECS;

    if rng.gen::<f32>() < prob.min(0.99) {
        result.outcome = PlayOutcome::FieldGoalGood;
        result.points = scoring::FIELD_GOAL;
        result.scoring_side = Some(ctx.offense_side());
        result.description = format!("{} yard field goal by {} is good", distance, kicker.name);
    } else {
        result.outcome = PlayOutcome::FieldGoalMissed;
        // Missed kicks hand over at the spot of the hold.
        let spot = ctx.state.ball_position.saturating_sub(7).max(1);
        result.turnover_spot = Some(field::OPPONENT_GOAL - spot);
        result.description = format!(
            "{} yard field goal by {} is no good",
            distance, kicker.name
        );
    }
    result
}

// ============================================================================
// Kneel
// ============================================================================

fn resolve_kneel(ctx: &ResolutionContext<'_>) -> PlayResult {
    let mut result = ctx.blank_result(PlayType::Kneel);
    let passer = &ctx.offense.quarterback;
    result.players.rusher = Some(passer.id.clone());
    result.yards = -1;
    result.elapsed = clock::KNEEL_SECS;
    result.description = format!("{} kneels to run out the clock", passer.name);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_state::GameFlowState;
    use crate::engine::modifiers::Personnel;
    use crate::models::{CoachingStaff, FacilityBonus, PlayerAttributes, Position, SimTeam, TraitSlots};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(id: &str, position: Position, overall: u8) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_string(),
            position,
            overall,
            attributes: Some(PlayerAttributes::flat(overall)),
            traits: TraitSlots::default(),
        }
    }

    fn team() -> SimTeam {
        SimTeam {
            id: "t".into(),
            name: "Team".into(),
            abbreviation: "TM".into(),
            players: vec![
                player("qb", Position::QB, 75),
                player("rb1", Position::RB, 75),
                player("rb2", Position::RB, 70),
                player("wr1", Position::WR, 78),
                player("wr2", Position::WR, 74),
                player("te", Position::TE, 72),
                player("ol", Position::OL, 75),
                player("dl", Position::DL, 75),
                player("lb", Position::LB, 75),
                player("cb", Position::CB, 75),
                player("s", Position::S, 75),
                player("k", Position::K, 75),
                player("p", Position::P, 75),
            ],
            coaching: CoachingStaff::default(),
            facilities: FacilityBonus::default(),
        }
    }

    struct Fixture {
        state: GameState,
        offense_mods: TeamGameModifiers,
        defense_mods: TeamGameModifiers,
        offense: Personnel,
        defense: Personnel,
        situations: Vec<SituationTag>,
    }

    impl Fixture {
        fn new() -> Self {
            let t = team();
            // Away kicked off to open; Home is the offense.
            let mut state = GameState::new(TeamSide::Away);
            state.flow = GameFlowState::LiveDown;
            Self {
                state,
                offense_mods: TeamGameModifiers::default(),
                defense_mods: TeamGameModifiers::default(),
                offense: Personnel::from_team(&t),
                defense: Personnel::from_team(&t),
                situations: vec![SituationTag::Always],
            }
        }

        fn ctx(&self) -> ResolutionContext<'_> {
            ResolutionContext {
                state: &self.state,
                offense_mods: &self.offense_mods,
                defense_mods: &self.defense_mods,
                offense: &self.offense,
                defense: &self.defense,
                situations: &self.situations,
                seed: 42,
                play_number: 0,
            }
        }
    }

    #[test]
    fn test_kickoff_moves_ball_off_the_spot() {
        // Kickoffs always relocate the ball (touchback or return), and the
        // only scoring path is an explicit return touchdown.
        let fixture = Fixture::new();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_kickoff(&fixture.ctx(), &mut rng);
            match result.outcome {
                PlayOutcome::Touchback => {
                    assert_eq!(result.end_spot, Some(25));
                }
                PlayOutcome::ReturnTouchdown => {
                    assert!(result.points >= 6);
                }
                _ => {
                    let spot = result.end_spot.expect("return must set end_spot");
                    assert!(spot > 0 && spot != 50);
                    assert_eq!(result.points, 0);
                }
            }
        }
    }

    #[test]
    fn test_run_yardage_consistent_with_field() {
        let mut fixture = Fixture::new();
        fixture.state.ball_position = 97;
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_run(&fixture.ctx(), &mut rng);
            if result.outcome == PlayOutcome::Touchdown {
                assert_eq!(result.yards, 3);
                assert!(result.points >= 6);
            } else {
                assert!((result.snap.ball_position as i32 + result.yards as i32) < 100);
            }
        }
    }

    #[test]
    fn test_deep_own_territory_sack_can_be_safety() {
        let mut fixture = Fixture::new();
        fixture.state.ball_position = 1;
        fixture.defense_mods.pass_rush = 99.0;
        fixture.offense_mods.pass_block = 10.0;
        let mut saw_safety = false;
        for seed in 0..400 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_pass(&fixture.ctx(), &mut rng);
            if result.outcome == PlayOutcome::Safety {
                saw_safety = true;
                assert_eq!(result.points, 2);
                assert_eq!(result.scoring_side, Some(TeamSide::Away));
                assert_eq!(result.yards, -1);
            }
        }
        assert!(saw_safety, "pinned offense should concede a safety eventually");
    }

    #[test]
    fn test_punt_always_flips_possession_spot() {
        let mut fixture = Fixture::new();
        fixture.state.ball_position = 30;
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_punt(&fixture.ctx(), &mut rng);
            let spot = result.turnover_spot.expect("punt must set turnover spot");
            assert!(spot >= 1 && spot <= 99);
        }
    }

    #[test]
    fn test_field_goal_points_on_make() {
        let mut fixture = Fixture::new();
        fixture.state.ball_position = 80; // 37-yard attempt
        let mut makes = 0;
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_field_goal(&fixture.ctx(), &mut rng);
            match result.outcome {
                PlayOutcome::FieldGoalGood => {
                    makes += 1;
                    assert_eq!(result.points, 3);
                    assert_eq!(result.scoring_side, Some(TeamSide::Home));
                }
                PlayOutcome::FieldGoalMissed => {
                    assert!(result.turnover_spot.is_some());
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert!(makes > 60, "average kicker should make most 37-yarders, made {}", makes);
    }

    #[test]
    fn test_two_point_chart() {
        let mut fixture = Fixture::new();
        // Home trailing 0-8: after a TD (6) the deficit is 2 -> go for two.
        fixture.state.add_points(TeamSide::Away, 8);
        assert!(should_go_for_two(&fixture.state, TeamSide::Home));

        // Trailing 0-7: kick the extra point.
        let mut fixture = Fixture::new();
        fixture.state.add_points(TeamSide::Away, 7);
        assert!(!should_go_for_two(&fixture.state, TeamSide::Home));

        // Trailing by 11 late: after six the deficit is 5 -> go for two.
        let mut fixture = Fixture::new();
        fixture.state.add_points(TeamSide::Away, 11);
        fixture.state.quarter = 4;
        fixture.state.clock = 120;
        assert!(should_go_for_two(&fixture.state, TeamSide::Home));
    }

    #[test]
    fn test_kneel_burns_clock() {
        let fixture = Fixture::new();
        let result = resolve_kneel(&fixture.ctx());
        assert_eq!(result.yards, -1);
        assert_eq!(result.elapsed, clock::KNEEL_SECS);
        assert_eq!(result.outcome, PlayOutcome::Normal);
    }

    #[test]
    fn test_resolution_is_deterministic_per_seed() {
        let fixture = Fixture::new();
        let mut rng_a = ChaCha8Rng::seed_from_u64(777);
        let mut rng_b = ChaCha8Rng::seed_from_u64(777);
        let a = resolve_play(PlayType::Pass, &fixture.ctx(), &mut rng_a);
        let b = resolve_play(PlayType::Pass, &fixture.ctx(), &mut rng_b);
        assert_eq!(a, b);
    }
}
