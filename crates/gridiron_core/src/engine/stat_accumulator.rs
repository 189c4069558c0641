//! Statistics accumulation.
//!
//! Attributes each `PlayResult` to the players recorded on it and to the
//! team aggregates. Counters only ever increase; accumulation is driven
//! exclusively by the orchestrator's own play log, so a result is never
//! recorded twice.
//!
//! Category invariant maintained here: player and team counters for the
//! same category are incremented in lockstep, so per-player sums always
//! equal the team total.

use crate::engine::modifiers::Personnel;
use crate::models::{
    GameStatistics, PlayOutcome, PlayResult, PlayType, Player, TryResult,
};

/// Stateless recorder; all accumulated data lives in `GameStatistics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatAccumulator;

impl StatAccumulator {
    pub fn new() -> Self {
        Self
    }

    /// Record one resolved play.
    pub fn record(
        &self,
        stats: &mut GameStatistics,
        result: &PlayResult,
        offense: &Personnel,
        defense: &Personnel,
    ) {
        if let (Some(side), points @ 1..) = (result.scoring_side, result.points) {
            stats.team_mut(side).points += points as u32;
        }

        match result.play_type {
            PlayType::Kickoff => self.record_kickoff(stats, result, offense),
            PlayType::Run | PlayType::Kneel => self.record_run(stats, result, offense, defense),
            PlayType::Pass => self.record_pass(stats, result, offense, defense),
            PlayType::Punt => self.record_punt(stats, result, offense),
            PlayType::FieldGoal => self.record_field_goal(stats, result, offense),
        }

        self.record_downs(stats, result);
        self.record_try(stats, result, offense);
    }

    // ------------------------------------------------------------------

    fn record_kickoff(
        &self,
        stats: &mut GameStatistics,
        result: &PlayResult,
        offense: &Personnel,
    ) {
        if let Some(returner) = lookup(offense, result.players.returner.as_deref()) {
            let line = stats.player_mut(&returner.id, &returner.name);
            line.kick_return_yards += result.yards as i32;
            if result.outcome == PlayOutcome::ReturnTouchdown {
                line.kick_return_touchdowns += 1;
            }
        }
    }

    fn record_run(
        &self,
        stats: &mut GameStatistics,
        result: &PlayResult,
        offense: &Personnel,
        defense: &Personnel,
    ) {
        if result.outcome == PlayOutcome::Penalty {
            self.record_penalty(stats, result);
            return;
        }

        let side = result.offense;
        if let Some(rusher) = lookup(offense, result.players.rusher.as_deref()) {
            let line = stats.player_mut(&rusher.id, &rusher.name);
            line.rush_attempts += 1;
            line.rush_yards += result.yards as i32;
            if result.outcome == PlayOutcome::Touchdown {
                line.rush_touchdowns += 1;
            }
            if result.outcome == PlayOutcome::Fumble {
                line.fumbles_lost += 1;
            }
        }

        if let Some(defender) = lookup(defense, result.players.defender.as_deref()) {
            let line = stats.player_mut(&defender.id, &defender.name);
            match result.outcome {
                PlayOutcome::Fumble => {
                    line.fumbles_forced += 1;
                    line.tackles += 1;
                }
                _ => line.tackles += 1,
            }
        }

        let team = stats.team_mut(side);
        team.rush_yards += result.yards as i32;
        team.total_yards += result.yards as i32;
        team.plays += 1;
        team.time_of_possession_secs += result.elapsed as u32;
        if result.outcome == PlayOutcome::Fumble {
            team.turnovers += 1;
        }
    }

    fn record_pass(
        &self,
        stats: &mut GameStatistics,
        result: &PlayResult,
        offense: &Personnel,
        defense: &Personnel,
    ) {
        if result.outcome == PlayOutcome::Penalty {
            self.record_penalty(stats, result);
            return;
        }

        let side = result.offense;

        // Defensive credit first; the offense branches below return early.
        if let Some(defender) = lookup(defense, result.players.defender.as_deref()) {
            let line = stats.player_mut(&defender.id, &defender.name);
            match result.outcome {
                PlayOutcome::Sack | PlayOutcome::Safety => {
                    line.sacks += 1;
                    line.tackles += 1;
                }
                PlayOutcome::Interception => line.interceptions += 1,
                _ => {}
            }
        }

        let passer = lookup(offense, result.players.passer.as_deref());

        match result.outcome {
            PlayOutcome::Sack | PlayOutcome::Safety
                if result.players.receiver.is_none() =>
            {
                if let Some(passer) = passer {
                    stats.player_mut(&passer.id, &passer.name).times_sacked += 1;
                }
                let team = stats.team_mut(side);
                team.sack_yards_lost += -(result.yards as i32);
                team.total_yards += result.yards as i32;
                team.plays += 1;
                team.time_of_possession_secs += result.elapsed as u32;
                stats.team_mut(side.opponent()).sacks += 1;
                return;
            }
            PlayOutcome::Interception => {
                if let Some(passer) = passer {
                    let line = stats.player_mut(&passer.id, &passer.name);
                    line.pass_attempts += 1;
                    line.interceptions_thrown += 1;
                }
                let team = stats.team_mut(side);
                team.turnovers += 1;
                team.plays += 1;
                team.time_of_possession_secs += result.elapsed as u32;
                return;
            }
            PlayOutcome::Incompletion => {
                if let Some(passer) = passer {
                    stats.player_mut(&passer.id, &passer.name).pass_attempts += 1;
                }
                if let Some(receiver) = lookup(offense, result.players.receiver.as_deref()) {
                    stats.player_mut(&receiver.id, &receiver.name).targets += 1;
                }
                let team = stats.team_mut(side);
                team.plays += 1;
                team.time_of_possession_secs += result.elapsed as u32;
                return;
            }
            _ => {}
        }

        // Completion (normal gain, touchdown, or tackled for a safety).
        if let Some(passer) = passer {
            let line = stats.player_mut(&passer.id, &passer.name);
            line.pass_attempts += 1;
            line.completions += 1;
            line.pass_yards += result.yards as i32;
            if result.outcome == PlayOutcome::Touchdown {
                line.pass_touchdowns += 1;
            }
        }
        if let Some(receiver) = lookup(offense, result.players.receiver.as_deref()) {
            let line = stats.player_mut(&receiver.id, &receiver.name);
            line.targets += 1;
            line.receptions += 1;
            line.receiving_yards += result.yards as i32;
            if result.outcome == PlayOutcome::Touchdown {
                line.receiving_touchdowns += 1;
            }
        }

        let team = stats.team_mut(side);
        team.pass_yards += result.yards as i32;
        team.total_yards += result.yards as i32;
        team.plays += 1;
        team.time_of_possession_secs += result.elapsed as u32;
    }

    fn record_punt(&self, stats: &mut GameStatistics, result: &PlayResult, offense: &Personnel) {
        if let Some(punter) = lookup(offense, result.players.kicker.as_deref()) {
            let line = stats.player_mut(&punter.id, &punter.name);
            line.punts += 1;
            line.punt_yards += result.yards as i32;
        }
        let team = stats.team_mut(result.offense);
        team.punts += 1;
        team.time_of_possession_secs += result.elapsed as u32;
    }

    fn record_field_goal(
        &self,
        stats: &mut GameStatistics,
        result: &PlayResult,
        offense: &Personnel,
    ) {
        if let Some(kicker) = lookup(offense, result.players.kicker.as_deref()) {
            let line = stats.player_mut(&kicker.id, &kicker.name);
            line.field_goals_attempted += 1;
            if result.outcome == PlayOutcome::FieldGoalGood {
                line.field_goals_made += 1;
            }
        }
        stats.team_mut(result.offense).time_of_possession_secs += result.elapsed as u32;
    }

    fn record_penalty(&self, stats: &mut GameStatistics, result: &PlayResult) {
        // Negative yardage flags the offense, positive the defense.
        let flagged = if result.yards < 0 {
            result.offense
        } else {
            result.offense.opponent()
        };
        let team = stats.team_mut(flagged);
        team.penalties += 1;
        team.penalty_yards += result.yards.unsigned_abs() as u32;
    }

    fn record_downs(&self, stats: &mut GameStatistics, result: &PlayResult) {
        if !result.is_scrimmage_play() {
            return;
        }
        let converted = result.yards >= result.snap.distance as i16;
        let team = stats.team_mut(result.offense);

        if converted && result.outcome == PlayOutcome::Normal {
            team.first_downs += 1;
        }
        match result.snap.down {
            3 => {
                team.third_down_attempts += 1;
                if converted {
                    team.third_down_conversions += 1;
                }
            }
            4 => {
                team.fourth_down_attempts += 1;
                if converted {
                    team.fourth_down_conversions += 1;
                }
            }
            _ => {}
        }
    }

    fn record_try(&self, stats: &mut GameStatistics, result: &PlayResult, offense: &Personnel) {
        let try_result = match result.try_result {
            Some(t) => t,
            None => return,
        };
        match try_result {
            TryResult::ExtraPointGood | TryResult::ExtraPointMissed => {
                let kicker = &offense.kicker;
                let line = stats.player_mut(&kicker.id, &kicker.name);
                line.extra_points_attempted += 1;
                if try_result == TryResult::ExtraPointGood {
                    line.extra_points_made += 1;
                }
            }
            // Two-point tries are team plays; the points were already
            // credited on the team line.
            TryResult::TwoPointGood | TryResult::TwoPointFailed => {}
        }
    }
}

/// Resolve a recorded player id against the personnel snapshot.
fn lookup<'a>(personnel: &'a Personnel, id: Option<&str>) -> Option<&'a Player> {
    let id = id?;
    if personnel.quarterback.id == id {
        return Some(&personnel.quarterback);
    }
    personnel
        .rushers
        .iter()
        .chain(personnel.receivers.iter())
        .chain(personnel.defenders.iter())
        .chain(std::iter::once(&personnel.kicker))
        .chain(std::iter::once(&personnel.punter))
        .chain(std::iter::once(&personnel.returner))
        .find(|p| p.id == id)
}
