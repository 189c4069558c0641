//! Per-game statistics containers.
//!
//! Counters accumulate monotonically for the duration of one game and are
//! cleared only by the orchestrator's `reset()`. Category invariant: the
//! sum of a per-player category across a roster equals the team total for
//! that category (gross passing/rushing/receiving; sack losses are tracked
//! separately on the team line).

use super::play::TeamSide;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Serialize a player map in a stable (key-sorted) order so that two
/// same-seed simulations produce byte-identical JSON. `HashMap` iteration
/// order is per-instance random, which would otherwise break the engine's
/// determinism contract.
fn serialize_players_sorted<S>(
    players: &HashMap<String, PlayerGameStats>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let sorted: BTreeMap<&String, &PlayerGameStats> = players.iter().collect();
    sorted.serialize(serializer)
}

/// Per-player box score line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlayerGameStats {
    pub player_id: String,
    pub player_name: String,

    // Passing
    pub pass_attempts: u32,
    pub completions: u32,
    pub pass_yards: i32,
    pub pass_touchdowns: u32,
    pub interceptions_thrown: u32,
    pub times_sacked: u32,

    // Rushing
    pub rush_attempts: u32,
    pub rush_yards: i32,
    pub rush_touchdowns: u32,

    // Receiving
    pub targets: u32,
    pub receptions: u32,
    pub receiving_yards: i32,
    pub receiving_touchdowns: u32,

    // Ball security
    pub fumbles_lost: u32,

    // Defense
    pub tackles: u32,
    pub sacks: u32,
    pub interceptions: u32,
    pub fumbles_forced: u32,

    // Kicking game
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub extra_points_made: u32,
    pub extra_points_attempted: u32,
    pub punts: u32,
    pub punt_yards: i32,
    pub kick_return_yards: i32,
    pub kick_return_touchdowns: u32,
}

impl PlayerGameStats {
    pub fn new(player_id: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            ..Default::default()
        }
    }
}

/// Per-team aggregate line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TeamGameStats {
    pub points: u32,

    // Yardage (gross per category; total nets out sack losses)
    pub total_yards: i32,
    pub pass_yards: i32,
    pub rush_yards: i32,
    pub sack_yards_lost: i32,

    pub first_downs: u32,
    pub third_down_attempts: u32,
    pub third_down_conversions: u32,
    pub fourth_down_attempts: u32,
    pub fourth_down_conversions: u32,

    pub turnovers: u32,
    pub penalties: u32,
    pub penalty_yards: u32,

    pub punts: u32,
    pub sacks: u32,

    /// Offensive snaps run (scrimmage plays).
    pub plays: u32,
    pub time_of_possession_secs: u32,
}

/// Full statistics payload for one game.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GameStatistics {
    pub home: TeamGameStats,
    pub away: TeamGameStats,
    /// Player lines keyed by roster identifier.
    #[serde(serialize_with = "serialize_players_sorted")]
    pub players: HashMap<String, PlayerGameStats>,
}

impl GameStatistics {
    pub fn team(&self, side: TeamSide) -> &TeamGameStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamGameStats {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Player line, created on first touch.
    pub fn player_mut(
        &mut self,
        player_id: &str,
        player_name: &str,
    ) -> &mut PlayerGameStats {
        self.players
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerGameStats::new(player_id, player_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_line_created_on_first_touch() {
        let mut stats = GameStatistics::default();
        stats.player_mut("qb1", "Quincy Back").pass_attempts += 1;
        stats.player_mut("qb1", "Quincy Back").completions += 1;
        assert_eq!(stats.players.len(), 1);
        assert_eq!(stats.players["qb1"].pass_attempts, 1);
    }

    #[test]
    fn test_team_side_accessors() {
        let mut stats = GameStatistics::default();
        stats.team_mut(TeamSide::Away).points = 14;
        assert_eq!(stats.team(TeamSide::Away).points, 14);
        assert_eq!(stats.team(TeamSide::Home).points, 0);
    }
}
