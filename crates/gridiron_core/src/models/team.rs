use super::coaching::{CoachingStaff, FacilityBonus};
use super::player::{Player, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Team descriptor consumed by the simulation engine.
///
/// Owned externally and read-only for the duration of a game. The coaching
/// and facility bundles are optional on the wire and default to neutral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimTeam {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub players: Vec<Player>,
    #[serde(default)]
    pub coaching: CoachingStaff,
    #[serde(default)]
    pub facilities: FacilityBonus,
}

impl SimTeam {
    pub fn validate(&self) -> Result<(), String> {
        if self.players.is_empty() {
            return Err("Roster is empty".to_string());
        }
        if self.abbreviation.is_empty() || self.abbreviation.len() > 4 {
            return Err(format!(
                "Abbreviation must be 1-4 characters, found '{}'",
                self.abbreviation
            ));
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.id.as_str()) {
                return Err(format!("Duplicate player id: {}", player.id));
            }
        }

        // Missing positional slots are tolerated (replacement-level players
        // are substituted), but a roster with no offensive skill players at
        // all is a data error, not a depth problem.
        if !self.players.iter().any(|p| p.position.is_skill_position()) {
            return Err("Roster has no offensive skill players".to_string());
        }

        Ok(())
    }

    /// Players at a position, best overall first.
    pub fn depth_chart(&self, position: Position) -> Vec<&Player> {
        let mut players: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.position == position)
            .collect();
        players.sort_by(|a, b| b.overall.cmp(&a.overall).then(a.id.cmp(&b.id)));
        players
    }

    /// Best player at a position, if any.
    pub fn starter(&self, position: Position) -> Option<&Player> {
        self.depth_chart(position).into_iter().next()
    }

    /// Best player at a position, or a deterministic replacement-level
    /// stand-in when the slot is empty.
    pub fn starter_or_replacement(&self, position: Position) -> Player {
        self.starter(position)
            .cloned()
            .unwrap_or_else(|| Player::replacement_level(position))
    }

    pub fn average_overall(&self) -> f32 {
        if self.players.is_empty() {
            return 40.0;
        }
        let sum: u32 = self.players.iter().map(|p| p.overall as u32).sum();
        sum as f32 / self.players.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trait_system::TraitSlots;

    fn player(id: &str, position: Position, overall: u8) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_string(),
            position,
            overall,
            attributes: None,
            traits: TraitSlots::default(),
        }
    }

    fn small_team() -> SimTeam {
        SimTeam {
            id: "tst".into(),
            name: "Testers".into(),
            abbreviation: "TST".into(),
            players: vec![
                player("qb1", Position::QB, 80),
                player("qb2", Position::QB, 88),
                player("rb1", Position::RB, 75),
            ],
            coaching: CoachingStaff::default(),
            facilities: FacilityBonus::default(),
        }
    }

    #[test]
    fn test_depth_chart_sorted_by_overall() {
        let team = small_team();
        let qbs = team.depth_chart(Position::QB);
        assert_eq!(qbs[0].id, "qb2");
        assert_eq!(qbs[1].id, "qb1");
    }

    #[test]
    fn test_missing_slot_yields_replacement() {
        let team = small_team();
        let kicker = team.starter_or_replacement(Position::K);
        assert_eq!(kicker.overall, 40);
        assert_eq!(kicker.position, Position::K);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut team = small_team();
        team.players.push(player("qb1", Position::QB, 70));
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_roster() {
        let mut team = small_team();
        team.players.clear();
        assert!(team.validate().is_err());
    }
}
