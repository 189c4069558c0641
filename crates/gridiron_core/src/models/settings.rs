//! Per-game configuration, immutable once a game starts.

use serde::{Deserialize, Serialize};

/// Kind of game being simulated. Drives the prime-time badge gate and the
/// default overtime rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Regular,
    PrimeTime,
    Playoff,
    Championship,
}

impl GameType {
    /// Prime-time badges light up for nationally televised games.
    pub fn is_prime_time(&self) -> bool {
        matches!(
            self,
            GameType::PrimeTime | GameType::Playoff | GameType::Championship
        )
    }

    /// Postseason games cannot end in a tie.
    pub fn is_postseason(&self) -> bool {
        matches!(self, GameType::Playoff | GameType::Championship)
    }

    /// Default overtime rule set for this game type.
    pub fn default_overtime_rule(&self) -> OvertimeRule {
        if self.is_postseason() {
            OvertimeRule::GuaranteedPossession
        } else {
            OvertimeRule::SuddenDeath
        }
    }
}

/// Overtime format. Regular-season and postseason rules differ, so the
/// configuration selects the rule set instead of the engine guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeRule {
    /// First score of any kind wins. One period; if it expires with the
    /// score still level the game ends in a tie.
    SuddenDeath,
    /// Both teams are guaranteed a possession unless the opening possession
    /// ends in a defensive score. Periods repeat until a winner emerges.
    GuaranteedPossession,
}

/// Weather conditions applied by the modifier engine at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Wind,
    Rain,
    Snow,
}

impl Weather {
    /// Multiplier on pass completion and kick accuracy.
    pub fn passing_factor(&self) -> f32 {
        match self {
            Weather::Clear => 1.0,
            Weather::Wind => 0.92,
            Weather::Rain => 0.95,
            Weather::Snow => 0.90,
        }
    }

    /// Additive fumble chance (wet or frozen ball).
    pub fn fumble_bonus(&self) -> f32 {
        match self {
            Weather::Clear => 0.0,
            Weather::Wind => 0.0,
            Weather::Rain => 0.010,
            Weather::Snow => 0.015,
        }
    }

    /// Multiplier on field goal and punt distance.
    pub fn kicking_factor(&self) -> f32 {
        match self {
            Weather::Clear => 1.0,
            Weather::Wind => 0.90,
            Weather::Rain => 0.96,
            Weather::Snow => 0.92,
        }
    }
}

/// How loud the building is (scales the home-field bonus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HomeFieldIntensity {
    Quiet,
    #[default]
    Normal,
    Hostile,
}

impl HomeFieldIntensity {
    pub fn factor(&self) -> f32 {
        match self {
            HomeFieldIntensity::Quiet => 0.5,
            HomeFieldIntensity::Normal => 1.0,
            HomeFieldIntensity::Hostile => 1.5,
        }
    }
}

/// Immutable per-game configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct GameSettings {
    #[serde(default)]
    pub game_type: GameType,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub home_field_intensity: HomeFieldIntensity,
    /// Overtime rule override; `None` takes the game type's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_rule: Option<OvertimeRule>,
}

impl GameSettings {
    pub fn overtime_rule(&self) -> OvertimeRule {
        self.overtime_rule
            .unwrap_or_else(|| self.game_type.default_overtime_rule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overtime_rule_defaults_by_game_type() {
        let regular = GameSettings::default();
        assert_eq!(regular.overtime_rule(), OvertimeRule::SuddenDeath);

        let playoff = GameSettings {
            game_type: GameType::Playoff,
            ..Default::default()
        };
        assert_eq!(playoff.overtime_rule(), OvertimeRule::GuaranteedPossession);
    }

    #[test]
    fn test_overtime_rule_override_wins() {
        let settings = GameSettings {
            game_type: GameType::Regular,
            overtime_rule: Some(OvertimeRule::GuaranteedPossession),
            ..Default::default()
        };
        assert_eq!(settings.overtime_rule(), OvertimeRule::GuaranteedPossession);
    }

    #[test]
    fn test_weather_penalizes_passing() {
        assert!(Weather::Snow.passing_factor() < Weather::Clear.passing_factor());
        assert!(Weather::Wind.kicking_factor() < 1.0);
        assert_eq!(Weather::Clear.fumble_bonus(), 0.0);
    }
}
