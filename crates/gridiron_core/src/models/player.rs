use super::trait_system::TraitSlots;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player data for the game simulation engine.
///
/// Rosters are produced by external subsystems (player generation, draft,
/// free agency) and are read-only for the duration of a game. The engine
/// only consumes the numeric ratings and equipped traits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    /// Stable roster identifier (stat lines are keyed by this).
    pub id: String,
    pub name: String,
    pub position: Position,
    pub overall: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<PlayerAttributes>,

    /// Equipped badges (4 slots, Bronze/Silver/Gold tiers).
    #[serde(default)]
    pub traits: TraitSlots,
}

impl Player {
    /// Deterministic replacement-level player for an empty depth-chart slot.
    ///
    /// A franchise simulation must always produce a result, so a missing
    /// positional slot is filled with this instead of failing (overall 40,
    /// flat attributes, no badges).
    pub fn replacement_level(position: Position) -> Self {
        Self {
            id: format!("replacement-{}", position.code()),
            name: format!("Replacement {}", position.code()),
            position,
            overall: 40,
            attributes: Some(PlayerAttributes::flat(40)),
            traits: TraitSlots::default(),
        }
    }

    /// Effective attributes, falling back to a flat sheet at `overall`.
    pub fn attrs(&self) -> PlayerAttributes {
        self.attributes
            .clone()
            .unwrap_or_else(|| PlayerAttributes::flat(self.overall))
    }
}

/// Roster positions recognized by the play resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    DL,
    LB,
    CB,
    S,
    K,
    P,
}

impl Position {
    /// Decode from compact numeric codes used in binary roster payloads.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Position::QB),
            1 => Some(Position::RB),
            2 => Some(Position::WR),
            3 => Some(Position::TE),
            4 => Some(Position::OL),
            5 => Some(Position::DL),
            6 => Some(Position::LB),
            7 => Some(Position::CB),
            8 => Some(Position::S),
            9 => Some(Position::K),
            10 => Some(Position::P),
            _ => None,
        }
    }

    /// Canonical position code string.
    pub fn code(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::OL => "OL",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::S => "S",
            Position::K => "K",
            Position::P => "P",
        }
    }

    pub fn is_offense(&self) -> bool {
        matches!(
            self,
            Position::QB | Position::RB | Position::WR | Position::TE | Position::OL
        )
    }

    pub fn is_defense(&self) -> bool {
        matches!(
            self,
            Position::DL | Position::LB | Position::CB | Position::S
        )
    }

    pub fn is_specialist(&self) -> bool {
        matches!(self, Position::K | Position::P)
    }

    /// Can this position carry or catch the ball on a scrimmage play?
    pub fn is_skill_position(&self) -> bool {
        matches!(
            self,
            Position::QB | Position::RB | Position::WR | Position::TE
        )
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" | "HB" | "FB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "OL" | "LT" | "LG" | "C" | "RG" | "RT" => Ok(Position::OL),
            "DL" | "DE" | "DT" | "NT" | "EDGE" => Ok(Position::DL),
            "LB" | "MLB" | "OLB" | "ILB" => Ok(Position::LB),
            "CB" => Ok(Position::CB),
            "S" | "FS" | "SS" => Ok(Position::S),
            "K" => Ok(Position::K),
            "P" => Ok(Position::P),
            other => Err(format!("Unknown position: {}", other)),
        }
    }
}

/// Per-player attribute sheet (0-99 scale).
///
/// Only the attributes the play resolver actually reads are modeled here;
/// physical measurables and development traits live in the roster
/// generation subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerAttributes {
    pub speed: u8,
    pub strength: u8,
    pub agility: u8,
    pub awareness: u8,
    pub throw_power: u8,
    pub throw_accuracy: u8,
    pub catching: u8,
    /// Ball security when carrying (fumble resistance).
    pub carrying: u8,
    pub tackling: u8,
    pub coverage: u8,
    pub pass_rush: u8,
    pub pass_block: u8,
    pub kick_power: u8,
    pub kick_accuracy: u8,
    pub stamina: u8,
}

impl PlayerAttributes {
    /// Uniform sheet at the given rating.
    pub fn flat(rating: u8) -> Self {
        let r = rating.min(99);
        Self {
            speed: r,
            strength: r,
            agility: r,
            awareness: r,
            throw_power: r,
            throw_accuracy: r,
            catching: r,
            carrying: r,
            tackling: r,
            coverage: r,
            pass_rush: r,
            pass_block: r,
            kick_power: r,
            kick_accuracy: r,
            stamina: r,
        }
    }
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::flat(60)
    }
}
