//! Unified badge system.
//!
//! 19 badges with 3-tier progression (Bronze/Silver/Gold). Each badge
//! provides:
//! - Passive: flat rating bonuses (scale with tier)
//! - Active: play-outcome multipliers (scale with tier)
//!
//! Badges tagged with a situation (`Clutch`, `RedZone`, `PrimeTime`) only
//! contribute when the game state qualifies; their activation is surfaced to
//! the caller as a `TriggeredEffect` on the resolved play.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tier System
// ============================================================================

/// 3-tier progression system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TraitTier {
    #[default]
    Bronze = 1, // Base (1.0x)
    Silver = 2, // Enhanced (1.5x)
    Gold = 3,   // Legendary (2.5x)
}

impl TraitTier {
    /// Passive rating bonus multiplier
    pub fn stat_multiplier(&self) -> f32 {
        match self {
            TraitTier::Bronze => 1.0,
            TraitTier::Silver => 1.5,
            TraitTier::Gold => 2.5,
        }
    }

    /// Active effect multiplier
    pub fn active_multiplier(&self) -> f32 {
        match self {
            TraitTier::Bronze => 1.1,
            TraitTier::Silver => 1.3,
            TraitTier::Gold => 1.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TraitTier::Bronze => "Bronze",
            TraitTier::Silver => "Silver",
            TraitTier::Gold => "Gold",
        }
    }
}

// ============================================================================
// Badge ID (19 badges)
// ============================================================================

/// All available badges (19 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitId {
    // === Passing (4) ===
    Cannon,       // throw_power +4, throw_accuracy +2
    Surgeon,      // throw_accuracy +4, awareness +2
    IceVeins,     // [Clutch] throw_accuracy +5, awareness +3
    FieldGeneral, // awareness +4, throw_accuracy +2

    // === Rushing (4) ===
    Bulldozer,  // strength +4, carrying +2
    JukeArtist, // agility +4, speed +2
    SureHands,  // carrying +5
    Workhorse,  // stamina +5, strength +2

    // === Receiving (3) ===
    DeepThreat,    // speed +4, catching +2
    RedZoneMagnet, // [RedZone] catching +5, strength +3
    YacMonster,    // agility +4, catching +2

    // === Defense (5) ===
    BallHawk,       // coverage +3, awareness +4
    Enforcer,       // tackling +4, strength +3
    ShutdownCorner, // coverage +5, speed +2
    SackArtist,     // pass_rush +5, agility +2
    BrickWall,      // tackling +4, strength +4

    // === Kicking & Returns (3) ===
    ClutchKicker, // [Clutch] kick_accuracy +6
    Thunderleg,   // kick_power +5
    ReturnAce,    // speed +4, agility +3

    // === Spotlight (1) ===
    PrimetimePlayer, // [PrimeTime] speed +2, awareness +2, catching +2
}

/// Badge category grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    Passing,
    Rushing,
    Receiving,
    Defense,
    Kicking,
    Spotlight,
}

/// Situation gate for a badge's bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SituationTag {
    /// Applies on every play.
    Always,
    /// Late, close game (see `GameSimulator::is_clutch`).
    Clutch,
    /// Ball inside the opponent 20-yard line.
    RedZone,
    /// Prime-time, playoff, or championship games.
    PrimeTime,
}

/// Rating a passive badge bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusStat {
    Speed,
    Strength,
    Agility,
    Awareness,
    ThrowPower,
    ThrowAccuracy,
    Catching,
    Carrying,
    Tackling,
    Coverage,
    PassRush,
    PassBlock,
    KickPower,
    KickAccuracy,
    Stamina,
}

/// Play actions a badge can multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Pass,
    Run,
    Catch,
    Tackle,
    Kick,
    Return,
}

impl TraitId {
    /// Get all badge IDs
    pub fn all() -> &'static [TraitId] {
        &[
            TraitId::Cannon,
            TraitId::Surgeon,
            TraitId::IceVeins,
            TraitId::FieldGeneral,
            TraitId::Bulldozer,
            TraitId::JukeArtist,
            TraitId::SureHands,
            TraitId::Workhorse,
            TraitId::DeepThreat,
            TraitId::RedZoneMagnet,
            TraitId::YacMonster,
            TraitId::BallHawk,
            TraitId::Enforcer,
            TraitId::ShutdownCorner,
            TraitId::SackArtist,
            TraitId::ClutchKicker,
            TraitId::Thunderleg,
            TraitId::ReturnAce,
            TraitId::BrickWall,
            TraitId::PrimetimePlayer,
        ]
    }

    /// Category for this badge
    pub fn category(&self) -> TraitCategory {
        match self {
            TraitId::Cannon | TraitId::Surgeon | TraitId::IceVeins | TraitId::FieldGeneral => {
                TraitCategory::Passing
            }
            TraitId::Bulldozer | TraitId::JukeArtist | TraitId::SureHands | TraitId::Workhorse => {
                TraitCategory::Rushing
            }
            TraitId::DeepThreat | TraitId::RedZoneMagnet | TraitId::YacMonster => {
                TraitCategory::Receiving
            }
            TraitId::BallHawk
            | TraitId::Enforcer
            | TraitId::ShutdownCorner
            | TraitId::SackArtist
            | TraitId::BrickWall => TraitCategory::Defense,
            TraitId::ClutchKicker | TraitId::Thunderleg | TraitId::ReturnAce => {
                TraitCategory::Kicking
            }
            TraitId::PrimetimePlayer => TraitCategory::Spotlight,
        }
    }

    /// Situation gate for this badge's bonuses
    pub fn situation(&self) -> SituationTag {
        match self {
            TraitId::IceVeins | TraitId::ClutchKicker => SituationTag::Clutch,
            TraitId::RedZoneMagnet => SituationTag::RedZone,
            TraitId::PrimetimePlayer => SituationTag::PrimeTime,
            _ => SituationTag::Always,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            TraitId::Cannon => "Cannon Arm",
            TraitId::Surgeon => "Surgeon",
            TraitId::IceVeins => "Ice Veins",
            TraitId::FieldGeneral => "Field General",
            TraitId::Bulldozer => "Bulldozer",
            TraitId::JukeArtist => "Juke Artist",
            TraitId::SureHands => "Sure Hands",
            TraitId::Workhorse => "Workhorse",
            TraitId::DeepThreat => "Deep Threat",
            TraitId::RedZoneMagnet => "Red Zone Magnet",
            TraitId::YacMonster => "YAC Monster",
            TraitId::BallHawk => "Ball Hawk",
            TraitId::Enforcer => "Enforcer",
            TraitId::ShutdownCorner => "Shutdown Corner",
            TraitId::SackArtist => "Sack Artist",
            TraitId::ClutchKicker => "Clutch Kicker",
            TraitId::Thunderleg => "Thunder Leg",
            TraitId::ReturnAce => "Return Ace",
            TraitId::BrickWall => "Brick Wall",
            TraitId::PrimetimePlayer => "Primetime Player",
        }
    }

    /// Base passive bonuses (Bronze tier, rating points on the 0-99 scale)
    pub fn base_passive_bonus(&self) -> Vec<(BonusStat, f32)> {
        match self {
            TraitId::Cannon => vec![(BonusStat::ThrowPower, 4.0), (BonusStat::ThrowAccuracy, 2.0)],
            TraitId::Surgeon => vec![(BonusStat::ThrowAccuracy, 4.0), (BonusStat::Awareness, 2.0)],
            TraitId::IceVeins => vec![(BonusStat::ThrowAccuracy, 5.0), (BonusStat::Awareness, 3.0)],
            TraitId::FieldGeneral => {
                vec![(BonusStat::Awareness, 4.0), (BonusStat::ThrowAccuracy, 2.0)]
            }
            TraitId::Bulldozer => vec![(BonusStat::Strength, 4.0), (BonusStat::Carrying, 2.0)],
            TraitId::JukeArtist => vec![(BonusStat::Agility, 4.0), (BonusStat::Speed, 2.0)],
            TraitId::SureHands => vec![(BonusStat::Carrying, 5.0)],
            TraitId::Workhorse => vec![(BonusStat::Stamina, 5.0), (BonusStat::Strength, 2.0)],
            TraitId::DeepThreat => vec![(BonusStat::Speed, 4.0), (BonusStat::Catching, 2.0)],
            TraitId::RedZoneMagnet => vec![(BonusStat::Catching, 5.0), (BonusStat::Strength, 3.0)],
            TraitId::YacMonster => vec![(BonusStat::Agility, 4.0), (BonusStat::Catching, 2.0)],
            TraitId::BallHawk => vec![(BonusStat::Coverage, 3.0), (BonusStat::Awareness, 4.0)],
            TraitId::Enforcer => vec![(BonusStat::Tackling, 4.0), (BonusStat::Strength, 3.0)],
            TraitId::ShutdownCorner => vec![(BonusStat::Coverage, 5.0), (BonusStat::Speed, 2.0)],
            TraitId::SackArtist => vec![(BonusStat::PassRush, 5.0), (BonusStat::Agility, 2.0)],
            TraitId::ClutchKicker => vec![(BonusStat::KickAccuracy, 6.0)],
            TraitId::Thunderleg => vec![(BonusStat::KickPower, 5.0)],
            TraitId::ReturnAce => vec![(BonusStat::Speed, 4.0), (BonusStat::Agility, 3.0)],
            TraitId::BrickWall => vec![(BonusStat::Tackling, 4.0), (BonusStat::Strength, 4.0)],
            TraitId::PrimetimePlayer => vec![
                (BonusStat::Speed, 2.0),
                (BonusStat::Awareness, 2.0),
                (BonusStat::Catching, 2.0),
            ],
        }
    }

    /// Base active multiplier for a play action (Bronze tier)
    pub fn base_active_multiplier(&self, action: ActionType) -> f32 {
        match (self, action) {
            (TraitId::Cannon, ActionType::Pass) => 1.05,
            (TraitId::Surgeon, ActionType::Pass) => 1.04,
            (TraitId::IceVeins, ActionType::Pass) => 1.06,
            (TraitId::Bulldozer, ActionType::Run) => 1.06,
            (TraitId::JukeArtist, ActionType::Run) => 1.05,
            (TraitId::DeepThreat, ActionType::Catch) => 1.06,
            (TraitId::RedZoneMagnet, ActionType::Catch) => 1.08,
            (TraitId::YacMonster, ActionType::Catch) => 1.05,
            (TraitId::Enforcer, ActionType::Tackle) => 1.05,
            (TraitId::BrickWall, ActionType::Tackle) => 1.05,
            (TraitId::ClutchKicker, ActionType::Kick) => 1.06,
            (TraitId::Thunderleg, ActionType::Kick) => 1.04,
            (TraitId::ReturnAce, ActionType::Return) => 1.10,
            (TraitId::PrimetimePlayer, _) => 1.03,
            _ => 1.0,
        }
    }
}

// ============================================================================
// Equipped Badge (ID + Tier)
// ============================================================================

/// A badge equipped by a player (combines ID and tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquippedTrait {
    pub id: TraitId,
    pub tier: TraitTier,
}

impl EquippedTrait {
    pub fn new(id: TraitId, tier: TraitTier) -> Self {
        Self { id, tier }
    }

    pub fn bronze(id: TraitId) -> Self {
        Self::new(id, TraitTier::Bronze)
    }

    pub fn silver(id: TraitId) -> Self {
        Self::new(id, TraitTier::Silver)
    }

    pub fn gold(id: TraitId) -> Self {
        Self::new(id, TraitTier::Gold)
    }

    /// Display name with tier label
    pub fn display_name(&self) -> String {
        format!("{} {}", self.tier.label(), self.id.name())
    }

    /// Passive rating bonuses (with tier scaling)
    pub fn passive_bonuses(&self) -> Vec<(BonusStat, f32)> {
        let multiplier = self.tier.stat_multiplier();
        self.id
            .base_passive_bonus()
            .into_iter()
            .map(|(stat, val)| (stat, val * multiplier))
            .collect()
    }

    /// Active effect multiplier (with tier scaling)
    pub fn active_multiplier(&self, action: ActionType) -> f32 {
        let base = self.id.base_active_multiplier(action);
        if base > 1.0 {
            // Scale the bonus portion by tier
            let bonus = (base - 1.0) * self.tier.active_multiplier();
            1.0 + bonus
        } else {
            1.0
        }
    }
}

// ============================================================================
// Badge Slots (4 slots per player)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitError {
    InvalidSlot,
    DuplicateTrait,
}

impl std::fmt::Display for TraitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraitError::InvalidSlot => write!(f, "Invalid badge slot"),
            TraitError::DuplicateTrait => write!(f, "Badge already equipped"),
        }
    }
}

/// Player's equipped badges (max 4 slots)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TraitSlots {
    slots: [Option<EquippedTrait>; 4],
}

impl TraitSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor from a badge list (first 4 kept)
    pub fn from_traits(traits: &[EquippedTrait]) -> Self {
        let mut slots = Self::new();
        for (i, t) in traits.iter().take(4).enumerate() {
            let _ = slots.equip(i, *t);
        }
        slots
    }

    /// Equip a badge to a specific slot
    pub fn equip(&mut self, slot: usize, trait_: EquippedTrait) -> Result<(), TraitError> {
        if slot >= 4 {
            return Err(TraitError::InvalidSlot);
        }
        if self.has_trait(trait_.id) {
            return Err(TraitError::DuplicateTrait);
        }
        self.slots[slot] = Some(trait_);
        Ok(())
    }

    /// Remove badge from slot
    pub fn unequip(&mut self, slot: usize) -> Option<EquippedTrait> {
        self.slots.get_mut(slot).and_then(|s| s.take())
    }

    /// Check if player has a specific badge
    pub fn has_trait(&self, id: TraitId) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.map(|t| t.id == id).unwrap_or(false))
    }

    /// Badge tier if equipped
    pub fn trait_tier(&self, id: TraitId) -> Option<TraitTier> {
        self.equipped().find(|t| t.id == id).map(|t| t.tier)
    }

    /// All equipped badges
    pub fn equipped(&self) -> impl Iterator<Item = &EquippedTrait> {
        self.slots.iter().filter_map(|t| t.as_ref())
    }

    /// Total passive bonus for a rating, restricted to badges whose
    /// situation gate matches one of `active_situations`.
    pub fn stat_bonus_in(&self, stat: BonusStat, active_situations: &[SituationTag]) -> f32 {
        self.equipped()
            .filter(|t| active_situations.contains(&t.id.situation()))
            .flat_map(|t| t.passive_bonuses())
            .filter(|(s, _)| *s == stat)
            .map(|(_, v)| v)
            .sum()
    }

    /// Total active multiplier for an action across equipped badges.
    pub fn action_multiplier_in(&self, action: ActionType, active_situations: &[SituationTag]) -> f32 {
        self.equipped()
            .filter(|t| active_situations.contains(&t.id.situation()))
            .map(|t| t.active_multiplier(action))
            .product()
    }
}
