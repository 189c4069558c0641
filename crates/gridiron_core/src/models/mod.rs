//! Data model for the game simulation engine.
//!
//! Inputs (`SimTeam`, `Player`, `GameSettings`) are owned externally and
//! read-only during a game; outputs (`PlayResult`, `GameStatistics`,
//! `GameResult`) are immutable snapshots produced by the engine.

pub mod coaching;
pub mod game_result;
pub mod play;
pub mod player;
pub mod settings;
pub mod stats;
pub mod team;
pub mod trait_system;

pub use coaching::{CoachingStaff, FacilityBonus};
pub use game_result::GameResult;
pub use play::{
    KeyPlayers, PlayOutcome, PlayResult, PlayType, SnapContext, TeamSide, TriggeredEffect,
    TryResult,
};
pub use player::{Player, PlayerAttributes, Position};
pub use settings::{GameSettings, GameType, HomeFieldIntensity, OvertimeRule, Weather};
pub use stats::{GameStatistics, PlayerGameStats, TeamGameStats};
pub use team::SimTeam;
pub use trait_system::{
    ActionType, BonusStat, EquippedTrait, SituationTag, TraitCategory, TraitId, TraitSlots,
    TraitTier,
};
