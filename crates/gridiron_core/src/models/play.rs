//! Play-level output data structures.
//!
//! A `PlayResult` is the unit of simulation output: one snap, fully
//! resolved. Results are immutable once produced and appended to the
//! orchestrator's ordered play log.

use super::trait_system::TraitId;
use serde::{Deserialize, Serialize};

/// Which sideline a team occupies for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    #[inline]
    pub fn is_home(self) -> bool {
        matches!(self, TeamSide::Home)
    }
}

/// Play archetype chosen by the play-call policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Kickoff,
    Run,
    Pass,
    Punt,
    FieldGoal,
    Kneel,
}

/// Outcome category of a resolved play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayOutcome {
    /// Yardage gained or lost, nothing special.
    Normal,
    Incompletion,
    Sack,
    Touchdown,
    FieldGoalGood,
    FieldGoalMissed,
    Interception,
    Fumble,
    Safety,
    Penalty,
    Touchback,
    /// Kick or punt returned all the way.
    ReturnTouchdown,
}

impl PlayOutcome {
    /// Does this outcome hand the ball to the other team?
    pub fn is_turnover(&self) -> bool {
        matches!(self, PlayOutcome::Interception | PlayOutcome::Fumble)
    }

    pub fn is_score(&self) -> bool {
        matches!(
            self,
            PlayOutcome::Touchdown
                | PlayOutcome::FieldGoalGood
                | PlayOutcome::Safety
                | PlayOutcome::ReturnTouchdown
        )
    }
}

/// Outcome of the try after a touchdown, resolved within the scoring play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryResult {
    ExtraPointGood,
    ExtraPointMissed,
    TwoPointGood,
    TwoPointFailed,
}

impl TryResult {
    pub fn points(&self) -> u8 {
        match self {
            TryResult::ExtraPointGood => 1,
            TryResult::TwoPointGood => 2,
            TryResult::ExtraPointMissed | TryResult::TwoPointFailed => 0,
        }
    }
}

/// A badge/modifier that fired on the most recent play.
///
/// Short-lived presentation payload ("badge activated" feedback); not part
/// of game-state invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggeredEffect {
    pub team: TeamSide,
    /// Player the effect belongs to, when it is player-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub trait_id: TraitId,
    pub description: String,
}

/// Players credited on a play, keyed by roster id.
///
/// Filled by the play resolver so the stat accumulator never has to re-draw
/// randomness: replaying the same `PlayResult` yields the same attribution.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KeyPlayers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rusher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kicker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returner: Option<String>,
    /// Tackler, sacker, or turnover-forcing defender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defender: Option<String>,
}

/// Game-state snapshot at the snap, embedded in every result for display
/// and replay purposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SnapContext {
    pub quarter: u8,
    pub overtime: bool,
    /// Seconds remaining in the quarter at the snap.
    pub clock: u16,
    pub down: u8,
    pub distance: u8,
    /// Offense-relative ball position (0 = own goal line, 100 = opponent's).
    pub ball_position: u8,
}

/// One fully resolved play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayResult {
    /// Index in the game's play log (0-based).
    pub play_number: u32,
    pub offense: TeamSide,
    pub play_type: PlayType,
    pub outcome: PlayOutcome,
    /// Net yards from the offense's perspective (negative for losses).
    pub yards: i16,
    /// Points produced by this play, credited to `scoring_side`.
    pub points: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_side: Option<TeamSide>,
    /// Game-clock seconds consumed by the play.
    pub elapsed: u16,
    pub snap: SnapContext,
    pub players: KeyPlayers,
    /// Try resolved as part of a touchdown play, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_result: Option<TryResult>,
    /// Override for the offense-relative spot the ball ends at when simple
    /// `snap position + yards` does not apply (kickoffs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_spot: Option<u8>,
    /// Spot where the new offense takes over, new-offense-relative, for
    /// plays that flip possession in the field of play (punt, interception,
    /// fumble, missed field goal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover_spot: Option<u8>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggered_effects: Vec<TriggeredEffect>,
}

impl PlayResult {
    /// Whether this play counts toward offensive scrimmage yardage.
    pub fn is_scrimmage_play(&self) -> bool {
        matches!(
            self.play_type,
            PlayType::Run | PlayType::Pass | PlayType::Kneel
        ) && self.outcome != PlayOutcome::Penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.opponent(), TeamSide::Home);
    }

    #[test]
    fn test_outcome_classification() {
        assert!(PlayOutcome::Interception.is_turnover());
        assert!(PlayOutcome::Fumble.is_turnover());
        assert!(!PlayOutcome::Sack.is_turnover());
        assert!(PlayOutcome::Safety.is_score());
        assert!(!PlayOutcome::Incompletion.is_score());
    }
}
