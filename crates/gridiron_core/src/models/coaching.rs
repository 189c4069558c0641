//! Coaching-staff and facility modifier bundles.
//!
//! These are produced by external subsystems (staff hiring, franchise
//! facilities). The engine treats them as opaque numeric bonuses: a typed
//! value object with enumerated fields, defaulting to neutral (zero-effect)
//! values when a team arrives without one.

use serde::{Deserialize, Serialize};

/// Coaching-staff bundle attached to a `SimTeam`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CoachingStaff {
    /// How well the offensive roster fits the coordinator's scheme (0.0-1.0,
    /// neutral 0.5). Scales offensive effectiveness a few percent either way.
    pub offense_scheme_fit: f32,
    /// Defensive counterpart of `offense_scheme_fit`.
    pub defense_scheme_fit: f32,
    /// Head coach 4th-down aggressiveness (0.0 conservative - 1.0 gambler).
    /// Shifts the go-for-it thresholds in the play-call chart.
    pub aggressiveness: f32,
    /// Late-game clock management quality (0.0-1.0, neutral 0.5). Reduces
    /// wasted clock when trailing, burns more when leading.
    pub clock_management: f32,
}

impl Default for CoachingStaff {
    fn default() -> Self {
        Self {
            offense_scheme_fit: 0.5,
            defense_scheme_fit: 0.5,
            aggressiveness: 0.5,
            clock_management: 0.5,
        }
    }
}

impl CoachingStaff {
    /// Clamp every field into its documented range, replacing non-finite
    /// input with the neutral value. External bundles are not trusted.
    pub fn sanitized(&self) -> Self {
        Self {
            offense_scheme_fit: clamp_finite(self.offense_scheme_fit, 0.0, 1.0, 0.5),
            defense_scheme_fit: clamp_finite(self.defense_scheme_fit, 0.0, 1.0, 0.5),
            aggressiveness: clamp_finite(self.aggressiveness, 0.0, 1.0, 0.5),
            clock_management: clamp_finite(self.clock_management, 0.0, 1.0, 0.5),
        }
    }
}

/// Facility bundle attached to a `SimTeam`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FacilityBonus {
    /// Training facility quality (0.0-1.0, neutral 0.5). Small flat bump to
    /// both effective strengths.
    pub training: f32,
    /// Recovery/medical quality (0.0-1.0, neutral 0.5). Dampens the late-game
    /// stamina fade.
    pub recovery: f32,
    /// Stadium crowd factor (0.0-1.0, neutral 0.5). Scales the home-field
    /// bonus on top of the game-level intensity setting.
    pub home_crowd: f32,
}

impl Default for FacilityBonus {
    fn default() -> Self {
        Self {
            training: 0.5,
            recovery: 0.5,
            home_crowd: 0.5,
        }
    }
}

impl FacilityBonus {
    pub fn sanitized(&self) -> Self {
        Self {
            training: clamp_finite(self.training, 0.0, 1.0, 0.5),
            recovery: clamp_finite(self.recovery, 0.0, 1.0, 0.5),
            home_crowd: clamp_finite(self.home_crowd, 0.0, 1.0, 0.5),
        }
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if !value.is_finite() {
        return default;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        let staff = CoachingStaff::default();
        assert_eq!(staff.offense_scheme_fit, 0.5);
        assert_eq!(staff.aggressiveness, 0.5);
        let facility = FacilityBonus::default();
        assert_eq!(facility.home_crowd, 0.5);
    }

    #[test]
    fn test_sanitized_rejects_nan_and_out_of_range() {
        let staff = CoachingStaff {
            offense_scheme_fit: f32::NAN,
            defense_scheme_fit: 7.0,
            aggressiveness: -1.0,
            clock_management: 0.9,
        };
        let clean = staff.sanitized();
        assert_eq!(clean.offense_scheme_fit, 0.5);
        assert_eq!(clean.defense_scheme_fit, 1.0);
        assert_eq!(clean.aggressiveness, 0.0);
        assert_eq!(clean.clock_management, 0.9);
    }
}
