//! Probability calculation utilities for play resolution.
//!
//! All functions are pure - they take ratings as input and return
//! probabilities or distribution parameters. This allows unit testing
//! without a full `GameSimulator`.
//!
//! Ratings arrive already badge- and modifier-adjusted (0-99 scale, may
//! exceed 99 after bonuses; normalization clamps).

use super::constants::{outcomes, ratings};

// ============================================================================
// Passing
// ============================================================================

/// Completion probability for one attempt.
///
/// `passing_factor` carries the weather/modifier multiplier; `pressured`
/// applies the hurried-throw penalty scaled by quarterback awareness.
#[inline]
pub fn completion_probability(
    throw_accuracy: f32,
    receiver_catching: f32,
    coverage: f32,
    passing_factor: f32,
    pressured: bool,
) -> f32 {
    let offense = throw_accuracy * 0.6 + receiver_catching * 0.4;
    let base = outcomes::BASE_COMPLETION + ratings::matchup(offense, coverage) * 0.25;

    let pressure_penalty = if pressured {
        0.12 * (1.0 - ratings::normalize(throw_accuracy) * 0.5)
    } else {
        0.0
    };

    (base * passing_factor - pressure_penalty).clamp(0.15, 0.85)
}

/// Sack probability per dropback.
#[inline]
pub fn sack_probability(pass_rush: f32, pass_block: f32) -> f32 {
    let base = outcomes::BASE_SACK_RATE + ratings::matchup(pass_rush, pass_block) * 0.05;
    base.clamp(0.01, 0.16)
}

/// Interception probability per attempt (independent of completion).
#[inline]
pub fn interception_probability(
    throw_accuracy: f32,
    defender_awareness: f32,
    desperation: bool,
) -> f32 {
    let base = outcomes::BASE_INT_RATE
        + ratings::matchup(defender_awareness, throw_accuracy) * 0.02;
    // Forced deep balls late in a losing game are picked more often.
    let base = if desperation { base * 1.6 } else { base };
    base.clamp(0.004, 0.09)
}

// ============================================================================
// Ball Security
// ============================================================================

/// Fumble probability per carry or completed catch.
#[inline]
pub fn fumble_probability(carrying: f32, tackling: f32, weather_bonus: f32) -> f32 {
    let base = outcomes::BASE_FUMBLE_RATE
        + ratings::matchup(tackling, carrying) * 0.006
        + weather_bonus;
    base.clamp(0.001, 0.05)
}

// ============================================================================
// Rushing
// ============================================================================

/// Mean rushing gain for this matchup (yards). Sampled around by the
/// resolver with `outcomes::RUSH_STDDEV`.
#[inline]
pub fn expected_rush_gain(rush_offense: f32, rush_defense: f32) -> f32 {
    outcomes::RUSH_MEAN + ratings::matchup(rush_offense, rush_defense) * 2.5
}

// ============================================================================
// Kicking
// ============================================================================

/// Field goal make probability from attempt distance (yards).
///
/// Distance-banded base rate, scaled by kicker ratings and the weather
/// kicking factor.
#[inline]
pub fn field_goal_probability(
    kick_accuracy: f32,
    kick_power: f32,
    distance: f32,
    kicking_factor: f32,
) -> f32 {
    let base = if distance < 30.0 {
        0.96
    } else if distance < 40.0 {
        0.88
    } else if distance < 48.0 {
        0.77
    } else if distance < 53.0 {
        0.62
    } else if distance < 58.0 {
        0.48
    } else {
        0.30
    };

    // Long attempts lean on leg strength, short ones on accuracy.
    let power_weight = ((distance - 35.0) / 30.0).clamp(0.0, 0.6);
    let skill = ratings::normalize(kick_accuracy) * (1.0 - power_weight)
        + ratings::normalize(kick_power) * power_weight;

    let prob = base * (0.72 + skill * 0.40) * kicking_factor;
    prob.clamp(0.02, 0.99)
}

/// Extra point make probability.
#[inline]
pub fn extra_point_probability(kick_accuracy: f32, kicking_factor: f32) -> f32 {
    let prob =
        outcomes::BASE_EXTRA_POINT * (0.9 + ratings::normalize(kick_accuracy) * 0.12) * kicking_factor;
    prob.clamp(0.75, 0.995)
}

/// Two-point conversion probability for this matchup.
#[inline]
pub fn two_point_probability(offense_strength: f32, defense_strength: f32) -> f32 {
    let prob =
        outcomes::BASE_TWO_POINT + ratings::matchup(offense_strength, defense_strength) * 0.15;
    prob.clamp(0.25, 0.70)
}

/// Mean gross punt distance (yards).
#[inline]
pub fn expected_punt_distance(kick_power: f32, kicking_factor: f32) -> f32 {
    (outcomes::PUNT_MEAN + (ratings::normalize(kick_power) - 0.6) * 12.0) * kicking_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_favors_better_offense() {
        let even = completion_probability(75.0, 75.0, 75.0, 1.0, false);
        let strong = completion_probability(95.0, 90.0, 60.0, 1.0, false);
        let weak = completion_probability(55.0, 55.0, 90.0, 1.0, false);
        assert!(strong > even);
        assert!(weak < even);
    }

    #[test]
    fn test_completion_pressure_penalty() {
        let calm = completion_probability(80.0, 80.0, 75.0, 1.0, false);
        let hurried = completion_probability(80.0, 80.0, 75.0, 1.0, true);
        assert!(hurried < calm);
    }

    #[test]
    fn test_completion_clamped() {
        let p = completion_probability(150.0, 150.0, 0.0, 1.2, false);
        assert!(p <= 0.85);
        let p = completion_probability(0.0, 0.0, 150.0, 0.8, true);
        assert!(p >= 0.15);
    }

    #[test]
    fn test_field_goal_distance_dropoff() {
        let short = field_goal_probability(80.0, 80.0, 25.0, 1.0);
        let medium = field_goal_probability(80.0, 80.0, 45.0, 1.0);
        let long = field_goal_probability(80.0, 80.0, 57.0, 1.0);
        assert!(short > medium);
        assert!(medium > long);
        assert!(short > 0.9);
    }

    #[test]
    fn test_field_goal_weather_penalty() {
        let clear = field_goal_probability(85.0, 85.0, 45.0, 1.0);
        let windy = field_goal_probability(85.0, 85.0, 45.0, 0.90);
        assert!(windy < clear);
    }

    #[test]
    fn test_interception_desperation_multiplier() {
        let normal = interception_probability(80.0, 75.0, false);
        let desperate = interception_probability(80.0, 75.0, true);
        assert!(desperate > normal);
    }

    #[test]
    fn test_fumble_bounds() {
        let p = fumble_probability(0.0, 150.0, 0.05);
        assert!(p <= 0.05);
        let p = fumble_probability(150.0, 0.0, 0.0);
        assert!(p >= 0.001);
    }

    #[test]
    fn test_expected_rush_gain_even_matchup() {
        let gain = expected_rush_gain(75.0, 75.0);
        assert!((gain - 4.2).abs() < 0.01);
    }
}
