//! Tuning constants for game simulation.
//!
//! Play-selection thresholds and outcome distributions are deliberately
//! plain constants in one place: they are tuned against the scoring
//! distribution checks in `sim_tests`, not derived from first principles.

// ============================================================
// Field & Game Structure
// ============================================================
pub mod field {
    /// Offense-relative ball position of the own goal line.
    pub const OWN_GOAL: u8 = 0;
    /// Offense-relative ball position of the opponent goal line.
    pub const OPPONENT_GOAL: u8 = 100;
    /// Red zone starts at the opponent 20.
    pub const RED_ZONE: u8 = 80;
    /// Yards to gain for a fresh set of downs.
    pub const FIRST_DOWN_DISTANCE: u8 = 10;
    /// Where a receiving team starts after a touchback.
    pub const KICKOFF_TOUCHBACK_SPOT: u8 = 25;
    pub const PUNT_TOUCHBACK_SPOT: u8 = 20;
    /// Spot of the free kick after a safety.
    pub const SAFETY_FREE_KICK_SPOT: u8 = 20;
    /// Line of scrimmage for a kickoff, kicking-team relative.
    pub const KICKOFF_SPOT: u8 = 35;
    /// Snap-to-holder plus end zone depth added to a field goal attempt.
    pub const FIELD_GOAL_PAD_YARDS: u8 = 17;
}

pub mod clock {
    /// Regulation quarter length in seconds.
    pub const QUARTER_SECS: u16 = 900;
    /// Overtime period length in seconds.
    pub const OVERTIME_SECS: u16 = 600;
    pub const REGULATION_QUARTERS: u8 = 4;
    /// Two-minute mark: hurry-up offense, stopped-clock tendencies.
    pub const TWO_MINUTE_SECS: u16 = 120;

    // Seconds consumed per play archetype (huddle + snap + action).
    pub const RUN_PLAY_MIN: u16 = 28;
    pub const RUN_PLAY_MAX: u16 = 42;
    pub const COMPLETE_PASS_MIN: u16 = 24;
    pub const COMPLETE_PASS_MAX: u16 = 38;
    pub const INCOMPLETE_PASS_MIN: u16 = 5;
    pub const INCOMPLETE_PASS_MAX: u16 = 9;
    pub const HURRY_UP_MIN: u16 = 10;
    pub const HURRY_UP_MAX: u16 = 18;
    pub const KICK_PLAY_SECS: u16 = 6;
    pub const KNEEL_SECS: u16 = 42;
}

pub mod scoring {
    pub const TOUCHDOWN: u8 = 6;
    pub const EXTRA_POINT: u8 = 1;
    pub const TWO_POINT: u8 = 2;
    pub const FIELD_GOAL: u8 = 3;
    pub const SAFETY: u8 = 2;
}

// ============================================================
// Situational Thresholds
// ============================================================
pub mod situations {
    /// Clutch: this late in the 4th quarter (seconds remaining) or any
    /// overtime, with the margin at most `CLUTCH_MARGIN`.
    pub const CLUTCH_CLOCK_SECS: u16 = 300;
    /// One score (touchdown + two-point try).
    pub const CLUTCH_MARGIN: i32 = 8;

    /// 4th-down decision chart: maximum distance-to-go where a coach with
    /// neutral aggressiveness goes for it in opponent territory.
    pub const FOURTH_DOWN_GO_DISTANCE: u8 = 2;
    /// Longest field goal attempt the chart will call (yards).
    pub const MAX_FIELD_GOAL_ATTEMPT: u8 = 58;
    /// Trailing by more than this inside the final two minutes forces
    /// going for it on 4th down regardless of distance.
    pub const DESPERATION_MARGIN: i32 = 3;

    /// Leading team starts killing clock inside this many seconds (4th qtr).
    pub const CLOCK_KILL_SECS: u16 = 240;
    /// Kneel-out window: per kneel the offense burns roughly 40 seconds plus
    /// the opponent's timeouts are ignored (not modeled).
    pub const KNEEL_SECS_PER_DOWN: u16 = 45;
}

// ============================================================
// Outcome Distributions
// ============================================================
pub mod outcomes {
    /// Base completion probability for an even passer/coverage matchup.
    pub const BASE_COMPLETION: f32 = 0.62;
    /// Base sack rate per dropback.
    pub const BASE_SACK_RATE: f32 = 0.055;
    /// Base interception rate per attempt.
    pub const BASE_INT_RATE: f32 = 0.024;
    /// Base fumble rate per carry or completed catch.
    pub const BASE_FUMBLE_RATE: f32 = 0.008;
    /// Chance a fumble is recovered by the defense.
    pub const FUMBLE_LOST_SHARE: f32 = 0.5;

    /// Mean rushing gain for an even matchup (yards).
    pub const RUSH_MEAN: f32 = 4.2;
    pub const RUSH_STDDEV: f32 = 3.4;
    /// Tail probability of a breakaway run.
    pub const BREAKAWAY_CHANCE: f32 = 0.02;

    /// Mean air yards for a standard attempt.
    pub const PASS_AIR_MEAN: f32 = 8.5;
    pub const PASS_AIR_STDDEV: f32 = 5.0;
    /// Mean yards after catch.
    pub const YAC_MEAN: f32 = 4.5;
    pub const YAC_STDDEV: f32 = 3.0;
    /// Deep shot air-yard boost in desperation mode.
    pub const DEEP_SHOT_BONUS: f32 = 12.0;

    /// Sack yardage loss range.
    pub const SACK_LOSS_MIN: f32 = 4.0;
    pub const SACK_LOSS_MAX: f32 = 11.0;

    /// Penalty chance per scrimmage snap (either side).
    pub const BASE_PENALTY_RATE: f32 = 0.06;

    /// Kickoff touchback probability for an average leg.
    pub const KICKOFF_TOUCHBACK: f32 = 0.60;
    /// Kick return touchdown probability (explicitly modeled, rare).
    pub const RETURN_TD_CHANCE: f32 = 0.002;
    /// Mean kick return length from deep in the end zone region.
    pub const KICK_RETURN_MEAN: f32 = 24.0;
    pub const KICK_RETURN_STDDEV: f32 = 7.0;

    /// Gross punt distance for an average leg (yards).
    pub const PUNT_MEAN: f32 = 44.0;
    pub const PUNT_STDDEV: f32 = 6.0;

    /// Extra point make probability for an average kicker.
    pub const BASE_EXTRA_POINT: f32 = 0.94;
    /// Two-point conversion probability for an even matchup.
    pub const BASE_TWO_POINT: f32 = 0.48;
}

pub mod ratings {
    /// Map a 0-99 rating onto 0.0-1.0 for probability math.
    #[inline]
    pub fn normalize(rating: f32) -> f32 {
        (rating / 99.0).clamp(0.0, 1.0)
    }

    /// Symmetric matchup factor in [-1.0, 1.0]: positive favors the
    /// offense-side rating.
    #[inline]
    pub fn matchup(offense: f32, defense: f32) -> f32 {
        ((offense - defense) / 99.0).clamp(-1.0, 1.0)
    }
}
