//! Deterministic selection helpers.
//!
//! Cosmetic choices (commentary phrasing) must not consume the simulation
//! RNG stream: drawing from it would change play outcomes whenever a
//! phrasing table grows. These helpers hash (seed, play, subcase) instead,
//! so the same seed always produces the same text and never perturbs
//! outcomes.
//!
//! FxHasher is used because the std `DefaultHasher` is not stable across
//! Rust versions, which would break replay comparisons.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

/// Subcase constants - one per call site to avoid collisions.
pub mod subcase {
    pub const RUN_PHRASE: u32 = 0x0100;
    pub const PASS_PHRASE: u32 = 0x0101;
    pub const SACK_PHRASE: u32 = 0x0102;
    pub const KICK_PHRASE: u32 = 0x0103;
    pub const TURNOVER_PHRASE: u32 = 0x0104;
}

/// Deterministically pick an index in `0..options_count`.
///
/// Same (seed, play_number, subcase) always returns the same index.
#[inline]
pub fn deterministic_choice(
    seed: u64,
    play_number: u32,
    subcase: u32,
    options_count: usize,
) -> usize {
    if options_count <= 1 {
        return 0;
    }

    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    play_number.hash(&mut hasher);
    subcase.hash(&mut hasher);
    (hasher.finish() as usize) % options_count
}

/// Deterministically pick one phrase from a table.
#[inline]
pub fn pick_phrase<'a>(
    seed: u64,
    play_number: u32,
    subcase: u32,
    phrases: &[&'a str],
) -> &'a str {
    phrases[deterministic_choice(seed, play_number, subcase, phrases.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_stable() {
        let a = deterministic_choice(12345, 10, subcase::RUN_PHRASE, 8);
        let b = deterministic_choice(12345, 10, subcase::RUN_PHRASE, 8);
        assert_eq!(a, b, "Same inputs must produce same output");
    }

    #[test]
    fn test_choice_in_range() {
        for options in 2..20 {
            let idx = deterministic_choice(12345, 10, subcase::PASS_PHRASE, options);
            assert!(idx < options, "Index {} out of range {}", idx, options);
        }
    }

    #[test]
    fn test_choice_edge_cases() {
        assert_eq!(deterministic_choice(1, 1, subcase::RUN_PHRASE, 0), 0);
        assert_eq!(deterministic_choice(1, 1, subcase::RUN_PHRASE, 1), 0);
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        let mut counts = [0u32; 5];
        for play in 0..1000 {
            counts[deterministic_choice(42, play, subcase::KICK_PHRASE, 5)] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                count > 100 && count < 300,
                "Bucket {} has {} (expected ~200)",
                i,
                count
            );
        }
    }
}
