//! RNG seed derivation utilities for reproducible matches.
//!
//! Every round's randomness flows from a single match seed, so a match can be
//! replayed from its seed and the sequence of player actions.

/// Derive a seed for dealing (trump draw and hands) in a round.
///
/// # Arguments
///
/// * `match_seed` - Base seed chosen when the engine was created
/// * `match_no` - How many matches this engine has started (1-based)
/// * `round_no` - Round number (1-based)
///
/// # Returns
///
/// Derived seed that is unique per (match, round) combination.
pub fn derive_dealing_seed(match_seed: u64, match_no: u64, round_no: u8) -> u64 {
    // Different multipliers keep match and round contributions apart
    match_seed
        .wrapping_add(match_no.wrapping_mul(1_000_003))
        .wrapping_add((round_no as u64).wrapping_mul(1_000))
        .wrapping_add(2)
}
