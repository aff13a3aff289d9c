//! Chance stream and scoring mode for state transitions.
//!
//! Every `do_move` takes a `&mut TurnContext`; the context owns the dice
//! RNG and decides how treasure chips are valued when a round is scored.
//! Search runs with `ScoringMode::Midpoint` so thousands of concurrent
//! rollouts never draw from (and never corrupt) the shared value pools.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How chip values are produced when scoring a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Draw real chip values from the per-level pools, without replacement.
    Sampled,
    /// Return the fixed per-level midpoint; pools are untouched.
    Midpoint,
}

/// Mutable transition context: dice RNG + scoring mode.
pub struct TurnContext {
    pub rng: ChaCha8Rng,
    pub scoring: ScoringMode,
}

impl TurnContext {
    /// Context for real play: sampled chip values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            scoring: ScoringMode::Sampled,
        }
    }

    /// Context for search rollouts: midpoint chip values.
    pub fn new_search(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            scoring: ScoringMode::Midpoint,
        }
    }

    /// Two independent uniform draws from 1..=3, summed: the dive dice.
    pub fn throw_dice(&mut self) -> u8 {
        self.rng.gen_range(1..=3u8) + self.rng.gen_range(1..=3u8)
    }
}

/// Derive a per-stream seed from a base seed (golden-ratio mixing).
pub fn mix_seed(base: u64, stream: u64) -> u64 {
    base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
