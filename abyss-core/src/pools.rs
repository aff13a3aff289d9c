//! Per-level treasure value pools.
//!
//! Chips carried in inventories record only their tile level; the actual
//! point value of each chip is decided when a round is scored, by drawing
//! from the level's pool without replacement. Level `L` covers the point
//! range `4L..=4L+3`, with every value present twice: one pool entry per
//! seeded tile of that level.

use crate::chance::{ScoringMode, TurnContext};
use rand::Rng;

/// Number of real treasure tiers (fallen stacks sit above these).
pub const NUM_LEVELS: usize = 4;

/// Reservoirs of undrawn chip values, one per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePools {
    pools: [Vec<i32>; NUM_LEVELS],
}

impl ValuePools {
    pub fn new() -> Self {
        let mut pools: [Vec<i32>; NUM_LEVELS] = Default::default();
        for (level, pool) in pools.iter_mut().enumerate() {
            let lo = 4 * level as i32;
            for v in lo..lo + 4 {
                pool.push(v);
                pool.push(v);
            }
        }
        Self { pools }
    }

    /// Refill every pool to its starting multiset.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fixed value used for level-`level` chips under midpoint scoring.
    pub fn midpoint(level: u8) -> i32 {
        let lo = 4 * level as i32;
        (lo + lo + 3) / 2
    }

    /// Undrawn chips left in a level's pool.
    pub fn remaining(&self, level: u8) -> usize {
        self.pools[level as usize].len()
    }

    /// Value one chip of `level` is worth.
    ///
    /// Under [`ScoringMode::Sampled`] this removes a uniformly chosen entry
    /// from the level's pool; a draw from an empty pool is a rules bug
    /// (chip totals balance in a legal game) and panics. Under
    /// [`ScoringMode::Midpoint`] the pool is untouched.
    pub fn draw(&mut self, level: u8, ctx: &mut TurnContext) -> i32 {
        match ctx.scoring {
            ScoringMode::Midpoint => Self::midpoint(level),
            ScoringMode::Sampled => {
                let pool = &mut self.pools[level as usize];
                if pool.is_empty() {
                    panic!("value pool for level {} is exhausted", level);
                }
                let i = ctx.rng.gen_range(0..pool.len());
                pool.swap_remove(i)
            }
        }
    }
}

impl Default for ValuePools {
    fn default() -> Self {
        Self::new()
    }
}
