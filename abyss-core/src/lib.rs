//! abyss-core: rules, state representation, chance stream, and configuration
//! for the deep-sea push-your-luck diving game.
//!
//! The simulator is built for tree search: `State::do_move` never mutates its
//! receiver, and all randomness and scoring behavior is threaded through an
//! explicit [`TurnContext`] so concurrent searches stay independent.

pub mod board;
pub mod chance;
pub mod config;
pub mod moves;
pub mod player;
pub mod pools;
pub mod state;

#[cfg(test)]
mod player_tests;

pub use board::{Board, Tile, TreasureStack, FALLEN_LEVEL, TILES_PER_LEVEL};
pub use chance::{mix_seed, ScoringMode, TurnContext};
pub use config::{Config, ConfigError, SearchSettings, SelfplaySettings};
pub use moves::{next_moved_this_turn, Move};
pub use player::Player;
pub use pools::{ValuePools, NUM_LEVELS};
pub use state::{RulesError, State, FALLEN_STACK_SIZE, LAST_ROUND, MAX_OXYGEN, MAX_PLAYERS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
