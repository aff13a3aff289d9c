//! abyss-agents: the decision-engine contract and its non-search
//! implementations, plus a headless driver that seats engines against each
//! other.

pub mod driver;
pub mod flat;
pub mod heuristic;


use abyss_core::{Move, RulesError, State};
use abyss_mcts::ParallelMcts;

pub use driver::{play_game, GameOutcome};
pub use flat::FlatMonteCarlo;
pub use heuristic::HeuristicBot;

/// Anything that can pick a move for the diver to act.
///
/// Preconditions: `player_index == state.current_player` and
/// `moved_this_turn` matches the phase the state is in. The returned move
/// is always contained in `state.possible_moves(moved_this_turn)`; on an
/// empty legal set (which the simulator never produces, but defensive
/// callers may) engines pass with `LeaveTreasure`.
pub trait DecisionEngine {
    fn find_best_move(
        &mut self,
        state: &State,
        player_index: usize,
        moved_this_turn: bool,
    ) -> Result<Move, RulesError>;
}

impl DecisionEngine for ParallelMcts {
    fn find_best_move(
        &mut self,
        state: &State,
        player_index: usize,
        moved_this_turn: bool,
    ) -> Result<Move, RulesError> {
        ParallelMcts::find_best_move(self, state, player_index, moved_this_turn)
    }
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
