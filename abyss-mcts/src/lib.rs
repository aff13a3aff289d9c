//! abyss-mcts: root-parallel UCT search over the abyss game simulator.
//!
//! Each worker thread grows its own tree in its own arena with its own RNG;
//! there is no shared mutable state in the hot path. Trees are combined by
//! summing visit counts at the root's children. Workers roll out under
//! midpoint scoring, so concurrent searches never draw from the treasure
//! value pools.

pub mod arena;
pub mod node;
pub mod parallel;
pub mod worker;

#[cfg(test)]
mod parallel_tests;
#[cfg(test)]
mod worker_tests;

pub use arena::NodePool;
pub use node::{Node, NodeId, MAX_CHILDREN};
pub use parallel::{MctsError, ParallelMcts, SearchConfig};
pub use worker::{MctsWorker, MoveStats};

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
