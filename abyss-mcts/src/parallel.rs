//! Root-parallel coordinator: fan out workers, sum root tallies, pick.

use crate::worker::{MctsWorker, MoveStats};
use abyss_core::{mix_seed, Move, RulesError, State};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MctsError {
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// UCB1 exploration constant.
    pub exploration_constant: f64,
    /// Rollout budget per decision, split evenly across workers.
    pub total_iterations: u32,
    /// Worker count; 0 means available hardware parallelism (min 1).
    pub num_threads: usize,
    /// Base seed for worker seeding; None seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.41,
            total_iterations: 200_000,
            num_threads: 0,
            seed: None,
        }
    }
}

/// Root-parallel UCT decision engine.
///
/// Workers always roll out under midpoint scoring, so a search never
/// touches the treasure value pools of the state it was handed.
pub struct ParallelMcts {
    exploration: f64,
    iterations_per_thread: u32,
    num_threads: usize,
    rng: ChaCha8Rng,
}

impl ParallelMcts {
    pub fn new(cfg: SearchConfig) -> Result<Self, MctsError> {
        if !(cfg.exploration_constant.is_finite() && cfg.exploration_constant > 0.0) {
            return Err(MctsError::InvalidConfig {
                msg: "exploration_constant must be finite and > 0",
            });
        }
        if cfg.total_iterations == 0 {
            return Err(MctsError::InvalidConfig {
                msg: "total_iterations must be > 0",
            });
        }

        let num_threads = if cfg.num_threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            cfg.num_threads
        };

        let rng = match cfg.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            exploration: cfg.exploration_constant,
            iterations_per_thread: (cfg.total_iterations / num_threads as u32).max(1),
            num_threads,
            rng,
        })
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn iterations_per_thread(&self) -> u32 {
        self.iterations_per_thread
    }

    /// Pick a move for `player_index`. With zero or one legal move no
    /// workers are spawned; otherwise every worker searches the same root
    /// with a distinct seed and the tallies are summed per move.
    pub fn find_best_move(
        &mut self,
        state: &State,
        player_index: usize,
        moved_this_turn: bool,
    ) -> Result<Move, RulesError> {
        let moves = state.possible_moves(moved_this_turn);
        if moves.is_empty() {
            // Defensive: keep the game moving with an explicit pass.
            return Ok(Move::LeaveTreasure);
        }
        if moves.len() == 1 {
            return Ok(moves[0]);
        }

        let base: u64 = self.rng.gen();
        let iterations = self.iterations_per_thread;
        let exploration = self.exploration;

        let results: Vec<Result<Vec<MoveStats>, RulesError>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..self.num_threads)
                .map(|t| {
                    let seed = mix_seed(base, t as u64);
                    s.spawn(move || {
                        let mut worker = MctsWorker::new(iterations, exploration, seed);
                        worker.search(state, player_index, moved_this_turn)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("search worker panicked"))
                .collect()
        });

        let mut tallies: FxHashMap<Move, (u64, f64)> =
            moves.iter().map(|&mv| (mv, (0u64, 0.0f64))).collect();
        for result in results {
            for stat in result? {
                if let Some(t) = tallies.get_mut(&stat.mv) {
                    t.0 += stat.visits;
                    t.1 += stat.wins;
                }
            }
        }

        // Most visits wins; ties fall to the higher win rate, then to
        // legal-move order.
        let mut best = moves[0];
        let mut best_visits = 0u64;
        let mut best_win_rate = -1.0f64;
        for &mv in &moves {
            let (visits, wins) = tallies[&mv];
            let win_rate = if visits > 0 {
                wins / visits as f64
            } else {
                0.0
            };
            if visits > best_visits || (visits == best_visits && win_rate > best_win_rate) {
                best_visits = visits;
                best_win_rate = win_rate;
                best = mv;
            }
        }
        Ok(best)
    }
}
