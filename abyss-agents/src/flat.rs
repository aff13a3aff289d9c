//! Flat Monte-Carlo baseline: no tree, just uniform playouts per move.

use crate::DecisionEngine;
use abyss_core::{next_moved_this_turn, Move, RulesError, State, TurnContext};
use rand::Rng;

/// Safety cap on playout length.
const MAX_ROLLOUT_STEPS: u32 = 10_000;

/// Plays every legal move `rollouts_per_move` times to the end of the game
/// and keeps the one with the best win rate for the perspective player.
pub struct FlatMonteCarlo {
    rollouts_per_move: u32,
    ctx: TurnContext,
}

impl FlatMonteCarlo {
    pub fn new(rollouts_per_move: u32, seed: u64) -> Self {
        Self {
            rollouts_per_move: rollouts_per_move.max(1),
            // Midpoint scoring: playouts must not drain the value pools.
            ctx: TurnContext::new_search(seed),
        }
    }

    /// Uniform random playout; 1.0 if `player_index` ends with the (first)
    /// maximal score, else 0.0.
    fn rollout(
        &mut self,
        mut state: State,
        mut moved: bool,
        player_index: usize,
    ) -> Result<f64, RulesError> {
        let mut steps = 0;
        while !(state.is_terminal() && state.is_last_round()) && steps < MAX_ROLLOUT_STEPS {
            let moves = state.possible_moves(moved);
            if moves.is_empty() {
                // Defensive recovery: pass so the playout keeps moving.
                state = state.do_move(Move::LeaveTreasure, &mut self.ctx)?;
                moved = false;
                steps += 1;
                continue;
            }
            if moves[0] == Move::End {
                state = state.do_move(Move::End, &mut self.ctx)?;
                moved = false;
                steps += 1;
                continue;
            }

            let mv = moves[self.ctx.rng.gen_range(0..moves.len())];
            let prev = state.current_player;
            state = state.do_move(mv, &mut self.ctx)?;
            moved = next_moved_this_turn(mv, prev, state.current_player);
            steps += 1;
        }

        let mut winner = 0;
        let mut best = i32::MIN;
        for (i, p) in state.players.iter().enumerate() {
            if p.points > best {
                best = p.points;
                winner = i;
            }
        }
        Ok(if winner == player_index { 1.0 } else { 0.0 })
    }
}

impl DecisionEngine for FlatMonteCarlo {
    fn find_best_move(
        &mut self,
        state: &State,
        player_index: usize,
        moved_this_turn: bool,
    ) -> Result<Move, RulesError> {
        let moves = state.possible_moves(moved_this_turn);
        if moves.is_empty() {
            return Ok(Move::LeaveTreasure);
        }
        if moves.len() == 1 {
            return Ok(moves[0]);
        }

        let mut best_move = moves[0];
        let mut best_win_rate = -1.0;

        for &mv in &moves {
            let mut wins = 0.0;
            for _ in 0..self.rollouts_per_move {
                let next = state.do_move(mv, &mut self.ctx)?;
                let moved = next_moved_this_turn(mv, state.current_player, next.current_player);
                wins += self.rollout(next, moved, player_index)?;
            }
            let win_rate = wins / self.rollouts_per_move as f64;
            if win_rate > best_win_rate {
                best_win_rate = win_rate;
                best_move = mv;
            }
        }

        Ok(best_move)
    }
}
