//! Rule-based bot: a short fixed priority list over observable state.
//!
//! The plan: dive light, turn around after the first pickup, and only
//! gamble on a second treasure when the air comfortably covers the swim
//! home.

use crate::DecisionEngine;
use abyss_core::{Move, RulesError, State};

pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicBot {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionEngine for HeuristicBot {
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

        let player = &state.players[player_index];
        let oxygen = state.oxygen as usize;
        let position = player.position;
        let carried = player.inventory.len();
        let has = |mv: Move| moves.contains(&mv);

        if moved_this_turn {
            if !player.returning {
                // Never collect on the way down, unless the air is already
                // thinning or the dive is past half depth.
                if has(Move::CollectTreasure) {
                    if oxygen < 23 {
                        return Ok(Move::CollectTreasure);
                    }
                    if position > state.board.len() / 2 && oxygen < 25 {
                        return Ok(Move::CollectTreasure);
                    }
                }
                return Ok(Move::LeaveTreasure);
            }

            // Returning: pick up at most one more treasure, and only while
            // the air still covers the distance home.
            if has(Move::CollectTreasure) && carried < 2 && oxygen > position {
                return Ok(Move::CollectTreasure);
            }
            // Not going to make it at this weight: shed the lightest stack.
            if carried > 1 && has(Move::DropTreasure) && oxygen < position {
                return Ok(Move::DropTreasure);
            }
            return Ok(Move::LeaveTreasure);
        }

        if player.returning {
            return Ok(Move::Return);
        }
        // First treasure aboard: head straight back.
        if carried > 0 && has(Move::Return) {
            return Ok(Move::Return);
        }
        if has(Move::Continue) {
            return Ok(Move::Continue);
        }
        if has(Move::Return) {
            return Ok(Move::Return);
        }
        Ok(moves[0])
    }
}
