//! The composite game state and its transition rules.
//!
//! `do_move` is pure: it clones the receiver, applies one move, and runs
//! terminality processing on the result. That purity is what lets a search
//! tree hold thousands of states that share a common ancestor.

use crate::board::{Board, TreasureStack, FALLEN_LEVEL};
use crate::chance::TurnContext;
use crate::moves::Move;
use crate::player::Player;
use crate::pools::ValuePools;
use thiserror::Error;

/// Shared oxygen supply at the start of every round.
pub const MAX_OXYGEN: u8 = 25;

/// Seats at the table.
pub const MAX_PLAYERS: usize = 6;

/// Index of the final round (rounds are 0, 1, 2).
pub const LAST_ROUND: u8 = 2;

/// Chips per fallen stack formed during loot redistribution.
pub const FALLEN_STACK_SIZE: usize = 3;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("a game seats 1 to {MAX_PLAYERS} divers, got {requested}")]
    InvalidPlayerCount { requested: usize },
    #[error("move {0:?} is not legal in the current state")]
    IllegalMove(Move),
}

/// Full game state. Cheap to clone relative to rollout cost; cloned on
/// every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub players: Vec<Player>,
    pub board: Board,
    pub pools: ValuePools,
    /// Shared oxygen, 0..=25. Only decreases within a round.
    pub oxygen: u8,
    /// 0..=2; the state stays terminal once round 2 ends.
    pub current_round: u8,
    /// Index of the diver to act.
    pub current_player: usize,
    /// Last diver to surface safely this round; opens the next round.
    pub last_player: usize,
}

impl State {
    /// Fresh game. A regulation game seats 2–6 divers; a single diver is
    /// accepted for analysis setups.
    pub fn new(num_players: usize) -> Result<Self, RulesError> {
        if num_players == 0 || num_players > MAX_PLAYERS {
            return Err(RulesError::InvalidPlayerCount {
                requested: num_players,
            });
        }
        Ok(Self {
            players: vec![Player::new(); num_players],
            board: Board::new(),
            pools: ValuePools::new(),
            oxygen: MAX_OXYGEN,
            current_round: 0,
            current_player: 0,
            last_player: 0,
        })
    }

    /// The round ended with no round left to play.
    pub fn is_last_round(&self) -> bool {
        self.current_round >= LAST_ROUND
    }

    /// Oxygen ran out, or every diver still alive is back in the submarine.
    pub fn is_terminal(&self) -> bool {
        if self.oxygen == 0 {
            return true;
        }
        self.players
            .iter()
            .filter(|p| !p.dead)
            .all(|p| p.has_surfaced())
    }

    /// Legal moves for the phase selected by `moved_this_turn`.
    ///
    /// The phase bit is the caller's: `false` asks for the move phase
    /// (swim or turn around), `true` for the action phase on the current
    /// tile. The result is never empty.
    pub fn possible_moves(&self, moved_this_turn: bool) -> Vec<Move> {
        if self.is_terminal() {
            return vec![Move::End];
        }

        let diver = &self.players[self.current_player];

        if !moved_this_turn {
            if diver.has_surfaced() {
                // Safe in the submarine: an explicit pass keeps the turn
                // order intact.
                return vec![Move::LeaveTreasure];
            }
            if diver.returning {
                return vec![Move::Return];
            }
            let mut moves = vec![Move::Continue];
            if !diver.inventory.is_empty()
                || (diver.position > 0 && diver.position == self.board.len())
            {
                moves.push(Move::Return);
            }
            return moves;
        }

        let mut moves = Vec::with_capacity(2);
        if diver.position > 0 {
            if !self.board.is_flipped(diver.position) {
                moves.push(Move::CollectTreasure);
            } else if !diver.inventory.is_empty() {
                moves.push(Move::DropTreasure);
            }
        }
        moves.push(Move::LeaveTreasure);
        moves
    }

    /// Apply one move, returning the successor state. The receiver is
    /// never mutated.
    pub fn do_move(&self, mv: Move, ctx: &mut TurnContext) -> Result<State, RulesError> {
        if mv == Move::End {
            // Terminal bookkeeping already ran when the state became
            // terminal; End is a pure transition marker.
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let mover = next.current_player;

        match mv {
            Move::Continue | Move::Return => {
                let weight = next.players[mover].weight();
                next.oxygen = next.oxygen.saturating_sub(weight as u8);
                if mv == Move::Return {
                    next.players[mover].returning = true;
                }
                let budget = (ctx.throw_dice() as usize).saturating_sub(weight);
                next.players[mover].advance(budget, &mut next.board);
                if next.players[mover].has_surfaced() {
                    next.last_player = mover;
                }
            }
            Move::CollectTreasure => {
                let pos = next.players[mover].position;
                if pos == 0 || next.board.is_flipped(pos) {
                    return Err(RulesError::IllegalMove(mv));
                }
                let tile = next.board.tile_mut(pos);
                tile.flipped = true;
                let mut stack: TreasureStack = std::mem::take(&mut tile.treasure);
                if tile.level < FALLEN_LEVEL {
                    stack.push(tile.level);
                }
                next.players[mover].inventory.push(stack);
            }
            Move::DropTreasure => {
                let pos = next.players[mover].position;
                if pos == 0 {
                    return Err(RulesError::IllegalMove(mv));
                }
                let Some(i) = next.players[mover].lightest_stack() else {
                    return Err(RulesError::IllegalMove(mv));
                };
                let stack = next.players[mover].inventory.remove(i);
                let tile = next.board.tile_mut(pos);
                tile.treasure.extend(stack);
                // The dropped stack becomes collectible treasure here.
                tile.flipped = false;
            }
            Move::LeaveTreasure => {}
            Move::End => unreachable!(),
        }

        if next.is_terminal() {
            if next.is_last_round() {
                next.mark_drowned();
                next.score_survivors(ctx);
            } else {
                next.reset(ctx);
            }
            return Ok(next);
        }

        // Turn passes after the action phase, or after a swim that ended
        // back at the submarine. A swim ending mid-water keeps the turn
        // for the action phase.
        if next.players[mover].position == 0 || !mv.is_swim() {
            next.current_player = (mover + 1) % next.players.len();
        }

        Ok(next)
    }

    /// End the round and roll into the next one: mark drowned divers,
    /// score survivors, shrink the board, sink drowned loot, refill pools
    /// and oxygen, and hand the first turn to the last diver who surfaced.
    pub fn reset(&mut self, ctx: &mut TurnContext) {
        self.mark_drowned();
        self.score_survivors(ctx);
        self.board.remove_collected();
        self.redistribute_treasure();
        for p in &mut self.players {
            p.begin_round();
        }
        self.pools.reset();
        self.oxygen = MAX_OXYGEN;
        self.current_round += 1;
        self.current_player = self.last_player;
    }

    /// Gather every chip carried by divers still in the water into fallen
    /// stacks of up to [`FALLEN_STACK_SIZE`] chips, appended at the deep
    /// end of the board. The drowned inventories are cleared.
    pub fn redistribute_treasure(&mut self) {
        let mut sunk: TreasureStack = Vec::new();
        for p in &mut self.players {
            if p.position != 0 {
                for stack in p.inventory.drain(..) {
                    sunk.extend(stack);
                }
            }
        }
        for chunk in sunk.chunks(FALLEN_STACK_SIZE) {
            self.board.push_fallen(chunk.to_vec());
        }
    }

    fn mark_drowned(&mut self) {
        for p in &mut self.players {
            if p.position != 0 {
                p.dead = true;
            }
        }
    }

    /// Score every surviving diver's chips, in seat order, stack order,
    /// chip order. Draw order is part of the contract under sampled
    /// scoring.
    fn score_survivors(&mut self, ctx: &mut TurnContext) {
        for i in 0..self.players.len() {
            if self.players[i].dead {
                continue;
            }
            let chips: Vec<u8> = self.players[i].inventory.iter().flatten().copied().collect();
            for level in chips {
                let value = self.pools.draw(level, ctx);
                self.players[i].points += value;
            }
        }
    }
}
