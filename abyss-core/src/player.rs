//! Per-diver state and movement.

use crate::board::{Board, TreasureStack};

/// One diver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// 0 = submarine, k = the k-th tile from the submarine.
    pub position: usize,
    /// Set once the diver has turned back (or was forced around at the
    /// board edge). Cannot be unset within a round.
    pub returning: bool,
    /// Set when the diver was still in the water as oxygen hit zero.
    pub dead: bool,
    /// Carried treasure, one stack per pickup. A stack is atomic for DROP.
    pub inventory: Vec<TreasureStack>,
    /// Points accumulated across rounds.
    pub points: i32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: 0,
            returning: false,
            dead: false,
            inventory: Vec::new(),
            points: 0,
        }
    }

    /// Carried stack count; this is both the oxygen cost of a swim move
    /// and the dice malus.
    pub fn weight(&self) -> usize {
        self.inventory.len()
    }

    /// A returning diver back at the submarine is safe for the round.
    pub fn has_surfaced(&self) -> bool {
        self.returning && self.position == 0
    }

    /// Back into the submarine for a new round. Points persist.
    pub fn begin_round(&mut self) {
        self.position = 0;
        self.returning = false;
        self.dead = false;
        self.inventory.clear();
    }

    /// Index of the lowest-valued inventory stack (sum of chip levels,
    /// first-seen on ties), if any.
    pub fn lightest_stack(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, stack) in self.inventory.iter().enumerate() {
            let sum: u32 = stack.iter().map(|&c| c as u32).sum();
            match best {
                Some((_, b)) if sum >= b => {}
                _ => best = Some((i, sum)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Move `steps` tiles in the diver's current direction.
    ///
    /// Occupied tiles are passed over without consuming a step. Forward
    /// motion past the deep end clamps to the last free tile and forces
    /// the returning flag; backward motion reaching the submarine consumes
    /// the remaining budget. Occupancy on the board is kept in sync.
    pub fn advance(&mut self, steps: usize, board: &mut Board) {
        let mut remaining = steps;

        if self.position > 0 {
            board.set_occupied(self.position, false);
        }

        while remaining > 0 {
            if self.returning {
                if self.position == 0 {
                    break;
                }
                self.position -= 1;
                if self.position == 0 {
                    break;
                }
                if !board.is_occupied(self.position) {
                    remaining -= 1;
                }
            } else {
                self.position += 1;
                if self.position > board.len() {
                    self.position = board.len();
                    while self.position > 0 && board.is_occupied(self.position) {
                        self.position -= 1;
                    }
                    self.returning = true;
                    break;
                }
                if !board.is_occupied(self.position) {
                    remaining -= 1;
                }
            }
        }

        if self.position > 0 {
            board.set_occupied(self.position, true);
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
