//! The ocean floor: an ordered sequence of treasure tiles.
//!
//! Positions are 1-indexed; position 0 is the submarine and is never a
//! tile. The board shrinks between rounds as collected tiles are removed
//! and grows at the tail when drowned divers' loot sinks back down.

use crate::pools::NUM_LEVELS;

/// Number of tiles seeded per level at game start.
pub const TILES_PER_LEVEL: usize = 8;

/// Tile level used for stacks formed from drowned divers' loot. Such tiles
/// have no base value of their own.
pub const FALLEN_LEVEL: u8 = NUM_LEVELS as u8;

/// A pile of treasure chips, each chip recorded as its tile level.
pub type TreasureStack = Vec<u8>;

/// One tile on the ocean floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Base treasure tier 0..=3, or [`FALLEN_LEVEL`] for a fallen stack.
    pub level: u8,
    /// Set once the tile's treasure has been picked up.
    pub flipped: bool,
    /// Set while a diver stands here; movement skips occupied tiles.
    pub occupied: bool,
    /// Chips deposited on the tile. Empty for fresh level 0..=3 tiles.
    pub treasure: TreasureStack,
}

impl Tile {
    fn fresh(level: u8) -> Self {
        Self {
            level,
            flipped: false,
            occupied: false,
            treasure: Vec::new(),
        }
    }

    /// A level-4 tile holding chips recovered from drowned divers.
    pub fn fallen(treasure: TreasureStack) -> Self {
        Self {
            level: FALLEN_LEVEL,
            flipped: false,
            occupied: false,
            treasure,
        }
    }
}

/// Ordered tile sequence, submarine-side first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub tiles: Vec<Tile>,
}

impl Board {
    /// Fresh board: [`TILES_PER_LEVEL`] tiles of each level, shallowest first.
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(NUM_LEVELS * TILES_PER_LEVEL);
        for level in 0..NUM_LEVELS as u8 {
            for _ in 0..TILES_PER_LEVEL {
                tiles.push(Tile::fresh(level));
            }
        }
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn index(&self, position: usize) -> usize {
        assert!(
            position >= 1 && position <= self.tiles.len(),
            "position {} is not a tile (board has {} tiles)",
            position,
            self.tiles.len()
        );
        position - 1
    }

    /// Tile at a 1-indexed position. Fails fast on the submarine (0) or
    /// past the board edge; the caller is the bug site.
    pub fn tile(&self, position: usize) -> &Tile {
        &self.tiles[self.index(position)]
    }

    pub fn tile_mut(&mut self, position: usize) -> &mut Tile {
        let i = self.index(position);
        &mut self.tiles[i]
    }

    pub fn is_flipped(&self, position: usize) -> bool {
        self.tile(position).flipped
    }

    pub fn is_occupied(&self, position: usize) -> bool {
        self.tile(position).occupied
    }

    pub fn set_occupied(&mut self, position: usize, occupied: bool) {
        self.tile_mut(position).occupied = occupied;
    }

    /// Inter-round shrink: drop every flipped tile, preserving order, and
    /// clear occupancy on the survivors.
    pub fn remove_collected(&mut self) {
        self.tiles.retain(|t| !t.flipped);
        for tile in &mut self.tiles {
            tile.occupied = false;
        }
    }

    /// Append a fallen stack at the deep end of the board.
    pub fn push_fallen(&mut self, treasure: TreasureStack) {
        self.tiles.push(Tile::fallen(treasure));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
