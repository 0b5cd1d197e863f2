//! Block catalog: shapes, colors, and rotation offset tables
//!
//! Rotation tables are relative: applying table `k` to the cells of rotation
//! step `k - 1` yields the cells of step `k`. The four tables of a shape sum
//! to zero per cell, so a full cycle returns the block to its base shape.

use crate::board::{Cell, GRID_WIDTH};
use serde::{Deserialize, Serialize};

/// Color tag for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
    White,
}

/// Block shapes: the 7 playable tetrominoes and the injected garbage row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    Garbage,
}

/// Immutable shape template
#[derive(Debug)]
pub struct BlockType {
    /// Cells of the unrotated shape, anchored at the top-left of the grid
    pub base: &'static [Cell],
    pub color: Color,
    /// Preview extents in cells
    pub width: i32,
    pub height: i32,
    /// One delta per cell for each rotation step
    pub rotations: &'static [[Cell; 4]],
}

/// Playable shapes in catalog order
pub const CATALOG: [BlockKind; 7] = [
    BlockKind::I,
    BlockKind::J,
    BlockKind::L,
    BlockKind::O,
    BlockKind::S,
    BlockKind::T,
    BlockKind::Z,
];

const fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

static I_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(2, 0), c(3, 0)],
    color: Color::Cyan,
    width: 4,
    height: 1,
    rotations: &[
        [c(-1, -2), c(0, -1), c(1, 0), c(2, 1)],
        [c(2, -1), c(1, 0), c(0, 1), c(-1, 2)],
        [c(1, 2), c(0, 1), c(-1, 0), c(-2, -1)],
        [c(-2, 1), c(-1, 0), c(0, -1), c(1, -2)],
    ],
};

static J_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(2, 0), c(2, 1)],
    color: Color::Blue,
    width: 3,
    height: 2,
    rotations: &[
        [c(-1, -1), c(0, 0), c(1, 1), c(0, 2)],
        [c(1, -1), c(0, 0), c(-1, 1), c(-2, 0)],
        [c(1, 2), c(0, 1), c(-1, 0), c(0, -1)],
        [c(-1, 0), c(0, -1), c(1, -2), c(2, -1)],
    ],
};

static L_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(2, 0), c(0, 1)],
    color: Color::Orange,
    width: 3,
    height: 2,
    rotations: &[
        [c(-1, -1), c(0, 0), c(1, 1), c(-2, 0)],
        [c(1, -1), c(0, 0), c(-1, 1), c(0, -2)],
        [c(1, 2), c(0, 1), c(-1, 0), c(2, 1)],
        [c(-1, 0), c(0, -1), c(1, -2), c(0, 1)],
    ],
};

static O_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(0, 1), c(1, 1)],
    color: Color::Yellow,
    width: 2,
    height: 2,
    rotations: &[[c(0, 0), c(0, 0), c(0, 0), c(0, 0)]],
};

static S_BLOCK: BlockType = BlockType {
    base: &[c(1, 0), c(2, 0), c(0, 1), c(1, 1)],
    color: Color::Green,
    width: 3,
    height: 2,
    rotations: &[
        [c(1, -1), c(2, 0), c(-1, -1), c(0, 0)],
        [c(1, 1), c(0, 2), c(1, -1), c(0, 0)],
        [c(-1, 1), c(-2, 0), c(1, 1), c(0, 0)],
        [c(-1, -1), c(0, -2), c(-1, 1), c(0, 0)],
    ],
};

static T_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(2, 0), c(1, 1)],
    color: Color::Purple,
    width: 3,
    height: 2,
    rotations: &[
        [c(-1, -1), c(0, 0), c(1, 1), c(-1, 1)],
        [c(1, -1), c(0, 0), c(-1, 1), c(-1, -1)],
        [c(1, 2), c(0, 1), c(-1, 0), c(1, 0)],
        [c(-1, 0), c(0, -1), c(1, -2), c(1, 0)],
    ],
};

static Z_BLOCK: BlockType = BlockType {
    base: &[c(0, 0), c(1, 0), c(1, 1), c(2, 1)],
    color: Color::Red,
    width: 3,
    height: 2,
    rotations: &[
        [c(0, -2), c(1, -1), c(0, 0), c(1, 1)],
        [c(2, 0), c(1, 1), c(0, 0), c(-1, 1)],
        [c(0, 2), c(-1, 1), c(0, 0), c(-1, -1)],
        [c(-2, 0), c(-1, -1), c(0, 0), c(1, -1)],
    ],
};

// Cells are generated per injection (one gap per row), so the template is empty.
static GARBAGE_BLOCK: BlockType = BlockType {
    base: &[],
    color: Color::White,
    width: GRID_WIDTH,
    height: 1,
    rotations: &[],
};

impl BlockKind {
    /// The static template for this shape
    pub fn block_type(self) -> &'static BlockType {
        match self {
            BlockKind::I => &I_BLOCK,
            BlockKind::J => &J_BLOCK,
            BlockKind::L => &L_BLOCK,
            BlockKind::O => &O_BLOCK,
            BlockKind::S => &S_BLOCK,
            BlockKind::T => &T_BLOCK,
            BlockKind::Z => &Z_BLOCK,
            BlockKind::Garbage => &GARBAGE_BLOCK,
        }
    }

    pub fn color(self) -> Color {
        self.block_type().color
    }

    /// Number of rotation steps before the shape cycles back (0 for garbage)
    pub fn rotation_count(self) -> usize {
        self.block_type().rotations.len()
    }

    /// Base cells rotated forward `rotation_state` steps from rotation 0
    pub fn rotated_base(self, rotation_state: usize) -> Vec<Cell> {
        let block_type = self.block_type();
        block_type
            .base
            .iter()
            .enumerate()
            .map(|(i, &cell)| {
                block_type
                    .rotations
                    .iter()
                    .take(rotation_state + 1)
                    .skip(1)
                    .fold(cell, |acc, table| acc.offset(table[i].x, table[i].y))
            })
            .collect()
    }
}

/// Look up a playable shape by catalog index.
///
/// Callers pass indices drawn with `generate_prn(seed, CATALOG.len() - 1)`.
pub fn get_block_type(index: usize) -> BlockKind {
    CATALOG[index % CATALOG.len()]
}
