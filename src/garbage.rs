//! Garbage rows: lift the stack and push in a near-full row with one gap

use crate::block::BlockState;
use crate::board::{settled_cells, Cell, GRID_HEIGHT, GRID_WIDTH};
use crate::rng::generate_prn;
use crate::tetromino::BlockKind;

/// Garbage countdown at the start of a game
pub const DEFAULT_TIME_UNTIL_GARBAGE: u32 = 31;
/// Floor for the countdown at high levels
pub const MIN_GARBAGE_ADD_INTERVAL: u32 = 5;

/// Ticks between injections at `level`
pub fn garbage_interval(level: u32) -> u32 {
    DEFAULT_TIME_UNTIL_GARBAGE
        .saturating_sub(level)
        .max(MIN_GARBAGE_ADD_INTERVAL)
}

/// Move every cell up one row
pub fn lift_blocks(blocks: &[BlockState]) -> Vec<BlockState> {
    blocks.iter().map(|block| block.translated(0, -1)).collect()
}

/// A bottom row with a single gap at a column drawn from `seed`
pub fn garbage_row(seed: u64) -> BlockState {
    let gap = generate_prn(seed, (GRID_WIDTH - 1) as usize) as i32;
    BlockState::with_cells(
        BlockKind::Garbage,
        (0..GRID_WIDTH)
            .filter(|&x| x != gap)
            .map(|x| Cell::new(x, GRID_HEIGHT - 1))
            .collect(),
    )
}

/// Lift the stack and append a garbage row.
///
/// Returns the new settled blocks and the falling block, pushed up with the
/// stack if the lifted cells would otherwise land on it.
pub fn inject(current: &BlockState, blocks: &[BlockState], seed: u64) -> (BlockState, Vec<BlockState>) {
    let mut lifted = lift_blocks(blocks);
    lifted.push(garbage_row(seed));

    let overlaps = settled_cells(&lifted).any(|c| current.cells.contains(c));
    let current = if overlaps {
        current.translated(0, -1)
    } else {
        current.clone()
    };
    (current, lifted)
}
