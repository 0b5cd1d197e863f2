//! Full-row detection and gravity compaction
//!
//! A row is full when exactly `width` cells across all blocks share its y.
//! This assumes no two cells ever share a position, which the collision
//! predicates guarantee.

use crate::block::BlockState;
use crate::board::Cell;
use std::collections::BTreeMap;

/// Rows whose cell count equals `width`, in ascending order
pub fn check_rows<'a>(blocks: impl IntoIterator<Item = &'a BlockState>, width: i32) -> Vec<i32> {
    let counts = blocks
        .into_iter()
        .flat_map(|block| block.cells.iter())
        .fold(BTreeMap::<i32, i32>::new(), |mut counts, cell| {
            *counts.entry(cell.y).or_default() += 1;
            counts
        });

    counts
        .into_iter()
        .filter(|&(_, count)| count == width)
        .map(|(y, _)| y)
        .collect()
}

/// New row for a cell at `y` once `cleared` rows are gone: one row down for
/// every cleared row beneath it
pub fn compacted_y(y: i32, cleared: &[i32]) -> i32 {
    y + cleared.iter().filter(|&&row| y < row).count() as i32
}

/// Remove the cleared rows' cells from a block
pub fn clear_rows(block: &BlockState, cleared: &[i32]) -> BlockState {
    block.without_rows(cleared)
}

/// Let the remaining cells fall into the space left by cleared rows
pub fn reorganize_block(block: &BlockState, cleared: &[i32]) -> BlockState {
    BlockState {
        cells: block
            .cells
            .iter()
            .map(|c| Cell::new(c.x, compacted_y(c.y, cleared)))
            .collect(),
        ..block.clone()
    }
}

/// Clear then compact every block
pub fn clear_and_compact(blocks: &[BlockState], cleared: &[i32]) -> Vec<BlockState> {
    blocks
        .iter()
        .map(|block| reorganize_block(&clear_rows(block, cleared), cleared))
        .collect()
}
