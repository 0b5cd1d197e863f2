//! Hold slot: swap the falling block with the stored one

use crate::block::BlockState;
use crate::board::{collision_x, collision_y, settled_cells, Cell};
use tracing::trace;

/// Step the block back through its rotation tables until it is at
/// rotation 0.
///
/// If any step back would collide or leave the grid, the block is returned
/// as it was, still rotated.
pub fn rotate_until_initial_state(
    block: &BlockState,
    rotation_state: usize,
    settled: &[BlockState],
) -> BlockState {
    let mut unrotated = block.clone();
    let mut state = rotation_state;
    while state > 0 {
        let candidate = unrotated.unrotated(state);
        if !(collision_x(&candidate, settled, 0) && collision_y(&candidate, settled, 0)) {
            trace!(kind = ?block.kind, rotation_state, "un-rotation blocked, holding rotated block");
            return block.clone();
        }
        unrotated = candidate;
        state -= 1;
    }
    unrotated
}

/// Per-cell offsets taking each cell of `from` to the same-index cell of `to`
pub fn cartesian_difference(from: &[Cell], to: &[Cell]) -> Vec<Cell> {
    from.iter()
        .zip(to.iter())
        .map(|(a, b)| Cell::new(b.x - a.x, b.y - a.y))
        .collect()
}

/// Swap `current` with `hold`.
///
/// The held shape is placed where the current block sits: its base cells
/// are moved by the same offset that takes the current shape's (rotated)
/// base cells to the current cells. Returns the new `(current, hold)`, or
/// `None` if the incoming block would not fit.
pub fn swap_blocks(
    current: &BlockState,
    hold: &BlockState,
    rotation_state: usize,
    settled: &[BlockState],
) -> Option<(BlockState, BlockState)> {
    let differences = cartesian_difference(
        &current.kind.rotated_base(rotation_state),
        hold.block_type().base,
    );

    let incoming = BlockState::with_cells(
        hold.kind,
        current
            .cells
            .iter()
            .zip(differences.iter())
            .map(|(cell, d)| cell.offset(d.x, d.y))
            .collect(),
    );

    let fits = incoming.cells.len() == hold.block_type().base.len()
        && incoming.cells.iter().all(|c| c.in_bounds())
        && !settled_cells(settled).any(|c| incoming.cells.contains(c));
    if !fits {
        return None;
    }

    let outgoing = rotate_until_initial_state(current, rotation_state, settled);
    Some((incoming, outgoing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::BlockKind;

    #[test]
    fn test_cartesian_difference() {
        let from = [Cell::new(0, 0), Cell::new(1, 0)];
        let to = [Cell::new(2, 3), Cell::new(1, 1)];
        assert_eq!(cartesian_difference(&from, &to), vec![Cell::new(2, 3), Cell::new(0, 1)]);
    }

    #[test]
    fn test_normalize_rotated_block() {
        let base = BlockState::new(BlockKind::T).translated(4, 8);
        let rotated = base.rotated(1).rotated(2);
        assert_eq!(rotate_until_initial_state(&rotated, 2, &[]), base);
    }

    #[test]
    fn test_normalize_unrotated_is_identity() {
        let base = BlockState::new(BlockKind::L).translated(2, 5);
        assert_eq!(rotate_until_initial_state(&base, 0, &[]), base);
    }

    #[test]
    fn test_normalize_blocked_keeps_rotation() {
        // I turned upright at column 6; un-rotating would lay it back across (4..=7, 10)
        let base = BlockState::new(BlockKind::I).translated(4, 10);
        let rotated = base.rotated(1);
        let obstacle = BlockState::with_cells(BlockKind::Garbage, vec![Cell::new(7, 10)]);
        assert!(!rotated.cells.contains(&Cell::new(7, 10)));
        let stored = rotate_until_initial_state(&rotated, 1, std::slice::from_ref(&obstacle));
        assert_eq!(stored, rotated);
    }

    #[test]
    fn test_swap_places_held_shape_at_current_location() {
        let current = BlockState::new(BlockKind::I).translated(2, 6);
        let hold = BlockState::new(BlockKind::O);
        let (incoming, outgoing) = swap_blocks(&current, &hold, 0, &[]).expect("fits");
        assert_eq!(incoming.kind, BlockKind::O);
        assert_eq!(
            incoming.cells,
            vec![Cell::new(2, 6), Cell::new(3, 6), Cell::new(2, 7), Cell::new(3, 7)]
        );
        assert_eq!(outgoing, current);
    }

    #[test]
    fn test_swap_rejected_when_incoming_overlaps() {
        let current = BlockState::new(BlockKind::I).translated(2, 6);
        let hold = BlockState::new(BlockKind::O);
        let below = BlockState::with_cells(BlockKind::Garbage, vec![Cell::new(2, 7)]);
        assert!(swap_blocks(&current, &hold, 0, std::slice::from_ref(&below)).is_none());
    }
}
