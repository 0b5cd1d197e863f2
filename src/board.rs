//! Grid dimensions and collision detection
//!
//! The board is not stored as a matrix: it is the set of cells owned by the
//! settled blocks. The predicates here test the current block against that
//! set before a move is committed.

use crate::block::BlockState;
use serde::{Deserialize, Serialize};

/// Board dimensions
pub const GRID_WIDTH: i32 = 10;
pub const GRID_HEIGHT: i32 = 20;

/// A single grid position. `y = 0` is the top row, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell moved by `(dx, dy)`, clamped at the `i32` range
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Check if the cell lies on the grid
    pub fn in_bounds(&self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }
}

/// Iterate over every cell owned by the settled blocks
pub fn settled_cells(settled: &[BlockState]) -> impl Iterator<Item = &Cell> {
    settled.iter().flat_map(|block| block.cells.iter())
}

/// Check whether the current block may shift by `dx` columns.
///
/// Rejects if a shifted cell leaves the grid (or the shift overflows), or if
/// any settled cell on the same row sits at either the shifted or the
/// original column.
pub fn collision_x(current: &BlockState, settled: &[BlockState], dx: i32) -> bool {
    current.cells.iter().all(|&Cell { x, y }| {
        x.checked_add(dx).is_some_and(|nx| {
            (0..GRID_WIDTH).contains(&nx)
                && !settled_cells(settled).any(|c| (c.x == nx || c.x == x) && c.y == y)
        })
    })
}

/// Check whether the current block may shift by `dy` rows.
///
/// Cells may never move into or above the top row, so `y + dy` must be
/// strictly positive.
pub fn collision_y(current: &BlockState, settled: &[BlockState], dy: i32) -> bool {
    current.cells.iter().all(|&Cell { x, y }| {
        y.checked_add(dy).is_some_and(|ny| {
            ny > 0
                && ny < GRID_HEIGHT
                && !settled_cells(settled).any(|c| (c.y == ny || c.y == y) && c.x == x)
        })
    })
}

/// Check if the stack has reached the top row
pub fn check_game_over(current: &BlockState, settled: &[BlockState]) -> bool {
    settled_cells(settled)
        .chain(current.cells.iter())
        .any(|c| c.y <= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::BlockKind;

    fn block_at(kind: BlockKind, cells: &[(i32, i32)]) -> BlockState {
        BlockState::with_cells(kind, cells.iter().map(|&(x, y)| Cell::new(x, y)).collect())
    }

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(9, 19).in_bounds());
        assert!(!Cell::new(-1, 5).in_bounds());
        assert!(!Cell::new(10, 5).in_bounds());
        assert!(!Cell::new(3, 20).in_bounds());
    }

    #[test]
    fn test_move_inside_empty_board() {
        let current = block_at(BlockKind::O, &[(4, 5), (5, 5), (4, 6), (5, 6)]);
        assert!(collision_x(&current, &[], -1));
        assert!(collision_x(&current, &[], 1));
        assert!(collision_y(&current, &[], 1));
    }

    #[test]
    fn test_walls_reject() {
        let current = block_at(BlockKind::O, &[(0, 5), (1, 5), (0, 6), (1, 6)]);
        assert!(!collision_x(&current, &[], -1));
        let current = block_at(BlockKind::O, &[(8, 5), (9, 5), (8, 6), (9, 6)]);
        assert!(!collision_x(&current, &[], 1));
    }

    #[test]
    fn test_floor_and_ceiling_reject() {
        let current = block_at(BlockKind::O, &[(4, 18), (5, 18), (4, 19), (5, 19)]);
        assert!(!collision_y(&current, &[], 1));
        // Zero displacement at the top row is still rejected
        let current = block_at(BlockKind::O, &[(4, 0), (5, 0), (4, 1), (5, 1)]);
        assert!(!collision_y(&current, &[], 0));
    }

    #[test]
    fn test_settled_neighbour_rejects() {
        let current = block_at(BlockKind::O, &[(4, 5), (5, 5), (4, 6), (5, 6)]);
        let wall = block_at(BlockKind::I, &[(6, 6)]);
        assert!(!collision_x(&current, std::slice::from_ref(&wall), 1));
        assert!(collision_x(&current, std::slice::from_ref(&wall), -1));

        let floor = block_at(BlockKind::I, &[(4, 7)]);
        assert!(!collision_y(&current, std::slice::from_ref(&floor), 1));
    }

    #[test]
    fn test_accepted_move_never_overlaps() {
        let settled = vec![
            block_at(BlockKind::Garbage, &[(0, 19), (1, 19), (2, 19), (3, 19)]),
            block_at(BlockKind::T, &[(5, 18), (6, 18), (7, 18), (6, 19)]),
        ];
        let occupied: Vec<Cell> = settled_cells(&settled).copied().collect();
        for x in 0..GRID_WIDTH - 1 {
            for y in 1..GRID_HEIGHT - 1 {
                let current = block_at(BlockKind::O, &[(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)]);
                if current.cells.iter().any(|c| occupied.contains(c)) {
                    continue;
                }
                for d in [-1, 1] {
                    if collision_x(&current, &settled, d) {
                        assert!(current.cells.iter().all(|c| !occupied.contains(&c.offset(d, 0))));
                    }
                    if collision_y(&current, &settled, d) {
                        assert!(current.cells.iter().all(|c| !occupied.contains(&c.offset(0, d))));
                    }
                }
            }
        }
    }

    #[test]
    fn test_game_over_on_top_row() {
        let current = block_at(BlockKind::O, &[(4, 5), (5, 5), (4, 6), (5, 6)]);
        assert!(!check_game_over(&current, &[]));
        let topped = block_at(BlockKind::I, &[(2, 0)]);
        assert!(check_game_over(&current, &[topped]));
    }

    #[test]
    fn test_game_over_above_top_row() {
        let current = block_at(BlockKind::O, &[(4, 5), (5, 5), (4, 6), (5, 6)]);
        let lifted = block_at(BlockKind::Garbage, &[(7, -1), (8, 3)]);
        assert!(check_game_over(&current, &[lifted]));
        let pushed = block_at(BlockKind::O, &[(4, -1), (5, -1), (4, 0), (5, 0)]);
        assert!(check_game_over(&pushed, &[]));
    }

    #[test]
    fn test_huge_displacement_is_illegal() {
        let current = block_at(BlockKind::O, &[(4, 5), (5, 5), (4, 6), (5, 6)]);
        for d in [i32::MAX, i32::MIN, i32::MAX - 3] {
            assert!(!collision_x(&current, &[], d));
            assert!(!collision_y(&current, &[], d));
        }
        assert_eq!(Cell::new(5, 5).offset(i32::MAX, i32::MIN), Cell::new(i32::MAX, i32::MIN + 5));
    }
}
