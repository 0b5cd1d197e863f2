//! Block instances: the falling block, settled blocks, and previews

use crate::board::Cell;
use crate::tetromino::{BlockKind, BlockType, Color};
use serde::{Deserialize, Serialize};

/// A block on (or previewed next to) the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    /// Occupied cells, in the same order as the shape's base cells
    pub cells: Vec<Cell>,
    pub color: Color,
    pub kind: BlockKind,
}

impl BlockState {
    /// Create a block at its base position (top-left of the grid)
    pub fn new(kind: BlockKind) -> Self {
        Self::with_cells(kind, kind.block_type().base.to_vec())
    }

    /// Create a block of `kind` occupying the given cells
    pub fn with_cells(kind: BlockKind, cells: Vec<Cell>) -> Self {
        Self {
            cells,
            color: kind.color(),
            kind,
        }
    }

    pub fn block_type(&self) -> &'static BlockType {
        self.kind.block_type()
    }

    /// The same block moved by `(dx, dy)`
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            cells: self.cells.iter().map(|c| c.offset(dx, dy)).collect(),
            ..self.clone()
        }
    }

    /// Apply rotation table `index` cell by cell.
    ///
    /// Cells beyond the table's length (garbage has no tables) are left
    /// untouched.
    pub fn rotated(&self, index: usize) -> Self {
        let Some(table) = self.block_type().rotations.get(index) else {
            return self.clone();
        };
        Self {
            cells: self
                .cells
                .iter()
                .zip(table.iter())
                .map(|(cell, delta)| cell.offset(delta.x, delta.y))
                .collect(),
            ..self.clone()
        }
    }

    /// Undo rotation table `index`
    pub fn unrotated(&self, index: usize) -> Self {
        let Some(table) = self.block_type().rotations.get(index) else {
            return self.clone();
        };
        Self {
            cells: self
                .cells
                .iter()
                .zip(table.iter())
                .map(|(cell, delta)| cell.offset(-delta.x, -delta.y))
                .collect(),
            ..self.clone()
        }
    }

    /// Drop every cell whose row is in `rows`
    pub fn without_rows(&self, rows: &[i32]) -> Self {
        Self {
            cells: self
                .cells
                .iter()
                .filter(|c| !rows.contains(&c.y))
                .copied()
                .collect(),
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
