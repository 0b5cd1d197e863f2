//! Render-ready view of a game state
//!
//! The board is flattened into a matrix of color indices (0 = empty,
//! 1-7 = shapes in catalog order, 8 = garbage).

use crate::block::BlockState;
use crate::board::{Cell, GRID_HEIGHT, GRID_WIDTH};
use crate::game::GameState;
use crate::tetromino::Color;
use serde::Serialize;
use std::fmt;

/// Encode a color as its board index
pub fn color_index(color: Color) -> u8 {
    match color {
        Color::Cyan => 1,
        Color::Blue => 2,
        Color::Orange => 3,
        Color::Yellow => 4,
        Color::Green => 5,
        Color::Purple => 6,
        Color::Red => 7,
        Color::White => 8,
    }
}

/// A preview slot (next or hold)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub cells: Vec<Cell>,
    pub color: Color,
    pub width: i32,
    pub height: i32,
}

impl Preview {
    /// Preview drawn from the shape's base cells
    fn of(block: &BlockState) -> Self {
        let block_type = block.block_type();
        Self {
            cells: block_type.base.to_vec(),
            color: block.color,
            width: block_type.width,
            height: block_type.height,
        }
    }
}

/// Everything a renderer needs after one reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// `GRID_HEIGHT` rows of `GRID_WIDTH` color indices, settled and current
    /// blocks combined
    pub board: Vec<Vec<u8>>,
    pub current: Vec<Cell>,
    pub next: Preview,
    pub hold: Preview,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub time_until_next_garbage: u32,
    pub game_end: bool,
}

/// Paint blocks onto an empty board, ignoring off-grid cells
pub fn encode_board<'a>(blocks: impl IntoIterator<Item = &'a BlockState>) -> Vec<Vec<u8>> {
    let mut board = vec![vec![0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
    for block in blocks {
        let index = color_index(block.color);
        for cell in block.cells.iter().filter(|c| c.in_bounds()) {
            board[cell.y as usize][cell.x as usize] = index;
        }
    }
    board
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: encode_board(state.blocks.iter().chain(std::iter::once(&state.current_block))),
            current: state.current_block.cells.clone(),
            next: Preview::of(&state.next_block),
            hold: Preview::of(&state.hold_block),
            score: state.score,
            high_score: state.high_score,
            level: state.level,
            time_until_next_garbage: state.time_until_next_garbage,
            game_end: state.game_end,
        }
    }
}

impl fmt::Display for Snapshot {
    /// Plain text board, one character per cell
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            let line: String = row
                .iter()
                .map(|&index| match index {
                    0 => '.',
                    8 => '#',
                    n => char::from(b'0' + n),
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        write!(
            f,
            "score {} | high {} | level {} | garbage in {}{}",
            self.score,
            self.high_score,
            self.level,
            self.time_until_next_garbage,
            if self.game_end { " | GAME OVER" } else { "" }
        )
    }
}
