//! Game state and the reducer
//!
//! Every transition takes the current state by reference and builds the
//! next one. Nothing here mutates a state in place, so any state can be kept
//! around for replay or comparison.

use crate::block::BlockState;
use crate::board::{check_game_over, collision_x, collision_y, GRID_WIDTH};
use crate::garbage::{self, garbage_interval, DEFAULT_TIME_UNTIL_GARBAGE};
use crate::hold::swap_blocks;
use crate::lines::{check_rows, clear_and_compact, clear_rows, reorganize_block};
use crate::rng::generate_prn;
use crate::score::{add_row_clear, advance_level, ROWS_FOR_LEVEL_UP};
use crate::tetromino::{get_block_type, BlockKind, CATALOG};
use serde::{Deserialize, Serialize};
use std::iter;
use tracing::{debug, info, trace};

/// Timer interval between `Tick` actions
pub const TICK_RATE_MS: u64 = 500;

/// Seed used for the very first game
const INITIAL_SEED: u64 = 1;

/// Inputs the reducer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft(i32),
    MoveRight(i32),
    MoveDown(i32),
    Rotate(usize),
    Hold,
    Restart,
    /// Timer tick carrying the number of ticks elapsed so far
    Tick(u64),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_end: bool,
    /// Block under player control
    pub current_block: BlockState,
    /// Preview of the block spawned after the current one settles
    pub next_block: BlockState,
    pub hold_block: BlockState,
    /// Settled blocks in settle order
    pub blocks: Vec<BlockState>,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    /// Index into the current block's rotation tables
    pub rotation_state: usize,
    pub rows_until_next_level: i32,
    pub time_until_next_garbage: u32,
    /// Reductions applied so far; seeds draws for events without a tick count
    pub steps: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one action
pub fn reduce(state: &GameState, action: Action) -> GameState {
    state.reduce(action)
}

fn random_kind(seed: u64) -> BlockKind {
    get_block_type(generate_prn(seed, CATALOG.len() - 1))
}

impl GameState {
    /// A fresh, playable game
    pub fn new() -> Self {
        Self::zeroed().restarted(INITIAL_SEED)
    }

    fn zeroed() -> Self {
        Self {
            game_end: false,
            current_block: BlockState::with_cells(CATALOG[0], Vec::new()),
            next_block: BlockState::with_cells(CATALOG[1], Vec::new()),
            hold_block: BlockState::with_cells(CATALOG[2], Vec::new()),
            blocks: Vec::new(),
            score: 0,
            high_score: 0,
            level: 0,
            rotation_state: 0,
            rows_until_next_level: 0,
            time_until_next_garbage: 0,
            steps: 0,
        }
    }

    /// A new game that keeps only the high score (and the step counter)
    pub fn restarted(&self, seed: u64) -> Self {
        Self {
            game_end: false,
            current_block: BlockState::new(random_kind(seed.wrapping_mul(32))),
            next_block: BlockState::new(random_kind(seed)),
            hold_block: BlockState::new(random_kind(seed.wrapping_mul(64))),
            blocks: Vec::new(),
            score: 0,
            high_score: self.high_score.max(self.score),
            level: 1,
            rotation_state: 0,
            rows_until_next_level: ROWS_FOR_LEVEL_UP,
            time_until_next_garbage: DEFAULT_TIME_UNTIL_GARBAGE,
            steps: self.steps,
        }
    }

    /// Apply one action and return the resulting state
    pub fn reduce(&self, action: Action) -> Self {
        let seed = self.steps;
        let next = match action {
            Action::MoveLeft(amount) | Action::MoveRight(amount) => self.shifted(amount),
            Action::MoveDown(amount) => self.dropped(amount, seed),
            Action::Rotate(step) => self.rotated(step),
            Action::Hold => self.held(),
            Action::Restart => {
                info!(score = self.score, high_score = self.high_score, "restart");
                self.restarted(seed)
            }
            Action::Tick(elapsed) => self.ticked(elapsed),
        };
        Self {
            steps: self.steps + 1,
            ..next
        }
    }

    /// Check if the current block may move `dx` columns
    pub fn can_move_x(&self, dx: i32) -> bool {
        collision_x(&self.current_block, &self.blocks, dx)
    }

    /// Check if the current block may move `dy` rows
    pub fn can_move_y(&self, dy: i32) -> bool {
        collision_y(&self.current_block, &self.blocks, dy)
    }

    /// Check if any cell has reached the top row
    pub fn is_topped_out(&self) -> bool {
        check_game_over(&self.current_block, &self.blocks)
    }

    fn shifted(&self, dx: i32) -> Self {
        if !self.can_move_x(dx) {
            return self.clone();
        }
        Self {
            current_block: self.current_block.translated(dx, 0),
            ..self.clone()
        }
    }

    fn dropped(&self, dy: i32, seed: u64) -> Self {
        if self.can_move_y(dy) {
            Self {
                current_block: self.current_block.translated(0, dy),
                ..self.clone()
            }
        } else {
            self.lock_or_end(seed)
        }
    }

    /// The block can no longer fall: end the game or settle it
    fn lock_or_end(&self, seed: u64) -> Self {
        if self.is_topped_out() {
            info!(score = self.score, level = self.level, "game over");
            Self {
                game_end: true,
                high_score: self.high_score.max(self.score),
                ..self.clone()
            }
        } else {
            self.settled(seed)
        }
    }

    /// Candidate rotation `step` table steps ahead. Shapes without tables
    /// are returned unchanged.
    fn rotation_candidate(&self, step: usize) -> Self {
        let count = self.current_block.kind.rotation_count();
        if count == 0 {
            return self.clone();
        }
        // A full cycle of tables is the identity
        let turns = step % count;
        let current_block = (1..=turns).fold(self.current_block.clone(), |block, k| {
            block.rotated((self.rotation_state + k) % count)
        });
        Self {
            current_block,
            rotation_state: (self.rotation_state + turns) % count,
            ..self.clone()
        }
    }

    fn rotated(&self, step: usize) -> Self {
        let candidate = self.rotation_candidate(step);
        if candidate.can_move_x(0) && candidate.can_move_y(0) {
            candidate
        } else {
            trace!(kind = ?self.current_block.kind, "rotation rejected");
            self.clone()
        }
    }

    fn held(&self) -> Self {
        match swap_blocks(
            &self.current_block,
            &self.hold_block,
            self.rotation_state,
            &self.blocks,
        ) {
            Some((current_block, hold_block)) => {
                debug!(held = ?hold_block.kind, playing = ?current_block.kind, "hold swap");
                Self {
                    current_block,
                    hold_block,
                    rotation_state: 0,
                    ..self.clone()
                }
            }
            None => self.clone(),
        }
    }

    fn ticked(&self, elapsed: u64) -> Self {
        if self.time_until_next_garbage == 0 {
            self.with_garbage(elapsed)
        } else if self.can_move_y(1) {
            Self {
                current_block: self.current_block.translated(0, 1),
                time_until_next_garbage: self.time_until_next_garbage - 1,
                ..self.clone()
            }
        } else {
            self.lock_or_end(elapsed)
        }
    }

    fn with_garbage(&self, seed: u64) -> Self {
        let (current_block, blocks) = garbage::inject(&self.current_block, &self.blocks, seed);
        let time_until_next_garbage = garbage_interval(self.level);
        debug!(next_in = time_until_next_garbage, "garbage row injected");
        Self {
            current_block,
            blocks,
            time_until_next_garbage,
            ..self.clone()
        }
    }

    /// Settle the current block: clear full rows, score them, and spawn the
    /// next block
    fn settled(&self, seed: u64) -> Self {
        let cleared = check_rows(
            self.blocks.iter().chain(iter::once(&self.current_block)),
            GRID_WIDTH,
        );
        let settled_block = reorganize_block(&clear_rows(&self.current_block, &cleared), &cleared);
        let blocks: Vec<BlockState> = clear_and_compact(&self.blocks, &cleared)
            .into_iter()
            .chain(iter::once(settled_block))
            .filter(|block| !block.is_empty())
            .collect();

        let score = add_row_clear(self.score, cleared.len(), self.level);
        let (level, rows_until_next_level) =
            advance_level(self.level, self.rows_until_next_level, cleared.len());
        if !cleared.is_empty() {
            debug!(rows = ?cleared, score, "rows cleared");
        }
        if level > self.level {
            info!(level, "level up");
        }

        let next_block = BlockState::new(random_kind(seed));
        trace!(kind = ?self.current_block.kind, next = ?next_block.kind, "block settled");
        Self {
            current_block: BlockState::new(self.next_block.kind),
            next_block,
            blocks,
            score,
            high_score: self.high_score.max(score),
            level,
            rows_until_next_level,
            rotation_state: 0,
            ..self.clone()
        }
    }
}
