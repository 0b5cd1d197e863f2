//! Sequential fold of actions into a single evolving game state
//!
//! The reducer itself does not ignore input after the game ends; the session
//! does, letting only `Restart` through.

use crate::game::{Action, GameState};
use tracing::{debug, info};

/// Owns the evolving state and applies actions one at a time
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: GameState,
    /// Actions that reached the reducer
    applied: u64,
    /// Actions dropped because the game had ended
    suppressed: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary state
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            applied: 0,
            suppressed: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Apply one action against the latest state
    pub fn apply(&mut self, action: Action) -> &GameState {
        if self.state.game_end && action != Action::Restart {
            self.suppressed += 1;
            return &self.state;
        }

        let was_over = self.state.game_end;
        self.state = self.state.reduce(action);
        self.applied += 1;

        if self.state.game_end && !was_over {
            info!(
                score = self.state.score,
                high_score = self.state.high_score,
                level = self.state.level,
                "session reached game over"
            );
        }
        &self.state
    }

    /// Fold a whole action sequence, returning the final state
    pub fn replay(&mut self, actions: impl IntoIterator<Item = Action>) -> &GameState {
        for action in actions {
            self.apply(action);
        }
        debug!(applied = self.applied, suppressed = self.suppressed, "replay finished");
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
