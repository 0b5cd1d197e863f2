//! Merge timestamped key presses with the periodic timer into one ordered
//! action stream

use crate::game::{Action, TICK_RATE_MS};
use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    #[serde(rename = "a")]
    Left,
    #[serde(rename = "d")]
    Right,
    #[serde(rename = "s")]
    Down,
    #[serde(rename = "w")]
    Rotate,
    #[serde(rename = "h")]
    Hold,
    #[serde(rename = "r")]
    Restart,
}

impl Key {
    pub fn action(self) -> Action {
        match self {
            Key::Left => Action::MoveLeft(-1),
            Key::Right => Action::MoveRight(1),
            Key::Down => Action::MoveDown(1),
            Key::Rotate => Action::Rotate(1),
            Key::Hold => Action::Hold,
            Key::Restart => Action::Restart,
        }
    }
}

/// A key press at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub at_ms: u64,
    pub key: Key,
}

/// A recorded play session: key presses plus how long the timer ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub duration_ms: u64,
    pub keys: Vec<KeyEvent>,
}

impl Script {
    /// Parse a script from JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse script: {}", e))
    }

    /// Interleave key actions with timer ticks in time order.
    ///
    /// Tick `n` fires at `(n + 1) * TICK_RATE_MS` and carries `Tick(n)`. A
    /// tick sorts before a key press with the same timestamp; key presses
    /// with equal timestamps keep their recorded order.
    pub fn actions(&self) -> Vec<Action> {
        let mut keys = self.keys.clone();
        keys.sort_by_key(|event| event.at_ms);

        let tick_count = self.duration_ms / TICK_RATE_MS;
        let mut actions = Vec::with_capacity(keys.len() + tick_count as usize);
        let mut keys = keys.into_iter().peekable();

        for n in 0..tick_count {
            let tick_at = (n + 1) * TICK_RATE_MS;
            while let Some(event) = keys.next_if(|event| event.at_ms < tick_at) {
                actions.push(event.key.action());
            }
            actions.push(Action::Tick(n));
        }
        actions.extend(keys.map(|event| event.key.action()));
        actions
    }
}
