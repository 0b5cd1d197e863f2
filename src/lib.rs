//! blockfall - a deterministic falling-block puzzle engine
//!
//! The engine is a pure reducer: [`GameState::reduce`] takes a state and an
//! [`Action`] and returns the next state. Input plumbing and rendering live
//! outside; [`Session`] provides the sequential fold and [`Snapshot`] the
//! render-ready view.
//!
//! ```
//! use blockfall::{Action, GameState};
//!
//! let state = GameState::new()
//!     .reduce(Action::MoveRight(1))
//!     .reduce(Action::Tick(0));
//! assert_eq!(state.current_block.cells[0].y, 1);
//! ```

pub mod block;
pub mod board;
pub mod game;
pub mod garbage;
pub mod hold;
pub mod lines;
pub mod rng;
pub mod score;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod tetromino;
pub mod timeline;

pub use block::BlockState;
pub use board::{Cell, GRID_HEIGHT, GRID_WIDTH};
pub use game::{reduce, Action, GameState, TICK_RATE_MS};
pub use rng::generate_prn;
pub use session::Session;
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use tetromino::{BlockKind, BlockType, Color};
pub use timeline::{Key, KeyEvent, Script};
