//! A two-player Connect 4 engine with pluggable move strategies.
//!
//! The board is a fixed 7x6 grid packed into a single `u64`, giving cheap
//! clones, incremental win detection on each drop and a lossless encoding
//! that doubles as a transposition key for the tree-search player.
//!
//! # Basic Usage
//!
//! ```
//! use connect4::{Board, Side};
//!
//! # fn main() -> Result<(), connect4::GameError> {
//! let mut board = Board::new();
//! board.play(Side::One, 3)?;
//!
//! // the encoding round-trips losslessly
//! assert_eq!(Board::decode(board.encode()), board);
//! # Ok(())
//! # }
//! ```

use static_assertions::const_assert;

pub mod board;

pub mod error;

pub mod lookahead;

pub mod mcts;

pub mod player;

mod scan;


pub use board::{Board, Side};
pub use error::GameError;
pub use lookahead::LookaheadPlayer;
pub use mcts::MctsPlayer;
pub use player::{from_spec, HumanPlayer, Player};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// bits reserved per column in the packed encoding
pub(crate) const COLUMN_BITS: usize = 8;

// each column needs room for HEIGHT tokens plus the marker bit, and the
// packed columns must leave a bit spare for the unused lane's marker
const_assert!(HEIGHT + 1 < COLUMN_BITS);
const_assert!(WIDTH * COLUMN_BITS < 64);
