//! `othello-rules` implements the rules of 8x8 Othello on 64-bit bitboards.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Othello boards:
//!    move generation and capture resolution. These are fast, but may result in inconsistent
//!    state if their contracts are not manually checked.
//!  - [`Game`] is the turn controller: a safe, by-value state machine that validates moves,
//!    handles passes and scores the finished game.
//!
//! Cells are indexed in row-major order from the upper-left: index = row * 8 + column,
//! where column 0 is `A` and row 0 is displayed as `1`.

pub mod bitboard;
pub mod test_utils;

mod board;
mod game;
mod location;
mod utils;

pub use bitboard::Bitboard;
pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
