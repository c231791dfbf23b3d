//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked and may produce inconsistent
//! state if invalid data is passed: overlapping boards, or a move that is not legal.
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! the LSB is the upper-left of the board (A1), and bits proceed in row-major order.

use crate::{utils, EDGE_LENGTH, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// A bitboard with no locations set.
pub const EMPTY: Bitboard = Bitboard(0);

/// A bitboard with every location set.
pub const FULL: Bitboard = Bitboard(u64::MAX);

/// Starting bitboard for Black: E4 and D5.
pub const BLACK_START: Bitboard = Bitboard(0x0000_0008_1000_0000);

/// Starting bitboard for White: D4 and E5.
pub const WHITE_START: Bitboard = Bitboard(0x0000_0010_0800_0000);

// Masks selecting everything except one edge column or row.
const NOT_A_FILE: u64 = 0xfefe_fefe_fefe_fefe;
const NOT_H_FILE: u64 = 0x7f7f_7f7f_7f7f_7f7f;
const NOT_RANK_1: u64 = 0xffff_ffff_ffff_ff00;
const NOT_RANK_8: u64 = 0x00ff_ffff_ffff_ffff;

/// The longest run of opponent pieces a single line can capture.
/// Move generation spreads captures this many cells along each axis.
pub const MAX_RUN: usize = EDGE_LENGTH - 2;

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// Build a one-hot bitboard for a column and row.
    /// Out-of-range coordinates (negative included) give an empty bitboard,
    /// which never matches a legal move.
    #[inline]
    pub fn cell(col: i32, row: i32) -> Self {
        let edge = EDGE_LENGTH as i32;
        if col < 0 || col >= edge || row < 0 || row >= edge {
            EMPTY
        } else {
            Bitboard(1 << (row * edge + col))
        }
    }

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if any location is set in both bitboards.
    #[inline]
    pub fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Mirror the board left-to-right (column A swaps with column H).
    #[inline]
    pub fn mirror_horizontal(self) -> Self {
        Bitboard(self.0.reverse_bits().swap_bytes())
    }

    /// Mirror the board top-to-bottom (row 1 swaps with row 8).
    #[inline]
    pub fn mirror_vertical(self) -> Self {
        Bitboard(self.0.swap_bytes())
    }

    /// Reflect the board across the A1-H8 diagonal.
    pub fn transpose(self) -> Self {
        let mut transposed = 0u64;
        let mut remaining = self.0;
        while remaining != 0 {
            let index = remaining.trailing_zeros() as usize;
            let (row, col) = (index / EDGE_LENGTH, index % EDGE_LENGTH);
            transposed |= 1 << (col * EDGE_LENGTH + row);
            remaining &= remaining - 1;
        }
        Bitboard(transposed)
    }

    /// Reflect the board across the A8-H1 diagonal.
    pub fn anti_transpose(self) -> Self {
        self.transpose().mirror_horizontal().mirror_vertical()
    }
}

/// One of the eight compass directions a line of captures can run in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Change in cell index after one step in this direction.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            Direction::North => -8,
            Direction::NorthEast => -7,
            Direction::East => 1,
            Direction::SouthEast => 9,
            Direction::South => 8,
            Direction::SouthWest => 7,
            Direction::West => -1,
            Direction::NorthWest => -9,
        }
    }

    /// Every cell a single step in this direction can land on.
    /// Clips the bits a raw shift would wrap around the edge of the board.
    #[inline]
    pub const fn landing_mask(self) -> Bitboard {
        Bitboard(match self {
            Direction::North => NOT_RANK_8,
            Direction::NorthEast => NOT_A_FILE & NOT_RANK_8,
            Direction::East => NOT_A_FILE,
            Direction::SouthEast => NOT_A_FILE & NOT_RANK_1,
            Direction::South => NOT_RANK_1,
            Direction::SouthWest => NOT_H_FILE & NOT_RANK_1,
            Direction::West => NOT_H_FILE,
            Direction::NorthWest => NOT_H_FILE & NOT_RANK_8,
        })
    }

    /// Move every piece in `bitboard` one step in this direction,
    /// dropping pieces that would leave the board.
    #[inline]
    pub fn shift(self, bitboard: Bitboard) -> Bitboard {
        let step = self.step();
        let distance = step.unsigned_abs();
        let shifted = if step > 0 {
            bitboard.0 << distance
        } else {
            bitboard.0 >> distance
        };
        Bitboard(shifted & self.landing_mask().0)
    }
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// The result is deterministic for any input, but only meaningful for disjoint boards.
#[inline]
pub fn legal_moves(active: Bitboard, opponent: Bitboard) -> Bitboard {
    const HORIZONTAL: u64 = NOT_A_FILE & NOT_H_FILE;
    const VERTICAL: u64 = NOT_RANK_1 & NOT_RANK_8;

    // Shifts for each axis: E/W, N/S, NW/SE, NE/SW.
    // Each axis is searched both ways at once, by SHL and SHR.
    const SHIFTS: [u32; 4] = [1, 8, 9, 7];

    // Opponent pieces on an edge can't be captured along axes crossing that edge.
    const INTERIORS: [u64; 4] = [
        HORIZONTAL,
        VERTICAL,
        HORIZONTAL & VERTICAL,
        HORIZONTAL & VERTICAL,
    ];

    let (active, opponent) = (active.0, opponent.0);
    let mut captures = 0;

    for (&shift, &interior) in SHIFTS.iter().zip(INTERIORS.iter()) {
        let capturable = opponent & interior;

        // Opponent pieces touching ours, then smeared along the axis through opponents.
        let mut run = capturable & (active << shift | active >> shift);
        for _ in 1..MAX_RUN {
            run |= capturable & (run << shift | run >> shift);
        }

        // One step past the end of each run is where a capturing move lands.
        captures |= run << shift | run >> shift;
    }

    Bitboard(!(active | opponent) & captures)
}

/// Compute the opponent pieces captured by placing `move_mask` for the active player,
/// without applying the move. Each of the eight directions is walked independently.
/// Results are unspecified if `move_mask` is not a legal one-hot move.
#[inline]
pub fn flips(move_mask: Bitboard, active: Bitboard, opponent: Bitboard) -> Bitboard {
    let mut flipped = EMPTY;

    for &direction in Direction::ALL.iter() {
        let mut run = EMPTY;
        let mut cursor = direction.shift(move_mask);
        while cursor.intersects(opponent) {
            run |= cursor;
            cursor = direction.shift(cursor);
        }

        // A run only flips if it's capped by one of our pieces.
        if cursor.intersects(active) {
            flipped |= run;
        }
    }

    flipped
}

/// The boards after a move, from the perspective of the player who made it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveResult {
    pub active: Bitboard,
    pub opponent: Bitboard,
    pub flipped: Bitboard,
}

/// Compute an updated board after a given move is made, returning new bitboards
/// for the active player and the opponent along with the captured pieces.
/// `move_mask` must be a one-hot bitboard in [`legal_moves`]; this is not re-checked.
#[inline]
pub fn apply_move(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> MoveResult {
    let flipped = flips(move_mask, active, opponent);
    let result = MoveResult {
        active: active | move_mask | flipped,
        opponent: opponent & !flipped,
        flipped,
    };

    debug_assert!(
        !result.active.intersects(result.opponent),
        "move {:?} left overlapping boards",
        move_mask
    );
    result
}

/// Apply a move in place: `active` gains `move_mask` and every captured piece,
/// `opponent` loses the captured pieces. Returns the captured pieces.
/// Same contract as [`apply_move`].
#[inline]
pub fn resolve_move(
    move_mask: Bitboard,
    active: &mut Bitboard,
    opponent: &mut Bitboard,
) -> Bitboard {
    let result = apply_move(*active, *opponent, move_mask);
    *active = result.active;
    *opponent = result.opponent;
    result.flipped
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    index: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == NUM_SPACES {
            return None;
        }

        let bit = self.bitboard.0 & (1u64 << self.index) != 0;
        self.index += 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = NUM_SPACES - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order, starting at A1.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            index: 0,
            bitboard: self,
        }
    }
}
