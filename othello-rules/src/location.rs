//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::EDGE_LENGTH;
use derive_more::{From, Into};
use std::fmt::{self, Display, Formatter, Write};

const COLUMN_NAMES: &str = "ABCDEFGH";
const ROW_NAMES: &str = "12345678";

/// A location on the Othello board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Location(Bitboard);

/// A list of locations on the Othello board, which can be iterated to retrieve them
/// in row-major order from A1.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a one-hot [`Bitboard`].
    /// Returns None unless exactly one location is set.
    #[inline]
    pub fn from_onehot(bitboard: Bitboard) -> Option<Self> {
        if bitboard.count_occupied() == 1 {
            Some(Self(bitboard))
        } else {
            None
        }
    }

    /// Convert from a row-major square index. `index` must be below 64.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!((index as usize) < crate::NUM_SPACES);
        Self(Bitboard::from(1u64 << index))
    }

    /// Convert into a row-major square index.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.trailing_zeros() as u8
    }

    /// Convert from column and row coordinates, or None if either is off the board.
    pub fn from_coords(col: i32, row: i32) -> Option<Self> {
        Self::from_onehot(Bitboard::cell(col, row))
    }

    /// Get the column and row coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        (index % EDGE_LENGTH, index / EDGE_LENGTH)
    }

    /// The one-hot bitboard for this location.
    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

/// Convert this [`Location`] into string notation ("D3").
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (col, row) = self.to_coords();
        let col_str = COLUMN_NAMES.chars().nth(col).ok_or(fmt::Error)?;
        let row_str = ROW_NAMES.chars().nth(row).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseLocationError;

impl Display for ParseLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a column A-H followed by a row 1-8, like \"D3\"")
    }
}

impl std::error::Error for ParseLocationError {}

/// Build a [`Location`] from 1-indexed string notation ("D3" or "d3").
/// Surrounding whitespace is ignored; anything else besides the two characters is rejected.
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_char = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let row_char = chars.next().ok_or(ParseLocationError)?;
        if chars.next().is_some() {
            return Err(ParseLocationError);
        }

        let col = COLUMN_NAMES.find(col_char).ok_or(ParseLocationError)?;
        let row = ROW_NAMES.find(row_char).ok_or(ParseLocationError)?;

        Self::from_coords(col as i32, row as i32).ok_or(ParseLocationError)
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0.intersects(loc.bitboard())
    }

    /// Returns whether the list has no locations.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// The underlying bitboard mask.
    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

impl ExactSizeIterator for LocationList {}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let next_move = Bitboard::from(1u64 << bitboard.trailing_zeros());
        self.0 ^= next_move;

        Some(Location(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl Display for LocationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}
