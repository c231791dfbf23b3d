//! A pair of colored bitboards holding a complete Othello position.

use crate::bitboard::{self, Bitboard};
use crate::game::Player;
use crate::{utils, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// The pieces of both players. The two bitboards never share a location.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

/// Piece counts for both players.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Display)]
#[display(fmt = "Black {} : {} White", black, white)]
pub struct Tally {
    pub black: u8,
    pub white: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display(fmt = "black and white both occupy {} location(s)", overlap)]
    Overlap { overlap: u8 },
    #[display(fmt = "expected {} cells, found {}", NUM_SPACES, found)]
    WrongLength { found: usize },
    #[display(fmt = "unknown cell character {:?}", glyph)]
    UnknownGlyph { glyph: char },
}

impl Default for Board {
    /// The standard Othello opening: White on D4 and E5, Black on E4 and D5.
    fn default() -> Self {
        Self::opening()
    }
}

impl Board {
    /// The standard Othello opening: White on D4 and E5, Black on E4 and D5.
    pub const fn opening() -> Self {
        Self {
            black: bitboard::BLACK_START,
            white: bitboard::WHITE_START,
        }
    }

    /// Build a board from colored bitboards, which must not overlap.
    pub fn new(black: Bitboard, white: Bitboard) -> Result<Self, BoardError> {
        let overlap = black & white;
        if !overlap.is_empty() {
            return Err(BoardError::Overlap {
                overlap: overlap.count_occupied(),
            });
        }

        Ok(Self { black, white })
    }

    /// Get the pieces belonging to `player`.
    #[inline]
    pub fn pieces(self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Get the pieces of `player` and their opponent, in that order.
    #[inline]
    pub fn split(self, player: Player) -> (Bitboard, Bitboard) {
        (self.pieces(player), self.pieces(!player))
    }

    /// Rebuild a board from the perspective split of [`Board::split`].
    #[inline]
    pub(crate) fn join(player: Player, active: Bitboard, opponent: Bitboard) -> Self {
        match player {
            Player::Black => Self {
                black: active,
                white: opponent,
            },
            Player::White => Self {
                black: opponent,
                white: active,
            },
        }
    }

    /// Get the legal moves for `player` in this position.
    #[inline]
    pub fn legal_moves(self, player: Player) -> Bitboard {
        let (active, opponent) = self.split(player);
        bitboard::legal_moves(active, opponent)
    }

    /// Count the pieces on the board for each player.
    #[inline]
    pub fn tally(self) -> Tally {
        Tally {
            black: self.black.count_occupied(),
            white: self.white.count_occupied(),
        }
    }

    /// Which player occupies the cell in `mask`, if any.
    pub fn player_at(self, mask: Bitboard) -> Option<Player> {
        if self.black.intersects(mask) {
            Some(Player::Black)
        } else if self.white.intersects(mask) {
            Some(Player::White)
        } else {
            None
        }
    }
}

/// Parse a board from 64 cell glyphs in row-major order from A1.
/// `X` or `*` is Black, `O` or `o` is White, `-` or `.` is empty. Whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = 0u64;
        let mut white = 0u64;
        let mut index = 0;

        for glyph in s.chars().filter(|c| !c.is_whitespace()) {
            if index < NUM_SPACES {
                match glyph {
                    'X' | 'x' | '*' => black |= 1 << index,
                    'O' | 'o' => white |= 1 << index,
                    '-' | '.' => {}
                    glyph => return Err(BoardError::UnknownGlyph { glyph }),
                }
            }
            index += 1;
        }

        if index != NUM_SPACES {
            return Err(BoardError::WrongLength { found: index });
        }

        Self::new(black.into(), white.into())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyphs = self
            .black
            .into_iter()
            .zip(self.white)
            .map(|pieces| match pieces {
                (true, false) => 'X',
                (false, true) => 'O',
                _ => '-',
            });
        utils::format_grid(glyphs, f)
    }
}
