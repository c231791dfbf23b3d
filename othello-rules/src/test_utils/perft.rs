//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for checking and tuning the bitboard routines.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::bitboard::{self, Bitboard};
use crate::location::LocationList;

/// Count the leaves `depth` plies below the standard opening.
/// A pass counts as a ply; a finished game is a leaf at any depth.
pub fn run_perft(depth: u64) -> u64 {
    leaves_below(bitboard::BLACK_START, bitboard::WHITE_START, depth, false)
}

fn leaves_below(active: Bitboard, opponent: Bitboard, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let all_moves = bitboard::legal_moves(active, opponent);
    if all_moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(opponent, active, depth - 1, true);
    }

    LocationList::from(all_moves)
        .map(|mv| {
            let result = bitboard::apply_move(active, opponent, mv.bitboard());
            leaves_below(result.opponent, result.active, depth - 1, false)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}
