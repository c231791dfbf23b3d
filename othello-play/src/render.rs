//! Text rendering of a game in progress.

use othello_rules::{Bitboard, Game, Player, EDGE_LENGTH};

const BLACK: char = '*';
const WHITE: char = 'o';
const PLACABLE: char = '.';
const NONE: char = ' ';

/// Draw the board as a labeled grid, marking legal moves if `hints` is set,
/// followed by the piece counts.
pub fn render(game: &Game, hints: bool) -> String {
    let board = game.board();
    let placable = if hints {
        game.legal_moves().bitboard()
    } else {
        Bitboard::default()
    };

    let mut out = String::from(" ");
    for col in 0..EDGE_LENGTH {
        out.push(' ');
        out.push((b'A' + col as u8) as char);
    }

    for row in 0..EDGE_LENGTH {
        out.push_str(&format!("\n{} ", row + 1));
        for col in 0..EDGE_LENGTH {
            let cell = Bitboard::cell(col as i32, row as i32);
            let glyph = match board.player_at(cell) {
                Some(Player::Black) => BLACK,
                Some(Player::White) => WHITE,
                None if placable.intersects(cell) => PLACABLE,
                None => NONE,
            };
            out.push(glyph);
            out.push(NONE);
        }
    }

    let tally = game.tally();
    out.push_str(&format!("\n\nBLACK {} : {} WHITE", tally.black, tally.white));
    out
}
