//! Rules invariants checked over seeded random games.

use othello_rules::bitboard::{self, Bitboard, Direction};
use othello_rules::{Action, Game, Location, LocationList, Outcome, Phase, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GAMES: usize = 200;

/// Play `GAMES` random games from the opening, calling `check` on every state reached.
fn for_each_random_state<F: FnMut(&Game)>(seed: u64, mut check: F) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..GAMES {
        let mut game = Game::new();
        check(&game);

        while !game.is_over() {
            let moves: Vec<Location> = game.legal_moves().collect();
            let action = if moves.is_empty() {
                Action::Pass
            } else {
                Action::Place(moves[rng.gen_range(0..moves.len())])
            };
            game = game.apply(action).expect("random action was legal");
            check(&game);
        }
    }
}

fn active_and_opponent(game: &Game) -> Option<(Bitboard, Bitboard)> {
    game.side_to_move().map(|player| game.board().split(player))
}

#[test]
fn boards_stay_disjoint() {
    for_each_random_state(1, |game| {
        let board = game.board();
        assert!(!board
            .pieces(Player::Black)
            .intersects(board.pieces(Player::White)));
    });
}

#[test]
fn placements_add_exactly_one_piece() {
    for_each_random_state(2, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };
        let before = active.count_occupied() + opponent.count_occupied();

        for mv in LocationList::from(bitboard::legal_moves(active, opponent)) {
            let result = bitboard::apply_move(active, opponent, mv.bitboard());
            let after = result.active.count_occupied() + result.opponent.count_occupied();
            assert_eq!(after, before + 1);
            assert_eq!(
                result.active.count_occupied(),
                active.count_occupied() + 1 + result.flipped.count_occupied()
            );
        }
    });
}

#[test]
fn legal_moves_are_sound() {
    for_each_random_state(3, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };

        for mv in LocationList::from(bitboard::legal_moves(active, opponent)) {
            let mask = mv.bitboard();
            assert!(!mask.intersects(active | opponent), "{} is occupied", mv);
            assert!(
                !bitboard::flips(mask, active, opponent).is_empty(),
                "{} flips nothing",
                mv
            );
        }
    });
}

#[test]
fn legal_moves_are_complete() {
    for_each_random_state(4, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };
        let moves = bitboard::legal_moves(active, opponent);
        let empties = !(active | opponent);

        for cell in LocationList::from(empties & !moves) {
            assert!(
                bitboard::flips(cell.bitboard(), active, opponent).is_empty(),
                "{} flips pieces but was not offered",
                cell
            );
        }
    });
}

#[test]
fn every_direction_agrees_with_move_generation() {
    // A move is legal exactly when some single direction captures.
    for_each_random_state(5, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };

        for cell in LocationList::from(!(active | opponent)) {
            let captures_somewhere = Direction::ALL.iter().any(|&direction| {
                let mut cursor = direction.shift(cell.bitboard());
                let mut length = 0;
                while cursor.intersects(opponent) {
                    cursor = direction.shift(cursor);
                    length += 1;
                }
                length > 0 && cursor.intersects(active)
            });
            assert_eq!(
                captures_somewhere,
                bitboard::legal_moves(active, opponent).intersects(cell.bitboard())
            );
        }
    });
}

#[test]
fn legal_moves_are_symmetric() {
    let reflections: [fn(Bitboard) -> Bitboard; 4] = [
        Bitboard::mirror_horizontal,
        Bitboard::mirror_vertical,
        Bitboard::transpose,
        Bitboard::anti_transpose,
    ];

    for_each_random_state(6, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };
        let moves = bitboard::legal_moves(active, opponent);

        for reflect in reflections.iter() {
            assert_eq!(
                bitboard::legal_moves(reflect(active), reflect(opponent)),
                reflect(moves)
            );
        }
    });
}

#[test]
fn resolve_move_matches_apply_move() {
    for_each_random_state(7, |game| {
        let (active, opponent) = match active_and_opponent(game) {
            Some(sides) => sides,
            None => return,
        };

        for mv in LocationList::from(bitboard::legal_moves(active, opponent)) {
            let expected = bitboard::apply_move(active, opponent, mv.bitboard());
            let (mut new_active, mut new_opponent) = (active, opponent);
            let flipped = bitboard::resolve_move(mv.bitboard(), &mut new_active, &mut new_opponent);

            assert_eq!(flipped, expected.flipped);
            assert_eq!(new_active, expected.active);
            assert_eq!(new_opponent, expected.opponent);
        }
    });
}

#[test]
fn games_end_on_consecutive_passes() {
    let mut previous: Option<Game> = None;

    for_each_random_state(8, |game| {
        if let Some(before) = previous {
            if game.phase() == Phase::GameOver && before.phase() != Phase::GameOver {
                // The final action is a pass, following another pass.
                assert!(matches!(before.phase(), Phase::PassedOnce(_)));
                assert_eq!(game.pass_count(), 2);
                assert!(before.legal_moves().is_empty());
            }
        }

        if let Some(outcome) = game.outcome() {
            let tally = game.tally();
            let expected = if tally.black > tally.white {
                Outcome::BlackWins
            } else if tally.white > tally.black {
                Outcome::WhiteWins
            } else {
                Outcome::Draw
            };
            assert_eq!(outcome, expected);
            assert_eq!(
                tally.black,
                game.board().pieces(Player::Black).count_occupied()
            );
        }

        previous = Some(*game);
    });
}
