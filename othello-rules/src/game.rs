//! Implements game-level Othello logic: the turn controller.
//!
//! [`Game`] is a by-value state machine. Every transition validates its input and
//! returns a new [`Game`], so a caller can keep or discard states freely.
//! For raw speed, use [`crate::bitboard`] directly.

use crate::bitboard::{self, Bitboard};
use crate::board::{Board, Tally};
use crate::location::{Location, LocationList};
use crate::NUM_SPACES;
use derive_more::{Display, Error};
use log::{debug, info};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ParsePlayerError;

impl fmt::Display for ParsePlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected \"black\" or \"white\"")
    }
}

impl std::error::Error for ParsePlayerError {}

impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Player::Black),
            "white" | "w" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// An action in an Othello game: pass or place a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Place(Location),
    Pass,
}

impl From<Location> for Action {
    fn from(loc: Location) -> Self {
        Self::Place(loc)
    }
}

/// Where the game is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `side` moves next; the previous turn placed a piece (or the game just began).
    AwaitingMove(Player),
    /// `side` moves next; the previous turn was a pass.
    PassedOnce(Player),
    /// Both players passed in a row.
    GameOver,
}

impl Phase {
    /// The player to move, or None if the game is over.
    #[inline]
    pub fn side(self) -> Option<Player> {
        match self {
            Phase::AwaitingMove(side) | Phase::PassedOnce(side) => Some(side),
            Phase::GameOver => None,
        }
    }
}

/// The result of a finished game. More pieces wins outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display(fmt = "Winner: Black")]
    BlackWins,
    #[display(fmt = "Winner: White")]
    WhiteWins,
    #[display(fmt = "Draw")]
    Draw,
}

impl Outcome {
    /// Decide a game from its final piece counts.
    pub fn from_tally(tally: Tally) -> Self {
        use std::cmp::Ordering;

        match tally.black.cmp(&tally.white) {
            Ordering::Greater => Outcome::BlackWins,
            Ordering::Less => Outcome::WhiteWins,
            Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::BlackWins => Some(Player::Black),
            Outcome::WhiteWins => Some(Player::White),
            Outcome::Draw => None,
        }
    }
}

/// Reasons an [`Action`] can be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display(fmt = "the game is over")]
    GameOver,
    #[display(fmt = "{} is not a legal move", location)]
    IllegalMove { location: Location },
    #[display(fmt = "no legal moves: the player must pass")]
    MustPass,
    #[display(fmt = "cannot pass while legal moves remain")]
    CannotPass,
}

/// The complete state of an Othello game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    phase: Phase,
    turns_remaining: u8,
    passes: u8,
    last_flipped: Bitboard,
}

impl Default for Game {
    /// The standard opening with Black to move.
    fn default() -> Self {
        Self::with_first_player(Player::default())
    }
}

impl Game {
    /// Number of plies the turn counter starts from. A loop bound only: games end on passes.
    pub const TURN_LIMIT: u8 = NUM_SPACES as u8;

    /// Start a game from the standard opening with Black to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game from the standard opening with `player` to move.
    pub fn with_first_player(player: Player) -> Self {
        Self::from_board(Board::opening(), player)
    }

    /// Start a game from an arbitrary position with `player` to move.
    pub fn from_board(board: Board, player: Player) -> Self {
        Self {
            board,
            phase: Phase::AwaitingMove(player),
            turns_remaining: Self::TURN_LIMIT,
            passes: 0,
            last_flipped: bitboard::EMPTY,
        }
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player to move, or None if the game is over.
    #[inline]
    pub fn side_to_move(&self) -> Option<Player> {
        self.phase.side()
    }

    /// Number of consecutive passes leading up to this state.
    #[inline]
    pub fn pass_count(&self) -> u8 {
        self.passes
    }

    #[inline]
    pub fn turns_remaining(&self) -> u8 {
        self.turns_remaining
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Pieces captured by the most recent placement; empty after a pass.
    #[inline]
    pub fn last_flipped(&self) -> Bitboard {
        self.last_flipped
    }

    /// Legal placements for the player to move. Empty when the game is over.
    pub fn legal_moves(&self) -> LocationList {
        match self.side_to_move() {
            Some(player) => self.board.legal_moves(player).into(),
            None => LocationList::default(),
        }
    }

    /// Whether the player to move has no placements and has to pass.
    pub fn must_pass(&self) -> bool {
        !self.is_over() && self.legal_moves().is_empty()
    }

    /// Whether placing at `loc` is currently allowed.
    pub fn is_legal(&self, loc: Location) -> bool {
        self.legal_moves().contains(loc)
    }

    #[inline]
    pub fn tally(&self) -> Tally {
        self.board.tally()
    }

    /// The result of the game, once it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_over() {
            Some(Outcome::from_tally(self.tally()))
        } else {
            None
        }
    }

    /// The winner of the game, if it is over and not drawn.
    pub fn winner(&self) -> Option<Player> {
        self.outcome().and_then(Outcome::winner)
    }

    /// Place a piece for the player to move.
    pub fn play(self, loc: Location) -> Result<Self, GameError> {
        let player = self.side_to_move().ok_or(GameError::GameOver)?;
        let moves = self.board.legal_moves(player);

        if moves.is_empty() {
            return Err(GameError::MustPass);
        }
        if !moves.intersects(loc.bitboard()) {
            return Err(GameError::IllegalMove { location: loc });
        }

        let (active, opponent) = self.board.split(player);
        let result = bitboard::apply_move(active, opponent, loc.bitboard());
        debug!(
            "{} plays {}, flipping {}",
            player,
            loc,
            LocationList::from(result.flipped)
        );

        Ok(Self {
            board: Board::join(player, result.active, result.opponent),
            phase: Phase::AwaitingMove(!player),
            turns_remaining: self.turns_remaining.saturating_sub(1),
            passes: 0,
            last_flipped: result.flipped,
        })
    }

    /// Pass for the player to move. Only allowed when they have no legal placement.
    pub fn pass(self) -> Result<Self, GameError> {
        let player = self.side_to_move().ok_or(GameError::GameOver)?;

        if !self.board.legal_moves(player).is_empty() {
            return Err(GameError::CannotPass);
        }

        let passes = self.passes + 1;
        let phase = if passes >= 2 {
            info!("Game over after consecutive passes: {}", self.tally());
            Phase::GameOver
        } else {
            debug!("{} passes", player);
            Phase::PassedOnce(!player)
        };

        Ok(Self {
            board: self.board,
            phase,
            turns_remaining: self.turns_remaining.saturating_sub(1),
            passes,
            last_flipped: bitboard::EMPTY,
        })
    }

    /// Take an action as the player to move.
    pub fn apply(self, action: Action) -> Result<Self, GameError> {
        match action {
            Action::Place(loc) => self.play(loc),
            Action::Pass => self.pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(notation: &str) -> Location {
        notation.parse().unwrap()
    }

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    #[test]
    fn opening_state() {
        let game = Game::new();
        assert_eq!(game.phase(), Phase::AwaitingMove(Player::Black));
        assert_eq!(game.pass_count(), 0);
        assert_eq!(game.turns_remaining(), 64);
        assert_eq!(game.tally(), Tally { black: 2, white: 2 });
        assert_eq!(game.outcome(), None);
        assert_eq!(game.legal_moves().to_string(), "[D3, C4, F5, E6]");
    }

    #[test]
    fn white_can_move_first() {
        let game = Game::with_first_player(Player::White);
        assert_eq!(game.side_to_move(), Some(Player::White));
        assert_eq!(game.legal_moves().to_string(), "[E3, F4, C5, D6]");
    }

    #[test]
    fn black_opens_at_d3() {
        let game = Game::new().play(loc("D3")).unwrap();

        assert_eq!(game.tally(), Tally { black: 4, white: 1 });
        assert_eq!(game.last_flipped(), loc("D4").bitboard());
        assert_eq!(game.board().player_at(loc("D4").bitboard()), Some(Player::Black));
        assert_eq!(game.phase(), Phase::AwaitingMove(Player::White));
        assert_eq!(game.turns_remaining(), 63);
    }

    #[test]
    fn illegal_moves_are_refused() {
        let game = Game::new();
        assert_eq!(
            game.play(loc("A1")),
            Err(GameError::IllegalMove { location: loc("A1") })
        );
        // Occupied by White.
        assert_eq!(
            game.play(loc("D4")),
            Err(GameError::IllegalMove { location: loc("D4") })
        );
        assert_eq!(game.pass(), Err(GameError::CannotPass));
    }

    #[test]
    fn single_pass_then_reply() {
        // Black's only piece is boxed against the edge; White can capture it.
        let game = Game::from_board(
            board(&format!("OX------{}", "-".repeat(56))),
            Player::Black,
        );
        assert!(game.must_pass());
        assert_eq!(game.play(loc("C1")), Err(GameError::MustPass));

        let game = game.pass().unwrap();
        assert_eq!(game.phase(), Phase::PassedOnce(Player::White));
        assert_eq!(game.pass_count(), 1);
        assert_eq!(game.last_flipped(), bitboard::EMPTY);

        let game = game.apply(Action::Place(loc("C1"))).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingMove(Player::Black));
        assert_eq!(game.pass_count(), 0);
        assert_eq!(game.tally(), Tally { black: 0, white: 3 });

        let game = game.pass().unwrap().pass().unwrap();
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::WhiteWins));
        assert_eq!(game.winner(), Some(Player::White));
    }

    #[test]
    fn double_pass_ends_the_game() {
        let game = Game::from_board(board(&format!("X{}", "-".repeat(63))), Player::White);
        let game = game.apply(Action::Pass).unwrap();
        assert_eq!(game.phase(), Phase::PassedOnce(Player::Black));

        let game = game.apply(Action::Pass).unwrap();
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.pass_count(), 2);
        assert_eq!(game.side_to_move(), None);
        assert_eq!(game.tally(), Tally { black: 1, white: 0 });
        assert_eq!(game.outcome(), Some(Outcome::BlackWins));
        assert_eq!(game.turns_remaining(), 62);
    }

    #[test]
    fn finished_games_refuse_actions() {
        let game = Game::from_board(
            board(&format!("{}{}", "X".repeat(32), "O".repeat(32))),
            Player::Black,
        );
        let game = game.pass().unwrap().pass().unwrap();

        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert_eq!(game.winner(), None);
        assert!(game.legal_moves().is_empty());
        assert!(!game.must_pass());
        assert_eq!(game.pass(), Err(GameError::GameOver));
        assert_eq!(game.play(loc("A1")), Err(GameError::GameOver));
    }

    #[test]
    fn turn_counter_saturates_without_ending_the_game() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        // Random play that prefers moves forcing the opponent to pass,
        // so games run past the 64th ply.
        let mut rng = StdRng::seed_from_u64(64);
        let (mut placed_at_zero, mut passed_at_zero) = (false, false);

        for _ in 0..10_000 {
            let mut game = Game::new();

            while !game.is_over() {
                let exhausted = game.turns_remaining() == 0;
                let replies: Vec<Game> = game
                    .legal_moves()
                    .map(|mv| game.play(mv).unwrap())
                    .collect();
                let forcing: Vec<Game> = replies.iter().copied().filter(Game::must_pass).collect();

                game = if replies.is_empty() {
                    passed_at_zero |= exhausted;
                    game.pass().unwrap()
                } else if !forcing.is_empty() && rng.gen_bool(0.9) {
                    placed_at_zero |= exhausted;
                    forcing[rng.gen_range(0..forcing.len())]
                } else {
                    placed_at_zero |= exhausted;
                    replies[rng.gen_range(0..replies.len())]
                };

                if exhausted {
                    assert_eq!(game.turns_remaining(), 0);
                }
            }

            if placed_at_zero && passed_at_zero {
                break;
            }
        }

        assert!(placed_at_zero, "no placement was made with the counter at zero");
        assert!(passed_at_zero, "no pass was made with the counter at zero");
    }

    #[test]
    fn parse_player() {
        assert_eq!("black".parse::<Player>(), Ok(Player::Black));
        assert_eq!(" White ".parse::<Player>(), Ok(Player::White));
        assert_eq!("w".parse::<Player>(), Ok(Player::White));
        assert_eq!("red".parse::<Player>(), Err(ParsePlayerError));
        assert_eq!(!Player::Black, Player::White);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::BlackWins.to_string(), "Winner: Black");
        assert_eq!(Outcome::Draw.to_string(), "Draw");
        assert_eq!(
            GameError::IllegalMove { location: loc("H8") }.to_string(),
            "H8 is not a legal move"
        );
    }
}
