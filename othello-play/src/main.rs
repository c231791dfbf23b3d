//! Play Othello between two people at the terminal.

mod render;

use clap::Parser;
use log::{info, LevelFilter};
use othello_rules::{Game, Location, Player};
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(about = "Two-player Othello at the terminal")]
struct Cli {
    /// Side that moves first
    #[arg(long, default_value = "black")]
    first: Player,

    /// Don't mark legal moves on the board
    #[arg(long)]
    no_hints: bool,

    /// Logging level; RUST_LOG overrides it
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut game = Game::with_first_player(cli.first);

    while let Some(player) = game.side_to_move() {
        println!("\n{}'s turn\n", player);
        println!("{}\n", render::render(&game, !cli.no_hints));

        if game.must_pass() {
            println!("Pass");
            game = game.pass()?;
            continue;
        }

        match read_move(&game, &mut input)? {
            Some(loc) => game = game.play(loc)?,
            None => {
                info!("Input closed before the game finished");
                return Ok(());
            }
        }
    }

    println!("\n{}\n", render::render(&game, false));
    println!("Game finished.");
    if let Some(outcome) = game.outcome() {
        println!("{}", outcome);
    }
    Ok(())
}

/// Prompt until the player enters a legal move. Returns None once input runs out.
fn read_move<R: BufRead>(game: &Game, input: &mut R) -> io::Result<Option<Location>> {
    let mut line = String::new();

    loop {
        print!("Input<< ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.parse::<Location>() {
            Ok(loc) if game.is_legal(loc) => return Ok(Some(loc)),
            Ok(loc) => println!(
                "Invalid input: {} is not a legal move. Legal moves: {}",
                loc,
                game.legal_moves()
            ),
            Err(err) => println!("Invalid input: {}", err),
        }
    }
}
