use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::io::{stdin, stdout, Stdin, Write};

use tablut_ai::{
    board::Board,
    moves::Move,
    piece::Side,
    search::{MoveReporter, Searcher},
};

mod display;
use display::*;

#[derive(Parser)]
struct Args {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// White wins once this many moves have been played
    #[arg(short, long)]
    move_limit: Option<usize>,

    /// Let the AI play White
    #[arg(long)]
    white_ai: bool,

    /// Let the AI play Black
    #[arg(long)]
    black_ai: bool,
}

/// Prints the moves chosen by the AI the way a player would announce them
struct Announcer;

impl MoveReporter for Announcer {
    fn report_move(&mut self, mv: Move) {
        println!("* {}", mv);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let stdin = stdin();
    let mut board = Board::new();
    if let Some(limit) = args.move_limit {
        board.set_move_limit(limit)?;
    }

    println!("Welcome to Tablut\n");

    let ai_players = if args.white_ai || args.black_ai {
        (args.black_ai, args.white_ai)
    } else {
        (
            ask_ai_control(&stdin, "Black (attackers)")?,
            ask_ai_control(&stdin, "White (defenders)")?,
        )
    };

    // game loop
    loop {
        display(&board)?;

        if let Some(winner) = board.winner() {
            if board.repeated_position() {
                println!("Position repeated.");
            }
            info!(%winner, moves = board.move_count(), "game over");
            println!("{} wins!", winner);
            break;
        }

        let ai_turn = match board.turn() {
            Side::Black => ai_players.0,
            Side::White => ai_players.1,
        };

        if ai_turn {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(&format!("{} is thinking...", board.turn()));
            spinner.enable_steady_tick(100);

            let mut searcher = Searcher::new(&board);
            let chosen = searcher.find_move();
            spinner.finish_and_clear();

            match chosen {
                Some(mv) => {
                    Announcer.report_move(mv);
                    board.make_move_checked(mv)?;
                }
                None => {
                    println!("{} has no moves left.", board.turn());
                    break;
                }
            }

        // human player
        } else {
            print!("{} move > ", board.turn());
            stdout().flush()?;
            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                break;
            }

            match input_str.trim() {
                "quit" => break,
                "undo" => {
                    // take back the opponent's reply as well when it was played by the AI
                    board.undo();
                    if ai_players.0 || ai_players.1 {
                        board.undo();
                    }
                }
                text => {
                    let result = text
                        .parse::<Move>()
                        .and_then(|mv| board.make_move_checked(mv));
                    if let Err(err) = result {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
            }
        }
    }
    Ok(())
}

fn ask_ai_control(stdin: &Stdin, player: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("Is {} AI controlled? y/n: ", player);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
