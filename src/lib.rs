//! A rules engine and game-playing agent for the board game 'Tablut'
//!
//! Tablut is played on a 9x9 board between the attackers (Black), who move
//! first, and the defenders (White), who protect a king starting on the
//! central throne. White wins when the king reaches an edge square, Black
//! wins by capturing the king.
//!
//! # Basic Usage
//!
//! ```
//! use tablut_ai::{board::Board, search::Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! board.make_move_checked("h5-h9".parse()?)?;
//!
//! let mut searcher = Searcher::new(&board);
//! let best_move = searcher.find_move().expect("game is not over");
//!
//! assert!(board.legal_moves(board.turn()).contains(&best_move));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod error;

pub mod square;

pub mod piece;

pub mod moves;

pub mod board;

pub mod search;


pub use error::TablutError;

/// The number of squares on a side of the board
pub const SIZE: usize = 9;

// the throne needs a single centre square, and algebraic squares use one letter and one digit
const_assert!(SIZE % 2 == 1);
const_assert!(SIZE <= 9);
