//! An agent that chooses Tablut moves by game tree search

use tracing::debug;

use crate::{
    board::Board,
    moves::Move,
    piece::Side,
    SIZE,
};

/// The number of plies searched below the current position
pub const SEARCH_DEPTH: usize = 4;

/// The score of a position won by White; wins for Black score the negation
pub const WINNING_VALUE: i32 = i32::MAX - 20;

/// The static score of a position with the king already on an edge. Kept
/// below `WINNING_VALUE` so that reaching the edge now beats reaching it later.
pub const WILL_WIN_VALUE: i32 = i32::MAX - 40;

/// The largest bonus for the king's distance to the edge
pub const KING_EDGE_SCALE: i32 = 50;

/// Greater in magnitude than any score
const INFTY: i32 = i32::MAX;

/// Whether a ply is searched for White (maximizing) or Black (minimizing)
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Sense {
    Maximizing,
    Minimizing,
}

impl Sense {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::White => Sense::Maximizing,
            Side::Black => Sense::Minimizing,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Sense::Maximizing => Side::White,
            Sense::Minimizing => Side::Black,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Sense::Maximizing => Sense::Minimizing,
            Sense::Minimizing => Sense::Maximizing,
        }
    }
}

/// Receives the moves chosen by a [`Searcher`]
pub trait MoveReporter {
    fn report_move(&mut self, mv: Move);
}

/// An agent to choose moves in Tablut positions
///
/// # Notes
/// The agent runs a fixed-depth minimax search with alpha-beta pruning over
/// private copies of the position it was created from.
///
/// # Position Scoring
/// Scores are from White's point of view: White maximizes and Black minimizes.
/// A position is scored by material, White's pieces (king included) minus
/// Black's, plus a bonus that grows as the king nears an edge. Moves that win
/// on the spot score `WINNING_VALUE` for White and `-WINNING_VALUE` for Black.
#[derive(Clone)]
pub struct Searcher {
    board: Board,

    /// The number of positions visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` working on a copy of `board`
    pub fn new(board: &Board) -> Self {
        let mut board = board.clone();
        board.clear_undo();
        Self {
            board,
            node_count: 0,
        }
    }

    /// Returns the best move for the side to move, or `None` if the game is over
    pub fn find_move(&mut self) -> Option<Move> {
        self.search().map(|(_, best_move)| best_move)
    }

    /// Searches the position to `SEARCH_DEPTH`, returning its score and the best move
    pub fn search(&mut self) -> Option<(i32, Move)> {
        if self.board.winner().is_some() {
            return None;
        }
        let board = self.board.clone();
        let sense = Sense::for_side(board.turn());
        let (score, best_move) = self.minimax(&board, SEARCH_DEPTH, sense, -INFTY, INFTY);
        let best_move = best_move?;
        debug!(
            %best_move,
            score,
            nodes = self.node_count,
            side = %sense.side(),
            "search complete"
        );
        Some((score, best_move))
    }

    /// Finds a move, hands it to `reporter` and returns it as text
    pub fn my_move<R: MoveReporter>(&mut self, reporter: &mut R) -> Option<String> {
        let mv = self.find_move()?;
        reporter.report_move(mv);
        Some(mv.to_string())
    }

    /// Performs game tree search
    ///
    /// Returns the score of `board` (see [Position Scoring]) together with the
    /// move that achieves it, or `None` at a leaf
    ///
    /// [Position Scoring]: #position-scoring
    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        sense: Sense,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.node_count += 1;

        if depth == 0 || board.winner().is_some() {
            return (static_score(board), None);
        }

        let mut best_score = match sense {
            Sense::Maximizing => -INFTY,
            Sense::Minimizing => INFTY,
        };
        let mut best_move = None;

        for mv in board.legal_moves(sense.side()) {
            let mut next = board.clone();
            next.play_move(mv);

            // wins on this move end the search of this node
            match next.king_position() {
                Some(king) if king.is_edge() => return (WINNING_VALUE, Some(mv)),
                None => return (-WINNING_VALUE, Some(mv)),
                _ => {}
            }

            let (score, _) = self.minimax(&next, depth - 1, sense.opposite(), alpha, beta);
            match sense {
                Sense::Maximizing => {
                    if score > best_score {
                        best_score = score;
                        best_move = Some(mv);
                    }
                    alpha = alpha.max(best_score);
                }
                Sense::Minimizing => {
                    if score < best_score {
                        best_score = score;
                        best_move = Some(mv);
                    }
                    beta = beta.min(best_score);
                }
            }
            // the opponent will never allow this line, so the rest can be skipped
            if beta <= alpha {
                break;
            }
        }

        if best_move.is_none() {
            // no legal moves, so there is nothing to choose between
            return (static_score(board), None);
        }
        (best_score, best_move)
    }
}

impl std::ops::Deref for Searcher {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

/// Returns a heuristic value for `board` from White's point of view
pub fn static_score(board: &Board) -> i32 {
    let material = board.piece_locations(Side::White).len() as i32
        - board.piece_locations(Side::Black).len() as i32;

    let king_bonus = match board.king_position() {
        Some(king) if king.is_edge() => WILL_WIN_VALUE,
        Some(king) => {
            let col_distance = king.col().min(SIZE - 1 - king.col());
            let row_distance = king.row().min(SIZE - 1 - king.row());
            KING_EDGE_SCALE - col_distance.min(row_distance) as i32
        }
        None => -WILL_WIN_VALUE,
    };

    material + king_bonus
}
