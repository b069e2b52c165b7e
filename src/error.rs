use crate::moves::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors surfaced by the rules engine.
pub enum TablutError {
    /// The requested move limit is already exceeded by the moves played so far.
    InvalidMoveLimit { limit: usize, move_count: usize },
    /// Text that is not an algebraic square such as `d9`.
    InvalidSquare(String),
    /// Text that is not a move such as `d9-d6`.
    InvalidMove(String),
    /// A move that is not legal in the current position, or any move once the game is over.
    IllegalMove(Move),
    /// Text that is not a position produced by `Board::encoded_board`.
    InvalidEncoding(String),
}

impl std::error::Error for TablutError {}

impl std::fmt::Display for TablutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TablutError::InvalidMoveLimit { limit, move_count } => write!(
                f,
                "Illegal move limit {}, {} moves have already been played",
                limit, move_count
            ),
            TablutError::InvalidSquare(text) => {
                write!(f, "could not parse '{}' as a square", text)
            }
            TablutError::InvalidMove(text) => write!(f, "could not parse '{}' as a move", text),
            TablutError::IllegalMove(mv) => write!(f, "Invalid move, {} is not legal here", mv),
            TablutError::InvalidEncoding(reason) => {
                write!(f, "Invalid board encoding: {}", reason)
            }
        }
    }
}
