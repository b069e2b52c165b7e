//! The Tablut rules engine: move legality, captures, game end and undo

use std::fmt;

use tracing::trace;

use crate::{
    moves::Move,
    piece::{Piece, Side},
    square::{Direction, Square},
    TablutError, SIZE,
};

/// The central square, which only the king may occupy
pub const THRONE: Square = Square::at(SIZE / 2, SIZE / 2);
pub const NTHRONE: Square = Square::at(SIZE / 2, SIZE / 2 + 1);
pub const ETHRONE: Square = Square::at(SIZE / 2 + 1, SIZE / 2);
pub const STHRONE: Square = Square::at(SIZE / 2, SIZE / 2 - 1);
pub const WTHRONE: Square = Square::at(SIZE / 2 - 1, SIZE / 2);

/// The four squares orthogonally adjacent to the throne
pub const THRONE_NEIGHBOURS: [Square; 4] = [NTHRONE, ETHRONE, STHRONE, WTHRONE];

/// Starting squares of the attackers
pub const INITIAL_ATTACKERS: [Square; 16] = [
    Square::at(0, 3),
    Square::at(0, 4),
    Square::at(0, 5),
    Square::at(1, 4),
    Square::at(8, 3),
    Square::at(8, 4),
    Square::at(8, 5),
    Square::at(7, 4),
    Square::at(3, 0),
    Square::at(4, 0),
    Square::at(5, 0),
    Square::at(4, 1),
    Square::at(3, 8),
    Square::at(4, 8),
    Square::at(5, 8),
    Square::at(4, 7),
];

/// Starting squares of the defenders, not including the king
pub const INITIAL_DEFENDERS: [Square; 8] = [
    NTHRONE,
    ETHRONE,
    STHRONE,
    WTHRONE,
    Square::at(4, 6),
    Square::at(4, 2),
    Square::at(2, 4),
    Square::at(6, 4),
];

#[derive(Copy, Clone, Debug)]
struct Capture {
    square: Square,
    piece: Piece,
}

/// Everything needed to take back one move
#[derive(Clone, Debug)]
struct MoveRecord {
    mv: Move,
    moved: Piece,
    displaced: Piece,
    captures: Vec<Capture>,
    turn: Side,
    winner: Option<Side>,
    repeated: bool,
}

/// The state of a game of Tablut
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Piece; SIZE * SIZE], // indexed by `Square::index`
    turn: Side,
    winner: Option<Side>,
    repeated: bool,
    move_count: usize,
    move_limit: Option<usize>,
    // encodings of every position reached so far, oldest first
    history: Vec<String>,
    undo_log: Vec<MoveRecord>,
}

impl Board {
    /// Creates a board in the initial position with Black to move
    pub fn new() -> Self {
        let mut cells = [Piece::Empty; SIZE * SIZE];
        for square in INITIAL_ATTACKERS.iter() {
            cells[square.index()] = Piece::Attacker;
        }
        for square in INITIAL_DEFENDERS.iter() {
            cells[square.index()] = Piece::Defender;
        }
        cells[THRONE.index()] = Piece::King;
        Self::from_cells(cells, Side::Black)
    }

    /// Creates a board from the output of [`Board::encoded_board`]
    pub fn from_encoded(encoded: &str) -> Result<Self, TablutError> {
        let mut symbols = encoded.trim().chars();
        let turn = symbols.next().and_then(Side::from_symbol).ok_or_else(|| {
            TablutError::InvalidEncoding(format!("'{}' does not start with W or B", encoded))
        })?;

        let mut cells = [Piece::Empty; SIZE * SIZE];
        let mut num_cells = 0;
        for (index, symbol) in symbols.enumerate() {
            if index >= SIZE * SIZE {
                return Err(TablutError::InvalidEncoding(format!(
                    "more than {} squares",
                    SIZE * SIZE
                )));
            }
            cells[index] = Piece::from_symbol(symbol).ok_or_else(|| {
                TablutError::InvalidEncoding(format!("unknown piece '{}'", symbol))
            })?;
            num_cells += 1;
        }
        if num_cells != SIZE * SIZE {
            return Err(TablutError::InvalidEncoding(format!(
                "expected {} squares, found {}",
                SIZE * SIZE,
                num_cells
            )));
        }
        Ok(Self::from_cells(cells, turn))
    }

    fn from_cells(cells: [Piece; SIZE * SIZE], turn: Side) -> Self {
        let mut board = Self {
            cells,
            turn,
            winner: None,
            repeated: false,
            move_count: 0,
            move_limit: None,
            history: Vec::new(),
            undo_log: Vec::new(),
        };
        board.check_repeated();
        board
    }

    /// Sets the number of moves after which White wins.
    ///
    /// Fails if `2 * limit` does not exceed the moves already played. Limits too
    /// large to double are accepted.
    pub fn set_move_limit(&mut self, limit: usize) -> Result<(), TablutError> {
        if limit.saturating_mul(2) <= self.move_count {
            return Err(TablutError::InvalidMoveLimit {
                limit,
                move_count: self.move_count,
            });
        }
        self.move_limit = Some(limit);
        Ok(())
    }

    pub fn move_limit(&self) -> Option<usize> {
        self.move_limit
    }

    /// The side to move
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The winner of the game, or `None` while it is still being played
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Returns true if the game ended by repeating a position
    pub fn repeated_position(&self) -> bool {
        self.repeated
    }

    /// The number of moves played and not undone
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// The square holding the king, or `None` once it has been captured
    pub fn king_position(&self) -> Option<Square> {
        Square::all().find(|&square| self.get(square) == Piece::King)
    }

    pub fn get(&self, square: Square) -> Piece {
        self.cells[square.index()]
    }

    /// The contents of the square at `col`, `row`, or `None` if it is off the board
    pub fn get_at(&self, col: usize, row: usize) -> Option<Piece> {
        Square::new(col, row).map(|square| self.get(square))
    }

    /// The contents of an algebraic square such as `e5`
    pub fn get_named(&self, name: &str) -> Result<Piece, TablutError> {
        Ok(self.get(name.parse()?))
    }

    /// Places `piece` on `square` without recording anything for undo
    pub fn put(&mut self, piece: Piece, square: Square) {
        self.cells[square.index()] = piece;
    }

    /// The squares occupied by `side`, king included for White, in index order
    pub fn piece_locations(&self, side: Side) -> Vec<Square> {
        Square::all()
            .filter(|&square| self.get(square).side() == Some(side))
            .collect()
    }

    /// Returns true if the piece on `from` belongs to the side to move and
    /// can slide to `to` along a row or column without passing over or
    /// landing on another piece
    pub fn is_unblocked_move(&self, from: Square, to: Square) -> bool {
        if self.get(from).side() != Some(self.turn) {
            return false;
        }
        let direction = match from.direction_to(to) {
            Some(direction) => direction,
            None => return false,
        };
        let mut square = from;
        while square != to {
            square = match square.rook_move(direction, 1) {
                Some(next) => next,
                None => return false,
            };
            if !self.get(square).is_empty() {
                return false;
            }
        }
        true
    }

    /// Returns true if `from`-`to` is a legal move for the side to move
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.is_unblocked_move(from, to) && (self.get(from) == Piece::King || to != THRONE)
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.is_legal(mv.from, mv.to)
    }

    /// Returns every legal move for `side`, regardless of whose turn it is
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in self.piece_locations(side) {
            let is_king = self.get(from) == Piece::King;
            for &direction in Direction::ALL.iter() {
                for distance in 1..SIZE {
                    let to = match from.rook_move(direction, distance) {
                        Some(to) if self.get(to).is_empty() => to,
                        _ => break,
                    };
                    // pieces may pass over the empty throne but not stop on it
                    if is_king || to != THRONE {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }
        moves
    }

    /// Returns true if `side` has at least one legal move
    pub fn has_move(&self, side: Side) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// Plays `from`-`to`, which must be a legal move
    pub fn make_move(&mut self, from: Square, to: Square) {
        debug_assert!(self.is_legal(from, to), "illegal move {}-{}", from, to);

        let mover = self.turn;
        let moved = self.get(from);
        let mut record = MoveRecord {
            mv: Move::new(from, to),
            moved,
            displaced: self.get(to),
            captures: Vec::new(),
            turn: mover,
            winner: self.winner,
            repeated: self.repeated,
        };

        self.put(moved, to);
        self.put(Piece::Empty, from);
        self.move_count += 1;

        if moved == Piece::King && to.is_edge() {
            trace!(king = %to, "king escaped");
            self.winner = Some(Side::White);
        } else {
            for &direction in Direction::ALL.iter() {
                if let (Some(middle), Some(far)) =
                    (to.rook_move(direction, 1), to.rook_move(direction, 2))
                {
                    if self.is_capture_partner(far, mover) {
                        self.capture(middle, mover, &mut record.captures);
                    }
                }
            }
        }

        // an escape or king capture on this move outranks the move limit
        let decided = self.winner.is_some();
        self.turn = mover.opponent();
        self.check_repeated();
        if !decided && self.move_limit == Some(self.move_count) {
            trace!(move_count = self.move_count, "move limit reached");
            self.winner = Some(Side::White);
        }
        self.undo_log.push(record);
    }

    /// Plays `mv`, which must be a legal move
    pub fn play_move(&mut self, mv: Move) {
        self.make_move(mv.from, mv.to);
    }

    /// Plays `mv` if it is legal and the game is not over
    pub fn make_move_checked(&mut self, mv: Move) -> Result<(), TablutError> {
        if self.winner.is_some() || !self.is_legal_move(mv) {
            return Err(TablutError::IllegalMove(mv));
        }
        self.play_move(mv);
        Ok(())
    }

    /// Returns true if `square` can close a capture for a piece of `mover`
    /// standing two squares away
    fn is_capture_partner(&self, square: Square, mover: Side) -> bool {
        if square != THRONE {
            return self.get(square).side() == Some(mover);
        }
        match (self.get(THRONE), mover) {
            (Piece::Empty, _) => true,
            (_, Side::White) => true,
            // an occupied throne only helps Black once it is surrounded on three sides
            (_, Side::Black) => {
                THRONE_NEIGHBOURS
                    .iter()
                    .filter(|&&neighbour| self.get(neighbour) == Piece::Attacker)
                    .count()
                    >= 3
            }
        }
    }

    /// Removes the enemy piece on `square` if it is captured by `mover`
    fn capture(&mut self, square: Square, mover: Side, captures: &mut Vec<Capture>) {
        let piece = self.get(square);
        if piece.is_empty() || piece.side() == Some(mover) {
            return;
        }
        if piece == Piece::King {
            if is_throne_area(square) && !self.is_besieged(square) {
                return;
            }
            trace!(king = %square, "king captured");
            self.winner = Some(mover);
        }
        trace!(%square, ?piece, "captured");
        captures.push(Capture { square, piece });
        self.put(Piece::Empty, square);
    }

    /// Returns true if every neighbour of `square` is an attacker or the empty throne
    fn is_besieged(&self, square: Square) -> bool {
        square.neighbours().all(|neighbour| match self.get(neighbour) {
            Piece::Attacker => true,
            Piece::Empty => neighbour == THRONE,
            _ => false,
        })
    }

    /// Records the current position, ending the game if it has been seen before
    fn check_repeated(&mut self) {
        let encoded = self.encoded_board();
        if self.history.contains(&encoded) {
            self.repeated = true;
            if self.winner.is_none() {
                trace!(winner = %self.turn, "position repeated");
                self.winner = Some(self.turn);
            }
        }
        self.history.push(encoded);
    }

    /// Takes back the last move. Does nothing if there is no move to take back.
    pub fn undo(&mut self) {
        let record = match self.undo_log.pop() {
            Some(record) => record,
            None => return,
        };
        self.history.pop();

        self.put(record.displaced, record.mv.to);
        self.put(record.moved, record.mv.from);
        for capture in record.captures.iter().rev() {
            self.put(capture.piece, capture.square);
        }

        self.move_count -= 1;
        self.turn = record.turn;
        self.winner = record.winner;
        self.repeated = record.repeated;
    }

    /// Forgets all moves that could be undone, keeping the current position and result
    pub fn clear_undo(&mut self) {
        self.undo_log.clear();
    }

    /// The side to move followed by the contents of every square in index order
    pub fn encoded_board(&self) -> String {
        let mut encoded = String::with_capacity(SIZE * SIZE + 1);
        encoded.push(self.turn.symbol());
        encoded.extend(self.cells.iter().map(|piece| piece.symbol()));
        encoded
    }

    /// A text grid of the board, ranks from 9 down to 1, optionally labelled
    pub fn render(&self, coordinates: bool) -> String {
        let mut out = String::new();
        for row in (0..SIZE).rev() {
            if coordinates {
                out.push_str(&format!("{:2}", row + 1));
            } else {
                out.push_str("  ");
            }
            for col in 0..SIZE {
                out.push(' ');
                out.push(self.get(Square::at(col, row)).symbol());
            }
            out.push('\n');
        }
        if coordinates {
            out.push_str("  ");
            for col in 0..SIZE {
                out.push(' ');
                out.push((b'a' + col as u8) as char);
            }
            out.push('\n');
        }
        out
    }
}

/// Returns true for the throne and the four squares next to it
pub fn is_throne_area(square: Square) -> bool {
    square == THRONE || THRONE_NEIGHBOURS.contains(&square)
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(true))
    }
}
