//! Square contents and the two sides of the game

use std::fmt;

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    /// The defenders and their king
    White,
    /// The attackers, who move first
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Side> {
        match symbol {
            'W' => Some(Side::White),
            'B' => Some(Side::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// The contents of a square
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    Empty,
    Attacker,
    Defender,
    King,
}

impl Piece {
    /// The side that owns this piece; the king belongs to White
    pub fn side(self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::Attacker => Some(Side::Black),
            Piece::Defender | Piece::King => Some(Side::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// The character used for this piece in board encodings and renderings
    pub fn symbol(self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::Attacker => 'B',
            Piece::Defender => 'W',
            Piece::King => 'K',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            '-' => Some(Piece::Empty),
            'B' => Some(Piece::Attacker),
            'W' => Some(Piece::Defender),
            'K' => Some(Piece::King),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
