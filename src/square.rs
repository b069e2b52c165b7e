//! Board coordinates and rook-move geometry

use std::fmt;
use std::str::FromStr;

use crate::{TablutError, SIZE};

/// One of the four orthogonal directions a piece can move in
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order moves are generated
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row offsets of a single step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// A square on the board, addressed by column (file `a`-`i`) and row (rank `1`-`9`)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Square {
    col: u8,
    row: u8,
}

impl Square {
    /// Creates a square from a column and row, or `None` if it is off the board
    pub fn new(col: usize, row: usize) -> Option<Self> {
        if col < SIZE && row < SIZE {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Creates a square at a column and row known to be on the board
    pub const fn at(col: usize, row: usize) -> Self {
        assert!(col < SIZE && row < SIZE);
        Self {
            col: col as u8,
            row: row as u8,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index % SIZE, index / SIZE)
    }

    /// Iterates over every square in index order (`a1`, `b1`, ..., `i9`)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SIZE * SIZE).map(|index| Square::at(index % SIZE, index / SIZE))
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    /// The stable linear index of this square, rows first from `a1`
    pub fn index(self) -> usize {
        self.row() * SIZE + self.col()
    }

    pub fn is_edge(self) -> bool {
        self.col == 0 || self.row == 0 || self.col() == SIZE - 1 || self.row() == SIZE - 1
    }

    /// Returns true if `other` is a different square on the same row or column
    pub fn is_rook_move(self, other: Square) -> bool {
        self != other && (self.col == other.col || self.row == other.row)
    }

    /// The direction of a rook move from this square to `other`
    pub fn direction_to(self, other: Square) -> Option<Direction> {
        if !self.is_rook_move(other) {
            return None;
        }
        Some(if self.col == other.col {
            if other.row > self.row {
                Direction::North
            } else {
                Direction::South
            }
        } else if other.col > self.col {
            Direction::East
        } else {
            Direction::West
        })
    }

    /// The square `distance` steps away in `direction`, or `None` if that is off the board
    pub fn rook_move(self, direction: Direction, distance: usize) -> Option<Square> {
        let (dc, dr) = direction.delta();
        let col = self.col as isize + dc * distance as isize;
        let row = self.row as isize + dr * distance as isize;
        if col < 0 || row < 0 {
            return None;
        }
        Square::new(col as usize, row as usize)
    }

    /// The square halfway along a rook move of distance two
    pub fn between(self, other: Square) -> Option<Square> {
        let (dc, dr) = (
            other.col as isize - self.col as isize,
            other.row as isize - self.row as isize,
        );
        match (dc.abs(), dr.abs()) {
            (2, 0) | (0, 2) => Square::new(
                (self.col as isize + dc / 2) as usize,
                (self.row as isize + dr / 2) as usize,
            ),
            _ => None,
        }
    }

    /// The squares one step away in each direction that are on the board
    pub fn neighbours(self) -> impl Iterator<Item = Square> {
        let directions: &'static [Direction; 4] = &Direction::ALL;
        directions
            .iter()
            .filter_map(move |&direction| self.rook_move(direction, 1))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Square {
    type Err = TablutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(col @ 'a'..='i'), Some(row @ '1'..='9'), None) => {
                Square::new(col as usize - 'a' as usize, row as usize - '1' as usize)
                    .ok_or_else(|| TablutError::InvalidSquare(s.to_string()))
            }
            _ => Err(TablutError::InvalidSquare(s.to_string())),
        }
    }
}
