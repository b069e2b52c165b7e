use std::fmt;
use std::str::FromStr;

use crate::{square::Square, TablutError};

/// A move of a single piece from one square to another, written `d9-d6`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = TablutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, '-');
        match (parts.next(), parts.next()) {
            (Some(from), Some(to)) => Ok(Move::new(
                from.parse().map_err(|_| TablutError::InvalidMove(s.to_string()))?,
                to.parse().map_err(|_| TablutError::InvalidMove(s.to_string()))?,
            )),
            _ => Err(TablutError::InvalidMove(s.to_string())),
        }
    }
}
