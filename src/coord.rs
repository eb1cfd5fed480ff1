use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::ChessError;

pub const BOARD_WIDTH: u8 = 8;

/// A square on the board. `file` and `rank` are both in `1..=8`
/// (file 1 is column `a`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    /// Builds a position from raw coordinates, rejecting anything off the grid.
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if (1..=BOARD_WIDTH).contains(&file) && (1..=BOARD_WIDTH).contains(&rank) {
            Ok(Self { file, rank })
        } else {
            Err(ChessError::OutOfBound {
                square: format!("({file}, {rank})"),
            })
        }
    }

    /// Parses two-character notation such as `e4`.
    /// Returns `None` for anything that is not a letter `a`-`h` followed by a digit `1`-`8`.
    pub fn parse(text: &str) -> Option<Self> {
        let &[col, row] = text.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&col) || !(b'1'..=b'8').contains(&row) {
            return None;
        }
        Some(Self {
            file: col - b'a' + 1,
            rank: row - b'0',
        })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// All 64 squares in display order: rank 8 down to rank 1, file `a` to `h`.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=BOARD_WIDTH)
            .rev()
            .flat_map(|rank| (1..=BOARD_WIDTH).map(move |file| Position { file, rank }))
    }

    fn offset(self, file: i8, rank: i8) -> Result<Self, ChessError> {
        let file = self.file as i8 + file;
        let rank = self.rank as i8 + rank;
        if in_bounds(file, rank) {
            Ok(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            Err(out_of_bound(file, rank))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file - 1) as char, self.rank)
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s).ok_or_else(|| ChessError::OutOfBound {
            square: s.to_string(),
        })
    }
}

impl Sub for Position {
    type Output = Vector;

    /// `target - source` is the displacement from `source` to `target`.
    fn sub(self, rhs: Position) -> Vector {
        Vector::of(rhs, self)
    }
}

/// Signed displacement between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    pub file: i8,
    pub rank: i8,
}

impl Vector {
    pub fn of(source: Position, target: Position) -> Self {
        Self {
            file: target.file as i8 - source.file as i8,
            rank: target.rank as i8 - source.rank as i8,
        }
    }

    #[inline]
    pub fn chebyshev_norm(self) -> i8 {
        self.file.abs().max(self.rank.abs())
    }

    /// Along a file or a rank, never zero.
    #[inline]
    pub fn is_straight(self) -> bool {
        (self.file == 0) != (self.rank == 0)
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.file != 0 && self.file.abs() == self.rank.abs()
    }

    #[inline]
    pub fn is_linear(self) -> bool {
        self.is_straight() || self.is_diagonal()
    }

    #[inline]
    pub fn is_knight_jump(self) -> bool {
        matches!(
            (self.file.abs(), self.rank.abs()),
            (1, 2) | (2, 1)
        )
    }
}

/// One of the eight unit compass steps. North is towards rank 8, east towards file `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    /// Classifies a straight or diagonal vector. Knight-shaped and other
    /// irregular displacements yield `NotLinear`.
    pub fn of(vector: Vector) -> Result<Self, ChessError> {
        if !vector.is_linear() {
            return Err(ChessError::NotLinear {
                file: vector.file,
                rank: vector.rank,
            });
        }
        let direction = match (vector.file.signum(), vector.rank.signum()) {
            (0, 1) => Direction::N,
            (0, -1) => Direction::S,
            (1, 0) => Direction::E,
            (-1, 0) => Direction::W,
            (1, 1) => Direction::NE,
            (-1, 1) => Direction::NW,
            (1, -1) => Direction::SE,
            (-1, -1) => Direction::SW,
            _ => unreachable!("linear vector has a nonzero component"),
        };
        Ok(direction)
    }

    /// `(file, rank)` unit step.
    pub fn step(self) -> (i8, i8) {
        match self {
            Direction::N => (0, 1),
            Direction::S => (0, -1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
            Direction::NE => (1, 1),
            Direction::NW => (-1, 1),
            Direction::SE => (1, -1),
            Direction::SW => (-1, -1),
        }
    }

    pub fn apply(self, position: Position) -> Result<Position, ChessError> {
        let (file, rank) = self.step();
        position.offset(file, rank)
    }
}

/// The squares strictly between `source` and `target` on a straight or
/// diagonal line. Finite, and cloning restarts the walk from the same point.
#[derive(Debug, Clone)]
pub struct Between {
    current: Position,
    direction: Direction,
    remaining: u8,
}

impl Between {
    pub fn new(source: Position, target: Position) -> Result<Self, ChessError> {
        let vector = Vector::of(source, target);
        let direction = Direction::of(vector)?;
        Ok(Self {
            current: source,
            direction,
            remaining: (vector.chebyshev_norm() - 1) as u8,
        })
    }
}

impl Iterator for Between {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.remaining == 0 {
            return None;
        }
        let next = self.direction.apply(self.current).ok()?;
        self.current = next;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Between {}

fn in_bounds(file: i8, rank: i8) -> bool {
    (1..=BOARD_WIDTH as i8).contains(&file) && (1..=BOARD_WIDTH as i8).contains(&rank)
}

fn out_of_bound(file: i8, rank: i8) -> ChessError {
    ChessError::OutOfBound {
        square: format!("({file}, {rank})"),
    }
}
