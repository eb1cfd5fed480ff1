use std::fmt;

use serde::Serialize;

/// One square of the rendered board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquareView {
    pub position: String,
    /// Piece initial, lowercase for White and uppercase for Black, `.` when empty.
    pub symbol: char,
}

/// Board snapshot returned to the host for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Rank 8 down to rank 1, file `a` to `h`.
    pub squares: Vec<SquareView>,
    pub turn: String,
}

/// Result of an accepted move.
/// Contract:
/// - Game continues: `turn` holds the side to move next, `winner` is `None`.
/// - Game over: `turn` is `None`, `winner` holds the winner's symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub source: String,
    pub target: String,
    pub turn: Option<String>,
    pub winner: Option<String>,
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.target)?;
        if let Some(tail) = self.winner.as_ref().or(self.turn.as_ref()) {
            write!(f, " {tail}")?;
        }
        Ok(())
    }
}

/// Material totals of both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub white: f64,
    pub black: f64,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.white, self.black)
    }
}
