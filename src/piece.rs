use crate::coord::{Position, Vector};
use crate::error::ChessError;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "WHITE",
            Side::Black => "BLACK",
        }
    }

    /// Short tag reported to the host when this side wins.
    pub fn symbol(self) -> &'static str {
        match self {
            Side::White => "w",
            Side::Black => "b",
        }
    }

    /// Rank delta of a single pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 8,
        }
    }

    pub fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 2,
            Side::Black => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
        }
    }

    pub fn initial(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }

    /// Material value. Doubled pawns are devalued by the board, not here.
    pub fn points(self) -> f64 {
        match self {
            PieceKind::King => 0.0,
            PieceKind::Queen => 9.0,
            PieceKind::Rook => 5.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Knight => 3.0,
            PieceKind::Pawn => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Display symbol: lowercase for White, uppercase for Black.
    pub fn symbol(self) -> char {
        let initial = self.kind.initial();
        match self.side {
            Side::White => initial.to_ascii_lowercase(),
            Side::Black => initial,
        }
    }

    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    /// Knights jump; every other piece can be blocked along its path.
    pub fn leaps(self) -> bool {
        self.kind == PieceKind::Knight
    }

    pub fn is_ally(self, other: Piece) -> bool {
        self.side == other.side
    }

    /// Checks the geometry of a move from `source` to `target`.
    /// `capture` tells whether an opposing piece stands on `target`; only pawns care.
    pub fn validate_shape(
        self,
        source: Position,
        target: Position,
        capture: bool,
    ) -> Result<(), ChessError> {
        let vector = Vector::of(source, target);
        let legal = match self.kind {
            PieceKind::King => vector.chebyshev_norm() == 1,
            PieceKind::Queen => vector.is_linear(),
            PieceKind::Rook => vector.is_straight(),
            PieceKind::Bishop => vector.is_diagonal(),
            PieceKind::Knight => vector.is_knight_jump(),
            PieceKind::Pawn => {
                return if pawn_allows(self.side, source, vector, capture) {
                    Ok(())
                } else {
                    Err(ChessError::PawnIllegalMovingRule)
                };
            }
        };
        if legal {
            Ok(())
        } else {
            Err(ChessError::IllegalMovingRule {
                kind: self.kind.name(),
            })
        }
    }
}

fn pawn_allows(side: Side, source: Position, vector: Vector, capture: bool) -> bool {
    let forward = side.forward();
    if capture {
        return vector.file.abs() == 1 && vector.rank == forward;
    }
    vector.file == 0
        && (vector.rank == forward
            || (vector.rank == 2 * forward && source.rank() == side.pawn_rank()))
}
