use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::coord::{BOARD_WIDTH, Between, Position};
use crate::error::ChessError;
use crate::piece::{Piece, PieceKind, Side};

const BACK_RANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

static STANDARD_LAYOUT: Lazy<HashMap<Position, Piece>> = Lazy::new(|| {
    Position::all()
        .filter_map(|position| starting_piece(position).map(|piece| (position, piece)))
        .collect()
});

/// Supplies the arrangement a fresh board starts from.
pub trait Initializer: Send + Sync {
    fn create(&self) -> HashMap<Position, Piece>;

    fn first_turn(&self) -> Side {
        Side::White
    }
}

/// The standard 32-piece chess opening arrangement, White to move.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardInitializer;

impl Initializer for StandardInitializer {
    fn create(&self) -> HashMap<Position, Piece> {
        STANDARD_LAYOUT.clone()
    }
}

/// Occupied squares plus the side to move. Empty squares have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    units: HashMap<Position, Piece>,
    turn: Side,
}

impl Board {
    pub fn new(initializer: &dyn Initializer) -> Self {
        Self::from_pieces(initializer.create(), initializer.first_turn())
    }

    pub fn from_pieces(units: HashMap<Position, Piece>, turn: Side) -> Self {
        Self { units, turn }
    }

    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.units.get(&position).copied()
    }

    pub fn pieces(&self) -> &HashMap<Position, Piece> {
        &self.units
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Rule checks that do not depend on the squares in between, in order:
    /// source occupied, right turn, no friendly capture, piece geometry.
    /// Positions are on the grid by construction; raw coordinates go through
    /// [`Board::move_by_coordinates`].
    pub fn validate_move(&self, source: Position, target: Position) -> Result<(), ChessError> {
        let piece = self
            .piece_at(source)
            .ok_or(ChessError::SourceUnitNotPresent)?;

        if piece.side != self.turn {
            return Err(ChessError::IllegalTurn {
                turn: self.turn.name(),
            });
        }

        let target_piece = self.piece_at(target);
        if target_piece.is_some_and(|other| piece.is_ally(other)) {
            return Err(ChessError::SameTeamTarget);
        }

        piece.validate_shape(source, target, target_piece.is_some())
    }

    /// Fails when any square strictly between `source` and `target` is occupied.
    /// Knights are never blocked and the target itself is never checked.
    pub fn validate_interception(
        &self,
        source: Position,
        target: Position,
    ) -> Result<(), ChessError> {
        let piece = self
            .piece_at(source)
            .ok_or(ChessError::SourceUnitNotPresent)?;
        if piece.leaps() {
            return Ok(());
        }

        let mut path = Between::new(source, target)?;
        if path.any(|square| self.units.contains_key(&square)) {
            return Err(ChessError::UnitInterceptionAlongPath);
        }
        Ok(())
    }

    /// Validates fully, then moves the piece. Returns the captured piece, if any.
    /// The board is untouched when an error is returned. The turn is not switched.
    pub fn move_piece(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Option<Piece>, ChessError> {
        self.validate_move(source, target)?;
        self.validate_interception(source, target)?;

        let piece = self
            .units
            .remove(&source)
            .ok_or(ChessError::SourceUnitNotPresent)?;
        Ok(self.units.insert(target, piece))
    }

    /// Same as [`Board::move_piece`] for `(file, rank)` pairs in `1..=8`.
    pub fn move_by_coordinates(
        &mut self,
        source: (u8, u8),
        target: (u8, u8),
    ) -> Result<Option<Piece>, ChessError> {
        let source = Position::new(source.0, source.1)?;
        let target = Position::new(target.0, target.1)?;
        self.move_piece(source, target)
    }

    pub fn change_team(&mut self) {
        self.turn = self.turn.opponent();
    }

    pub fn alive_king_count(&self) -> usize {
        self.units.values().filter(|piece| piece.is_king()).count()
    }

    /// Side of some surviving king. Meaningful once only one king is left.
    pub fn alive_king_side(&self) -> Option<Side> {
        self.units
            .values()
            .find(|piece| piece.is_king())
            .map(|piece| piece.side)
    }

    /// Material total for `side`. Pawns sharing a file with another pawn of
    /// the same side count half.
    pub fn points(&self, side: Side) -> f64 {
        let mut pawns_per_file = [0u8; BOARD_WIDTH as usize];
        let mut total = 0.0;

        for (position, piece) in &self.units {
            if piece.side != side {
                continue;
            }
            if piece.kind == PieceKind::Pawn {
                pawns_per_file[(position.file() - 1) as usize] += 1;
            } else {
                total += piece.kind.points();
            }
        }

        let pawn_points: f64 = pawns_per_file
            .iter()
            .map(|&count| match count {
                0 | 1 => f64::from(count),
                _ => f64::from(count) * 0.5,
            })
            .sum();

        total + pawn_points
    }

    /// Display symbol of the square, `.` when empty.
    pub fn symbol_at(&self, position: Position) -> char {
        self.piece_at(position).map_or('.', Piece::symbol)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&StandardInitializer)
    }
}

fn starting_piece(position: Position) -> Option<Piece> {
    let side = match position.rank() {
        1 | 2 => Side::White,
        7 | 8 => Side::Black,
        _ => return None,
    };
    let kind = if position.rank() == side.pawn_rank() {
        PieceKind::Pawn
    } else {
        BACK_RANK[(position.file() - 1) as usize]
    };
    Some(Piece::new(kind, side))
}
