use thiserror::Error;

/// Every way a move, a square or a session request can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("there is no piece on the source square")]
    SourceUnitNotPresent,

    #[error("it is {turn}'s turn")]
    IllegalTurn { turn: &'static str },

    #[error("cannot capture a piece of the same side")]
    SameTeamTarget,

    #[error("the move does not follow the {kind} moving rule")]
    IllegalMovingRule { kind: &'static str },

    #[error("the move does not follow the pawn moving rule")]
    PawnIllegalMovingRule,

    #[error("a piece is blocking the path")]
    UnitInterceptionAlongPath,

    #[error("square {square} is outside the board")]
    OutOfBound { square: String },

    /// The displacement is neither straight nor diagonal.
    #[error("({file}, {rank}) is not a straight or diagonal displacement")]
    NotLinear { file: i8, rank: i8 },

    #[error("the game has not been started")]
    SessionNotStarted,
}
