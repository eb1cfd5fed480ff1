use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod piece;
pub mod types;

pub use crate::board::{Board, Initializer, StandardInitializer};
pub use crate::coord::{Between, Direction, Position, Vector};
pub use crate::error::ChessError;
pub use crate::game::{Game, SessionState};
pub use crate::piece::{Piece, PieceKind, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
