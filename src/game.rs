use tracing::{debug, info, instrument};

use crate::board::{Board, Initializer, StandardInitializer};
use crate::coord::Position;
use crate::error::ChessError;
use crate::piece::{Piece, Side};
use crate::types::{BoardView, MoveOutcome, Score, SquareView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Ended,
}

/// One game session. Owns its board; nothing is shared between sessions.
pub struct Game {
    board: Option<Board>,
    state: SessionState,
    winner: Option<Side>,
    initializer: Box<dyn Initializer>,
}

impl Game {
    pub fn new(initializer: Box<dyn Initializer>) -> Self {
        Self {
            board: None,
            state: SessionState::NotStarted,
            winner: None,
            initializer,
        }
    }

    pub fn new_with_standard_layout() -> Self {
        Self::new(Box::new(StandardInitializer))
    }

    /// Throws away any previous board and starts over from the initial layout.
    pub fn init(&mut self) {
        let board = Board::new(self.initializer.as_ref());
        info!(turn = board.turn().name(), "game started");
        self.board = Some(board);
        self.state = SessionState::InProgress;
        self.winner = None;
    }

    /// Plays one move, switches the turn and checks whether a king has fallen.
    /// Returns the captured piece, if any.
    #[instrument(level = "debug", skip(self))]
    pub fn move_piece(
        &mut self,
        source: Position,
        target: Position,
    ) -> Result<Option<Piece>, ChessError> {
        if self.state != SessionState::InProgress {
            return Err(ChessError::SessionNotStarted);
        }
        let board = self.board.as_mut().ok_or(ChessError::SessionNotStarted)?;

        let captured = board
            .move_piece(source, target)
            .inspect_err(|err| debug!(%err, "move rejected"))?;
        board.change_team();

        if board.alive_king_count() < 2 {
            self.winner = board.alive_king_side();
            self.state = SessionState::Ended;
            info!(winner = ?self.winner, "game ended");
        } else {
            debug!(turn = board.turn().name(), "move accepted");
        }

        Ok(captured)
    }

    /// Host entry point: squares in two-character notation.
    pub fn submit_move(&mut self, source: &str, target: &str) -> Result<MoveOutcome, ChessError> {
        if self.state != SessionState::InProgress {
            return Err(ChessError::SessionNotStarted);
        }
        let from: Position = source.parse()?;
        let to: Position = target.parse()?;

        self.move_piece(from, to)?;

        let (turn, winner) = match self.state {
            SessionState::Ended => (None, self.winner.map(|side| side.symbol().to_string())),
            _ => (self.turn().map(|side| side.name().to_string()), None),
        };
        Ok(MoveOutcome {
            source: from.to_string(),
            target: to.to_string(),
            turn,
            winner,
        })
    }

    /// Administrative abort.
    pub fn end(&mut self) {
        if self.state != SessionState::Ended {
            info!("game ended by request");
        }
        self.state = SessionState::Ended;
    }

    /// Material total of `side` on the current board, final board included.
    pub fn compute_points(&self, side: Side) -> Result<f64, ChessError> {
        self.board
            .as_ref()
            .map(|board| board.points(side))
            .ok_or(ChessError::SessionNotStarted)
    }

    pub fn score(&self) -> Result<Score, ChessError> {
        Ok(Score {
            white: self.compute_points(Side::White)?,
            black: self.compute_points(Side::Black)?,
        })
    }

    pub fn board_view(&self) -> Result<BoardView, ChessError> {
        let board = self.board.as_ref().ok_or(ChessError::SessionNotStarted)?;
        let squares = Position::all()
            .map(|position| SquareView {
                position: position.to_string(),
                symbol: board.symbol_at(position),
            })
            .collect();
        Ok(BoardView {
            squares,
            turn: board.turn().name().to_string(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == SessionState::InProgress
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn turn(&self) -> Option<Side> {
        self.board.as_ref().map(Board::turn)
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new_with_standard_layout()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::piece::PieceKind;

    struct FixedInitializer {
        units: Vec<(&'static str, PieceKind, Side)>,
        first_turn: Side,
    }

    impl Initializer for FixedInitializer {
        fn create(&self) -> HashMap<Position, Piece> {
            self.units
                .iter()
                .map(|&(square, kind, side)| (pos(square), Piece::new(kind, side)))
                .collect()
        }

        fn first_turn(&self) -> Side {
            self.first_turn
        }
    }

    fn pos(text: &str) -> Position {
        Position::parse(text).unwrap()
    }

    fn started() -> Game {
        let mut game = Game::default();
        game.init();
        game
    }

    fn rook_against_king() -> Game {
        let mut game = Game::new(Box::new(FixedInitializer {
            units: vec![
                ("e1", PieceKind::King, Side::White),
                ("a1", PieceKind::Rook, Side::White),
                ("a8", PieceKind::King, Side::Black),
            ],
            first_turn: Side::White,
        }));
        game.init();
        game
    }

    #[test]
    fn new_game_is_not_started() {
        let mut game = Game::default();

        assert_eq!(game.state(), SessionState::NotStarted);
        assert_eq!(game.turn(), None);
        assert_eq!(
            game.submit_move("e2", "e4"),
            Err(ChessError::SessionNotStarted)
        );
        assert_eq!(
            game.compute_points(Side::White),
            Err(ChessError::SessionNotStarted)
        );
        assert_eq!(game.board_view(), Err(ChessError::SessionNotStarted));
    }

    #[test]
    fn init_starts_with_white_to_move() {
        let game = started();

        assert!(game.is_started());
        assert_eq!(game.turn(), Some(Side::White));
        assert_eq!(game.board().map(|board| board.pieces().len()), Some(32));
    }

    #[test]
    fn accepted_moves_alternate_turns() {
        let mut game = started();

        let outcome = game.submit_move("e2", "e4").unwrap();
        assert_eq!(outcome.turn.as_deref(), Some("BLACK"));
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.to_string(), "e2 e4 BLACK");

        let outcome = game.submit_move("e7", "e5").unwrap();
        assert_eq!(outcome.to_string(), "e7 e5 WHITE");
        assert_eq!(game.turn(), Some(Side::White));
    }

    #[test]
    fn rejected_moves_keep_turn_and_board() {
        let mut game = started();
        game.submit_move("e2", "e4").unwrap();
        let before = game.board().cloned();

        assert_eq!(
            game.submit_move("e4", "e5"),
            Err(ChessError::IllegalTurn { turn: "BLACK" })
        );
        assert_eq!(
            game.submit_move("e7", "e4"),
            Err(ChessError::PawnIllegalMovingRule)
        );
        assert_eq!(game.turn(), Some(Side::Black));
        assert_eq!(game.board().cloned(), before);
    }

    #[test]
    fn unparsable_squares_are_out_of_bound() {
        let mut game = started();

        assert_eq!(
            game.submit_move("e2", "e9"),
            Err(ChessError::OutOfBound {
                square: "e9".to_string()
            })
        );
        assert!(matches!(
            game.submit_move("z1", "e4"),
            Err(ChessError::OutOfBound { .. })
        ));
        assert_eq!(game.turn(), Some(Side::White));
    }

    #[test]
    fn capturing_a_king_ends_the_game() {
        let mut game = started();
        for (from, to) in [
            ("f2", "f3"),
            ("e7", "e5"),
            ("g2", "g4"),
            ("d8", "h4"),
            ("a2", "a3"),
        ] {
            game.submit_move(from, to).unwrap();
        }

        let outcome = game.submit_move("h4", "e1").unwrap();

        assert_eq!(outcome.to_string(), "h4 e1 b");
        assert_eq!(outcome.turn, None);
        assert!(game.is_ended());
        assert_eq!(game.winner(), Some(Side::Black));
        assert_eq!(
            game.submit_move("a3", "a4"),
            Err(ChessError::SessionNotStarted)
        );
    }

    #[test]
    fn injected_layout_is_used() {
        let mut game = rook_against_king();

        assert_eq!(game.board().map(|board| board.pieces().len()), Some(3));
        let captured = game.move_piece(pos("a1"), pos("a8")).unwrap();

        assert_eq!(captured, Some(Piece::new(PieceKind::King, Side::Black)));
        assert_eq!(game.state(), SessionState::Ended);
        assert_eq!(game.winner(), Some(Side::White));
    }

    #[test]
    fn first_turn_comes_from_the_initializer() {
        let mut game = Game::new(Box::new(FixedInitializer {
            units: vec![
                ("e1", PieceKind::King, Side::White),
                ("e8", PieceKind::King, Side::Black),
            ],
            first_turn: Side::Black,
        }));
        game.init();

        assert_eq!(game.turn(), Some(Side::Black));
        assert_eq!(game.submit_move("e8", "d7").unwrap().to_string(), "e8 d7 WHITE");
    }

    #[test]
    fn init_restarts_an_ended_game() {
        let mut game = rook_against_king();
        game.move_piece(pos("a1"), pos("a8")).unwrap();

        game.init();

        assert!(game.is_started());
        assert_eq!(game.winner(), None);
        assert_eq!(game.board().map(Board::alive_king_count), Some(2));
    }

    #[test]
    fn end_forces_termination() {
        let mut game = started();

        game.end();

        assert!(game.is_ended());
        assert_eq!(game.winner(), None);
        assert_eq!(
            game.submit_move("e2", "e4"),
            Err(ChessError::SessionNotStarted)
        );
        // the final board can still be scored
        assert_eq!(game.compute_points(Side::Black), Ok(39.0));
    }

    #[test]
    fn score_tracks_captures_and_doubled_pawns() {
        let mut game = started();
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
            game.submit_move(from, to).unwrap();
        }

        let score = game.score().unwrap();

        // white pawns on d2 and d5 share a file
        assert_eq!(score, Score { white: 38.0, black: 38.0 });
        assert_eq!(score.to_string(), "38 38");
    }

    #[test]
    fn board_view_lists_squares_from_the_top_left() {
        let game = started();

        let view = game.board_view().unwrap();

        assert_eq!(view.turn, "WHITE");
        assert_eq!(view.squares.len(), 64);
        assert_eq!(
            view.squares[0],
            SquareView {
                position: "a8".to_string(),
                symbol: 'R'
            }
        );
        assert_eq!(view.squares[4].symbol, 'K');
        assert_eq!(view.squares[60].position, "e1");
        assert_eq!(view.squares[60].symbol, 'k');
        assert_eq!(view.squares[63].position, "h1");
        let rank_four: String = view.squares[32..40].iter().map(|square| square.symbol).collect();
        assert_eq!(rank_four, "........");
    }
}
