use wasm_bindgen::prelude::*;

use crate::game::Game;

/// A game session handed to JavaScript. Each instance owns an independent game.
#[wasm_bindgen]
pub struct ChessSession {
    game: Game,
}

#[wasm_bindgen]
impl ChessSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChessSession {
        ChessSession {
            game: Game::new_with_standard_layout(),
        }
    }

    /// Starts a fresh game from the standard layout.
    pub fn init(&mut self) {
        self.game.init();
    }

    /// `{ squares: [{ position, symbol }], turn }`
    pub fn board(&self) -> Result<JsValue, JsError> {
        let view = self.game.board_view()?;
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// `{ source, target, turn, winner }` on success; the error message otherwise.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, source: &str, target: &str) -> Result<JsValue, JsError> {
        let outcome = self.game.submit_move(source, target)?;
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    /// Same as `movePiece`, reported as `"<source> <target> <turn or winner>"`.
    #[wasm_bindgen(js_name = movePieceText)]
    pub fn move_piece_text(&mut self, source: &str, target: &str) -> Result<String, JsError> {
        Ok(self.game.submit_move(source, target)?.to_string())
    }

    /// `{ white, black }` material totals.
    pub fn status(&self) -> Result<JsValue, JsError> {
        let score = self.game.score()?;
        Ok(serde_wasm_bindgen::to_value(&score)?)
    }

    pub fn end(&mut self) {
        self.game.end();
    }

    #[wasm_bindgen(js_name = isStarted)]
    pub fn is_started(&self) -> bool {
        self.game.is_started()
    }

    #[wasm_bindgen(js_name = isEnded)]
    pub fn is_ended(&self) -> bool {
        self.game.is_ended()
    }
}

impl Default for ChessSession {
    fn default() -> Self {
        Self::new()
    }
}
