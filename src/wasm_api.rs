use crate::game::{GameConfig, GameEngine, GameResult};
use crate::save::{parse_save_text, to_save_text};
use crate::state::GameSnapshot;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquareJson {
    row: usize,
    col: usize,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    state: Option<GameSnapshot>,
    result: Option<String>,
    error: Option<String>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn squares_to_js(squares: &[(usize, usize)]) -> JsValue {
    let list: Vec<SquareJson> = squares
        .iter()
        .map(|&(row, col)| SquareJson { row, col })
        .collect();
    to_js(&list)
}

fn error(message: &str) -> JsValue {
    to_js(&MoveResult {
        state: None,
        result: None,
        error: Some(message.to_string()),
    })
}

#[wasm_bindgen]
pub struct Game {
    engine: GameEngine,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(board_size: usize, opponent_is_ai: bool, ai_difficulty: u32, ai_first: bool) -> Game {
        Game {
            engine: GameEngine::new(GameConfig::new(board_size, opponent_is_ai, ai_difficulty, ai_first)),
        }
    }

    pub fn new_game(&mut self, board_size: usize, opponent_is_ai: bool, ai_difficulty: u32, ai_first: bool) {
        self.engine.init_with(board_size, opponent_is_ai, ai_difficulty, ai_first);
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&GameSnapshot::capture(&self.engine))
    }

    pub fn legal_moves(&self, row: usize, col: usize) -> JsValue {
        squares_to_js(&self.engine.legal_moves(row, col))
    }

    pub fn legal_arrows(&self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> JsValue {
        squares_to_js(&self.engine.legal_arrows(from_row, from_col, to_row, to_col))
    }

    /// Validate a full turn against the generators, commit it, then check
    /// whether the next player is stuck.
    pub fn make_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        arrow_row: usize,
        arrow_col: usize,
    ) -> JsValue {
        if self.engine.is_game_over() {
            return error("Game is already over");
        }
        if !self.engine.legal_moves(from_row, from_col).contains(&(to_row, to_col)) {
            return error("Illegal move");
        }
        let arrows = self.engine.legal_arrows(from_row, from_col, to_row, to_col);
        if !arrows.contains(&(arrow_row, arrow_col)) {
            return error("Illegal arrow");
        }

        self.engine
            .make_move(from_row, from_col, to_row, to_col, arrow_row, arrow_col);
        let result = self.engine.check_for_winner();
        to_js(&MoveResult {
            state: Some(GameSnapshot::capture(&self.engine)),
            result: (result != GameResult::NoWinner).then(|| result.to_string()),
            error: None,
        })
    }

    /// "none", "white" or "black".
    pub fn check_for_winner(&mut self) -> String {
        match self.engine.check_for_winner() {
            GameResult::NoWinner => "none",
            GameResult::WhiteWins => "white",
            GameResult::BlackWins => "black",
        }
        .to_string()
    }

    pub fn rewind_one_step(&mut self) -> bool {
        self.engine.rewind_one_step()
    }

    pub fn step_forward(&mut self) -> bool {
        self.engine.step_forward()
    }

    pub fn rewind_to_move_count(&mut self, keep_moves: usize) {
        self.engine.rewind_to_move_count(keep_moves);
    }

    pub fn can_step_forward(&self) -> bool {
        self.engine.can_step_forward()
    }

    pub fn current_move_index(&self) -> usize {
        self.engine.current_move_index()
    }

    pub fn total_moves(&self) -> usize {
        self.engine.total_moves()
    }

    /// Call `callback(state)` after every history change with the same
    /// snapshot `get_state` returns; calling back into this `Game` from the
    /// callback would be a recursive borrow. Replaces any earlier callback.
    pub fn set_history_changed_callback(&mut self, callback: js_sys::Function) {
        self.engine.set_history_changed_callback(move |engine| {
            let state = to_js(&GameSnapshot::capture(engine));
            if let Err(e) = callback.call1(&JsValue::NULL, &state) {
                warn!("history callback threw: {e:?}");
            }
        });
    }

    pub fn clear_history_changed_callback(&mut self) {
        self.engine.clear_history_changed_callback();
    }

    pub fn save_text(&self) -> String {
        to_save_text(&self.engine)
    }

    pub fn load_text(&mut self, text: &str) -> JsValue {
        parse_save_text(text).replay_into(&mut self.engine);
        self.get_state()
    }

    pub fn build_info(&self) -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }
}
