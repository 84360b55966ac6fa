use serde::Serialize;

use crate::board::Cell;
use crate::game::GameEngine;
use crate::moves::MoveRecord;
use crate::piece::Piece;

/// Everything a front-end needs to draw the board and the move list.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct GameSnapshot {
    pub board_size: usize,
    /// `cells[row][col]`, row 0 = rank 1.
    pub cells: Vec<Vec<Cell>>,
    pub pieces: Vec<Piece>,
    pub black_to_move: bool,
    pub game_over: bool,
    pub opponent_is_ai: bool,
    pub ai_is_black: bool,
    pub ai_difficulty: u32,
    pub history: Vec<String>,
    pub current_move_index: usize,
    pub total_moves: usize,
    pub can_step_forward: bool,
    pub last_move: Option<MoveRecord>,
}

impl GameSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        let board = engine.board();
        let n = board.dimension();
        let cells = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| board.cell(r, c).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        GameSnapshot {
            board_size: n,
            cells,
            pieces: engine.pieces().to_vec(),
            black_to_move: engine.is_black_to_move(),
            game_over: engine.is_game_over(),
            opponent_is_ai: engine.is_opponent_ai(),
            ai_is_black: engine.is_ai_black(),
            ai_difficulty: engine.ai_difficulty(),
            history: engine.history().to_vec(),
            current_move_index: engine.current_move_index(),
            total_moves: engine.total_moves(),
            can_step_forward: engine.can_step_forward(),
            last_move: engine.last_move().copied(),
        }
    }
}
