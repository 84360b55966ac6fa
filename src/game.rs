// =============================================================================
// Amazons game engine
//
// Owns the board, the side to move, the undo/redo history and the game-over
// flag. Front-ends call into it from a single thread and read state back for
// display; the history-changed callback is how they learn to refresh.
//
// Coordinate system: row 0 = rank 1, col 0 = file A.
// =============================================================================

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSize};
use crate::history::History;
use crate::moves::{MoveRecord, Square};
use crate::piece::{Color, Piece};

// =============================================================================
// Configuration
// =============================================================================

/// Settings chosen when a game starts. Fixed for the game's lifetime.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Whether the second seat is meant to be played by the computer.
    pub opponent_is_ai: bool,
    /// Stored and reported for front-ends; no engine behaviour depends on it.
    pub ai_difficulty: u32,
    /// When the opponent is AI, whether it takes the first (black) turn.
    pub ai_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: BoardSize::Ten,
            opponent_is_ai: false,
            ai_difficulty: 1,
            ai_first: false,
        }
    }
}

impl GameConfig {
    pub fn new(board_size: usize, opponent_is_ai: bool, ai_difficulty: u32, ai_first: bool) -> Self {
        GameConfig {
            board_size: BoardSize::from_dimension(board_size),
            opponent_is_ai,
            ai_difficulty,
            ai_first,
        }
    }

    /// Black moves first, so the AI is black exactly when it moves first.
    pub fn ai_is_black(&self) -> bool {
        self.opponent_is_ai && self.ai_first
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameResult {
    NoWinner,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::NoWinner => None,
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
        }
    }

    fn won_by(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::NoWinner => "No winner",
            GameResult::WhiteWins => "White wins",
            GameResult::BlackWins => "Black wins",
        })
    }
}

/// Called after every change to the move history with the engine in its new
/// state. Only one can be registered at a time; registering another replaces
/// it. The engine is lent out read-only for the call, so a front-end reads
/// state through the argument instead of its own handle to the engine.
pub type HistoryCallback = Box<dyn FnMut(&GameEngine)>;

// =============================================================================
// Engine
// =============================================================================

pub struct GameEngine {
    board: Board,
    config: GameConfig,
    black_to_move: bool,
    game_over: bool,
    history: History,
    on_history_changed: Option<HistoryCallback>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("config", &self.config)
            .field("black_to_move", &self.black_to_move)
            .field("game_over", &self.game_over)
            .field("history", &self.history)
            .field("has_callback", &self.on_history_changed.is_some())
            .finish()
    }
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        GameEngine {
            board: Board::new(config.board_size),
            config,
            black_to_move: true,
            game_over: false,
            history: History::new(),
            on_history_changed: None,
        }
    }

    /// Start a fresh game. Board, turn, history and the game-over flag are
    /// reset; the registered callback is kept and notified.
    pub fn init(&mut self, config: GameConfig) {
        self.board = Board::new(config.board_size);
        self.config = config;
        self.black_to_move = true;
        self.game_over = false;
        self.history.clear();
        info!(
            "new game: {}x{}, opponent_ai={}, ai_black={}",
            config.board_size.dimension(),
            config.board_size.dimension(),
            config.opponent_is_ai,
            config.ai_is_black()
        );
        self.notify_history_changed();
    }

    pub fn init_with(&mut self, board_size: usize, opponent_is_ai: bool, ai_difficulty: u32, ai_first: bool) {
        self.init(GameConfig::new(board_size, opponent_is_ai, ai_difficulty, ai_first));
    }

    // -------------------------------------------------------------------------
    // Read-only state
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board_size(&self) -> usize {
        self.board.dimension()
    }

    pub fn is_black_to_move(&self) -> bool {
        self.black_to_move
    }

    pub fn side_to_move(&self) -> Color {
        if self.black_to_move {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn is_opponent_ai(&self) -> bool {
        self.config.opponent_is_ai
    }

    pub fn is_ai_black(&self) -> bool {
        self.config.ai_is_black()
    }

    pub fn ai_difficulty(&self) -> u32 {
        self.config.ai_difficulty
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.board.piece_at(row, col)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.board.is_occupied(row, col)
    }

    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    // -------------------------------------------------------------------------
    // Move and arrow generation
    // -------------------------------------------------------------------------

    /// Destinations for the amazon on `(row, col)`. Empty when the game is
    /// over, the square is off the board or empty, or the amazon belongs to
    /// the side not on move.
    pub fn legal_moves(&self, row: usize, col: usize) -> Vec<Square> {
        if self.game_over || !self.board.in_bounds(row, col) {
            return Vec::new();
        }
        match self.board.piece_at(row, col) {
            Some(p) if p.color == self.side_to_move() => self.board.queen_moves((row, col)),
            _ => Vec::new(),
        }
    }

    /// Arrow squares available once the amazon on `from` has moved to `to`.
    /// The vacated origin counts as empty.
    pub fn legal_arrows(&self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Vec<Square> {
        if self.game_over || !self.board.in_bounds(to_row, to_col) {
            return Vec::new();
        }
        self.board.arrow_targets((from_row, from_col), (to_row, to_col))
    }

    // -------------------------------------------------------------------------
    // Move application
    // -------------------------------------------------------------------------

    /// Commit a move and its arrow. Legality is the caller's job (see
    /// `legal_moves` / `legal_arrows`); this only refuses when the game is
    /// over, a square is off the board, or `from` holds no amazon. Returns
    /// the committed record.
    pub fn make_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        arrow_row: usize,
        arrow_col: usize,
    ) -> Option<MoveRecord> {
        if self.game_over {
            return None;
        }
        let in_bounds = self.board.in_bounds(from_row, from_col)
            && self.board.in_bounds(to_row, to_col)
            && self.board.in_bounds(arrow_row, arrow_col);
        if !in_bounds {
            return None;
        }
        let piece = self.board.piece_at(from_row, from_col)?;

        let rec = MoveRecord::new(
            (from_row, from_col),
            (to_row, to_col),
            (arrow_row, arrow_col),
            piece.color,
        );
        self.board.apply_record(&rec);
        let discarded = self.history.record(rec);
        if discarded > 0 {
            debug!("discarded {discarded} redoable move(s)");
        }
        self.black_to_move = !self.black_to_move;
        debug!("move {}: {}", self.history.current_index(), rec);
        self.notify_history_changed();
        Some(rec)
    }

    // -------------------------------------------------------------------------
    // Undo / redo
    // -------------------------------------------------------------------------

    /// Take back the last applied move. Returns false if there was none.
    pub fn rewind_one_step(&mut self) -> bool {
        if !self.undo_step() {
            return false;
        }
        self.notify_history_changed();
        true
    }

    /// Replay the most recently undone move. Returns false if there was none.
    pub fn step_forward(&mut self) -> bool {
        if !self.redo_step() {
            return false;
        }
        self.notify_history_changed();
        true
    }

    /// Jump to the position after `keep_moves` moves of the known line,
    /// undoing or redoing as needed. The redo part is kept, so a later jump
    /// forward still works as long as no new move is made in between.
    pub fn rewind_to_move_count(&mut self, keep_moves: usize) {
        let target = keep_moves.min(self.history.total());
        while self.history.current_index() > target {
            if !self.rewind_one_step() {
                break;
            }
        }
        while self.history.current_index() < target && self.history.can_redo() {
            if !self.step_forward() {
                break;
            }
        }
    }

    fn undo_step(&mut self) -> bool {
        let Some(rec) = self.history.undo() else {
            return false;
        };
        self.board.revert_record(&rec);
        self.black_to_move = !self.black_to_move;
        debug!("undo {} -> move {}", rec, self.history.current_index());
        true
    }

    fn redo_step(&mut self) -> bool {
        let Some(rec) = self.history.redo() else {
            return false;
        };
        // The matching undo cleared the arrow; nothing should have landed there since.
        debug_assert!(
            rec.arrow == rec.from || !self.board.is_occupied(rec.arrow.0, rec.arrow.1),
            "redo arrow square {:?} is not empty",
            rec.arrow
        );
        self.board.apply_record(&rec);
        self.black_to_move = !self.black_to_move;
        debug!("redo {} -> move {}", rec, self.history.current_index());
        true
    }

    pub fn can_step_forward(&self) -> bool {
        self.history.can_redo()
    }

    pub fn current_move_index(&self) -> usize {
        self.history.current_index()
    }

    /// Length of the known line, including moves that can still be redone.
    pub fn total_moves(&self) -> usize {
        self.history.total()
    }

    /// Text of every move in the known line, e.g. `"[B] D1 D4 G4"`.
    pub fn history(&self) -> &[String] {
        self.history.log()
    }

    pub fn applied_moves(&self) -> &[MoveRecord] {
        self.history.applied()
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last_applied()
    }

    // -------------------------------------------------------------------------
    // Notification
    // -------------------------------------------------------------------------

    /// Register the history-changed callback, replacing any previous one.
    pub fn set_history_changed_callback(&mut self, callback: impl FnMut(&GameEngine) + 'static) {
        self.on_history_changed = Some(Box::new(callback));
    }

    pub fn clear_history_changed_callback(&mut self) {
        self.on_history_changed = None;
    }

    fn notify_history_changed(&mut self) {
        // Out of the slot for the call so the callback can borrow the whole engine.
        if let Some(mut cb) = self.on_history_changed.take() {
            cb(&*self);
            self.on_history_changed = Some(cb);
        }
    }

    // -------------------------------------------------------------------------
    // Win detection
    // -------------------------------------------------------------------------

    /// Decide whether the side to move can still play. If no amazon of that
    /// side has a destination with at least one arrow, the game is over and
    /// the other side wins.
    pub fn check_for_winner(&mut self) -> GameResult {
        let mover = self.side_to_move();
        let squares: Vec<Square> = self.board.pieces_of(mover).map(Piece::square).collect();
        for (row, col) in squares {
            for (tr, tc) in self.legal_moves(row, col) {
                if !self.legal_arrows(row, col, tr, tc).is_empty() {
                    return GameResult::NoWinner;
                }
            }
        }

        let result = GameResult::won_by(mover.opposite());
        if !self.game_over {
            info!("game over after {} moves: {}", self.history.current_index(), result);
        }
        self.game_over = true;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::moves::parse_square;
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    fn sq(name: &str) -> Square {
        parse_square(name).expect("valid square")
    }

    fn eight() -> GameEngine {
        GameEngine::new(GameConfig::new(8, false, 1, false))
    }

    /// Play a move given as three square names.
    fn play(engine: &mut GameEngine, from: &str, to: &str, arrow: &str) -> MoveRecord {
        let (f, t, a) = (sq(from), sq(to), sq(arrow));
        assert!(
            engine.legal_moves(f.0, f.1).contains(&t),
            "{from}->{to} should be legal"
        );
        assert!(
            engine.legal_arrows(f.0, f.1, t.0, t.1).contains(&a),
            "arrow {to}->{arrow} should be legal"
        );
        engine
            .make_move(f.0, f.1, t.0, t.1, a.0, a.1)
            .expect("move should be committed")
    }

    /// Four plies on the 8x8 board, alternating black and white.
    fn opening(engine: &mut GameEngine) {
        play(engine, "C1", "C4", "E6");
        play(engine, "C8", "C5", "C8");
        play(engine, "F1", "F4", "F1");
        play(engine, "F8", "D8", "D1");
    }

    #[test]
    fn init_resets_everything() {
        for n in [8, 10] {
            let mut engine = eight();
            opening(&mut engine);
            engine.init_with(n, true, 3, true);

            assert_eq!(engine.board_size(), n);
            assert_eq!(engine.pieces().iter().filter(|p| p.is_white()).count(), 4);
            assert_eq!(engine.pieces().iter().filter(|p| !p.is_white()).count(), 4);
            assert!(engine.is_black_to_move());
            assert!(!engine.is_game_over());
            assert!(engine.history().is_empty());
            assert_eq!(engine.current_move_index(), 0);
            assert!(engine.is_opponent_ai());
            assert!(engine.is_ai_black());
            assert_eq!(engine.ai_difficulty(), 3);
        }
    }

    #[test]
    fn ai_is_black_only_when_ai_moves_first() {
        assert!(!GameConfig::new(10, true, 1, false).ai_is_black());
        assert!(!GameConfig::new(10, false, 1, true).ai_is_black());
        assert!(GameConfig::new(10, true, 1, true).ai_is_black());
    }

    #[test]
    fn init_after_play_clears_history_and_game_over() {
        let mut engine = eight();
        opening(&mut engine);
        engine.game_over = true;
        engine.init(GameConfig::new(10, false, 1, false));
        assert!(!engine.is_game_over());
        assert_eq!(engine.total_moves(), 0);
        assert!(!engine.can_step_forward());
        assert_eq!(engine.board(), &Board::new(BoardSize::Ten));
    }

    #[test]
    fn legal_moves_reject_wrong_side_empty_and_out_of_range() {
        let engine = eight();
        let (wr, wc) = sq("C8");
        assert!(engine.legal_moves(wr, wc).is_empty(), "white cannot move first");
        let (er, ec) = sq("D4");
        assert!(engine.legal_moves(er, ec).is_empty(), "empty square");
        assert!(engine.legal_moves(8, 0).is_empty());
        assert!(engine.legal_moves(0, 99).is_empty());
        let (br, bc) = sq("C1");
        assert!(!engine.legal_moves(br, bc).is_empty());
    }

    #[test]
    fn legal_arrows_reject_off_board_destination() {
        let engine = eight();
        let (br, bc) = sq("C1");
        assert!(engine.legal_arrows(br, bc, 8, 0).is_empty());
        assert!(engine.legal_arrows(br, bc, 0, 8).is_empty());
        assert!(engine.legal_arrows(br, bc, usize::MAX, usize::MAX).is_empty());
        assert!(!engine.legal_arrows(br, bc, 3, 2).is_empty());
    }

    #[test]
    fn legal_moves_never_pass_an_obstacle_or_include_origin() {
        let mut engine = eight();
        opening(&mut engine);
        for piece in engine.pieces().to_vec() {
            let moves = engine.legal_moves(piece.row, piece.col);
            assert!(!moves.contains(&piece.square()));
            for &(r, c) in &moves {
                assert!(!engine.is_occupied(r, c));
                // Every square between origin and destination is empty too.
                let dr = (r as i32 - piece.row as i32).signum();
                let dc = (c as i32 - piece.col as i32).signum();
                let (mut rr, mut cc) = (piece.row as i32 + dr, piece.col as i32 + dc);
                while (rr, cc) != (r as i32, c as i32) {
                    assert!(!engine.is_occupied(rr as usize, cc as usize));
                    rr += dr;
                    cc += dc;
                }
            }
        }
    }

    /// White C8 -> C5 with the arrow shot back onto C8.
    #[test]
    fn arrow_may_land_on_vacated_origin() {
        let mut engine = eight();
        play(&mut engine, "C1", "C4", "E6");

        let (fr, fc) = sq("C8");
        assert_eq!((fr, fc), (7, 2));
        let moves = engine.legal_moves(fr, fc);
        assert!(moves.contains(&(4, 2)), "C5 reachable from C8: {moves:?}");
        let arrows = engine.legal_arrows(fr, fc, 4, 2);
        assert!(arrows.contains(&(7, 2)), "C8 reachable from C5 once vacated: {arrows:?}");
        assert!(!arrows.contains(&(3, 2)), "C4 holds a black amazon");
        assert_eq!(engine.board().cell(7, 2), Some(Cell::Piece), "probe must not touch the grid");

        engine.make_move(fr, fc, 4, 2, 7, 2).expect("committed");
        assert_eq!(engine.board().cell(7, 2), Some(Cell::Arrow));
        assert_eq!(engine.history()[1], "[W] C8 C5 C8");
    }

    #[test]
    fn make_move_updates_board_turn_and_log() {
        let mut engine = eight();
        let rec = play(&mut engine, "C1", "C4", "E6");
        assert_eq!(rec.color, Color::Black);
        assert!(!engine.is_black_to_move());
        assert_eq!(engine.history(), &["[B] C1 C4 E6".to_string()]);
        assert_eq!(engine.current_move_index(), 1);
        assert_eq!(engine.total_moves(), 1);
        assert_eq!(engine.piece_at(3, 2).map(|p| p.color), Some(Color::Black));
        assert_eq!(engine.piece_at(0, 2), None);
        assert_eq!(engine.board().cell(0, 2), Some(Cell::Empty));
        assert_eq!(engine.board().cell(5, 4), Some(Cell::Arrow));
        assert_eq!(engine.last_move(), Some(&rec));
    }

    #[test]
    fn make_move_ignores_empty_origin_and_out_of_range() {
        let mut engine = eight();
        let before = engine.board().clone();
        assert_eq!(engine.make_move(4, 4, 5, 5, 6, 6), None);
        assert_eq!(engine.make_move(0, 2, 9, 2, 1, 1), None);
        assert_eq!(engine.make_move(0, 2, 3, 2, 3, 200), None);
        assert_eq!(engine.board(), &before);
        assert!(engine.is_black_to_move());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn make_move_then_rewind_restores_everything() {
        let mut engine = eight();
        play(&mut engine, "C1", "C4", "E6");
        let board = engine.board().clone();
        let turn = engine.is_black_to_move();
        let applied = engine.applied_moves().len();

        play(&mut engine, "C8", "C5", "C8");
        assert!(engine.rewind_one_step());

        assert_eq!(engine.board(), &board);
        assert_eq!(engine.is_black_to_move(), turn);
        assert_eq!(engine.applied_moves().len(), applied);
        assert_eq!(engine.current_move_index(), applied);
        assert!(engine.can_step_forward());
    }

    #[test]
    fn rewind_and_step_forward_on_empty_stacks_are_noops() {
        let mut engine = eight();
        assert!(!engine.rewind_one_step());
        assert!(!engine.step_forward());
        play(&mut engine, "C1", "C4", "E6");
        assert!(!engine.step_forward());
        assert_eq!(engine.current_move_index(), 1);
    }

    #[test]
    fn rewind_to_count_and_back_restores_latest_position() {
        let mut engine = eight();
        opening(&mut engine);
        let latest = engine.board().clone();
        let total = engine.total_moves();

        for k in 0..=total {
            engine.rewind_to_move_count(k);
            assert_eq!(engine.current_move_index(), k);
            assert_eq!(engine.is_black_to_move(), k % 2 == 0, "turn parity at {k}");
            assert_eq!(engine.total_moves(), total, "jumping never drops the known line");
            engine.rewind_to_move_count(total);
            assert_eq!(engine.board(), &latest);
        }

        engine.rewind_to_move_count(0);
        assert_eq!(engine.board(), &Board::new(BoardSize::Eight));
    }

    #[test]
    fn rewind_to_move_count_clamps_to_known_line() {
        let mut engine = eight();
        opening(&mut engine);
        engine.rewind_to_move_count(1);
        engine.rewind_to_move_count(1000);
        assert_eq!(engine.current_move_index(), 4);
        assert!(!engine.can_step_forward());
    }

    #[test]
    fn new_move_after_rewind_discards_redo() {
        let mut engine = eight();
        opening(&mut engine);
        engine.rewind_to_move_count(2);
        assert!(engine.can_step_forward());
        assert_eq!(engine.total_moves(), 4);

        play(&mut engine, "A3", "B2", "B1");
        assert!(!engine.can_step_forward());
        assert_eq!(engine.total_moves(), 3);
        assert_eq!(engine.current_move_index(), 3);
        assert_eq!(engine.history()[2], "[B] A3 B2 B1");
        assert!(!engine.history().iter().any(|l| l == "[W] F8 D8 D1"));

        engine.rewind_to_move_count(100);
        assert_eq!(engine.current_move_index(), 3);
    }

    #[test]
    fn redo_arrow_square_is_empty_before_reapply() {
        let mut engine = eight();
        opening(&mut engine);
        engine.rewind_to_move_count(0);
        for rec in engine.history.undone().iter().rev().copied().collect::<Vec<_>>() {
            assert!(
                rec.arrow == rec.from || !engine.is_occupied(rec.arrow.0, rec.arrow.1),
                "arrow square of {rec} should be empty before redo"
            );
            assert!(engine.step_forward());
        }
    }

    #[test]
    fn callback_fires_on_each_history_change() {
        let mut engine = eight();
        let count = Rc::new(Counter::new(0));
        let seen = Rc::clone(&count);
        engine.set_history_changed_callback(move |_| seen.set(seen.get() + 1));

        opening(&mut engine);
        assert_eq!(count.get(), 4);
        engine.rewind_one_step();
        engine.step_forward();
        assert_eq!(count.get(), 6);
        engine.rewind_to_move_count(1);
        assert_eq!(count.get(), 9, "one notification per step");

        // Failed operations stay silent.
        engine.rewind_to_move_count(0);
        let settled = count.get();
        engine.rewind_one_step();
        engine.make_move(4, 4, 4, 5, 4, 6);
        assert_eq!(count.get(), settled);
    }

    /// The callback sees the position it is announcing, even when the caller
    /// keeps the engine behind a `RefCell`.
    #[test]
    fn callback_reads_the_new_state() {
        use std::cell::RefCell;

        let seen: Rc<RefCell<Vec<(usize, bool, Option<String>)>>> = Rc::default();
        let log = Rc::clone(&seen);
        let shared = Rc::new(RefCell::new(eight()));
        shared.borrow_mut().set_history_changed_callback(move |engine| {
            log.borrow_mut().push((
                engine.current_move_index(),
                engine.is_black_to_move(),
                engine.history().last().cloned(),
            ));
        });

        shared.borrow_mut().make_move(0, 2, 3, 2, 5, 4);
        shared.borrow_mut().rewind_one_step();
        assert_eq!(
            *seen.borrow(),
            vec![
                (1, false, Some("[B] C1 C4 E6".to_string())),
                (0, true, Some("[B] C1 C4 E6".to_string())),
            ]
        );
        // Still registered after being called.
        shared.borrow_mut().step_forward();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn last_registered_callback_wins() {
        let mut engine = eight();
        let first = Rc::new(Counter::new(0));
        let second = Rc::new(Counter::new(0));
        let f = Rc::clone(&first);
        let s = Rc::clone(&second);
        engine.set_history_changed_callback(move |_| f.set(f.get() + 1));
        engine.set_history_changed_callback(move |_| s.set(s.get() + 1));

        play(&mut engine, "C1", "C4", "E6");
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);

        engine.clear_history_changed_callback();
        engine.rewind_one_step();
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn init_keeps_and_notifies_callback() {
        let mut engine = eight();
        let count = Rc::new(Counter::new(0));
        let seen = Rc::clone(&count);
        engine.set_history_changed_callback(move |_| seen.set(seen.get() + 1));
        engine.init_with(10, false, 1, false);
        assert_eq!(count.get(), 1);
        engine.make_move(0, 3, 3, 3, 3, 6);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn no_winner_at_start() {
        let mut engine = eight();
        assert_eq!(engine.check_for_winner(), GameResult::NoWinner);
        assert!(!engine.is_game_over());
    }

    /// All four black amazons walled in on 8x8 with black to move.
    fn boxed_black() -> GameEngine {
        let mut engine = eight();
        for name in [
            "B1", "D1", "B2", "C2", "D2", // around C1
            "E1", "G1", "E2", "F2", "G2", // around F1
            "A2", "A4", "B3", "B4", // around A3 (B2 already set)
            "H2", "H4", "G3", "G4", // around H3 (G2 already set)
        ] {
            let (r, c) = sq(name);
            assert!(engine.board.place_arrow(r, c), "{name} should be free");
        }
        engine
    }

    #[test]
    fn boxed_in_side_loses() {
        let mut engine = boxed_black();
        assert_eq!(engine.check_for_winner(), GameResult::WhiteWins);
        assert!(engine.is_game_over());
        assert_eq!(GameResult::WhiteWins.to_string(), "White wins");
        assert_eq!(GameResult::WhiteWins.winner(), Some(Color::White));
    }

    #[test]
    fn one_escape_square_keeps_game_alive() {
        let walled = boxed_black();
        let gap = sq("D2");
        let mut engine = eight();
        for (r, c) in walled.board().arrows().filter(|&a| a != gap) {
            engine.board.place_arrow(r, c);
        }
        assert_eq!(engine.check_for_winner(), GameResult::NoWinner);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn game_over_blocks_generation_and_moves() {
        let mut engine = boxed_black();
        engine.check_for_winner();
        let (wr, wc) = sq("C8");
        assert!(engine.legal_moves(wr, wc).is_empty());
        assert!(engine.legal_arrows(wr, wc, 4, 2).is_empty());
        assert_eq!(engine.make_move(wr, wc, 4, 2, 7, 2), None);
        // Still reports the same winner.
        assert_eq!(engine.check_for_winner(), GameResult::WhiteWins);

        engine.init_with(8, false, 1, false);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn white_boxed_after_black_move_means_black_wins() {
        let mut engine = eight();
        for name in [
            "B8", "D8", "B7", "C7", "D7", // around C8
            "E8", "G8", "E7", "F7", "G7", // around F8
            "A7", "A5", "B6", "B5", // around A6 (B7 set)
            "H7", "H5", "G6", "G5", // around H6 (G7 set)
        ] {
            let (r, c) = sq(name);
            assert!(engine.board.place_arrow(r, c), "{name} should be free");
        }
        play(&mut engine, "C1", "C4", "E4");
        assert_eq!(engine.check_for_winner(), GameResult::BlackWins);
    }
}
