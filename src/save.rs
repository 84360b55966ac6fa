//! Save files: a short header followed by one history line per move.
//!
//! ```text
//! BoardSize:8
//! OpponentAI:1
//! AIFirst:0
//!
//! [B] C1 C4 E6
//! [W] C8 C5 C8
//! ```
//!
//! Written as UTF-8 with a byte-order mark and CRLF line endings. Loading is
//! forgiving: unknown or malformed lines are skipped, and missing header
//! fields fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::board::BoardSize;
use crate::game::{GameConfig, GameEngine};
use crate::moves::MoveRecord;

const BOM: char = '\u{feff}';
const LINE_END: &str = "\r\n";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot access save file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save file is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Header values and moves read from a save file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedGame {
    pub config: GameConfig,
    pub moves: Vec<MoveRecord>,
    /// Lines that were dropped or header values that fell back to a default.
    pub skipped: usize,
}

/// Header defaults used when a field is missing or unreadable.
fn default_header() -> GameConfig {
    GameConfig {
        board_size: BoardSize::Eight,
        opponent_is_ai: true,
        ai_difficulty: GameConfig::default().ai_difficulty,
        ai_first: false,
    }
}

fn flag(b: bool) -> u8 {
    u8::from(b)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

fn parse_board_size(value: &str) -> Option<BoardSize> {
    match value.trim().parse::<usize>().ok()? {
        8 => Some(BoardSize::Eight),
        10 => Some(BoardSize::Ten),
        _ => None,
    }
}

/// Render the engine's settings and full known line (including moves that
/// can still be redone) as save-file text.
pub fn to_save_text(engine: &GameEngine) -> String {
    let config = engine.config();
    let mut out = String::new();
    out.push(BOM);
    out.push_str(&format!("BoardSize:{}{LINE_END}", config.board_size.dimension()));
    out.push_str(&format!("OpponentAI:{}{LINE_END}", flag(config.opponent_is_ai)));
    out.push_str(&format!("AIFirst:{}{LINE_END}", flag(config.ai_first)));
    out.push_str(LINE_END);
    for line in engine.history() {
        out.push_str(line);
        out.push_str(LINE_END);
    }
    out
}

/// Parse save-file text. Never fails; bad lines are logged and skipped.
pub fn parse_save_text(text: &str) -> SavedGame {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut config = default_header();
    let mut moves = Vec::new();
    let mut skipped = 0;

    for (n, raw) in text.split('\n').enumerate() {
        let line = raw.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            match MoveRecord::from_notation(line) {
                Some(rec) => moves.push(rec),
                None => {
                    warn!("line {}: skipping unreadable move {line:?}", n + 1);
                    skipped += 1;
                }
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            warn!("line {}: skipping unrecognised line {line:?}", n + 1);
            skipped += 1;
            continue;
        };
        let parsed = match key.trim() {
            "BoardSize" => parse_board_size(value).map(|s| config.board_size = s),
            "OpponentAI" => parse_flag(value).map(|b| config.opponent_is_ai = b),
            "AIFirst" => parse_flag(value).map(|b| config.ai_first = b),
            _ => {
                warn!("line {}: skipping unknown header {key:?}", n + 1);
                skipped += 1;
                continue;
            }
        };
        if parsed.is_none() {
            warn!("line {}: bad value for {key}: {value:?}, keeping default", n + 1);
            skipped += 1;
        }
    }

    SavedGame { config, moves, skipped }
}

impl SavedGame {
    /// Build a fresh engine positioned after the last saved move. Moves that
    /// cannot be applied are skipped, so `total_moves` may come up short of
    /// `moves.len()`.
    pub fn replay(&self) -> GameEngine {
        let mut engine = GameEngine::new(self.config);
        self.replay_moves(&mut engine);
        engine
    }

    /// Restart `engine` with the saved settings and play the saved moves.
    /// A registered history callback is kept.
    pub fn replay_into(&self, engine: &mut GameEngine) {
        engine.init(self.config);
        self.replay_moves(engine);
    }

    fn replay_moves(&self, engine: &mut GameEngine) {
        for rec in &self.moves {
            let (fr, fc) = rec.from;
            let (tr, tc) = rec.to;
            let (ar, ac) = rec.arrow;
            if engine.make_move(fr, fc, tr, tc, ar, ac).is_none() {
                warn!("replay: move {rec} could not be applied, skipping");
            }
        }
    }
}

pub fn save_to_path(engine: &GameEngine, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    fs::write(path, to_save_text(engine)).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<SavedGame, SaveError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)?;
    Ok(parse_save_text(&text))
}
