use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::Color;

/// Zero-based `(row, col)`. Row 0 is rank 1, col 0 is file A, so the square
/// named in history text is always `(rank - 1, file)`.
///
/// Older Amazon Chess save files were written from screen rows (row 0 at the
/// top, i.e. rank N) and will not line up with this numbering; their moves
/// replay mirrored top to bottom, or get skipped when the mirrored origin is
/// empty.
pub type Square = (usize, usize);

/// A completed turn: the amazon's move plus the arrow it fired.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub arrow: Square,
    pub color: Color,
}

/// Format a square as file letter + rank, e.g. `(7, 2)` -> `"C8"`.
pub fn square_name((row, col): Square) -> String {
    let file = (b'A' + col as u8) as char;
    format!("{file}{}", row + 1)
}

/// Parse `"C8"` (or `"c8"`) back into `(7, 2)`. Bounds against a board size
/// are the caller's business.
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file = chars.next()?.to_ascii_uppercase();
    if !file.is_ascii_uppercase() {
        return None;
    }
    let rank: usize = chars.as_str().parse().ok()?;
    if rank == 0 {
        return None;
    }
    Some((rank - 1, (file as u8 - b'A') as usize))
}

impl MoveRecord {
    pub fn new(from: Square, to: Square, arrow: Square, color: Color) -> Self {
        MoveRecord { from, to, arrow, color }
    }

    /// Convert to history notation, e.g. `"[W] C8 C5 C8"`.
    pub fn to_notation(&self) -> String {
        format!(
            "[{}] {} {} {}",
            self.color.tag(),
            square_name(self.from),
            square_name(self.to),
            square_name(self.arrow)
        )
    }

    /// Parse a history line. Returns `None` for anything that is not a colour
    /// tag followed by exactly three squares.
    pub fn from_notation(line: &str) -> Option<MoveRecord> {
        let line = line.trim();
        let rest = line.strip_prefix('[')?;
        let (tag, rest) = rest.split_once(']')?;
        let mut tag_chars = tag.chars();
        let color = Color::from_tag(tag_chars.next()?)?;
        if tag_chars.next().is_some() {
            return None;
        }

        let squares: Vec<Square> = rest
            .split_whitespace()
            .map(parse_square)
            .collect::<Option<Vec<_>>>()?;
        match squares.as_slice() {
            &[from, to, arrow] => Some(MoveRecord { from, to, arrow, color }),
            _ => None,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}
