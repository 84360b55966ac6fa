use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Tag used in move text, e.g. the `W` in `"[W] C8 C5 C8"`.
    pub fn tag(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }

    pub fn from_tag(tag: char) -> Option<Color> {
        match tag {
            'W' | 'w' => Some(Color::White),
            'B' | 'b' => Some(Color::Black),
            _ => None,
        }
    }
}

/// An amazon. Its position is updated in place as it moves.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Piece {
    pub row: usize,
    pub col: usize,
    pub color: Color,
}

impl Piece {
    pub fn new(row: usize, col: usize, color: Color) -> Self {
        Piece { row, col, color }
    }

    pub fn is_white(&self) -> bool {
        self.color == Color::White
    }

    pub fn square(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}
