use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::{MoveRecord, Square};
use crate::piece::{Color, Piece};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum BoardSize {
    Eight,
    Ten,
}

impl BoardSize {
    /// Only 8 and 10 are playable; every other dimension falls back to 10.
    pub fn from_dimension(n: usize) -> BoardSize {
        if n == 8 {
            BoardSize::Eight
        } else {
            BoardSize::Ten
        }
    }

    pub fn dimension(self) -> usize {
        match self {
            BoardSize::Eight => 8,
            BoardSize::Ten => 10,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Piece,
    Arrow,
}

/// Queen directions in generation order: up, down, left, right, up-left,
/// up-right, down-left, down-right. "Up" is towards row 0.
pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

/// Starting squares as (file, rank, colour).
const LAYOUT_TEN: [(char, usize, Color); 8] = [
    ('D', 10, Color::White),
    ('G', 10, Color::White),
    ('A', 7, Color::White),
    ('J', 7, Color::White),
    ('D', 1, Color::Black),
    ('G', 1, Color::Black),
    ('A', 4, Color::Black),
    ('J', 4, Color::Black),
];

const LAYOUT_EIGHT: [(char, usize, Color); 8] = [
    ('C', 1, Color::Black),
    ('F', 1, Color::Black),
    ('A', 3, Color::Black),
    ('H', 3, Color::Black),
    ('C', 8, Color::White),
    ('F', 8, Color::White),
    ('A', 6, Color::White),
    ('H', 6, Color::White),
];

/// Occupancy grid plus the list of amazons standing on it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Create a board with no pieces or arrows. Useful for setting up test positions.
    pub fn empty(size: BoardSize) -> Self {
        let n = size.dimension();
        Board {
            size,
            cells: vec![Cell::Empty; n * n],
            pieces: Vec::with_capacity(8),
        }
    }

    /// Standard starting position for the given size.
    pub fn new(size: BoardSize) -> Self {
        let mut board = Board::empty(size);
        let layout = match size {
            BoardSize::Ten => &LAYOUT_TEN,
            BoardSize::Eight => &LAYOUT_EIGHT,
        };
        for &(file, rank, color) in layout {
            let col = (file as u8 - b'A') as usize;
            board.place_piece(rank - 1, col, color);
        }
        board
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn dimension(&self) -> usize {
        self.size.dimension()
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        let n = self.dimension();
        row < n && col < n
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dimension() + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.cells[self.index(row, col)])
    }

    fn set_cell(&mut self, (row, col): Square, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// True for pieces and arrows. Out-of-range squares read as unoccupied.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.cell(row, col), Some(Cell::Piece | Cell::Arrow))
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.pieces.iter().copied().find(|p| p.row == row && p.col == col)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn arrows(&self) -> impl Iterator<Item = Square> + '_ {
        let n = self.dimension();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Arrow)
            .map(move |(i, _)| (i / n, i % n))
    }

    /// Put an amazon on an empty square. Returns false if the square is out
    /// of range or taken.
    pub fn place_piece(&mut self, row: usize, col: usize, color: Color) -> bool {
        if !self.in_bounds(row, col) || self.is_occupied(row, col) {
            return false;
        }
        self.set_cell((row, col), Cell::Piece);
        self.pieces.push(Piece::new(row, col, color));
        true
    }

    /// Block an empty square with an arrow. Returns false if the square is
    /// out of range or taken.
    pub fn place_arrow(&mut self, row: usize, col: usize) -> bool {
        if !self.in_bounds(row, col) || self.is_occupied(row, col) {
            return false;
        }
        self.set_cell((row, col), Cell::Arrow);
        true
    }

    /// Walk every queen ray from `from`, collecting squares up to (not
    /// including) the first one `blocked` reports or the board edge.
    pub fn queen_reach(&self, from: Square, blocked: impl Fn(Square) -> bool) -> Vec<Square> {
        let mut reach = Vec::new();
        let n = self.dimension() as i32;
        for &(dr, dc) in &QUEEN_DIRECTIONS {
            let mut r = from.0 as i32 + dr;
            let mut c = from.1 as i32 + dc;
            while (0..n).contains(&r) && (0..n).contains(&c) {
                let sq = (r as usize, c as usize);
                if blocked(sq) {
                    break;
                }
                reach.push(sq);
                r += dr;
                c += dc;
            }
        }
        reach
    }

    /// Squares an amazon standing on `from` can slide to.
    pub fn queen_moves(&self, from: Square) -> Vec<Square> {
        self.queen_reach(from, |(r, c)| self.is_occupied(r, c))
    }

    /// Arrow squares available after an amazon moves `from` -> `to`. Reads
    /// the grid as if the move had been made: `from` is vacant and `to` is
    /// occupied (rays start beyond `to`, so it never needs checking). The
    /// grid itself is left untouched.
    pub fn arrow_targets(&self, from: Square, to: Square) -> Vec<Square> {
        self.queen_reach(to, |sq| sq != from && self.is_occupied(sq.0, sq.1))
    }

    /// Slide the piece on `from` to `to`. Returns false if there is none.
    fn relocate(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self
            .pieces
            .iter_mut()
            .find(|p| p.row == from.0 && p.col == from.1)
        else {
            return false;
        };
        piece.row = to.0;
        piece.col = to.1;
        self.set_cell(from, Cell::Empty);
        self.set_cell(to, Cell::Piece);
        true
    }

    /// Play a record forwards: move the amazon, then mark the arrow.
    pub(crate) fn apply_record(&mut self, rec: &MoveRecord) -> bool {
        if !self.relocate(rec.from, rec.to) {
            return false;
        }
        self.set_cell(rec.arrow, Cell::Arrow);
        true
    }

    /// Take a record back: lift the arrow, then return the amazon. The arrow
    /// goes first because it may sit on the vacated origin.
    pub(crate) fn revert_record(&mut self, rec: &MoveRecord) -> bool {
        self.set_cell(rec.arrow, Cell::Empty);
        self.relocate(rec.to, rec.from)
    }
}

impl fmt::Display for Board {
    /// Highest rank on top, files along the bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension();
        for row in (0..n).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..n {
                let ch = match self.cells[self.index(row, col)] {
                    Cell::Empty => '.',
                    Cell::Arrow => 'x',
                    Cell::Piece => match self.piece_at(row, col) {
                        Some(p) if p.is_white() => 'W',
                        _ => 'B',
                    },
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..n {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
