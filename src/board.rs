//! The 3x3 grid of marks.
//!
//! [`Board`] only knows about cells. Whose turn it is and whether the game
//! has ended are tracked by [`crate::game::Game`], which is the sole mutator
//! of the live board.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, GLYPH_A, GLYPH_B, GLYPH_EMPTY, LINES, N};
use crate::error::{ParseBoardError, RejectedMove};

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Human mark, moves first
    MarkA,
    /// Computer mark
    MarkB,
}

impl Cell {
    /// The other mark. `Empty` maps to itself.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::MarkA => Cell::MarkB,
            Cell::MarkB => Cell::MarkA,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => GLYPH_EMPTY,
            Cell::MarkA => GLYPH_A,
            Cell::MarkB => GLYPH_B,
        }
    }

    /// Accepts either case for the marks, and `_` as an alternative empty cell.
    pub fn from_glyph(c: char) -> Option<Cell> {
        match c.to_ascii_uppercase() {
            GLYPH_A => Some(Cell::MarkA),
            GLYPH_B => Some(Cell::MarkB),
            GLYPH_EMPTY | '_' => Some(Cell::Empty),
            _ => None,
        }
    }
}

/// A (row, column) coordinate, both in `0..N`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Returns `None` if either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Move> {
        (row < N && col < N).then_some(Move { row, col })
    }

    pub fn from_index(index: usize) -> Option<Move> {
        (index < CELLS).then_some(Move {
            row: index / N,
            col: index % N,
        })
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col
    }

    /// Flat row-major index.
    #[inline]
    pub fn index(self) -> usize {
        self.row * N + self.col
    }

    /// Every cell coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..CELLS).map(|i| Move { row: i / N, col: i % N })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// The grid itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// The grid as rows, for callers that render it.
    pub fn rows(&self) -> [[Cell; N]; N] {
        let mut rows = [[Cell::Empty; N]; N];
        for mv in Move::all() {
            rows[mv.row][mv.col] = self.get(mv);
        }
        rows
    }

    /// Put `mark` on an empty cell. Turn order is the caller's business.
    pub fn place(&mut self, mv: Move, mark: Cell) -> Result<(), RejectedMove> {
        if self.get(mv) != Cell::Empty {
            return Err(RejectedMove::Occupied);
        }
        self.cells[mv.index()] = mark;
        Ok(())
    }

    /// Overwrite a cell without checking it. The search only calls this on
    /// cells it has just seen empty.
    #[inline]
    pub(crate) fn set(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.index()] = cell;
    }

    /// Empty a cell again. Only the search uses this, to undo its
    /// speculative placements.
    #[inline]
    pub fn clear(&mut self, mv: Move) {
        self.cells[mv.index()] = Cell::Empty;
    }

    /// Wipe every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELLS];
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        Move::all().filter(|&mv| self.get(mv) == Cell::Empty)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// True if `mark` holds any full row, column, or diagonal.
    ///
    /// Both the game engine and the search call this, so a declared winner
    /// and a search evaluation can never disagree.
    pub fn has_won(&self, mark: Cell) -> bool {
        if mark == Cell::Empty {
            return false;
        }
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// The mark holding a full line, if any. MarkB is checked first.
    pub fn winner(&self) -> Option<Cell> {
        [Cell::MarkB, Cell::MarkA]
            .into_iter()
            .find(|&mark| self.has_won(mark))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|c| c.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads nine glyphs in row-major order. Whitespace and `/` are ignored,
    /// so `"XX./OO./..."` and the `Display` output both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let glyphs: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if glyphs.len() != CELLS {
            return Err(ParseBoardError::Length(glyphs.len()));
        }
        let mut board = Board::new();
        for (i, &c) in glyphs.iter().enumerate() {
            board.cells[i] = Cell::from_glyph(c).ok_or(ParseBoardError::Glyph(c))?;
        }
        Ok(board)
    }
}
