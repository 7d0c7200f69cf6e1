//! Error types shared by the board, the game engine, and the search.

use std::fmt;

/// Why a move request was refused.
///
/// A rejected move never changes the board, the active player, or the
/// terminal flag, so the caller may simply retry with a different cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedMove {
    /// Cell already holds a mark
    Occupied,
    /// Game already reached a win or a draw
    GameOver,
    /// Row or column outside the board
    OutOfBounds,
}

impl fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectedMove::Occupied => write!(f, "illegal move: cell is occupied"),
            RejectedMove::GameOver => write!(f, "illegal move: game is over"),
            RejectedMove::OutOfBounds => write!(f, "illegal move: off the board"),
        }
    }
}

impl std::error::Error for RejectedMove {}

/// The search was asked for a move on a board that has none.
///
/// This only happens when a caller ignores the terminal state, so it
/// indicates a bug in the integration rather than a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoLegalMove;

impl fmt::Display for NoLegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no legal move: board is full or already won")
    }
}

impl std::error::Error for NoLegalMove {}

/// Failure to read a board from its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Wrong number of cell glyphs
    Length(usize),
    /// Character that is not a mark or an empty cell
    Glyph(char),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::Length(n) => write!(f, "expected 9 cells, found {n}"),
            ParseBoardError::Glyph(c) => write!(f, "unexpected character {c:?}"),
        }
    }
}

impl std::error::Error for ParseBoardError {}
