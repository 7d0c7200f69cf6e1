//! Constants for board geometry, scoring, and player-facing text.
//!
//! The board is stored as a flat array of `CELLS` entries in row-major
//! order, so index `row * N + col` addresses the cell at `(row, col)`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// The 8 winning lines as flat cell indices.
/// Order: rows top to bottom, columns left to right, then both diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // Top row
    [3, 4, 5], // Middle row
    [6, 7, 8], // Bottom row
    [0, 3, 6], // Left column
    [1, 4, 7], // Middle column
    [2, 5, 8], // Right column
    [0, 4, 8], // Diagonal top-left to bottom-right
    [2, 4, 6], // Diagonal top-right to bottom-left
];

// =============================================================================
// Glyphs
// =============================================================================

/// Human mark (moves first).
pub const GLYPH_A: char = 'X';

/// Computer mark.
pub const GLYPH_B: char = 'O';

/// Empty cell.
pub const GLYPH_EMPTY: char = '.';

// =============================================================================
// Search Scores (from the computer's perspective)
// =============================================================================

pub const SCORE_WIN: i8 = 1;
pub const SCORE_DRAW: i8 = 0;
pub const SCORE_LOSS: i8 = -1;

// =============================================================================
// Notifications
// =============================================================================

/// Shown when the board fills up with no winner.
pub const MSG_TIE: &str = "It's a tie!";

/// Shown when the computer completes a line.
pub const MSG_BOT_WINS: &str = "Bot wins!";
