//! Exhaustive minimax search for the computer's move.
//!
//! The computer (`MarkB`) maximizes and the human (`MarkA`) minimizes.
//! Scores are `+1` for a computer win, `-1` for a human win and `0` for a
//! draw. The whole game tree is enumerated: no depth limit, no pruning and
//! no transposition table. At most 9! leaves exist, so this is cheap.
//!
//! The search owns one scratch copy of the board and explores it with
//! place/undo. Every recursive call clears the cell it filled before it
//! returns, so sibling branches always see the board their parent saw.

use tracing::{debug, instrument, trace};

use crate::board::{Board, Cell, Move};
use crate::constants::{SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use crate::error::NoLegalMove;

/// Result of a top-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Selected move for the computer
    pub best: Move,
    /// Minimax value of `best` from the computer's perspective
    pub score: i8,
    /// Positions visited, including the root's children
    pub nodes: u64,
}

/// Recursion state for one search.
struct Searcher {
    board: Board,
    nodes: u64,
}

impl Searcher {
    fn new(board: &Board) -> Result<Self, NoLegalMove> {
        if board.is_full() || board.winner().is_some() {
            return Err(NoLegalMove);
        }
        Ok(Self {
            board: *board,
            nodes: 0,
        })
    }

    fn minimax(&mut self, maximizing: bool) -> i8 {
        self.nodes += 1;
        minimax_inner(&mut self.board, maximizing, &mut self.nodes)
    }

    /// Score the computer placing at `mv`, then undo it.
    fn score_move(&mut self, mv: Move) -> i8 {
        self.board.set(mv, Cell::MarkB);
        let score = self.minimax(false);
        self.board.clear(mv);
        score
    }
}

/// Minimax value of `board` with `maximizing` telling whose turn it is.
///
/// `board` is returned to its original contents before this returns.
pub fn minimax(board: &mut Board, maximizing: bool) -> i8 {
    let mut nodes = 0;
    minimax_inner(board, maximizing, &mut nodes)
}

fn minimax_inner(board: &mut Board, maximizing: bool, nodes: &mut u64) -> i8 {
    // Precedence is fixed: computer win, then human win, then draw.
    if board.has_won(Cell::MarkB) {
        return SCORE_WIN;
    } else if board.has_won(Cell::MarkA) {
        return SCORE_LOSS;
    } else if board.is_full() {
        return SCORE_DRAW;
    }

    let mark = if maximizing { Cell::MarkB } else { Cell::MarkA };
    let mut best = if maximizing { i8::MIN } else { i8::MAX };

    for mv in Move::all() {
        if board.get(mv) != Cell::Empty {
            continue;
        }
        board.set(mv, mark);
        *nodes += 1;
        let score = minimax_inner(board, !maximizing, nodes);
        board.clear(mv);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

/// Search `board` for the computer's best move.
///
/// Candidates are tried in row-major order and only a strictly better score
/// replaces the current pick, so ties go to the earliest cell.
///
/// # Errors
///
/// Returns [`NoLegalMove`] if the board is full or already won.
#[instrument(level = "debug", skip_all)]
pub fn search(board: &Board) -> Result<SearchOutcome, NoLegalMove> {
    let mut searcher = Searcher::new(board)?;

    let mut best: Option<(Move, i8)> = None;
    let candidates: Vec<Move> = board.empty_cells().collect();
    for mv in candidates {
        let score = searcher.score_move(mv);
        trace!(%mv, score, "scored candidate");
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    // Searcher::new guarantees at least one empty cell.
    let (best, score) = best.ok_or(NoLegalMove)?;
    debug!(%best, score, nodes = searcher.nodes, "search finished");

    Ok(SearchOutcome {
        best,
        score,
        nodes: searcher.nodes,
    })
}

/// The computer's move for `board`. See [`search`].
pub fn best_move(board: &Board) -> Result<Move, NoLegalMove> {
    search(board).map(|outcome| outcome.best)
}

/// Minimax value of every legal computer move, in row-major order.
pub fn score_moves(board: &Board) -> Result<Vec<(Move, i8)>, NoLegalMove> {
    let mut searcher = Searcher::new(board)?;
    let candidates: Vec<Move> = board.empty_cells().collect();
    Ok(candidates
        .into_iter()
        .map(|mv| (mv, searcher.score_move(mv)))
        .collect())
}
