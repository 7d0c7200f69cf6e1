//! Turn sequencing and win/draw detection.
//!
//! [`Game`] is the only thing that mutates the live [`Board`]. Each accepted
//! move is followed by the same check: a completed line ends the game, a full
//! board is a draw, anything else hands the turn to the other mark. When the
//! computer is the opponent and the turn passes to it, its reply is searched
//! and applied inside the same `submit_move` call, so a caller only ever sees
//! the board with the human to move or the game over.

use tracing::{debug, instrument};

use crate::board::{Board, Cell, Move};
use crate::constants::{GLYPH_A, GLYPH_B, MSG_BOT_WINS, MSG_TIE};
use crate::error::RejectedMove;
use crate::search;

/// Who plays `MarkB`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Opponent {
    /// The search replies automatically after every human move
    #[default]
    Computer,
    /// Both marks are entered through `submit_move`
    Human,
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    WinA,
    WinB,
    Draw,
}

impl Outcome {
    /// Text shown to the players when the game ends.
    pub fn notification(self, opponent: Opponent) -> String {
        match (self, opponent) {
            (Outcome::WinA, _) => format!("Player {GLYPH_A} wins!"),
            (Outcome::WinB, Opponent::Computer) => MSG_BOT_WINS.to_string(),
            (Outcome::WinB, Opponent::Human) => format!("Player {GLYPH_B} wins!"),
            (Outcome::Draw, _) => MSG_TIE.to_string(),
        }
    }

    fn win_for(mark: Cell) -> Option<Outcome> {
        match mark {
            Cell::MarkA => Some(Outcome::WinA),
            Cell::MarkB => Some(Outcome::WinB),
            Cell::Empty => None,
        }
    }
}

/// Phase of the state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    InProgress,
    Terminal(Outcome),
}

/// What an accepted `submit_move` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// The move that was requested
    pub played: Move,
    /// The computer's answer, if it moved
    pub reply: Option<Move>,
    /// State after both moves
    pub state: GameState,
    /// End-of-game text, present only when this call finished the game
    pub notification: Option<String>,
}

/// One live game.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    active: Cell,
    state: GameState,
    opponent: Opponent,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Empty board, human (`MarkA`) to move, computer opponent.
    pub fn new() -> Self {
        Self::with_opponent(Opponent::Computer)
    }

    /// Hot-seat game with no computer player.
    pub fn two_player() -> Self {
        Self::with_opponent(Opponent::Human)
    }

    pub fn with_opponent(opponent: Opponent) -> Self {
        Self {
            board: Board::new(),
            active: Cell::MarkA,
            state: GameState::InProgress,
            opponent,
            history: Vec::new(),
        }
    }

    /// Resume from an arbitrary position.
    ///
    /// `MarkA` is to move when both marks have been placed equally often,
    /// otherwise `MarkB`. If that leaves the computer to move on a live board
    /// it moves straight away.
    pub fn from_board(board: Board, opponent: Opponent) -> Self {
        let active = if board.count(Cell::MarkA) == board.count(Cell::MarkB) {
            Cell::MarkA
        } else {
            Cell::MarkB
        };
        let mut game = Self {
            board,
            active,
            state: GameState::InProgress,
            opponent,
            history: Vec::new(),
        };
        game.state = game.evaluate();
        if game.computer_to_move() {
            game.play_computer();
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, GameState::Terminal(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::Terminal(outcome) => Some(outcome),
            GameState::InProgress => None,
        }
    }

    /// The mark that moves next. Unchanged once the game is over.
    pub fn active_player(&self) -> Cell {
        self.active
    }

    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    /// Accepted moves in play order, computer replies included.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// End-of-game text for the current state, if the game is over.
    pub fn notification(&self) -> Option<String> {
        self.outcome().map(|o| o.notification(self.opponent))
    }

    /// Like [`Game::submit_move`], taking raw coordinates.
    pub fn submit(&mut self, row: usize, col: usize) -> Result<Submission, RejectedMove> {
        let mv = Move::new(row, col).ok_or(RejectedMove::OutOfBounds)?;
        self.submit_move(mv)
    }

    /// Play `mv` for the active mark, then let the computer answer.
    ///
    /// # Errors
    ///
    /// Returns [`RejectedMove`] without touching any state if the game is
    /// over or the cell is taken.
    #[instrument(level = "debug", skip(self), fields(player = ?self.active))]
    pub fn submit_move(&mut self, mv: Move) -> Result<Submission, RejectedMove> {
        if self.is_terminal() {
            debug!(%mv, "rejected: game over");
            return Err(RejectedMove::GameOver);
        }
        if let Err(e) = self.board.place(mv, self.active) {
            debug!(%mv, "rejected: occupied");
            return Err(e);
        }
        self.history.push(mv);
        self.advance();

        let reply = if self.computer_to_move() {
            Some(self.play_computer())
        } else {
            None
        };

        Ok(Submission {
            played: mv,
            reply,
            state: self.state,
            notification: self.notification(),
        })
    }

    /// Back to an empty board with the human to move. Legal at any time.
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = Cell::MarkA;
        self.state = GameState::InProgress;
        self.history.clear();
        debug!("game restarted");
    }

    fn computer_to_move(&self) -> bool {
        self.opponent == Opponent::Computer
            && self.active == Cell::MarkB
            && self.state == GameState::InProgress
    }

    /// Search, place, and settle the computer's move.
    fn play_computer(&mut self) -> Move {
        let mv = match search::best_move(&self.board) {
            Ok(mv) => mv,
            Err(e) => unreachable!("live board without a legal move: {e}"),
        };
        self.board.set(mv, Cell::MarkB);
        self.history.push(mv);
        self.advance();
        mv
    }

    /// Check the board after the active mark moved: end the game or pass the turn.
    fn advance(&mut self) {
        self.state = self.evaluate();
        match self.state {
            GameState::InProgress => self.active = self.active.opponent(),
            GameState::Terminal(outcome) => debug!(?outcome, "game over"),
        }
    }

    fn evaluate(&self) -> GameState {
        if let Some(outcome) = self.board.winner().and_then(Outcome::win_for) {
            GameState::Terminal(outcome)
        } else if self.board.is_full() {
            GameState::Terminal(Outcome::Draw)
        } else {
            GameState::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.active_player(), Cell::MarkA);
        assert_eq!(game.board().count(Cell::Empty), 9);
        assert!(game.history().is_empty());
        assert_eq!(game.notification(), None);
    }

    #[test]
    fn test_computer_replies_in_same_call() {
        let mut game = Game::new();
        let sub = game.submit(1, 1).unwrap();
        assert_eq!(sub.played, mv(1, 1));
        assert_eq!(sub.reply, Some(mv(0, 0)));
        assert_eq!(sub.state, GameState::InProgress);
        assert_eq!(game.active_player(), Cell::MarkA);
        assert_eq!(game.board().count(Cell::MarkB), 1);
        assert_eq!(game.history(), &[mv(1, 1), mv(0, 0)]);
    }

    #[test]
    fn test_occupied_is_rejected_without_change() {
        let mut game = Game::new();
        game.submit(1, 1).unwrap();
        let board = *game.board();
        let history = game.history().to_vec();

        assert_eq!(game.submit(1, 1), Err(RejectedMove::Occupied));
        assert_eq!(game.submit(0, 0), Err(RejectedMove::Occupied));
        assert_eq!(*game.board(), board);
        assert_eq!(game.history(), history.as_slice());
        assert_eq!(game.active_player(), Cell::MarkA);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = Game::new();
        assert_eq!(game.submit(3, 0), Err(RejectedMove::OutOfBounds));
        assert_eq!(game.submit(0, 7), Err(RejectedMove::OutOfBounds));
    }

    #[test]
    fn test_human_win() {
        let board = "XX./OO./...".parse().unwrap();
        let mut game = Game::from_board(board, Opponent::Computer);
        assert_eq!(game.active_player(), Cell::MarkA);

        let sub = game.submit(0, 2).unwrap();
        assert_eq!(sub.reply, None);
        assert_eq!(sub.state, GameState::Terminal(Outcome::WinA));
        assert_eq!(sub.notification.as_deref(), Some("Player X wins!"));
        assert_eq!(game.submit(2, 2), Err(RejectedMove::GameOver));
    }

    #[test]
    fn test_bot_win() {
        let board = "OO./XX./...".parse().unwrap();
        let mut game = Game::from_board(board, Opponent::Computer);

        // Human ignores both threats.
        let sub = game.submit(2, 2).unwrap();
        assert_eq!(sub.reply, Some(mv(0, 2)));
        assert_eq!(sub.state, GameState::Terminal(Outcome::WinB));
        assert_eq!(sub.notification.as_deref(), Some("Bot wins!"));
    }

    #[test]
    fn test_draw() {
        let board = "XOX/XOO/OX.".parse().unwrap();
        let mut game = Game::from_board(board, Opponent::Computer);
        let sub = game.submit(2, 2).unwrap();
        assert_eq!(sub.state, GameState::Terminal(Outcome::Draw));
        assert_eq!(sub.notification.as_deref(), Some("It's a tie!"));
    }

    #[test]
    fn test_two_player_alternates() {
        let mut game = Game::two_player();
        let sub = game.submit(0, 0).unwrap();
        assert_eq!(sub.reply, None);
        assert_eq!(game.active_player(), Cell::MarkB);
        game.submit(1, 1).unwrap();
        assert_eq!(game.active_player(), Cell::MarkA);
        assert_eq!(game.board().get(mv(1, 1)), Cell::MarkB);
    }

    #[test]
    fn test_two_player_o_win_message() {
        let board = "OO./XX./..X".parse().unwrap();
        let mut game = Game::from_board(board, Opponent::Human);
        assert_eq!(game.active_player(), Cell::MarkB);
        let sub = game.submit(0, 2).unwrap();
        assert_eq!(sub.notification.as_deref(), Some("Player O wins!"));
    }

    #[test]
    fn test_from_board_lets_computer_move() {
        let board = "X../.../...".parse().unwrap();
        let game = Game::from_board(board, Opponent::Computer);
        assert_eq!(game.board().count(Cell::MarkB), 1);
        assert_eq!(game.active_player(), Cell::MarkA);
    }

    #[test]
    fn test_from_board_terminal() {
        let board = "XXX/OO./...".parse().unwrap();
        let game = Game::from_board(board, Opponent::Computer);
        assert_eq!(game.outcome(), Some(Outcome::WinA));
    }

    #[test]
    fn test_restart() {
        let board = "XX./OO./...".parse().unwrap();
        let mut game = Game::from_board(board, Opponent::Computer);
        game.submit(0, 2).unwrap();
        assert!(game.is_terminal());

        game.restart();
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.active_player(), Cell::MarkA);
        assert_eq!(game.state(), GameState::InProgress);
        assert!(game.history().is_empty());
        assert!(game.submit(1, 1).is_ok());
    }
}
