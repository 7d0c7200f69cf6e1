//! xo-minimax: tic-tac-toe with an unbeatable computer opponent.
//!
//! The human plays `X` and moves first; the computer plays `O` and answers
//! every move with an exhaustive minimax search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scores, and notification text
//! - [`board`] - Cells, moves, and the 3x3 grid
//! - [`game`] - Turn sequencing and win/draw detection
//! - [`search`] - Minimax move selection
//! - [`protocol`] - Line-based text protocol for frontends
//! - [`error`] - Rejected moves and search precondition failures
//!
//! ## Example
//!
//! ```
//! use xo_minimax::board::{Cell, Move};
//! use xo_minimax::game::Game;
//!
//! let mut game = Game::new();
//!
//! // Human takes the center; the computer answers in the same call
//! let sub = game.submit(1, 1).unwrap();
//! assert_eq!(sub.reply, Move::new(0, 0));
//! assert_eq!(game.active_player(), Cell::MarkA);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod protocol;
pub mod search;
