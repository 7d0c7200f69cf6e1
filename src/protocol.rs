//! Line-oriented text protocol for driving a game from a terminal or a GUI.
//!
//! The framing follows GTP: each command sits on its own line with an
//! optional numeric id in front; the response starts with `=` on success or
//! `?` on failure, followed by the id (if one was given) and the message, and
//! is terminated by a blank line. Blank lines and `#` comments are skipped.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `play <row> <col>` - Play for the side to move; the computer answers
//! - `genmove` - Recommend a move for the computer without playing it
//! - `analyze` - Minimax score of every legal move
//! - `showboard` - Print the grid
//! - `status` - `in_progress`, `win_x`, `win_o` or `draw`
//! - `restart` (alias `clear_board`) - Start over
//! - `quit` - Exit the loop
//!
//! ## Example
//!
//! ```
//! use xo_minimax::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new();
//! let mut out = Vec::new();
//! engine.run_with("play 1 1\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "= 0 0\n\n");
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::Move;
use crate::game::{Game, GameState, Opponent, Outcome};
use crate::search;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "restart",
    "showboard",
    "status",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    game: Game,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Engine playing against the computer.
    pub fn new() -> Self {
        Self::with_opponent(Opponent::Computer)
    }

    pub fn with_opponent(opponent: Opponent) -> Self {
        Self {
            game: Game::with_opponent(opponent),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "restart" | "clear_board" => {
                self.game.restart();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.game.board().to_string().trim_end())),

            "status" => (true, status_word(self.game.state()).to_string()),

            "play" => {
                let mv = match parse_move(args) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e),
                };
                match self.game.submit_move(mv) {
                    Ok(sub) => {
                        let mut parts = Vec::new();
                        if let Some(reply) = sub.reply {
                            parts.push(reply.to_string());
                        }
                        if let Some(text) = sub.notification {
                            parts.push(text);
                        }
                        (true, parts.join("\n"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match search::search(self.game.board()) {
                Ok(outcome) => {
                    debug!(nodes = outcome.nodes, "genmove");
                    (true, outcome.best.to_string())
                }
                Err(e) => (false, e.to_string()),
            },

            "analyze" => match search::score_moves(self.game.board()) {
                Ok(scores) => {
                    let lines: Vec<String> = scores
                        .iter()
                        .map(|(mv, score)| format!("{mv} {score:+}"))
                        .collect();
                    (true, lines.join("\n"))
                }
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

/// Read `<row> <col>` arguments.
fn parse_move(args: &[&str]) -> Result<Move, String> {
    let [row, col] = args else {
        return Err("expected: play <row> <col>".to_string());
    };
    let row: usize = row.parse().map_err(|_| format!("invalid row: {row}"))?;
    let col: usize = col.parse().map_err(|_| format!("invalid column: {col}"))?;
    Move::new(row, col).ok_or_else(|| "illegal move: off the board".to_string())
}

fn status_word(state: GameState) -> &'static str {
    match state {
        GameState::InProgress => "in_progress",
        GameState::Terminal(Outcome::WinA) => "win_x",
        GameState::Terminal(Outcome::WinB) => "win_o",
        GameState::Terminal(Outcome::Draw) => "draw",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn run(engine: &mut ProtocolEngine, script: &str) -> String {
        let mut out = Vec::new();
        engine.run_with(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "xo-minimax");
    }

    #[test]
    fn test_known_command() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("known_command", &["play"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_returns_reply() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("play", &["1", "1"]);
        assert!(success);
        assert_eq!(response, "0 0");
        assert_eq!(engine.game().board().count(Cell::MarkB), 1);
    }

    #[test]
    fn test_play_rejections() {
        let mut engine = ProtocolEngine::new();
        engine.execute("play", &["1", "1"]);

        let (success, response) = engine.execute("play", &["1", "1"]);
        assert!(!success);
        assert_eq!(response, "illegal move: cell is occupied");

        let (success, _) = engine.execute("play", &["5", "1"]);
        assert!(!success);

        let (success, _) = engine.execute("play", &["a", "1"]);
        assert!(!success);

        let (success, _) = engine.execute("play", &["1"]);
        assert!(!success);
    }

    #[test]
    fn test_two_player_play_has_no_reply() {
        let mut engine = ProtocolEngine::with_opponent(Opponent::Human);
        let (success, response) = engine.execute("play", &["0", "0"]);
        assert!(success);
        assert_eq!(response, "");
        let (_, board) = engine.execute("showboard", &[]);
        assert_eq!(board, "\nX . .\n. . .\n. . .");
    }

    #[test]
    fn test_genmove_does_not_play() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("genmove", &[]);
        assert!(success);
        assert_eq!(response, "0 0");
        assert_eq!(engine.game().board().count(Cell::Empty), 9);
    }

    #[test]
    fn test_analyze_lists_every_move() {
        let mut engine = ProtocolEngine::new();
        engine.execute("play", &["1", "1"]);
        let (success, response) = engine.execute("analyze", &[]);
        assert!(success);
        assert_eq!(response.lines().count(), 7);
    }

    #[test]
    fn test_session_with_ids() {
        let mut engine = ProtocolEngine::new();
        let out = run(&mut engine, "# opening\n1 play 1 1\n\n2 status\n3 restart\nquit\nname\n");
        assert_eq!(out, "=1 0 0\n\n=2 in_progress\n\n=3 \n\n= \n\n");
        assert_eq!(engine.game().board().count(Cell::Empty), 9);
    }

    #[test]
    fn test_game_over_flow() {
        let mut engine = ProtocolEngine::with_opponent(Opponent::Human);
        // X takes the top row, O answers in the middle row.
        let out = run(
            &mut engine,
            "play 0 0\nplay 1 0\nplay 0 1\nplay 1 1\nplay 0 2\nstatus\nplay 2 2\ngenmove\n",
        );
        let responses: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(responses[4], "= Player X wins!");
        assert_eq!(responses[5], "= win_x");
        assert_eq!(responses[6], "? illegal move: game is over");
        assert!(responses[7].starts_with("? no legal move"));
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("komi", &["7.5"]);
        assert!(!success);
        assert_eq!(response, "unknown command: komi");
    }
}
