//! xo: tic-tac-toe against an unbeatable minimax opponent.
//!
//! ## Usage
//!
//! - `xo` / `xo play` - Play on stdin/stdout using the text protocol
//! - `xo play --two-player` - Hot-seat game, no computer
//! - `xo demo` - Random mover against the computer
//! - `xo analyze "X../.O./..."` - Score every computer move on a board

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use xo_minimax::board::Board;
use xo_minimax::game::{Game, Opponent, Outcome};
use xo_minimax::protocol::ProtocolEngine;
use xo_minimax::search;

/// xo: tic-tac-toe with an unbeatable computer opponent
#[derive(Parser)]
#[command(name = "xo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play using the line-based text protocol on stdin/stdout
    Play {
        /// Both marks are entered by hand
        #[arg(long)]
        two_player: bool,
    },
    /// Pit a random mover against the computer
    Demo {
        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: usize,
        /// Seed for the random mover
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the score of every computer move on a board
    Analyze {
        /// Nine cells in row-major order, e.g. "XX./OO./..."
        board: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Play { two_player }) => run_play(two_player),
        Some(Commands::Demo { games, seed }) => run_demo(games, seed),
        Some(Commands::Analyze { board }) => run_analyze(&board),
        None => run_play(false),
    }
}

/// Logs go to stderr so they never mix with protocol responses.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_play(two_player: bool) -> Result<()> {
    let opponent = if two_player {
        Opponent::Human
    } else {
        Opponent::Computer
    };
    info!(?opponent, "starting protocol loop");
    let mut engine = ProtocolEngine::with_opponent(opponent);
    engine.run().context("protocol loop failed")
}

fn run_demo(games: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    println!("xo: random mover vs minimax, {games} games\n");

    let (mut random_wins, mut bot_wins, mut draws) = (0, 0, 0);
    let mut game = Game::new();
    for _ in 0..games {
        game.restart();
        while !game.is_terminal() {
            let empty: Vec<_> = game.board().empty_cells().collect();
            let Some(&mv) = rng.choice(&empty) else {
                bail!("live game with a full board");
            };
            game.submit_move(mv)
                .with_context(|| format!("demo move {mv} was rejected"))?;
        }
        match game.outcome() {
            Some(Outcome::WinA) => random_wins += 1,
            Some(Outcome::WinB) => bot_wins += 1,
            Some(Outcome::Draw) => draws += 1,
            None => {}
        }
    }

    println!("Last game:\n{}", game.board());
    println!("Bot wins:    {bot_wins}");
    println!("Draws:       {draws}");
    println!("Random wins: {random_wins}");

    if random_wins > 0 {
        bail!("the computer lost {random_wins} game(s)");
    }
    Ok(())
}

fn run_analyze(text: &str) -> Result<()> {
    let board: Board = text
        .parse()
        .with_context(|| format!("could not read board {text:?}"))?;
    println!("{board}");

    let scores = search::score_moves(&board).context("nothing to analyze")?;
    for (mv, score) in scores {
        println!("move {mv} score={score:+}");
    }
    let outcome = search::search(&board)?;
    println!("\nBest move: {} ({} nodes)", outcome.best, outcome.nodes);
    Ok(())
}
