//! Mini Go: play Go in the terminal against a minimax agent, or watch two
//! agents play each other.
//!
//! ## Usage
//!
//! - `mini-go` - Human vs human on a 19x19 board
//! - `mini-go -w minimax -d 2` - Human (Black) vs a depth-2 minimax agent
//! - `mini-go -b random -w minimax -n 9 -q` - Agents only, no board output

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mini_go::agent::{AgentKind, Interactive};
use mini_go::console::ConsoleInput;
use mini_go::constants::{DEFAULT_BOARD_SIZE, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use mini_go::game::{Match, MatchConfig};

/// Mini Go: a small Go engine with a minimax opponent
#[derive(Parser)]
#[command(name = "mini-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Agent for BLACK: minimax, random, or none (human)
    #[arg(short = 'b', long, default_value = "none")]
    agent_black: AgentKind,

    /// Agent for WHITE: minimax, random, or none (human)
    #[arg(short = 'w', long, default_value = "none")]
    agent_white: AgentKind,

    /// Search depth for minimax agents; depths above 2 are meant for small boards
    #[arg(short = 'd', long, default_value_t = DEFAULT_SEARCH_DEPTH,
          value_parser = clap::value_parser!(u8).range(1..=MAX_SEARCH_DEPTH as i64))]
    search_depth: u8,

    /// Board size
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Seed for random agents and minimax tie-breaking
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many moves [default for agent-only matches: 4 per board point]
    #[arg(short, long)]
    max_moves: Option<usize>,

    /// Do not print the board after each move
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MatchConfig {
        size: cli.size,
        depth: cli.search_depth,
        black: cli.agent_black,
        white: cli.agent_white,
        seed: cli.seed,
        max_moves: cli.max_moves,
        show_board: !cli.quiet,
    };

    // Both human colors read from the same terminal.
    let console = Rc::new(RefCell::new(ConsoleInput::stdio()));
    let mut game = Match::from_config(&config, |_| {
        Box::new(Rc::clone(&console)) as Box<dyn Interactive>
    })
    .context("invalid match configuration")?;

    println!("Agent for BLACK: {}", game.black());
    println!("Agent for WHITE: {}", game.white());
    println!("Match starts!");

    let outcome = game.play().context("match failed")?;
    println!("{outcome}");
    Ok(())
}
