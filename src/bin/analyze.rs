use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use connect_four_minimax::ai::{
    ranked_candidates, Candidate, SearchReport, Searcher, ThreatHeuristic,
};
use connect_four_minimax::config::AppConfig;
use connect_four_minimax::game::{Board, GameState, Player};

#[derive(Clone, Copy, ValueEnum)]
enum Opener {
    Ai,
    Human,
}

impl From<Opener> for Player {
    fn from(opener: Opener) -> Self {
        match opener {
            Opener::Ai => Player::Ai,
            Opener::Human => Player::Human,
        }
    }
}

/// Find the AI's best column for a position.
///
/// The position is six lines of seven cells, top row first: `.` empty,
/// `X` AI, `O` human.
#[derive(Parser)]
#[command(name = "analyze", about = "Find the AI's best move for a Connect Four position")]
struct Cli {
    /// File holding the position; reads stdin when omitted
    position: Option<PathBuf>,

    /// Who opened the game (affects the parity bonus)
    #[arg(long, value_enum, default_value = "human")]
    first: Opener,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Stop deepening after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Analysis {
    report: SearchReport,
    candidates: Vec<Candidate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if cli.time_limit_ms.is_some() {
        config.search.time_limit_ms = cli.time_limit_ms;
    }
    if cli.parallel {
        config.search.parallel_root = true;
    }
    config.validate().context("invalid configuration")?;

    let text = match &cli.position {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading position from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading position from stdin")?;
            buf
        }
    };

    let mut board = Board::parse(cli.first.into(), &text)
        .context("parsing position")?;
    let state = GameState::from_board(board);
    if let Some(outcome) = state.outcome() {
        bail!("game is already over: {outcome:?}");
    }
    if state.current_player() != Player::Ai {
        bail!("it is the human's turn in this position; the analyzer plays the AI side");
    }

    let mut searcher = Searcher::new(ThreatHeuristic, config.search.clone());
    let Some(report) = searcher.analyze(&board) else {
        bail!("no legal move");
    };
    info!(
        "searched {} nodes to depth {} in {} ms",
        report.stats.nodes, report.stats.completed_depth, report.stats.elapsed_ms
    );
    let candidates = ranked_candidates(&mut board, searcher.heuristic(), Player::Ai);

    if cli.json {
        let analysis = Analysis { report, candidates };
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{board}");
    println!("Best column: {}", report.column + 1);
    println!("Score:       {}", report.score);
    println!(
        "Depth:       {}{}",
        report.stats.completed_depth,
        if report.stats.timed_out { " (timed out)" } else { "" }
    );
    println!("Nodes:       {} ({} cutoffs)", report.stats.nodes, report.stats.cutoffs);
    println!("One-ply ranking:");
    for candidate in &candidates {
        println!("  column {}: {}", candidate.column + 1, candidate.value);
    }
    Ok(())
}
