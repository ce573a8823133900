use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_minimax::config::{AppConfig, FirstTurn};
use connect_four_minimax::logging::file_logger;
use connect_four_minimax::ui::App;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a minimax AI")]
struct Cli {
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

    /// Who moves first
    #[arg(long, value_enum)]
    first: Option<FirstTurn>,

    /// Where log records go when RUST_LOG is set
    #[arg(long, default_value = "connect-four.log")]
    log_file: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if std::env::var_os("RUST_LOG").is_some() {
        file_logger(&cli.log_file)
            .with_context(|| format!("opening log file {}", cli.log_file.display()))?
            .init();
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if cli.time_limit_ms.is_some() {
        config.search.time_limit_ms = cli.time_limit_ms;
    }
    if cli.parallel {
        config.search.parallel_root = true;
    }
    if let Some(first) = cli.first {
        config.game.first_turn = first;
    }
    config.validate().context("invalid configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the game")
}
