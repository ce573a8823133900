//! # Connect Four Minimax
//!
//! A Connect Four opponent driven by depth-limited minimax with alpha-beta
//! pruning and a threat-counting evaluation. Ships a terminal UI built with
//! Ratatui and a headless position analyzer.
//!
//! ## Modules
//!
//! - [`game`]: board, players, game state
//! - [`ai`]: heuristic, move ordering, search engine, agents
//! - [`accounts`]: login and per-user win/loss/tie tallies
//! - [`ui`]: terminal UI (login screen, game view)
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: file-backed logger for the terminal game
//! - [`error`]: structured error types

pub mod accounts;
pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
