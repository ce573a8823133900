//! The AI: board evaluation, move ordering, and the alpha-beta search, plus
//! the agents the game loop drives.

mod agent;
pub mod heuristic;
pub mod minimax;
pub mod ordering;
mod random;

pub use agent::{Agent, MinimaxAgent};
pub use heuristic::{Heuristic, ThreatHeuristic, LOSS_SCORE, WIN_SCORE};
pub use minimax::{best_move, SearchConfig, SearchReport, SearchResult, SearchStats, Searcher};
pub use ordering::{ranked_candidates, Candidate};
pub use random::RandomAgent;
