use std::time::{Duration, Instant};

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::heuristic::{Heuristic, ThreatHeuristic};
use super::ordering::ranked_candidates;
use crate::game::{Board, Player};

/// Lower bound of the search window. Below every score the heuristic produces.
pub const NEG_INFINITY: i32 = i32::MIN;
/// Upper bound of the search window. Above every score the heuristic produces.
pub const POS_INFINITY: i32 = i32::MAX;

pub const DEFAULT_DEPTH: u32 = 7;

/// Search tuning, loadable from the `[search]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to search below the root.
    pub depth: u32,
    /// Wall-clock budget per move. When set, the search deepens one ply at a
    /// time and keeps the deepest iteration that finished in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
    /// Search root moves on the rayon pool, each with its own board copy.
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            time_limit_ms: None,
            parallel_root: false,
        }
    }
}

/// Chosen column and its score. `column` is `None` at leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i32,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        SearchResult {
            column: None,
            score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub completed_depth: u32,
    pub elapsed_ms: u64,
    pub timed_out: bool,
}

/// Outcome of a top-level search on a live board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub column: usize,
    pub score: i32,
    pub stats: SearchStats,
}

/// One depth-first walk. Owns the counters so root branches can run on
/// separate threads without sharing anything mutable.
struct Walk<'h, H: ?Sized> {
    heuristic: &'h H,
    deadline: Option<Instant>,
    nodes: u64,
    cutoffs: u64,
    timed_out: bool,
}

impl<'h, H: Heuristic + ?Sized> Walk<'h, H> {
    fn new(heuristic: &'h H, deadline: Option<Instant>) -> Self {
        Walk {
            heuristic,
            deadline,
            nodes: 0,
            cutoffs: 0,
            timed_out: false,
        }
    }

    /// Checks the clock on every node, the first one included.
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes += 1;
        if self.out_of_time() {
            return SearchResult::leaf(0);
        }
        if depth == 0 || board.is_terminal() {
            return SearchResult::leaf(self.heuristic.evaluate(board));
        }

        let to_move = if maximizing { Player::Ai } else { Player::Human };
        let mut best = SearchResult::leaf(if maximizing { NEG_INFINITY } else { POS_INFINITY });

        for candidate in ranked_candidates(board, self.heuristic, to_move) {
            let child = board.with_move(candidate.column, to_move, |b| {
                self.search(b, depth - 1, alpha, beta, !maximizing)
            });

            let improves = if maximizing {
                child.score > best.score
            } else {
                child.score < best.score
            };
            if improves {
                best = SearchResult {
                    column: Some(candidate.column),
                    score: child.score,
                };
            }

            if maximizing {
                alpha = alpha.max(best.score);
            } else {
                beta = beta.min(best.score);
            }
            if alpha >= beta {
                self.cutoffs += 1;
                break;
            }
            if self.timed_out {
                break;
            }
        }

        best
    }
}

/// Counters and result of one root search at a fixed depth.
struct Iteration {
    result: SearchResult,
    nodes: u64,
    cutoffs: u64,
    timed_out: bool,
}

/// Fixed-depth minimax with alpha-beta pruning. The AI is always the
/// maximizing side.
pub struct Searcher<H = ThreatHeuristic> {
    heuristic: H,
    config: SearchConfig,
    stats: SearchStats,
}

impl Default for Searcher<ThreatHeuristic> {
    fn default() -> Self {
        Searcher::new(ThreatHeuristic, SearchConfig::default())
    }
}

impl<H: Heuristic> Searcher<H> {
    pub fn new(heuristic: H, config: SearchConfig) -> Self {
        Searcher {
            heuristic,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Statistics of the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Raw recursive search from an arbitrary node. The board is restored
    /// before this returns.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        let started = Instant::now();
        let mut walk = Walk::new(&self.heuristic, None);
        let result = walk.search(board, depth, alpha, beta, maximizing);
        self.stats = SearchStats {
            nodes: walk.nodes,
            cutoffs: walk.cutoffs,
            completed_depth: depth,
            elapsed_ms: started.elapsed().as_millis() as u64,
            timed_out: false,
        };
        result
    }

    /// Column the AI should play, searching `depth` plies. Depth 0 is treated
    /// as 1. Returns `None` if the game is already over.
    pub fn best_move(&mut self, board: &Board, depth: u32) -> Option<usize> {
        self.run(board, depth).map(|report| report.column)
    }

    /// Search at the configured depth and report the column, score and
    /// statistics.
    pub fn analyze(&mut self, board: &Board) -> Option<SearchReport> {
        self.run(board, self.config.depth)
    }

    fn run(&mut self, board: &Board, depth: u32) -> Option<SearchReport> {
        if board.is_terminal() {
            return None;
        }
        let depth = depth.max(1);
        let started = Instant::now();
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| started + Duration::from_millis(ms));

        // Without a deadline there is nothing to fall back on, so go straight
        // to the requested depth.
        let first_depth = if deadline.is_some() { 1 } else { depth };

        let mut stats = SearchStats::default();
        let mut best = None;
        for d in first_depth..=depth {
            let iteration = if self.config.parallel_root {
                self.root_parallel(board, d, deadline)
            } else {
                self.root_sequential(board, d, deadline)
            };
            stats.nodes += iteration.nodes;
            stats.cutoffs += iteration.cutoffs;
            if iteration.timed_out {
                stats.timed_out = true;
                debug!("deadline hit during depth {d}, keeping depth {}", stats.completed_depth);
                break;
            }
            stats.completed_depth = d;
            best = Some(iteration.result);
        }
        stats.elapsed_ms = started.elapsed().as_millis() as u64;

        let result = match best {
            Some(result) => result,
            None => self.fallback(board),
        };
        let column = result.column?;
        debug!(
            "depth {} in {} ms: column {} score {} ({} nodes, {} cutoffs)",
            stats.completed_depth,
            stats.elapsed_ms,
            column,
            result.score,
            stats.nodes,
            stats.cutoffs
        );

        self.stats = stats.clone();
        Some(SearchReport {
            column,
            score: result.score,
            stats,
        })
    }

    fn root_sequential(&self, board: &Board, depth: u32, deadline: Option<Instant>) -> Iteration {
        let mut board = *board;
        let mut walk = Walk::new(&self.heuristic, deadline);
        let result = walk.search(&mut board, depth, NEG_INFINITY, POS_INFINITY, true);
        Iteration {
            result,
            nodes: walk.nodes,
            cutoffs: walk.cutoffs,
            timed_out: walk.timed_out,
        }
    }

    /// Every root move gets a full window so no bound crosses threads. Picking
    /// the first best in ranked order matches what the sequential search
    /// returns.
    fn root_parallel(&self, board: &Board, depth: u32, deadline: Option<Instant>) -> Iteration {
        let heuristic = &self.heuristic;
        let mut root = *board;
        let candidates = ranked_candidates(&mut root, heuristic, Player::Ai);

        let children: Vec<(usize, i32, Walk<'_, H>)> = candidates
            .par_iter()
            .map(|candidate| {
                let mut child = *board;
                let mut walk = Walk::new(heuristic, deadline);
                let result = child.with_move(candidate.column, Player::Ai, |b| {
                    walk.search(b, depth - 1, NEG_INFINITY, POS_INFINITY, false)
                });
                trace!("root column {} scored {}", candidate.column, result.score);
                (candidate.column, result.score, walk)
            })
            .collect();

        let mut iteration = Iteration {
            result: SearchResult::leaf(NEG_INFINITY),
            nodes: 1,
            cutoffs: 0,
            timed_out: false,
        };
        for (column, score, walk) in children {
            iteration.nodes += walk.nodes;
            iteration.cutoffs += walk.cutoffs;
            iteration.timed_out |= walk.timed_out;
            if score > iteration.result.score {
                iteration.result = SearchResult {
                    column: Some(column),
                    score,
                };
            }
        }
        iteration
    }

    /// Best one-ply move, used when not even the first iteration finished.
    fn fallback(&self, board: &Board) -> SearchResult {
        let mut board = *board;
        ranked_candidates(&mut board, &self.heuristic, Player::Ai)
            .first()
            .map_or(SearchResult::leaf(NEG_INFINITY), |c| SearchResult {
                column: Some(c.column),
                score: c.value,
            })
    }
}

/// Column the AI should play on `board`, searching `depth` plies with the
/// default heuristic. `None` if the game is already over.
pub fn best_move(board: &Board, depth: u32) -> Option<usize> {
    Searcher::default().best_move(board, depth)
}
