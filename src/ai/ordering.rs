use serde::Serialize;

use super::heuristic::Heuristic;
use crate::game::{Board, Player};

/// A legal column and the heuristic value of the board one ply after playing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub column: usize,
    pub value: i32,
}

/// Score every open column one ply ahead for `to_move`, most promising first.
///
/// Descending for the AI, ascending for the human. The sort is stable, so ties
/// keep left-to-right column order.
pub fn ranked_candidates<H: Heuristic + ?Sized>(
    board: &mut Board,
    heuristic: &H,
    to_move: Player,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = board
        .open_columns()
        .into_iter()
        .map(|column| Candidate {
            column,
            value: board.with_move(column, to_move, |b| heuristic.evaluate(b)),
        })
        .collect();

    if to_move.is_maximizer() {
        candidates.sort_by(|a, b| b.value.cmp(&a.value));
    } else {
        candidates.sort_by_key(|c| c.value);
    }
    candidates
}
