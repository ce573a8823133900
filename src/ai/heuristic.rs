use crate::game::{Board, Cell, Player, CENTER_COL, COLS, ROWS};

/// Score reported when the AI has four in a row.
pub const WIN_SCORE: i32 = i32::MAX - 1;
/// Score reported when the human has four in a row.
pub const LOSS_SCORE: i32 = i32::MIN + 1;

const CENTER_OWN: i32 = 20;
const CENTER_OPPONENT: i32 = 16;
const THREAT: i32 = 70;
const DROP_DISTANCE_PENALTY: i32 = 10;
const TEMPO_BONUS: i32 = 40;

/// Trait for evaluating a board position from the AI's (maximizer's) side.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
    DiagonalDown,
    DiagonalUp,
}

/// Start cells and step for every 4-cell window, per orientation.
const ORIENTATIONS: [(Orientation, isize, isize); 4] = [
    (Orientation::Horizontal, 0, 1),
    (Orientation::Vertical, 1, 0),
    (Orientation::DiagonalDown, 1, 1),
    (Orientation::DiagonalUp, -1, 1),
];

/// Every 4-cell window on the board (69 in total), tagged with its orientation.
///
/// Vertical windows are visited column by column, all others row by row. The
/// order decides which sentinel wins on a board holding fours for both sides.
fn windows() -> impl Iterator<Item = (Orientation, [(usize, usize); 4])> {
    ORIENTATIONS.into_iter().flat_map(|(orientation, dr, dc)| {
        (0..ROWS * COLS)
            .map(move |i| match orientation {
                Orientation::Vertical => (i % ROWS, i / ROWS),
                _ => (i / COLS, i % COLS),
            })
            .filter_map(move |(row, col)| {
                let end_row = row as isize + 3 * dr;
                let end_col = col as isize + 3 * dc;
                let rows = 0..ROWS as isize;
                if !rows.contains(&end_row) || !(0..COLS as isize).contains(&end_col) {
                    return None;
                }
                let cells = std::array::from_fn(|i| {
                    (
                        (row as isize + dr * i as isize) as usize,
                        (col as isize + dc * i as isize) as usize,
                    )
                });
                Some((orientation, cells))
            })
    })
}

/// Line-threat heuristic with a center-column bias and an odd/even tempo rule.
///
/// Every window holding four of one side short-circuits to [`WIN_SCORE`] or
/// [`LOSS_SCORE`]. A window with three of one side and one empty cell is a
/// threat: worth 70, minus 10 for each row the empty cell sits above the
/// current landing row of its column, plus 40 when its row index has the
/// parity the owner wants (odd if it moved first, even otherwise). Vertical
/// threats are always a flat 70.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatHeuristic;

impl ThreatHeuristic {
    fn center_bias(board: &Board) -> i32 {
        (0..ROWS)
            .map(|row| match board.get(row, CENTER_COL) {
                Cell::Ai => CENTER_OWN,
                Cell::Human => -CENTER_OPPONENT,
                Cell::Empty => 0,
            })
            .sum()
    }

    /// Row index 0 is the top, so "odd" here counts from the top edge.
    fn favors_parity(player: Player, first_turn: Player, row: usize) -> bool {
        (row % 2 == 1) == (player == first_turn)
    }

    fn threat_value(
        board: &Board,
        player: Player,
        orientation: Orientation,
        (row, col): (usize, usize),
    ) -> i32 {
        if orientation == Orientation::Vertical {
            return THREAT;
        }

        let distance = board
            .drop_row(col)
            .map_or(0, |landing| landing.saturating_sub(row)) as i32;
        let mut value = THREAT - DROP_DISTANCE_PENALTY * distance;
        if Self::favors_parity(player, board.first_turn(), row) {
            value += TEMPO_BONUS;
        }
        value
    }
}

impl Heuristic for ThreatHeuristic {
    fn evaluate(&self, board: &Board) -> i32 {
        let mut score = Self::center_bias(board);

        for (orientation, cells) in windows() {
            let mut ai = 0;
            let mut human = 0;
            let mut empty = None;
            let mut empty_count = 0;
            for (row, col) in cells {
                match board.get(row, col) {
                    Cell::Ai => ai += 1,
                    Cell::Human => human += 1,
                    Cell::Empty => {
                        empty_count += 1;
                        empty = Some((row, col));
                    }
                }
            }

            if ai == 4 {
                return WIN_SCORE;
            }
            if human == 4 {
                return LOSS_SCORE;
            }

            if let (1, Some(cell)) = (empty_count, empty) {
                if ai == 3 {
                    score += Self::threat_value(board, Player::Ai, orientation, cell);
                } else if human == 3 {
                    score -= Self::threat_value(board, Player::Human, orientation, cell);
                }
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(first_turn: Player, text: &str) -> Board {
        Board::parse(first_turn, text).unwrap()
    }

    #[test]
    fn there_are_69_windows() {
        assert_eq!(windows().count(), 69);
        let vertical = windows()
            .filter(|(o, _)| *o == Orientation::Vertical)
            .count();
        assert_eq!(vertical, 21);
    }

    #[test]
    fn vertical_windows_scan_column_by_column() {
        let starts: Vec<(usize, usize)> = windows()
            .filter(|(o, _)| *o == Orientation::Vertical)
            .map(|(_, cells)| cells[0])
            .take(4)
            .collect();
        assert_eq!(starts, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);

        // Both sides hold a vertical four; the leftmost column is found first
        let both = board(
            Player::Human,
            ".O.....
             .O.....
             XO.....
             XO.....
             XX.....
             XX.....",
        );
        assert_eq!(ThreatHeuristic.evaluate(&both), WIN_SCORE);
    }

    #[test]
    fn empty_board_is_zero() {
        let h = ThreatHeuristic;
        assert_eq!(h.evaluate(&Board::new(Player::Ai)), 0);
        assert_eq!(h.evaluate(&Board::new(Player::Human)), 0);
    }

    #[test]
    fn center_bias_is_asymmetric() {
        let h = ThreatHeuristic;
        let mut ai_center = Board::new(Player::Human);
        ai_center.drop_piece(3, Player::Ai).unwrap();
        assert_eq!(h.evaluate(&ai_center), 20);

        let mut human_center = Board::new(Player::Human);
        human_center.drop_piece(3, Player::Human).unwrap();
        assert_eq!(h.evaluate(&human_center), -16);

        let mut edge = Board::new(Player::Human);
        edge.drop_piece(0, Player::Ai).unwrap();
        assert_eq!(h.evaluate(&edge), 0);
    }

    #[test]
    fn four_in_a_row_returns_sentinels() {
        let h = ThreatHeuristic;
        let ai_wins = board(
            Player::Ai,
            ".......
             .......
             .......
             .......
             OOO....
             XXXX...",
        );
        assert_eq!(h.evaluate(&ai_wins), WIN_SCORE);

        let human_wins = board(
            Player::Ai,
            ".......
             .......
             ......O
             .....OX
             ....OXX
             X..OXXO",
        );
        assert_eq!(h.evaluate(&human_wins), LOSS_SCORE);
    }

    #[test]
    fn open_three_on_landing_row() {
        let h = ThreatHeuristic;
        // Row 5 is odd: no tempo for the AI when the human opened.
        let text = ".......
                    .......
                    .......
                    .......
                    .......
                    XXX....";
        assert_eq!(h.evaluate(&board(Player::Human, text)), 70);
        // Same position with the AI opening earns the tempo bonus.
        assert_eq!(h.evaluate(&board(Player::Ai, text)), 110);
    }

    #[test]
    fn raised_threat_loses_ten_per_row() {
        let h = ThreatHeuristic;
        // AI three on row 4 whose gap at (4, 3) is one row above the landing
        // row. Human three on row 5 is immediately playable at (5, 3).
        let position = board(
            Player::Human,
            ".......
             .......
             .......
             .......
             XXX....
             OOO....",
        );
        // AI: 70 - 10 + 40 (row 4 even, AI moved second) = 100
        // Human: 70 + 40 (row 5 odd, human moved first) = 110
        assert_eq!(h.evaluate(&position), 100 - 110);
    }

    #[test]
    fn vertical_threat_is_flat() {
        let h = ThreatHeuristic;
        let text = ".......
                    .......
                    .......
                    X......
                    X......
                    X......";
        assert_eq!(h.evaluate(&board(Player::Ai, text)), 70);
        assert_eq!(h.evaluate(&board(Player::Human, text)), 70);
    }

    #[test]
    fn blocked_three_is_not_a_threat() {
        let h = ThreatHeuristic;
        let position = board(
            Player::Ai,
            ".......
             .......
             .......
             .......
             .......
             XXXO...",
        );
        // Only the center penalty for the human piece on column 3.
        assert_eq!(h.evaluate(&position), -16);
    }

    #[test]
    fn evaluation_is_pure() {
        let h = ThreatHeuristic;
        let position = board(
            Player::Human,
            ".......
             .......
             ...X...
             ..OO...
             .XXO...
             OXOXX..",
        );
        let before = position;
        assert_eq!(h.evaluate(&position), h.evaluate(&position));
        assert_eq!(position, before);
    }
}
