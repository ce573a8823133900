use serde::{Deserialize, Serialize};

use super::board::Cell;

/// The two sides. The AI is always the maximizing side of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Ai,
    Human,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Ai => Player::Human,
            Player::Human => Player::Ai,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Ai => Cell::Ai,
            Player::Human => Cell::Human,
        }
    }

    pub fn is_maximizer(self) -> bool {
        self == Player::Ai
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Ai => "AI",
            Player::Human => "Player",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Ai.other(), Player::Human);
        assert_eq!(Player::Human.other(), Player::Ai);
    }

    #[test]
    fn test_only_ai_maximizes() {
        assert!(Player::Ai.is_maximizer());
        assert!(!Player::Human.is_maximizer());
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Ai.name(), "AI");
        assert_eq!(Player::Human.name(), "Player");
    }
}
