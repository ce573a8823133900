use crate::game::{GameState, Player};

use super::minimax::{SearchConfig, SearchReport, Searcher};

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column given the current game state, or `None` if the game
    /// is over.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Plays the AI side with a fixed-depth alpha-beta search.
pub struct MinimaxAgent {
    searcher: Searcher,
    last_report: Option<SearchReport>,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAgent {
            searcher: Searcher::new(Default::default(), config),
            last_report: None,
        }
    }

    pub fn with_depth(depth: u32) -> Self {
        Self::new(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    pub fn depth(&self) -> u32 {
        self.searcher.config().depth
    }

    /// Report from the last move this agent chose.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        debug_assert_eq!(
            state.current_player(),
            Player::Ai,
            "the minimax agent only plays the maximizing side"
        );
        self.last_report = self.searcher.analyze(state.board());
        self.last_report.as_ref().map(|report| report.column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::GameOutcome;

    fn play_out(agent: &mut MinimaxAgent, random: &mut RandomAgent, first: Player) -> GameState {
        let mut state = GameState::new(first);
        while !state.is_terminal() {
            let action = match state.current_player() {
                Player::Ai => agent.select_action(&state),
                Player::Human => random.select_action(&state),
            };
            state.apply_move_mut(action.unwrap()).unwrap();
        }
        state
    }

    #[test]
    fn selects_legal_action() {
        let mut agent = MinimaxAgent::with_depth(4);
        let state = GameState::new(Player::Ai);
        let legal = state.legal_actions();
        let action = agent.select_action(&state).unwrap();
        assert!(legal.contains(&action), "Action {action} is not legal");
        assert_eq!(agent.last_report().unwrap().column, action);
    }

    #[test]
    fn no_action_when_game_is_over() {
        let mut state = GameState::new(Player::Ai);
        for col in [0, 1, 0, 1, 0, 1, 0] {
            state.apply_move_mut(col).unwrap();
        }
        let mut agent = MinimaxAgent::with_depth(4);
        assert_eq!(agent.select_action(&state), None);
    }

    #[test]
    fn full_game_completes() {
        let mut agent = MinimaxAgent::with_depth(3);
        let mut random = RandomAgent::with_seed(11);
        let state = play_out(&mut agent, &mut random, Player::Human);
        assert!(state.outcome().is_some());
    }

    #[test]
    fn beats_random_agent() {
        let games_per_side = 10;
        let mut wins = 0;

        for seed in 0..games_per_side {
            for first in [Player::Ai, Player::Human] {
                let mut agent = MinimaxAgent::with_depth(4);
                let mut random = RandomAgent::with_seed(seed);
                let state = play_out(&mut agent, &mut random, first);
                if state.outcome() == Some(GameOutcome::Winner(Player::Ai)) {
                    wins += 1;
                }
            }
        }

        let total = games_per_side * 2;
        assert!(
            wins * 10 >= total * 8,
            "Minimax should beat random at least 80% of the time, got {wins}/{total}"
        );
    }

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::with_depth(7);
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 7);
    }
}
