use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::Backend, Terminal};

use crate::accounts::{AccountStore, InMemoryAccountStore, LoginOutcome};
use crate::ai::{Agent, MinimaxAgent};
use crate::config::AppConfig;
use crate::game::{GameOutcome, GameState, MoveError, Player, CENTER_COL, COLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Playing,
    ReplayPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct App<S: AccountStore = InMemoryAccountStore> {
    config: AppConfig,
    accounts: S,
    agent: Box<dyn Agent>,
    rng: StdRng,
    screen: Screen,
    username_input: String,
    password_input: String,
    focus: LoginField,
    user: Option<String>,
    game_state: GameState,
    selected_column: usize,
    ai_pending: bool,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App::with_store(config, InMemoryAccountStore::new(), StdRng::from_os_rng())
    }
}

impl<S: AccountStore> App<S> {
    pub fn with_store(config: AppConfig, accounts: S, rng: StdRng) -> Self {
        let agent = Box::new(MinimaxAgent::new(config.search.clone()));
        App {
            config,
            accounts,
            agent,
            rng,
            screen: Screen::Login,
            username_input: String::new(),
            password_input: String::new(),
            focus: LoginField::Username,
            user: None,
            game_state: GameState::new(Player::Human),
            selected_column: CENTER_COL,
            ai_pending: false,
            should_quit: false,
            message: None,
        }
    }

    /// Replace the opponent. It must play the `Player::Ai` side.
    pub fn with_agent(mut self, agent: Box<dyn Agent>) -> Self {
        self.agent = agent;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn accounts(&self) -> &S {
        &self.accounts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Draw "thinking" first, then block on the search.
            if self.ai_pending {
                self.play_ai_turn();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Playing => self.handle_game_key(key),
            Screen::ReplayPrompt => self.handle_replay_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let field = match self.focus {
            LoginField::Username => &mut self.username_input,
            LoginField::Password => &mut self.password_input,
        };

        match key.code {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Enter => match self.focus {
                LoginField::Username => self.focus = LoginField::Password,
                LoginField::Password => self.submit_login(),
            },
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let username = self.username_input.trim().to_string();
        match self
            .accounts
            .login_or_register(&username, &self.password_input)
        {
            Ok(outcome) => {
                let greeting = match outcome {
                    LoginOutcome::LoggedIn => format!("Welcome back, {username}"),
                    LoginOutcome::Registered => format!("Account created for {username}"),
                };
                self.user = Some(username);
                self.password_input.clear();
                self.start_game();
                let opener = self.message.take().unwrap_or_default();
                self.message = Some(format!("{greeting}. {opener}"));
            }
            Err(e) => {
                self.password_input.clear();
                self.focus = LoginField::Username;
                self.message = Some(e.to_string());
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            _ => {}
        }
    }

    fn handle_replay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.start_game(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        let first = self.config.game.first_turn.resolve(&mut self.rng);
        info!("new game, {} moves first", first.name());
        self.game_state = GameState::new(first);
        self.selected_column = CENTER_COL;
        self.screen = Screen::Playing;
        self.ai_pending = first == Player::Ai;
        self.message = Some(match first {
            Player::Ai => "The AI moves first.".to_string(),
            Player::Human => "You move first.".to_string(),
        });
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        if self.ai_pending || self.game_state.current_player() != Player::Human {
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(()) => {
                if self.game_state.is_terminal() {
                    self.finish_game();
                } else {
                    self.ai_pending = true;
                }
            }
            Err(MoveError::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    pub fn play_ai_turn(&mut self) {
        self.ai_pending = false;
        let Some(column) = self.agent.select_action(&self.game_state) else {
            if self.game_state.is_terminal() {
                self.finish_game();
            } else {
                warn!("{} returned no move on a live board", self.agent.name());
                self.abandon_game();
            }
            return;
        };

        if let Err(e) = self.game_state.apply_move_mut(column) {
            warn!("{} chose an unplayable column {column}: {e:?}", self.agent.name());
            self.abandon_game();
            return;
        }
        self.message = Some(format!("The AI played column {}.", column + 1));
        if self.game_state.is_terminal() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let Some(outcome) = self.game_state.outcome() else {
            return;
        };

        if let Some(user) = &self.user {
            if let Err(e) = self.accounts.record(user, outcome) {
                warn!("could not record result for {user}: {e}");
            }
        }

        self.message = Some(match outcome {
            GameOutcome::Winner(Player::Ai) => "The AI won.".to_string(),
            GameOutcome::Winner(Player::Human) => "You won!".to_string(),
            GameOutcome::Draw => "Tie.".to_string(),
        });
        self.screen = Screen::ReplayPrompt;
    }

    /// End a game the AI cannot continue. Nothing is tallied.
    fn abandon_game(&mut self) {
        self.message = Some("The AI could not move. Game abandoned.".to_string());
        self.screen = Screen::ReplayPrompt;
    }

    fn status_line(&self) -> String {
        let record = self
            .user
            .as_deref()
            .and_then(|user| self.accounts.get(user))
            .map_or_else(String::new, |account| account.to_string());
        format!("{record}  |  AI depth {}", self.config.search.depth)
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::Login => super::login_view::render(
                frame,
                &self.username_input,
                &self.password_input,
                self.focus,
                &self.message,
            ),
            Screen::Playing | Screen::ReplayPrompt => super::game_view::render(
                frame,
                &self.game_state,
                self.selected_column,
                &self.message,
                &self.status_line(),
                self.screen == Screen::ReplayPrompt,
            ),
        }
    }
}
