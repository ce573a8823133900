//! User accounts and win/loss/tie tallies.
//!
//! The game only needs the [`AccountStore`] contract. [`InMemoryAccountStore`]
//! lives for the process; nothing is written to disk.

use std::collections::HashMap;
use std::fmt;

use log::info;

use crate::error::AccountError;
use crate::game::{GameOutcome, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    password: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Account {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Account {
            username: username.into(),
            password: password.into(),
            wins: 0,
            losses: 0,
            ties: 0,
        }
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }

    /// Tally a finished game from the human's side of the board.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Human) => self.wins += 1,
            GameOutcome::Winner(Player::Ai) => self.losses += 1,
            GameOutcome::Draw => self.ties += 1,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} wins, {} losses, {} ties",
            self.username, self.wins, self.losses, self.ties
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Registered,
    LoggedIn,
}

/// Where accounts and their tallies are kept.
pub trait AccountStore {
    /// Log in to an existing account, or create it if the name is unknown.
    fn login_or_register(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, AccountError>;

    fn get(&self, username: &str) -> Option<&Account>;

    fn record(&mut self, username: &str, outcome: GameOutcome) -> Result<(), AccountError>;
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: HashMap<String, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn login_or_register(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername);
        }

        match self.accounts.get(username) {
            Some(account) if account.check_password(password) => {
                info!("{username} logged in");
                Ok(LoginOutcome::LoggedIn)
            }
            Some(_) => Err(AccountError::InvalidCredentials),
            None => {
                let account = Account::new(username, password);
                self.accounts.insert(username.to_string(), account);
                info!("created account {username}");
                Ok(LoginOutcome::Registered)
            }
        }
    }

    fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    fn record(&mut self, username: &str, outcome: GameOutcome) -> Result<(), AccountError> {
        let account = self
            .accounts
            .get_mut(username)
            .ok_or_else(|| AccountError::UnknownUser(username.to_string()))?;
        account.record(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_then_logs_in() {
        let mut store = InMemoryAccountStore::new();
        assert_eq!(store.login_or_register("ana", "pw"), Ok(LoginOutcome::Registered));
        assert_eq!(store.login_or_register("ana", "pw"), Ok(LoginOutcome::LoggedIn));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let mut store = InMemoryAccountStore::new();
        store.login_or_register("ana", "pw").unwrap();
        assert_eq!(
            store.login_or_register("ana", "nope"),
            Err(AccountError::InvalidCredentials)
        );
    }

    #[test]
    fn empty_username_is_rejected() {
        let mut store = InMemoryAccountStore::new();
        assert_eq!(store.login_or_register("  ", "pw"), Err(AccountError::EmptyUsername));
        assert!(store.is_empty());
    }

    #[test]
    fn outcomes_are_tallied_from_the_human_side() {
        let mut store = InMemoryAccountStore::new();
        store.login_or_register("ana", "pw").unwrap();
        store.record("ana", GameOutcome::Winner(Player::Human)).unwrap();
        store.record("ana", GameOutcome::Winner(Player::Ai)).unwrap();
        store.record("ana", GameOutcome::Winner(Player::Ai)).unwrap();
        store.record("ana", GameOutcome::Draw).unwrap();

        let account = store.get("ana").unwrap();
        assert_eq!((account.wins, account.losses, account.ties), (1, 2, 1));
        assert_eq!(account.games_played(), 4);
        assert_eq!(account.to_string(), "ana: 1 wins, 2 losses, 1 ties");
    }

    #[test]
    fn recording_for_unknown_user_fails() {
        let mut store = InMemoryAccountStore::new();
        assert_eq!(
            store.record("bo", GameOutcome::Draw),
            Err(AccountError::UnknownUser("bo".into()))
        );
    }
}
