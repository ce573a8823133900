//! Terminal UI: login screen, game view against the AI, and the replay prompt.

mod app;
mod game_view;
mod login_view;

pub use app::{App, LoginField, Screen};
