use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::LoginField;

pub fn render(
    frame: &mut Frame,
    username: &str,
    password: &str,
    focus: LoginField,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(3), // Message
            Constraint::Min(0),
        ])
        .split(frame.area());

    let title = Paragraph::new("Log in, or pick a new name to create an account")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(title, chunks[0]);

    let masked = "*".repeat(password.chars().count());
    render_field(frame, "Username", username, focus == LoginField::Username, chunks[1]);
    render_field(frame, "Password", &masked, focus == LoginField::Password, chunks[2]);

    let text = message.as_deref().unwrap_or("Tab: switch field  |  Enter: continue  |  Esc: quit");
    let msg = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(msg, chunks[3]);
}

fn render_field(frame: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    let line = Line::from(vec![Span::raw(value.to_string()), Span::styled(cursor, style)]);
    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(style),
    );
    frame.render_widget(field, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn password_is_masked() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|f| render(f, "ana", "secret", LoginField::Password, &None))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("ana"));
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
    }
}
