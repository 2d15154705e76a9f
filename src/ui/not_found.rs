use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::components::centered_rect;
use crate::ui::plugins::{HintContext, UiPlugins};

#[derive(Debug, PartialEq, Eq)]
pub enum NotFoundAction {
    Home,
    Back,
    Quit,
}

pub struct NotFoundState {
    path: String,
    reason: String,
}

impl NotFoundState {
    pub fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

pub fn render_not_found<B: Backend>(frame: &mut Frame<B>, state: &NotFoundState, plugins: &UiPlugins, area: Rect) {
    let body = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(format!("Nothing lives at {}", state.path())),
        Spans::from(""),
        Spans::from(state.reason()),
        Spans::from(""),
        Spans::from(plugins.tooltips.hint(HintContext::NotFound)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White))
    .block(Block::default().title("Not found").borders(Borders::ALL));

    frame.render_widget(body, centered_rect(70, 40, area));
}

pub fn handle_input(key: KeyCode) -> Option<NotFoundAction> {
    match key {
        KeyCode::Enter | KeyCode::Char('h') => Some(NotFoundAction::Home),
        KeyCode::Char('b') | KeyCode::Esc => Some(NotFoundAction::Back),
        KeyCode::Char('q') => Some(NotFoundAction::Quit),
        _ => None,
    }
}
