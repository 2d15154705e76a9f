use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::PhoneType;
use crate::ui::components::phone_input::{render_phone_input, PhoneInputState};
use crate::ui::plugins::{HintContext, Icon, UiPlugins};

pub enum PhoneDemoAction {
    Back,
}

/// Standalone playground for the phone input. Never talks to the backend.
pub struct PhoneDemoState {
    input: PhoneInputState,
    checked: Vec<(String, String, bool)>, // (number, type label, valid)
}

impl PhoneDemoState {
    pub fn new(phone_types: Vec<PhoneType>) -> Self {
        Self {
            input: PhoneInputState::new(phone_types),
            checked: Vec::new(),
        }
    }

    pub fn checked(&self) -> &[(String, String, bool)] {
        &self.checked
    }

    fn check_current(&mut self) {
        if self.input.number.trim().is_empty() {
            return;
        }
        let entry = (
            self.input.number.trim().to_string(),
            self.input.type_label().to_string(),
            self.input.is_valid(),
        );
        self.checked.insert(0, entry);
        self.input.number.clear();
    }
}

pub fn render_phone_demo<B: Backend>(frame: &mut Frame<B>, state: &PhoneDemoState, plugins: &UiPlugins, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(5), Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(area);

    let title = format!("{} Phone input demo", plugins.icons.glyph(Icon::Phone));
    render_phone_input(frame, &state.input, chunks[0], &title);

    let items: Vec<ListItem> = state
        .checked
        .iter()
        .map(|(number, label, valid)| {
            let (verdict, color) = if *valid { ("ok", Color::Green) } else { ("invalid", Color::Red) };
            ListItem::new(format!("{:<8} {:<20} {}", label, number, verdict)).style(Style::default().fg(color))
        })
        .collect();
    let history = List::new(items).block(Block::default().title("Checked").borders(Borders::ALL));
    frame.render_widget(history, chunks[1]);

    let help = Paragraph::new(plugins.tooltips.hint(HintContext::PhoneDemo))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

pub fn handle_input(state: &mut PhoneDemoState, key: KeyCode) -> Option<PhoneDemoAction> {
    match key {
        KeyCode::Esc => return Some(PhoneDemoAction::Back),
        KeyCode::Enter => state.check_current(),
        _ => state.input.handle_input(key),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_records_a_verdict_and_clears_the_input() {
        let mut state = PhoneDemoState::new(PhoneType::catalog());
        for c in "555 0100".chars() {
            handle_input(&mut state, KeyCode::Char(c));
        }
        handle_input(&mut state, KeyCode::Enter);
        for c in "12".chars() {
            handle_input(&mut state, KeyCode::Char(c));
        }
        handle_input(&mut state, KeyCode::Tab);
        handle_input(&mut state, KeyCode::Enter);

        assert_eq!(
            state.checked(),
            [
                ("12".to_string(), "Home".to_string(), false),
                ("555 0100".to_string(), "Mobile".to_string(), true),
            ]
        );
        assert!(state.input.number.is_empty());
    }

    #[test]
    fn empty_input_is_not_recorded() {
        let mut state = PhoneDemoState::new(PhoneType::catalog());
        handle_input(&mut state, KeyCode::Enter);
        assert!(state.checked().is_empty());
        assert!(matches!(handle_input(&mut state, KeyCode::Esc), Some(PhoneDemoAction::Back)));
    }
}
