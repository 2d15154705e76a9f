use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub enum PromptAction {
    Navigate(String),
    Close,
}

/// The `:` prompt used to type a path to navigate to.
pub struct AddressPrompt {
    input: String,
}

impl AddressPrompt {
    pub fn new(current_path: &str) -> Self {
        Self {
            input: current_path.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_input(&mut self, key: KeyCode) -> Option<PromptAction> {
        match key {
            KeyCode::Esc => Some(PromptAction::Close),
            KeyCode::Enter => Some(PromptAction::Navigate(self.input.trim().to_string())),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if !c.is_whitespace() => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}

pub fn render_address_prompt<B: Backend>(frame: &mut Frame<B>, prompt: &AddressPrompt, area: Rect) {
    let prompt_area = Rect::new(area.x, area.y + area.height.saturating_sub(3), area.width, 3.min(area.height));

    let input = Paragraph::new(format!("{}|", prompt.input()))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("Go to path (Enter/Esc)").borders(Borders::ALL));

    frame.render_widget(Clear, prompt_area);
    frame.render_widget(input, prompt_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_a_path_and_confirming() {
        let mut prompt = AddressPrompt::new("/");
        for c in "edit-client/42".chars() {
            assert!(prompt.handle_input(KeyCode::Char(c)).is_none());
        }

        match prompt.handle_input(KeyCode::Enter) {
            Some(PromptAction::Navigate(path)) => assert_eq!(path, "/edit-client/42"),
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn escape_closes_without_navigating() {
        let mut prompt = AddressPrompt::new("/add-client");
        prompt.handle_input(KeyCode::Backspace);
        assert_eq!(prompt.input(), "/add-clien");
        assert!(matches!(prompt.handle_input(KeyCode::Esc), Some(PromptAction::Close)));
    }
}
