use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{Phone, PhoneType};
use crate::validation::is_plausible_phone;

/// Editable phone number plus its type.
pub struct PhoneInputState {
    pub number: String,
    pub phone_type_id: Option<i32>,
    phone_types: Vec<PhoneType>,
}

impl PhoneInputState {
    pub fn new(phone_types: Vec<PhoneType>) -> Self {
        let phone_type_id = phone_types.first().map(|t| t.phone_type_id);
        Self {
            number: String::new(),
            phone_type_id,
            phone_types,
        }
    }

    pub fn from_phone(phone: &Phone, phone_types: Vec<PhoneType>) -> Self {
        Self {
            number: phone.phone_number.clone(),
            phone_type_id: phone.phone_type_id,
            phone_types,
        }
    }

    /// Move to the next type in the catalog, wrapping around.
    pub fn cycle_type(&mut self) {
        if self.phone_types.is_empty() {
            return;
        }

        let position = self
            .phone_type_id
            .and_then(|id| self.phone_types.iter().position(|t| t.phone_type_id == id));
        let next = match position {
            Some(i) => (i + 1) % self.phone_types.len(),
            None => 0,
        };
        self.phone_type_id = Some(self.phone_types[next].phone_type_id);
    }

    pub fn type_label(&self) -> &str {
        PhoneType::label_for(&self.phone_types, self.phone_type_id)
    }

    pub fn is_valid(&self) -> bool {
        is_plausible_phone(&self.number)
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || "+-.() ".contains(c) => {
                self.number.push(c);
            }
            KeyCode::Backspace => {
                self.number.pop();
            }
            KeyCode::Tab => self.cycle_type(),
            _ => {}
        }
    }

    /// Write the edited values into `phone`, keeping its ids.
    pub fn apply_to(&self, phone: &mut Phone) {
        phone.phone_number = self.number.trim().to_string();
        phone.phone_type_id = self.phone_type_id;
    }
}

pub fn render_phone_input<B: Backend>(frame: &mut Frame<B>, state: &PhoneInputState, area: Rect, title: &str) {
    let (status, status_color) = if state.number.is_empty() {
        ("enter a number", Color::Gray)
    } else if state.is_valid() {
        ("looks valid", Color::Green)
    } else {
        ("not a phone number", Color::Red)
    };

    let lines = vec![
        Spans::from(vec![
            Span::styled("Number: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}|", state.number),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Spans::from(vec![
            Span::styled("Type:   ", Style::default().fg(Color::Yellow)),
            Span::raw(state.type_label().to_string()),
        ]),
        Spans::from(Span::styled(status, Style::default().fg(status_color))),
    ];

    let input = Paragraph::new(lines).block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(input, area);
}
