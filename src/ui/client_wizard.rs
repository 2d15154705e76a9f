use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{Client, Phone, PhoneType};
use crate::ui::components::phone_input::{render_phone_input, PhoneInputState};
use crate::ui::plugins::{HintContext, Icon, UiPlugins};
use crate::validation::{is_blank, is_plausible_email, is_plausible_phone};

#[derive(Debug, PartialEq)]
pub enum ClientWizardAction {
    Cancel,
    Save(Client),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ClientField {
    FirstName,
    LastName,
    Email,
    Archived,
    Phones,
}

// Phone being edited inline: index into client.phones and the input state
struct PhoneEdit {
    index: usize,
    input: PhoneInputState,
    is_new: bool,
}

/// Add / edit form for one client. `client.client_id == 0` means add.
pub struct ClientWizardState {
    client: Client,
    current_field: ClientField,
    editing: bool,
    phone_list_state: ListState,
    phone_edit: Option<PhoneEdit>,
    phone_types: Vec<PhoneType>,
    errors: Vec<String>,
}

impl ClientWizardState {
    pub fn new(phone_types: Vec<PhoneType>) -> Self {
        Self::from_existing(Client::default(), phone_types)
    }

    pub fn from_existing(client: Client, phone_types: Vec<PhoneType>) -> Self {
        let mut phone_list_state = ListState::default();
        if !client.phones.is_empty() {
            phone_list_state.select(Some(0));
        }

        Self {
            client,
            current_field: ClientField::FirstName,
            editing: false,
            phone_list_state,
            phone_edit: None,
            phone_types,
            errors: Vec::new(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn current_field(&self) -> ClientField {
        self.current_field
    }

    /// True while keystrokes go into a text field or a phone.
    pub fn is_editing(&self) -> bool {
        self.editing || self.phone_edit.is_some()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ClientField::FirstName => ClientField::LastName,
            ClientField::LastName => ClientField::Email,
            ClientField::Email => ClientField::Archived,
            ClientField::Archived => ClientField::Phones,
            ClientField::Phones => ClientField::FirstName,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ClientField::FirstName => ClientField::Phones,
            ClientField::LastName => ClientField::FirstName,
            ClientField::Email => ClientField::LastName,
            ClientField::Archived => ClientField::Email,
            ClientField::Phones => ClientField::Archived,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field_value = match self.current_field {
            ClientField::FirstName => &mut self.client.first_name,
            ClientField::LastName => &mut self.client.last_name,
            ClientField::Email => self.client.email.get_or_insert_with(String::new),
            ClientField::Archived | ClientField::Phones => return,
        };

        match key {
            KeyCode::Char(c) => {
                field_value.push(c);
            }
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    pub fn toggle_archived(&mut self) {
        self.client.is_archived = Some(!self.client.archived());
    }

    pub fn selected_phone(&self) -> Option<usize> {
        self.phone_list_state
            .selected()
            .filter(|&i| i < self.client.phones.len())
    }

    pub fn next_phone(&mut self) {
        let len = self.client.phones.len();
        if len == 0 {
            return;
        }
        let i = self.selected_phone().map_or(0, |i| (i + 1) % len);
        self.phone_list_state.select(Some(i));
    }

    pub fn previous_phone(&mut self) {
        let len = self.client.phones.len();
        if len == 0 {
            return;
        }
        let i = self.selected_phone().map_or(0, |i| (i + len - 1) % len);
        self.phone_list_state.select(Some(i));
    }

    pub fn add_phone(&mut self) {
        let default_type = self.phone_types.first().map(|t| t.phone_type_id);
        self.client
            .phones
            .push(Phone::new(self.client.client_id, "", default_type));

        let index = self.client.phones.len() - 1;
        self.phone_list_state.select(Some(index));
        self.phone_edit = Some(PhoneEdit {
            index,
            input: PhoneInputState::from_phone(&self.client.phones[index], self.phone_types.clone()),
            is_new: true,
        });
    }

    pub fn edit_selected_phone(&mut self) {
        if let Some(index) = self.selected_phone() {
            self.phone_edit = Some(PhoneEdit {
                index,
                input: PhoneInputState::from_phone(&self.client.phones[index], self.phone_types.clone()),
                is_new: false,
            });
        }
    }

    pub fn remove_selected_phone(&mut self) {
        if let Some(index) = self.selected_phone() {
            self.client.phones.remove(index);
            let len = self.client.phones.len();
            if len == 0 {
                self.phone_list_state.select(None);
            } else if index >= len {
                self.phone_list_state.select(Some(len - 1));
            }
        }
    }

    fn commit_phone(&mut self) {
        if let Some(edit) = self.phone_edit.take() {
            if let Some(phone) = self.client.phones.get_mut(edit.index) {
                edit.input.apply_to(phone);
            }
        }
    }

    fn discard_phone(&mut self) {
        if let Some(edit) = self.phone_edit.take() {
            if edit.is_new {
                self.phone_list_state.select(Some(edit.index));
                self.remove_selected_phone();
            }
        }
    }

    /// Check the form and build the client to submit.
    ///
    /// Names are trimmed and a blank email becomes `None`. On failure the
    /// messages are kept on the form and nothing is returned.
    pub fn submission(&mut self) -> Option<Client> {
        let mut errors = Vec::new();

        if is_blank(&self.client.first_name) {
            errors.push("First name is required".to_string());
        }
        if is_blank(&self.client.last_name) {
            errors.push("Last name is required".to_string());
        }

        let email = self
            .client
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        if let Some(email) = &email {
            if !is_plausible_email(email) {
                errors.push(format!("'{}' is not a valid email address", email));
            }
        }

        for (i, phone) in self.client.phones.iter().enumerate() {
            if !is_plausible_phone(&phone.phone_number) {
                errors.push(format!("Phone {} '{}' is not a valid number", i + 1, phone.phone_number));
            }
        }

        self.errors = errors;
        if !self.errors.is_empty() {
            return None;
        }

        let mut client = self.client.clone();
        client.first_name = client.first_name.trim().to_string();
        client.last_name = client.last_name.trim().to_string();
        client.email = email;
        for phone in &mut client.phones {
            phone.client_id = client.client_id;
        }
        Some(client)
    }

    fn hint_context(&self) -> HintContext {
        if self.phone_edit.is_some() {
            HintContext::PhoneEntry
        } else {
            HintContext::ClientForm {
                editing: self.editing,
                on_phones: self.current_field == ClientField::Phones,
            }
        }
    }
}

pub fn render_client_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ClientWizardState, plugins: &UiPlugins, area: Rect) {
    let error_height = if state.errors.is_empty() { 0 } else { state.errors.len() as u16 + 2 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(error_height),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    // Title with appropriate text based on whether we're editing or creating
    let title_text = if state.client.is_new() {
        format!("{} New Client", plugins.icons.glyph(Icon::Add))
    } else {
        format!(
            "{} Edit Client #{}",
            plugins.icons.glyph(Icon::Edit),
            state.client.client_id
        )
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);
    render_phones(f, state, plugins, chunks[2]);

    if !state.errors.is_empty() {
        let lines: Vec<Spans> = state
            .errors
            .iter()
            .map(|e| Spans::from(Span::raw(e.clone())))
            .collect();
        let errors = Paragraph::new(lines)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("Please fix").borders(Borders::ALL));
        f.render_widget(errors, chunks[3]);
    }

    let help = Paragraph::new(plugins.tooltips.hint(state.hint_context()))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &ClientWizardState, area: Rect) {
    let rows = [
        (ClientField::FirstName, "First name", state.client.first_name.clone()),
        (ClientField::LastName, "Last name", state.client.last_name.clone()),
        (ClientField::Email, "Email", state.client.email.clone().unwrap_or_default()),
        (
            ClientField::Archived,
            "Archived",
            if state.client.archived() { "yes" } else { "no" }.to_string(),
        ),
    ];

    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|(field, name, value)| {
            let selected = field == state.current_field;
            let content = if selected && state.editing {
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{}|", value), Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                let style = if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Spans::from(vec![Span::styled(format!("{}: ", name), style), Span::raw(value)])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items).block(Block::default().borders(Borders::ALL).title("Client Details"));
    f.render_widget(form_list, area);
}

fn render_phones<B: Backend>(f: &mut Frame<B>, state: &mut ClientWizardState, plugins: &UiPlugins, area: Rect) {
    let (list_area, input_area) = if state.phone_edit.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let phone_icon = plugins.icons.glyph(Icon::Phone);
    let items: Vec<ListItem> = state
        .client
        .phones
        .iter()
        .map(|phone| {
            let label = PhoneType::label_for(&state.phone_types, phone.phone_type_id);
            let number = if phone.phone_number.is_empty() { "(empty)" } else { phone.phone_number.as_str() };
            ListItem::new(format!("{} {:<8} {}", phone_icon, label, number))
        })
        .collect();

    let border_style = if state.current_field == ClientField::Phones {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let phones = List::new(items)
        .block(
            Block::default()
                .title("Phones")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_stateful_widget(phones, list_area, &mut state.phone_list_state);

    if let (Some(edit), Some(input_area)) = (&state.phone_edit, input_area) {
        let title = if edit.is_new { "Add phone" } else { "Edit phone" };
        render_phone_input(f, &edit.input, input_area, title);
    }
}

pub fn handle_input(state: &mut ClientWizardState, key: KeyCode) -> Option<ClientWizardAction> {
    if state.phone_edit.is_some() {
        match key {
            KeyCode::Enter => state.commit_phone(),
            KeyCode::Esc => state.discard_phone(),
            _ => {
                if let Some(edit) = &mut state.phone_edit {
                    edit.input.handle_input(key);
                }
            }
        }
        return None;
    }

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(ClientWizardAction::Cancel);
            }
        }
        KeyCode::Enter => match state.current_field {
            ClientField::Archived => state.toggle_archived(),
            ClientField::Phones => state.edit_selected_phone(),
            _ => state.toggle_editing(),
        },
        _ if state.editing => {
            state.edit_current_field(key);
        }
        KeyCode::Up => state.previous_field(),
        KeyCode::Down | KeyCode::Tab => state.next_field(),
        KeyCode::Char(' ') if state.current_field == ClientField::Archived => state.toggle_archived(),
        KeyCode::Left if state.current_field == ClientField::Phones => state.previous_phone(),
        KeyCode::Right if state.current_field == ClientField::Phones => state.next_phone(),
        KeyCode::Char('a') if state.current_field == ClientField::Phones => state.add_phone(),
        KeyCode::Char('x') if state.current_field == ClientField::Phones => state.remove_selected_phone(),
        KeyCode::Char('s') => {
            if let Some(client) = state.submission() {
                return Some(ClientWizardAction::Save(client));
            }
        }
        _ => {}
    }

    None
}
