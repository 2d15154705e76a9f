use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Client;
use crate::ui::components::centered_rect;
use crate::ui::plugins::{HintContext, Icon, UiPlugins};

// Represents the state of the client list screen
pub struct ClientsState {
    clients: Vec<Client>,
    list_state: ListState,
    show_delete_confirmation: bool,
    show_archived: bool,
}

impl ClientsState {
    pub fn new(clients: Vec<Client>) -> Self {
        let mut state = Self {
            clients,
            list_state: ListState::default(),
            show_delete_confirmation: false,
            show_archived: true,
        };
        state.reset_selection();
        state
    }

    /// Rows currently shown, in the order the backend returned them.
    pub fn visible(&self) -> Vec<&Client> {
        self.clients
            .iter()
            .filter(|c| self.show_archived || !c.archived())
            .collect()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn reset_selection(&mut self) {
        if self.visible().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.show_delete_confirmation
    }

    pub fn toggle_archived(&mut self) {
        self.show_archived = !self.show_archived;
        self.reset_selection();
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.list_state
            .selected()
            .and_then(|i| self.visible().get(i).copied())
    }

    pub fn selected_client_id(&self) -> Option<i32> {
        self.selected_client().map(|c| c.client_id)
    }

    /// Drop a deleted client from the in-memory rows.
    pub fn remove_client(&mut self, client_id: i32) {
        self.clients.retain(|c| c.client_id != client_id);

        let len = self.visible().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ClientAction {
    Quit,
    Back,
    Refresh,
    NewClient,
    EditClient(i32),   // Contains client_id
    DeleteClient(i32), // Contains client_id
}

pub fn render_clients<B: Backend>(frame: &mut Frame<B>, state: &mut ClientsState, plugins: &UiPlugins, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(area);

    let icons = plugins.icons;
    let items: Vec<ListItem> = state
        .visible()
        .into_iter()
        .map(|client| {
            let mut spans = vec![
                Span::raw(format!("{} ", icons.glyph(Icon::Client))),
                Span::styled(client.full_name(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    client.email.clone().unwrap_or_default(),
                    Style::default().fg(Color::Gray),
                ),
            ];
            if !client.phones.is_empty() {
                spans.push(Span::raw(format!("  {} {}", icons.glyph(Icon::Phone), client.phones.len())));
            }
            if client.archived() {
                spans.push(Span::styled(
                    format!("  {}", icons.glyph(Icon::Archived)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Spans::from(spans))
        })
        .collect();

    let title = if state.show_archived {
        format!("Clients ({})", state.clients.len())
    } else {
        format!("Clients ({} shown, archived hidden)", state.visible().len())
    };

    let clients_list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(clients_list, chunks[0], &mut state.list_state);

    let hint = plugins.tooltips.hint(HintContext::ClientList {
        has_selection: state.selected_client().is_some(),
    });
    let buttons = Paragraph::new(hint)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        let name = state.selected_client().map(Client::full_name).unwrap_or_default();
        render_delete_confirmation(frame, area, &name);
    }
}

fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, name: &str) {
    let popup_area = centered_rect(50, 20, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(format!("Are you sure you want to delete {}?", name)),
        Spans::from(""),
        Spans::from("Their phone numbers will be deleted too."),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

pub fn handle_input(state: &mut ClientsState, key: KeyCode) -> Option<ClientAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.toggle_delete_confirmation();
                return state.selected_client_id().map(ClientAction::DeleteClient);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(ClientAction::Quit),
        KeyCode::Char('b') => return Some(ClientAction::Back),
        KeyCode::Char('r') => return Some(ClientAction::Refresh),
        KeyCode::Char('n') => return Some(ClientAction::NewClient),
        KeyCode::Char('a') => state.toggle_archived(),
        KeyCode::Char('e') | KeyCode::Enter => {
            return state.selected_client_id().map(ClientAction::EditClient);
        }
        KeyCode::Char('d') => {
            if state.selected_client().is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}
