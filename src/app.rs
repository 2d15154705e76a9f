//! Composition root: owns the router, the client service and the UI plugins,
//! and turns screen actions into navigation and API calls.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::Paragraph,
    Frame,
};

use crate::api::{ApiError, DynClientService};
use crate::models::{Client, PhoneType};
use crate::router::{Route, RouteParam, Router};
use crate::ui::{
    client_wizard::{self, render_client_wizard, ClientWizardAction, ClientWizardState},
    clients::{self, render_clients, ClientAction, ClientsState},
    components::address_bar::{render_address_prompt, AddressPrompt, PromptAction},
    components::notification::render_toasts,
    not_found::{self, render_not_found, NotFoundAction, NotFoundState},
    phone_demo::{self, render_phone_demo, PhoneDemoAction, PhoneDemoState},
    plugins::{HintContext, UiPlugins},
};

// Represents the current screen in the app
pub enum AppScreen {
    Loading,
    ClientList(ClientsState),
    ClientWizard(ClientWizardState),
    PhoneDemo(PhoneDemoState),
    NotFound(NotFoundState),
}

pub struct App {
    service: DynClientService,
    router: Router,
    plugins: UiPlugins,
    phone_types: Vec<PhoneType>,
    screen: AppScreen,
    prompt: Option<AddressPrompt>,
    should_quit: bool,
}

impl App {
    pub fn new(service: DynClientService, plugins: UiPlugins, start_path: &str) -> Self {
        Self {
            service,
            router: Router::new(start_path),
            plugins,
            phone_types: PhoneType::catalog(),
            screen: AppScreen::Loading,
            prompt: None,
            should_quit: false,
        }
    }

    /// Activate the start route.
    pub async fn start(&mut self) {
        self.activate().await;
    }

    pub fn screen(&self) -> &AppScreen {
        &self.screen
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn plugins(&self) -> &UiPlugins {
        &self.plugins
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_path(&self) -> String {
        self.router.current_path()
    }

    pub async fn navigate(&mut self, path: &str) {
        let route = self.router.navigate(path);
        info!(path = %route.path(), "navigate");
        self.activate().await;
    }

    async fn go_back(&mut self) {
        if self.router.back().is_some() {
            info!(path = %self.router.current_path(), "navigate back");
            self.activate().await;
        }
    }

    /// Build the screen for the current route, loading data where needed.
    async fn activate(&mut self) {
        self.screen = match self.router.current().clone() {
            Route::ClientList => self.load_client_list().await,
            Route::AddClient => AppScreen::ClientWizard(ClientWizardState::new(self.phone_types.clone())),
            Route::EditClient(RouteParam::Id(id)) => self.load_client_form(id).await,
            Route::EditClient(RouteParam::Malformed(raw)) => {
                warn!(id = %raw, "rejected malformed client id");
                self.plugins
                    .toaster
                    .error(format!("'{}' is not a valid client id", raw));
                AppScreen::NotFound(NotFoundState::new(
                    &self.router.current_path(),
                    "Client ids are positive whole numbers.",
                ))
            }
            Route::PhoneDemo => AppScreen::PhoneDemo(PhoneDemoState::new(self.phone_types.clone())),
            Route::NotFound(path) => {
                AppScreen::NotFound(NotFoundState::new(&path, "No screen is registered for this path."))
            }
        };
    }

    async fn load_client_list(&mut self) -> AppScreen {
        match self.service.list_clients().await {
            Ok(clients) => {
                info!(count = clients.len(), "loaded clients");
                AppScreen::ClientList(ClientsState::new(clients))
            }
            Err(err) => {
                self.plugins.toaster.error(format!("Could not load clients: {}", err));
                AppScreen::ClientList(ClientsState::new(Vec::new()))
            }
        }
    }

    async fn load_client_form(&mut self, id: i32) -> AppScreen {
        match self.service.get_client(id).await {
            Ok(client) => AppScreen::ClientWizard(ClientWizardState::from_existing(client, self.phone_types.clone())),
            Err(ApiError::NotFound) => {
                self.plugins.toaster.error(format!("Client {} does not exist", id));
                AppScreen::NotFound(NotFoundState::new(
                    &self.router.current_path(),
                    format!("The backend has no client with id {}.", id),
                ))
            }
            Err(err) => {
                self.plugins.toaster.error(format!("Could not load client {}: {}", id, err));
                self.router.replace(Route::ClientList);
                self.load_client_list().await
            }
        }
    }

    async fn delete_client(&mut self, id: i32) {
        match self.service.delete_client(id).await {
            Ok(()) => {
                info!(client_id = id, "deleted client");
                if let AppScreen::ClientList(state) = &mut self.screen {
                    state.remove_client(id);
                }
                self.plugins.toaster.success(format!("Deleted client {}", id));
            }
            Err(err) => {
                warn!(client_id = id, error = %err, "delete failed");
                self.plugins
                    .toaster
                    .error(format!("Could not delete client {}: {}", id, err));
            }
        }
    }

    async fn save_client(&mut self, client: Client) {
        let result = if client.is_new() {
            self.service.create_client(&client.to_new_client()).await
        } else {
            self.service.update_client(client.client_id, &client).await
        };

        match result {
            Ok(saved) => {
                info!(client_id = saved.client_id, "saved client");
                self.plugins.toaster.success(format!("Saved {}", saved.full_name()));
                // A saved form leaves no entry behind in the history.
                self.router.replace(Route::ClientList);
                self.activate().await;
            }
            Err(err) => {
                warn!(client_id = client.client_id, error = %err, "save failed");
                self.plugins.toaster.error(format!("Could not save client: {}", err));
            }
        }
    }

    async fn refresh(&mut self) {
        self.activate().await;
        if let AppScreen::ClientList(state) = &self.screen {
            self.plugins
                .toaster
                .info(format!("Reloaded {} clients", state.clients().len()));
        }
    }

    fn accepts_prompt(&self) -> bool {
        match &self.screen {
            AppScreen::ClientList(state) => !state.is_confirming_delete(),
            AppScreen::ClientWizard(state) => !state.is_editing(),
            AppScreen::PhoneDemo(_) => false,
            AppScreen::NotFound(_) | AppScreen::Loading => true,
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(prompt) = &mut self.prompt {
            match prompt.handle_input(key.code) {
                Some(PromptAction::Navigate(path)) => {
                    self.prompt = None;
                    self.navigate(&path).await;
                }
                Some(PromptAction::Close) => self.prompt = None,
                None => {}
            }
            return;
        }

        if key.code == KeyCode::Char(':') && self.accepts_prompt() {
            self.prompt = Some(AddressPrompt::new(&self.router.current_path()));
            return;
        }

        match &mut self.screen {
            AppScreen::ClientList(state) => match clients::handle_input(state, key.code) {
                Some(ClientAction::Quit) => self.should_quit = true,
                Some(ClientAction::Back) => self.go_back().await,
                Some(ClientAction::Refresh) => self.refresh().await,
                Some(ClientAction::NewClient) => self.navigate("/add-client").await,
                Some(ClientAction::EditClient(id)) => self.navigate(&Route::edit(id).path()).await,
                Some(ClientAction::DeleteClient(id)) => self.delete_client(id).await,
                None => {}
            },
            AppScreen::ClientWizard(state) => match client_wizard::handle_input(state, key.code) {
                Some(ClientWizardAction::Cancel) => self.navigate("/").await,
                Some(ClientWizardAction::Save(client)) => self.save_client(client).await,
                None => {}
            },
            AppScreen::PhoneDemo(state) => match phone_demo::handle_input(state, key.code) {
                Some(PhoneDemoAction::Back) => self.navigate("/").await,
                None => {}
            },
            AppScreen::NotFound(_) => match not_found::handle_input(key.code) {
                Some(NotFoundAction::Home) => self.navigate("/").await,
                Some(NotFoundAction::Back) => self.go_back().await,
                Some(NotFoundAction::Quit) => self.should_quit = true,
                None => {}
            },
            AppScreen::Loading => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
        }
    }

    /// Expire old toasts.
    pub fn tick(&mut self) {
        self.plugins.toaster.prune(Instant::now());
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)].as_ref())
            .split(frame.size());

        render_status_bar(frame, &self.router, chunks[0]);

        let area = chunks[1];
        match &mut self.screen {
            AppScreen::Loading => {
                let loading = Paragraph::new(self.plugins.tooltips.hint(HintContext::Loading));
                frame.render_widget(loading, area);
            }
            AppScreen::ClientList(state) => render_clients(frame, state, &self.plugins, area),
            AppScreen::ClientWizard(state) => render_client_wizard(frame, state, &self.plugins, area),
            AppScreen::PhoneDemo(state) => render_phone_demo(frame, state, &self.plugins, area),
            AppScreen::NotFound(state) => render_not_found(frame, state, &self.plugins, area),
        }

        if let Some(prompt) = &self.prompt {
            render_address_prompt(frame, prompt, area);
        }
        render_toasts(frame, &self.plugins.toaster, area);
    }
}

fn render_status_bar<B: Backend>(frame: &mut Frame<B>, router: &Router, area: Rect) {
    let status = Paragraph::new(Spans::from(vec![
        Span::styled(" Client Roster ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(router.current_path(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  history {}", router.depth()), Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(status, area);
}
