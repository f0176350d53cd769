use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::campaign::{CampaignDraft, CampaignForm};
use crate::config::Config;
use crate::core::{
    parse_command, Action, Command, Module, NavShell, NotifyLevel, Page, Route, Router,
};
use crate::infrastructure::runtime::RuntimeEvent;
use crate::probe::ProbeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    level: StatusLevel,
    since: Instant,
}

/// Chain reported by the node, once known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    Unknown,
    Expected(u64),
    Mismatch { expected: u64, actual: u64 },
}

pub fn chain_name(chain_id: u64) -> String {
    match chain_id {
        1 => "Ethereum".to_string(),
        11_155_111 => "Sepolia".to_string(),
        17_000 => "Holesky".to_string(),
        31_337 => "Anvil".to_string(),
        other => format!("chain {}", other),
    }
}

pub struct App {
    pub nav: NavShell,
    pub router: Router,
    pub form: CampaignForm,
    pub drafts: Vec<CampaignDraft>,
    pub probe: ProbeState,
    pub endpoint: String,
    pub expected_chain_id: u64,
    pub chain: ChainStatus,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub command_input: String,
    pub help_open: bool,
    pub should_quit: bool,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            nav: NavShell::new(config.links(), &config.default_link),
            router: Router::new(),
            form: CampaignForm::new(),
            drafts: Vec::new(),
            probe: ProbeState::Idle,
            endpoint: config.endpoint().display(),
            expected_chain_id: config.chain_id,
            chain: ChainStatus::Unknown,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            help_open: false,
            should_quit: false,
            status: None,
        }
    }

    pub fn page(&self) -> Page {
        self.router.page()
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    /// Click or Enter on a sidebar row
    pub fn select_link(&mut self, index: usize) {
        self.focus = Focus::Sidebar;
        let action = self.nav.select_index(index);
        self.apply_action(action);
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(route) => {
                if route.page() == Page::CreateCampaign {
                    self.focus = Focus::Page;
                }
                self.router.navigate(route);
            }
            Action::Back => {
                if !self.router.back() {
                    self.set_status("Nothing to go back to", StatusLevel::Info);
                }
            }
            Action::Copy(text) => self.copy_to_clipboard(text),
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::Quit => self.should_quit = true,
        }
        if let Some(draft) = self.form.take_submitted() {
            self.set_status(format!("Draft \"{}\" saved", draft.title), StatusLevel::Info);
            self.drafts.push(draft);
        }
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Probe { endpoint, state } => {
                self.endpoint = endpoint;
                if let ProbeState::Failed(err) = &state {
                    self.set_status(format!("Node unreachable: {}", err), StatusLevel::Error);
                }
                self.probe = state;
            }
            RuntimeEvent::ChainId { chain_id } => {
                self.chain = match chain_id {
                    None => ChainStatus::Unknown,
                    Some(actual) if actual == self.expected_chain_id => {
                        ChainStatus::Expected(actual)
                    }
                    Some(actual) => {
                        self.set_status(
                            format!(
                                "Endpoint serves {} but {} is expected",
                                chain_name(actual),
                                chain_name(self.expected_chain_id)
                            ),
                            StatusLevel::Warn,
                        );
                        ChainStatus::Mismatch {
                            expected: self.expected_chain_id,
                            actual,
                        }
                    }
                };
            }
            RuntimeEvent::Error { message } => self.set_status(message, StatusLevel::Error),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.help_open = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Command => self.handle_command_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        // The campaign form takes every other key while focused.
        if self.focus == Focus::Page && self.page() == Page::CreateCampaign {
            match key.code {
                KeyCode::Esc => self.focus = Focus::Sidebar,
                _ => {
                    let action = self.form.handle_key(key);
                    self.apply_action(action);
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_open = true,
            KeyCode::Char(':') => self.enter_command(),
            KeyCode::Tab => self.toggle_focus(),
            _ if self.focus == Focus::Sidebar => {
                let action = self.nav.handle_key(key);
                self.apply_action(action);
            }
            KeyCode::Esc => self.focus = Focus::Sidebar,
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command_input.push(ch);
            }
            _ => {}
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Page,
            Focus::Page => Focus::Sidebar,
        };
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command_input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command_input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let action = self.execute_command(parse_command(&input));
        self.apply_action(action);
    }

    fn execute_command(&mut self, command: Command) -> Action {
        match command {
            Command::Home => self.select_route(&Route::home()),
            Command::Create => self.select_route(&Route::create_campaign()),
            Command::Profile => self.select_route(&Route::profile()),
            Command::Link(name) => match self.nav.select_name(&name) {
                Some(Action::None) => {
                    Action::Notify(format!("{} is not available yet", name), NotifyLevel::Info)
                }
                Some(action) => action,
                None => Action::Notify(format!("No link named {}", name), NotifyLevel::Warn),
            },
            Command::Go(path) => match Route::parse(&path) {
                Ok(route) => Action::Navigate(route),
                Err(err) => Action::Notify(err.to_string(), NotifyLevel::Warn),
            },
            Command::Back => Action::Back,
            Command::Copy => match self.probe.version() {
                Some(version) => Action::Copy(version.to_string()),
                None => Action::Notify("No node version yet".to_string(), NotifyLevel::Warn),
            },
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {}", input), NotifyLevel::Warn)
            }
        }
    }

    /// Select the first enabled sidebar link for `route`, or navigate directly if none
    fn select_route(&mut self, route: &Route) -> Action {
        let index = self
            .nav
            .links()
            .iter()
            .position(|link| &link.route == route && !link.disabled);
        match index {
            Some(index) => self.nav.select_index(index),
            None => Action::Navigate(route.clone()),
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone())) {
            Ok(()) => self.set_status(format!("Copied {}", text), StatusLevel::Info),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                self.set_status(format!("Clipboard unavailable: {}", err), StatusLevel::Warn);
            }
        }
    }
}
