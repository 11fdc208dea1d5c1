use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use habitpro_types::{ContactRecord, Notice};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::admin::export::EXPORT_SUCCESS_MESSAGE;
use crate::admin::login::LOGIN_FAILED_MESSAGE;
use crate::admin::{
    build_export, can_export, classify, fetch_contacts, login_with_recovery, write_export,
    AdminGate, FetchError, FetchFailure, GateError, GateState, StoreConnector, RELOGIN_DELAY,
};
use crate::identity::{IdentityProvider, LoginStatus};
use crate::tui::event::AppEvent;
use crate::tui::input::InputMode;
use crate::tui::widgets::{Form, Spinner};

pub const PASSWORD_VERIFIED_MESSAGE: &str = "Password verified!";
pub const LOGIN_PROMPT_MESSAGE: &str =
    "Please login with Internet Identity to access admin features";
pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully";

/// Notices kept on screen at once
const MAX_NOTICES: usize = 3;

/// Contact list as last fetched
#[derive(Default)]
pub struct ContactsState {
    pub records: Option<Vec<ContactRecord>>,
    pub failure: Option<FetchFailure>,
    pub selected_index: usize,
    pub loading: bool,
}

impl ContactsState {
    pub fn can_export(&self) -> bool {
        can_export(self.records.as_deref())
    }

    pub fn select_next(&mut self) {
        let len = self.records.as_ref().map_or(0, Vec::len);
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }
}

/// Main application state
pub struct App {
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub tx: Option<mpsc::UnboundedSender<AppEvent>>,

    pub gate: AdminGate,
    pub password_form: Form,
    pub contacts: ContactsState,
    pub login_status: LoginStatus,

    // Shared state
    pub spinner: Spinner,
    pub notices: VecDeque<Notice>,

    provider: Arc<dyn IdentityProvider>,
    connector: Arc<dyn StoreConnector>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        connector: Arc<dyn StoreConnector>,
        export_dir: PathBuf,
    ) -> Self {
        let mut password_form = Form::new();
        password_form.add_secret_field("Password", "Enter admin password");

        Self {
            input_mode: InputMode::Insert,
            should_quit: false,
            tx: None,
            gate: AdminGate::new(provider.identity().is_some()),
            password_form,
            contacts: ContactsState::default(),
            login_status: provider.login_status(),
            spinner: Spinner::new(),
            notices: VecDeque::new(),
            provider,
            connector,
            export_dir,
        }
    }

    pub fn set_sender(&mut self, tx: mpsc::UnboundedSender<AppEvent>) {
        self.tx = Some(tx);
    }

    pub fn push_notice(&mut self, notice: Notice) {
        if notice.is_error() {
            warn!("{}", notice.message);
        } else {
            info!("{}", notice.message);
        }
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Handle application events; `false` ends the UI loop
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
            AppEvent::Key(key) => {
                // Ctrl-C always quits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return false;
                }
                self.handle_key(key);
                !self.should_quit
            }
            AppEvent::Tick => {
                self.spinner.tick();
                self.login_status = self.provider.login_status();
                self.sync_identity();
                true
            }
            AppEvent::LoginFinished { result } => {
                self.gate.finish_login();
                self.spinner.stop();
                match result {
                    Ok(outcome) => {
                        info!("Identity login finished: {:?}", outcome);
                        self.sync_identity();
                    }
                    Err(e) => {
                        warn!("Identity login failed: {}", e);
                        self.push_notice(Notice::error(LOGIN_FAILED_MESSAGE));
                    }
                }
                self.login_status = self.provider.login_status();
                true
            }
            AppEvent::ContactsLoaded { generation, records } => {
                if !self.gate.is_current_fetch(generation) {
                    self.drop_stale_fetch(generation);
                    return true;
                }
                self.contacts.records = Some(records);
                self.contacts.failure = None;
                self.contacts.selected_index = 0;
                self.contacts.loading = false;
                self.spinner.stop();
                true
            }
            AppEvent::ContactsFailed { generation, failure } => {
                if !self.gate.is_current_fetch(generation) {
                    self.drop_stale_fetch(generation);
                    return true;
                }
                self.contacts.failure = Some(failure);
                self.contacts.loading = false;
                self.spinner.stop();
                true
            }
            AppEvent::SessionCleared => {
                self.push_notice(Notice::success(LOGGED_OUT_MESSAGE));
                true
            }
        }
    }

    /// Results of a fetch issued before the last logout or back
    fn drop_stale_fetch(&mut self, generation: u64) {
        debug!("Dropping contacts from fetch #{}", generation);
        if !self.gate.is_fully_authenticated() {
            self.spinner.stop();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.gate.state() {
            GateState::Locked => self.handle_password_key(key),
            GateState::PasswordVerified => self.handle_identity_key(key),
            GateState::FullyAuthenticated => self.handle_contacts_key(key),
        }
    }

    fn handle_password_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Insert => match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Enter => self.submit_password(),
                KeyCode::Backspace => self.password_form.delete_char(),
                KeyCode::Char(c) => self.password_form.input_char(c),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('i') => self.input_mode = InputMode::Insert,
                KeyCode::Enter => self.submit_password(),
                _ => {}
            },
        }
    }

    fn handle_identity_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('l') | KeyCode::Enter => self.start_login(),
            KeyCode::Char('b') | KeyCode::Esc => self.back(),
            _ => {}
        }
    }

    fn handle_contacts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.contacts.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.contacts.select_prev(),
            KeyCode::Char('e') => self.export_contacts(),
            KeyCode::Char('o') => self.logout(),
            _ => {}
        }
    }

    fn submit_password(&mut self) {
        match self.gate.submit_password(self.password_form.active_value()) {
            Ok(_) => {
                self.password_form.clear();
                self.input_mode = InputMode::Normal;
                self.push_notice(Notice::success(PASSWORD_VERIFIED_MESSAGE));
                if !self.gate.identity_present() {
                    self.push_notice(Notice::info(LOGIN_PROMPT_MESSAGE));
                }
                self.maybe_fetch();
            }
            Err(e @ GateError::Required(_)) => {
                self.password_form.set_active_error(Some(e.to_string()));
            }
            Err(e @ GateError::IncorrectPassword) => {
                self.password_form.set_active_error(Some(e.to_string()));
                self.push_notice(Notice::error(e.to_string()));
            }
        }
    }

    fn start_login(&mut self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        if !self.gate.begin_login() {
            return;
        }

        self.spinner.start("Logging in...");
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let result = login_with_recovery(provider.as_ref(), RELOGIN_DELAY).await;
            let _ = tx.send(AppEvent::LoginFinished { result });
        });
    }

    fn back(&mut self) {
        self.gate.back();
        self.input_mode = InputMode::Insert;
    }

    fn logout(&mut self) {
        self.gate.logout();
        self.contacts = ContactsState::default();
        self.spinner.stop();
        self.input_mode = InputMode::Insert;

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            provider.clear_session().await;
            if let Some(tx) = tx {
                let _ = tx.send(AppEvent::SessionCleared);
            }
        });
    }

    /// Feed the provider's identity into the gate and fetch on entry
    fn sync_identity(&mut self) {
        self.gate.set_identity_present(self.provider.identity().is_some());
        self.maybe_fetch();
    }

    fn maybe_fetch(&mut self) {
        if !self.gate.is_fully_authenticated() {
            return;
        }
        let Some(identity) = self.provider.identity() else {
            return;
        };
        if !self.gate.take_fetch() {
            return;
        }

        self.contacts = ContactsState {
            loading: true,
            ..ContactsState::default()
        };

        let store = match self.connector.connect(&identity) {
            Ok(store) => store,
            Err(e) => {
                self.contacts.loading = false;
                self.contacts.failure = Some(classify(&FetchError::Store(e)));
                return;
            }
        };

        if let Some(tx) = &self.tx {
            self.spinner.start("Loading customer data...");
            let tx = tx.clone();
            let generation = self.gate.fetch_generation();
            tokio::spawn(async move {
                let event = match fetch_contacts(store).await {
                    Ok(records) => AppEvent::ContactsLoaded { generation, records },
                    Err(e) => AppEvent::ContactsFailed {
                        generation,
                        failure: classify(&e),
                    },
                };
                let _ = tx.send(event);
            });
        }
    }

    fn export_contacts(&mut self) {
        let result = build_export(
            self.contacts.records.as_deref(),
            &Local,
            Local::now().date_naive(),
        )
        .and_then(|export| write_export(&export, &self.export_dir));

        match result {
            Ok(path) => {
                info!("CSV written to {}", path.display());
                self.push_notice(Notice::success(EXPORT_SUCCESS_MESSAGE));
            }
            Err(e) => self.push_notice(Notice::error(e.to_string())),
        }
    }
}
