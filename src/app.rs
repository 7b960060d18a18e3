//! Application state and core logic

use crate::api::ListingServiceTrait;
use crate::config::WizardConfig;
use crate::listing::payload::to_payload;
use crate::listing::{edit, BusinessKind, FieldKind, ListingId, StepKind, SubmissionError, Wizard};
use crate::state::{AppState, View};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Listing service used for loading and submitting
    service: Box<dyn ListingServiceTrait>,
    pub config: WizardConfig,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub async fn new(service: Box<dyn ListingServiceTrait>, config: WizardConfig) -> Self {
        let mut state = AppState::default();
        state.service_connected = service.check_connection().await;
        if let Some(kind) = config.default_business_kind {
            state.select_kind(kind);
        }

        Self {
            state,
            service,
            config,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Load a stored listing and open it in the wizard for editing
    pub async fn open_listing(&mut self, id: ListingId) -> Result<()> {
        let payload = self
            .service
            .get_listing(id)
            .await
            .with_context(|| format!("Could not open listing {id}"))?;
        let wizard = Wizard::for_listing(id, &payload);
        self.state.select_kind(wizard.business_kind());
        self.state.wizard = Some(wizard);
        self.state.current_view = View::Wizard;
        self.state.reset_field_cursor();
        tracing::info!(listing_id = %id, "opened listing for editing");
        Ok(())
    }

    /// Start a fresh listing with `kind`, skipping the type picker
    pub fn start_with_kind(&mut self, kind: BusinessKind) {
        self.state
            .start_wizard(kind, self.config.default_region.as_deref());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::TypeSelect => self.handle_type_select_key(key),
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Submitted => self.handle_submitted_key(key),
        }
        Ok(())
    }

    fn handle_type_select_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_kind_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_kind_cursor_down(),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.start_with_kind(BusinessKind::ALL[index]);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let kind = self.state.selected_kind();
                self.start_with_kind(kind);
            }
            KeyCode::Esc if self.state.wizard.is_some() => {
                // back to the form without changing the kind
                self.state.current_view = View::Wizard;
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => {
                self.state.last_submitted = None;
                self.state.discard_wizard();
            }
            KeyCode::Char('y') => {
                if let Some(id) = self.state.last_submitted {
                    self.copy_text(&id.to_string(), "Listing id copied");
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys while stepping through the form
    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Keyboard shortcuts (work from any field)
        match key.code {
            KeyCode::Char('s') if ctrl => {
                self.submit().await;
                return Ok(());
            }
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_payload();
                return Ok(());
            }
            KeyCode::Char('n') if ctrl => {
                self.next_step();
                return Ok(());
            }
            KeyCode::PageDown => {
                self.next_step();
                return Ok(());
            }
            KeyCode::Char('p') if ctrl => {
                self.previous_step();
                return Ok(());
            }
            KeyCode::PageUp => {
                self.previous_step();
                return Ok(());
            }
            KeyCode::Char('u') if ctrl => {
                if let (Some(field), Some(wizard)) =
                    (self.state.active_field_path(), self.state.wizard.as_mut())
                {
                    edit::clear(wizard.state_mut(), field);
                }
                self.state.list_draft.clear();
                return Ok(());
            }
            KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = c as usize - '1' as usize;
                if let Some(wizard) = self.state.wizard.as_mut() {
                    if wizard.go_to(index) {
                        self.state.reset_field_cursor();
                    }
                }
                return Ok(());
            }
            KeyCode::Esc => {
                let on_first = self
                    .state
                    .wizard
                    .as_ref()
                    .map(Wizard::is_first_step)
                    .unwrap_or(true);
                if on_first {
                    self.state.current_view = View::TypeSelect;
                } else {
                    self.previous_step();
                }
                return Ok(());
            }
            KeyCode::Tab => {
                self.state.next_field();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.prev_field();
                return Ok(());
            }
            _ => {}
        }

        // The review step has a single field; arrows scroll the preview
        if self.state.current_step_kind() == Some(StepKind::Review) {
            match key.code {
                KeyCode::Up => {
                    self.state.scroll_up();
                    return Ok(());
                }
                KeyCode::Down => {
                    self.state.scroll_down();
                    return Ok(());
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Up => self.state.prev_field(),
            KeyCode::Down => self.state.next_field(),
            _ => self.handle_field_key(key),
        }
        Ok(())
    }

    /// Apply a key to the focused field according to its kind
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(field) = self.state.active_field_path() else {
            return;
        };
        let option_cursor = self.state.option_cursor;
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        let form = wizard.state_mut();

        match (field.kind(), key.code) {
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Char(c)) => {
                edit::input_char(form, field, c)
            }
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Backspace) => {
                edit::backspace(form, field)
            }
            (FieldKind::Multiline, KeyCode::Enter) => edit::newline(form, field),
            (FieldKind::Text, KeyCode::Enter) => self.state.next_field(),

            (FieldKind::Choice(_), KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter) => {
                edit::cycle_choice(form, field, true)
            }
            (FieldKind::Choice(_), KeyCode::Left) => edit::cycle_choice(form, field, false),

            (FieldKind::MultiChoice(_), KeyCode::Char(' ') | KeyCode::Enter) => {
                edit::toggle_option(form, field, option_cursor)
            }
            (FieldKind::MultiChoice(_), KeyCode::Right) => self.state.move_option_cursor(true),
            (FieldKind::MultiChoice(_), KeyCode::Left) => self.state.move_option_cursor(false),

            (
                FieldKind::Toggle,
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right,
            ) => edit::toggle_flag(form, field),

            (FieldKind::List, KeyCode::Char(c)) => self.state.list_draft.push(c),
            (FieldKind::List, KeyCode::Enter) => {
                if edit::push_item(form, field, &self.state.list_draft) {
                    self.state.list_draft.clear();
                }
            }
            (FieldKind::List, KeyCode::Backspace) => {
                if self.state.list_draft.pop().is_none() {
                    edit::backspace(form, field);
                }
            }
            _ => {}
        }
    }

    /// Validate the current step and advance
    fn next_step(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        if wizard.next() {
            self.state.reset_field_cursor();
        } else if !wizard.errors().is_empty() {
            let count = wizard.errors().len();
            self.copy_message = Some(format!("{count} field(s) need attention"));
            self.state.focus_first_error();
        }
    }

    fn previous_step(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        if wizard.previous() {
            self.state.reset_field_cursor();
        }
    }

    /// Validate the whole form and hand it to the listing service
    async fn submit(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        match wizard.submit(self.service.as_mut()).await {
            Ok(id) => {
                self.state.service_connected = true;
                self.state.last_submitted = Some(id);
                self.state.current_view = View::Submitted;
            }
            Err(SubmissionError::Invalid { step, field }) => {
                self.state.reset_field_cursor();
                self.state.focus_first_error();
                self.copy_message = Some(format!("Fix {} on step {}", field.label(), step + 1));
            }
            Err(SubmissionError::AlreadyPending) => {
                tracing::debug!("ignored submit while a submission is pending");
            }
            Err(err @ SubmissionError::Service(_)) => {
                self.state.service_connected = self.service.check_connection().await;
                self.push_error(format!("Failed to submit listing: {err:#}"));
            }
        }
    }

    /// Copy the current submission payload as JSON
    fn copy_payload(&mut self) {
        let Some(wizard) = self.state.wizard.as_ref() else {
            return;
        };
        match serde_json::to_string_pretty(&to_payload(wizard.state())) {
            Ok(json) => self.copy_text(&json, "Payload copied to clipboard"),
            Err(e) => self.push_error(format!("Failed to serialize payload: {e}")),
        }
    }

    fn copy_text(&mut self, text: &str, success: &str) {
        match copy_to_clipboard(text) {
            Ok(()) => self.copy_message = Some(success.to_string()),
            Err(e) => self.push_error(format!("Failed to copy: {e}")),
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
