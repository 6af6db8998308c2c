//! Application state and core logic

use crate::api::{AdmissionClient, AdmissionClientTrait, AdmissionSubmission};
use crate::config::TuiConfig;
use crate::platform::has_shortcut_modifier;
use crate::state::{Advance, AppState, Form, View};
use crate::ui::fields_in_view;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Two Ctrl+C presses within this window quit the app
const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(1000);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client for the admissions API
    client: Box<dyn AdmissionClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
    /// Submission waiting for `finish_submit`
    pending: Option<AdmissionSubmission>,
}

impl App {
    /// Create a new App talking to the configured admissions server
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let client = AdmissionClient::new(config)?;
        tracing::info!(endpoint = client.endpoint(), "admissions client ready");
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn AdmissionClientTrait>) -> Self {
        Self {
            state: AppState::default(),
            client,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
            pending: None,
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

    /// Resize the form viewport to the terminal height
    pub fn resize(&mut self, terminal_height: u16) {
        self.state.wizard.set_viewport(fields_in_view(terminal_height));
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c(Instant::now());
            return Ok(());
        }
        self.last_ctrl_c = None;

        // Handle error dialog dismissal first (modal)
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.submitting {
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }
        Ok(())
    }

    /// First Ctrl+C arms quitting, a second one within the window quits
    fn handle_ctrl_c(&mut self, now: Instant) {
        match self.last_ctrl_c {
            Some(prev) if now.duration_since(prev) <= DOUBLE_TAP_WINDOW => {
                self.quit = true;
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let shortcut = has_shortcut_modifier(key.modifiers);

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.advance_or_submit();
            }
            KeyCode::Char('n') if shortcut => self.advance(),
            KeyCode::Char('b') if shortcut => self.retreat(),
            KeyCode::PageDown => self.advance(),
            KeyCode::PageUp => self.retreat(),
            KeyCode::Tab | KeyCode::Down => self.state.wizard.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.wizard.prev_field(),
            KeyCode::Left => self.state.wizard.cycle(false),
            KeyCode::Right => self.state.wizard.cycle(true),
            KeyCode::Enter => {
                if self.state.wizard.active_file_slot().is_some() {
                    self.attach();
                } else {
                    self.state.wizard.next_field();
                }
            }
            KeyCode::Delete => self.detach(),
            KeyCode::Backspace => self.state.wizard.backspace(),
            KeyCode::Char(' ') => {
                if !self.state.wizard.toggle() {
                    self.state.wizard.input_char(' ');
                }
            }
            KeyCode::Char(c) if !shortcut => self.state.wizard.input_char(c),
            _ => {}
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        let new_draft = match key.code {
            KeyCode::Enter => true,
            KeyCode::Char('n') => true,
            _ => false,
        };
        if new_draft {
            self.state.start_new_application();
            self.status_message = Some("Started a new application".to_string());
        }
    }

    /// Validate the current step and move on. Returns true when the whole
    /// wizard has validated and the draft is ready to send.
    fn try_advance(&mut self) -> bool {
        let from = self.state.wizard.step();
        match self.state.wizard.advance(Self::today()) {
            Advance::Moved(step) => {
                self.status_message = Some(format!(
                    "Step {} of 5: {}",
                    step.number(),
                    step.title()
                ));
                false
            }
            Advance::ReadyToSubmit => true,
            Advance::Blocked(result) => {
                self.push_error(format!(
                    "Please fix step {} ({}):\n{}",
                    from.number(),
                    from.title(),
                    result.summary()
                ));
                false
            }
        }
    }

    fn advance(&mut self) {
        if self.try_advance() {
            self.status_message = Some("All steps complete. Press Ctrl+S to submit".to_string());
        }
    }

    fn advance_or_submit(&mut self) {
        if self.try_advance() {
            self.begin_submit();
        }
    }

    fn retreat(&mut self) {
        let step = self.state.wizard.retreat();
        self.status_message = Some(format!("Step {} of 5: {}", step.number(), step.title()));
    }

    fn attach(&mut self) {
        let Some(slot) = self.state.wizard.active_file_slot() else {
            return;
        };
        match self.state.wizard.attach_active() {
            Ok(Some(attachment)) => {
                let message = format!(
                    "Attached {} ({})",
                    attachment.file_name,
                    attachment.size_label()
                );
                tracing::info!(
                    slot = slot.part_name(),
                    file = %attachment.file_name,
                    size = attachment.size(),
                    "attachment accepted"
                );
                self.status_message = Some(message);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(slot = slot.part_name(), error = %e, "attachment rejected");
                self.push_error(e.to_string());
            }
        }
    }

    fn detach(&mut self) {
        if let Some(removed) = self.state.wizard.detach_active() {
            self.status_message = Some(format!("Removed {}", removed.file_name));
        }
    }

    /// Queue the draft for sending and mark the app as submitting. The
    /// request itself goes out in `finish_submit`, after a frame showing the
    /// submitting state has been drawn.
    fn begin_submit(&mut self) {
        if self.state.submitting {
            return;
        }
        if !self.state.wizard.is_ready_to_submit() {
            return;
        }

        match AdmissionSubmission::from_draft(&self.state.wizard.draft) {
            Ok(submission) => {
                self.pending = Some(submission);
                self.state.submitting = true;
                self.status_message = Some("Submitting application...".to_string());
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    pub fn has_pending_submit(&self) -> bool {
        self.pending.is_some()
    }

    /// Send the queued draft. On success the draft is discarded and the
    /// receipt shown; on failure the draft stays as it was.
    pub async fn finish_submit(&mut self) {
        let Some(submission) = self.pending.take() else {
            return;
        };

        let result = self.client.submit_application(submission).await;
        self.state.submitting = false;

        match result {
            Ok(receipt) => {
                self.state.start_new_application();
                self.state.current_view = View::Submitted;
                self.state.receipt = Some(receipt);
                self.status_message = Some("Application submitted".to_string());
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), "submission failed, draft kept");
                self.status_message = None;
                self.push_error(format!("Submission failed: {e}"));
            }
        }
    }
}
