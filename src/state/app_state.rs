//! Application state definitions

use super::forms::WizardForm;
use crate::api::SubmissionReceipt;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Wizard,
    /// Shown after a successful submission
    Submitted,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub wizard: WizardForm,

    /// Errors waiting to be shown, oldest first
    pub error_queue: VecDeque<String>,

    /// True while the submit request is in flight
    pub submitting: bool,

    /// Server response for the last successful submission
    pub receipt: Option<SubmissionReceipt>,
}

impl AppState {
    /// Queue an error message for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Error currently displayed, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Dismiss the displayed error
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Drop the current draft and start over on step one
    pub fn start_new_application(&mut self) {
        self.wizard = WizardForm::new();
        self.current_view = View::Wizard;
        self.receipt = None;
    }
}
