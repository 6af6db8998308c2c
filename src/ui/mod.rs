//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod wizard;

pub use layout::fields_in_view;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_step_header(frame, header_area, app);

    match app.state.current_view {
        View::Wizard => wizard::draw(frame, main_area, app),
        View::Submitted => wizard::draw_receipt(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog sits above everything else
    if let Some(error) = app.state.current_error() {
        let pending = app.state.error_queue.len().saturating_sub(1);
        render_error_dialog(frame, error, pending);
    }
}
