//! Layout components (step header, status bar)

use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldKind, View, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows used by the step header (borders + tabs)
pub const HEADER_HEIGHT: u16 = 3;

/// Rows used by one bordered form field
pub const FIELD_HEIGHT: u16 = 3;

/// Rows around the field list: form borders, help line, status bar
const FORM_CHROME: u16 = 2 + 1 + 1;

/// How many fields fit in a terminal of the given height
pub fn fields_in_view(terminal_height: u16) -> usize {
    let rows = terminal_height.saturating_sub(HEADER_HEIGHT + FORM_CHROME);
    usize::from(rows / FIELD_HEIGHT).max(1)
}

/// Split the screen into the step header and the main content.
/// The bottom line is left for the status bar.
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Step tabs
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the five steps with the current one highlighted
pub fn draw_step_header(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.wizard.step();
    let submitted = matches!(app.state.current_view, View::Submitted);

    let mut spans = Vec::new();
    for (idx, step) in WizardStep::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if submitted {
            Style::default().fg(Color::Green)
        } else if *step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.number() < current.number() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{}. {}", step.number(), step.title()),
            style,
        ));
    }

    let block = Block::default()
        .title(" College Admission ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Submission readiness
    let marker = if app.state.submitting {
        Span::styled(" ◌ ", Style::default().fg(Color::Yellow))
    } else if app.state.wizard.is_ready_to_submit() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Gray))
    };
    spans.push(marker);

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Black)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view and field
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Submitted => "Enter/n:new application".to_string(),
        View::Wizard => {
            let field_hint = match app.state.wizard.active_field_id().map(|f| f.kind()) {
                Some(FieldKind::Choice(_)) | Some(FieldKind::AdmissionType) => "←/→:choose  ",
                Some(FieldKind::Toggle) => "Space:toggle  ",
                Some(FieldKind::File(_)) => "Enter:attach  Del:remove  ",
                _ => "",
            };
            let last = app.state.wizard.step().is_last();
            format!(
                "Tab:next  {field_hint}{NEXT_SHORTCUT}:{}  {BACK_SHORTCUT}:back  {SUBMIT_SHORTCUT}:{}",
                if last { "check" } else { "continue" },
                if last { "submit" } else { "continue" },
            )
        }
    }
}
