//! Admission wizard and receipt screens

use super::forms::{draw_field, draw_help_text, FieldView};
use super::layout::FIELD_HEIGHT;
use crate::app::App;
use crate::state::{FieldId, FieldKind, Form, WizardForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_view(form: &WizardForm, field: FieldId) -> FieldView {
    let kind = field.kind();
    FieldView {
        label: field.label(),
        value: form.display_value(field),
        required: field.is_required(&form.draft),
        read_only: field.is_read_only(&form.draft),
        choice: matches!(
            kind,
            FieldKind::Choice(_) | FieldKind::AdmissionType | FieldKind::Toggle
        ),
    }
}

/// Draw the fields of the current step, scrolled to keep the active one visible
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.wizard;
    let step = form.step();
    let fields = form.fields();

    let title = if app.state.submitting {
        format!(" Step {} of 5: {} (submitting…) ", step.number(), step.title())
    } else {
        format!(" Step {} of 5: {} ", step.number(), step.title())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let list_area = chunks[0];

    let offset = form.scroll_offset();
    let visible = usize::from(list_area.height / FIELD_HEIGHT);
    for (row, field) in fields.iter().enumerate().skip(offset).take(visible) {
        let field_area = Rect {
            x: list_area.x,
            y: list_area.y + ((row - offset) as u16) * FIELD_HEIGHT,
            width: list_area.width,
            height: FIELD_HEIGHT,
        };
        draw_field(
            frame,
            field_area,
            &field_view(form, *field),
            row == form.active_field(),
        );
    }

    let more_below = offset + visible < fields.len();
    let position = format!(
        "Field {} of {}{}",
        form.active_field() + 1,
        fields.len(),
        if more_below { "  ↓ more" } else { "" }
    );
    draw_help_text(frame, chunks[1], &position);
}

/// Draw the confirmation shown after a successful submission
pub fn draw_receipt(frame: &mut Frame, area: Rect, app: &App) {
    let receipt = app.state.receipt.clone().unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            "Application submitted",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(message) = receipt.message {
        lines.push(Line::from(message));
    }
    if let Some(id) = receipt.application_id {
        lines.push(Line::from(vec![
            Span::styled("Application ID: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                id,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to start a new application",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Submitted ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AddressPart, ApplicationDraft};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_permanent_address_read_only_while_mirrored() {
        let mut form = WizardForm::new();
        form.draft = ApplicationDraft::new();
        form.draft.set_same_as_present(true);
        let view = field_view(&form, FieldId::Permanent(AddressPart::District));
        assert!(view.read_only);

        form.draft.set_same_as_present(false);
        let view = field_view(&form, FieldId::Permanent(AddressPart::District));
        assert!(!view.read_only);
    }

    #[test]
    fn test_choice_fields_flagged() {
        let form = WizardForm::new();
        assert!(field_view(&form, FieldId::Gender).choice);
        assert!(field_view(&form, FieldId::AdmissionType).choice);
        assert!(!field_view(&form, FieldId::NameEnglish).choice);
    }

    #[test]
    fn test_field_view_uses_draft_value() {
        let mut form = WizardForm::new();
        form.draft.name_english = "Rahim Uddin".to_string();
        let view = field_view(&form, FieldId::NameEnglish);
        assert_eq!(view.value, "Rahim Uddin");
        assert!(view.required);
    }

    #[test]
    fn test_title_shows_submitting_state() {
        use crate::api::MockAdmissionClientTrait;
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = App::with_client(Box::new(MockAdmissionClientTrait::new()));
        app.state.submitting = true;

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &app);
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("(submitting…)"), "{rendered}");
    }
}
