//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the renderer needs to know about one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    pub required: bool,
    /// Shown greyed out and without a cursor
    pub read_only: bool,
    /// Value is picked with arrows rather than typed
    pub choice: bool,
}

impl FieldView {
    fn title(&self) -> String {
        if self.required {
            format!(" {} * ", self.label)
        } else {
            format!(" {} ", self.label)
        }
    }

    fn display_value(&self, is_active: bool) -> String {
        if self.value.is_empty() && !is_active {
            "(empty)".to_string()
        } else if self.choice && is_active {
            let shown = if self.value.is_empty() {
                "choose"
            } else {
                self.value.as_str()
            };
            format!("◀ {shown} ▶")
        } else {
            self.value.clone()
        }
    }
}

/// Draw a single-line form field in a bordered box
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView, is_active: bool) {
    let style = if field.read_only {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active && !field.read_only && !field.choice {
        "▌"
    } else {
        ""
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(field.display_value(is_active), style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(field.title())
        .borders(Borders::ALL)
        .border_style(border_style);
    if field.read_only {
        block = block.title_bottom(" same as present ");
    }

    frame.render_widget(content.block(block), area);
}

/// Draw a dim one-line hint under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
