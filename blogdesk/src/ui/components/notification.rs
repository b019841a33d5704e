use ratatui::{
    layout::{Alignment, Margin},
    style::Modifier,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::popup::{self, PopupKind};
use crate::state::view::escape_text;
use crate::ui::theme;

/// Blocking message popup; stays up until dismissed with Enter or Esc.
pub fn render_notification(f: &mut Frame, message: &str, queued: usize) {
    let title = if queued > 1 {
        format!(" Error (1 of {}) ", queued)
    } else {
        " Error ".to_string()
    };

    let inner = popup::render_popup(f, PopupKind::Notification, &title);
    let body_area = inner.inner(Margin::new(1, 1));

    // Messages may span lines; escape each line separately to keep the breaks.
    let lines: Vec<Line> = message
        .lines()
        .map(|line| Line::from(escape_text(line)))
        .collect();

    let body = Paragraph::new(lines)
        .style(theme::loading_style().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, body_area);
}
