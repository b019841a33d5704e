use ratatui::{
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::popup::{self, PopupKind};
use crate::state::view::escape_text;
use crate::ui::theme;

/// Popup for editing the API base URL.
pub fn render_base_url_input(f: &mut Frame, input: &str) {
    let inner = popup::render_popup(f, PopupKind::BaseUrlInput, " API base URL ");
    let padded = inner.inner(Margin::new(1, 1));
    let field_area = Rect {
        height: padded.height.min(1),
        ..padded
    };

    let field = Paragraph::new(Line::from(vec![
        Span::styled(escape_text(input), theme::form_field_focused_style()),
        Span::styled("▏", theme::loading_style()),
    ]));
    f.render_widget(field, field_area);
}
