//! Shared screen title component with loading indicator.

use ratatui::prelude::Rect;
use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::LoadingState;
use crate::ui::{layouts, theme};

/// Render a title line: the bold title, optional secondary text, and the
/// loading indicator on the right.
pub fn render_screen_title(
    f: &mut Frame,
    area: Rect,
    title: &str,
    detail: Option<Line<'_>>,
    loading_state: &LoadingState,
) {
    let (text_area, indicator_area) = layouts::title_with_loading(area);

    let mut spans = vec![Span::styled(title.to_string(), theme::title_style())];
    if let Some(detail) = detail {
        spans.push(Span::raw("  "));
        spans.extend(detail.spans);
    }
    f.render_widget(Paragraph::new(Line::from(spans)), text_area);

    super::loading_indicator::render_loading_indicator(f, indicator_area, loading_state);
}
