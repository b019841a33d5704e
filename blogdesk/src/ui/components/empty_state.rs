//! Shared empty state component for consistent "no data" messages.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

/// Render an empty state message inside a titled block.
///
/// # Arguments
/// * `title` - The block title (e.g., "Posts", "Comments")
/// * `message` - The message to display (e.g., "No posts available.")
/// * `border_style` - Border style, accented when the pane has focus
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    border_style: Style,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::loading_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

    f.render_widget(paragraph, area);
}

/// Render a loading message while the first load is in flight.
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    render_empty_state(f, area, title, message, Style::default());
}
