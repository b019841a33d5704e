//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::Focus;
use crate::ui::theme;

/// Render a standard help bar with the given text.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

pub const HELP_TEXT_POSTS: &str =
    "s: select | e: edit | d: delete | u: restore | n: new | .: deleted | Tab: comments | ?: help";

pub const HELP_TEXT_COMMENTS: &str =
    "e: edit | d: delete | u: restore | n: new | .: deleted | o: selected post only | Tab: posts | ?: help";

pub const HELP_TEXT_FORM: &str = "Tab: next field | Enter: submit | Esc: cancel";

pub const HELP_TEXT_COMMENT_FORM: &str =
    "Tab: next field | ←/→: pick post | Enter: submit | Esc: cancel";

/// Hint line for whatever has focus on the main screen
pub fn main_help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Posts => HELP_TEXT_POSTS,
        Focus::Comments => HELP_TEXT_COMMENTS,
        Focus::PostForm => HELP_TEXT_FORM,
        Focus::CommentForm => HELP_TEXT_COMMENT_FORM,
    }
}
