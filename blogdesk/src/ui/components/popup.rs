use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::{layouts, theme};

/// Modal overlays drawn above the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Help,
    Notification,
    BaseUrlInput,
}

impl PopupKind {
    fn size(self) -> (u16, u16) {
        match self {
            PopupKind::Help => layouts::popup_sizes::LARGE,
            PopupKind::Notification => layouts::popup_sizes::MEDIUM,
            PopupKind::BaseUrlInput => layouts::popup_sizes::SMALL,
        }
    }

    fn border_style(self) -> Style {
        match self {
            PopupKind::Help => theme::accent_border_style(),
            PopupKind::Notification => theme::danger_border_style(),
            PopupKind::BaseUrlInput => theme::info_border_style(),
        }
    }

    /// Keys that close the popup, shown in its bottom border.
    fn key_hint(self) -> &'static str {
        match self {
            PopupKind::Help => " ?/Esc close ",
            PopupKind::Notification => " Enter/Esc dismiss ",
            PopupKind::BaseUrlInput => " Enter apply · Esc cancel ",
        }
    }
}

/// Clear a centered area sized for `kind`, draw its border and return the
/// area left for content.
pub fn render_popup(f: &mut Frame, kind: PopupKind, title: &str) -> Rect {
    let (width, height) = kind.size();
    let area = layouts::centered_popup(width, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(kind.border_style())
        .title(Line::from(title).alignment(Alignment::Center))
        .title_bottom(
            Line::styled(kind.key_hint(), theme::help_text_style()).alignment(Alignment::Right),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}
