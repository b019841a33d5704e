use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use super::popup::{self, PopupKind};
use crate::ui::{screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = popup::render_popup(f, PopupKind::Help, " Help ");

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Main => {
            items.push(("--- Posts ---", ""));
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("s/Enter", "Make the post active"));
            items.push(("e", "Edit post"));
            items.push(("d", "Soft-delete post"));
            items.push(("u", "Restore post"));
            items.push(("n", "New post"));
            items.push((".", "Toggle showing deleted posts"));
            items.push(("", ""));
            items.push(("--- Comments ---", ""));
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("e", "Edit comment"));
            items.push(("d", "Soft-delete comment"));
            items.push(("u", "Restore comment"));
            items.push(("n", "New comment"));
            items.push((".", "Toggle showing deleted comments"));
            items.push(("o", "Only comments of the active post"));
            items.push(("", ""));
            items.push(("--- Forms ---", ""));
            items.push(("Tab/Shift-Tab", "Next/previous field"));
            items.push(("←/→", "Pick post (Post ID field)"));
            items.push(("Enter", "Create or update"));
            items.push(("Esc", "Cancel"));
            items.push(("", ""));
            items.push(("Tab", "Switch between posts and comments"));
            items.push(("r", "Reload posts and comments"));
            items.push(("b", "Edit API base URL"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("h/←/Esc", "Back to posts"));
        }
    }

    // Global help
    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
