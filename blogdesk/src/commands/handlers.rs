use crate::events::{AppCommand, Control};
use crate::input::{Key, KeyEvent};
use crate::state::{AppState, Focus};
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: a notification blocks everything until dismissed
    if !state.notifications.is_empty() {
        return match key {
            Key::Enter | Key::Esc => Some(AppCommand::DismissNotification),
            _ => None,
        };
    }

    // Priority 1: base URL editor
    if state.base_url_input.is_some() {
        return match key {
            Key::Enter => Some(AppCommand::CommitBaseUrl),
            Key::Esc => Some(AppCommand::CancelBaseUrl),
            Key::Backspace => Some(AppCommand::DeleteBaseUrlChar),
            _ => event.text_char().map(AppCommand::AppendBaseUrlChar),
        };
    }

    // Priority 2: help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 3: forms capture typing
    if matches!(state.current_screen(), Screen::Main) {
        match state.focus {
            Focus::PostForm => return handle_post_form_keys(event),
            Focus::CommentForm => return handle_comment_form_keys(event, state),
            Focus::Posts | Focus::Comments => {}
        }
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // 'g' followed by 'g' -> top of the list
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),
        (_, Key::Char('q')) => Some(AppCommand::Quit),
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Logs screen
        (Screen::Logs(..), Key::Left | Key::Char('h') | Key::Esc) => {
            Some(AppCommand::NavigateBack)
        }
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Home) => Some(AppCommand::ScrollLogsToTop),
        (Screen::Logs(..), Key::End) => Some(AppCommand::ScrollLogsToBottom),
        (Screen::Logs(..), _) => None,

        // Main screen, both panes
        (Screen::Main, Key::Char('r')) => Some(AppCommand::LoadAll {
            control: Control::Reload,
        }),
        (Screen::Main, Key::Char('b')) => Some(AppCommand::EditBaseUrl),
        (Screen::Main, Key::Tab | Key::BackTab) => Some(AppCommand::SwitchPane),
        (Screen::Main, Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Main, Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Main, Key::Home) => Some(AppCommand::NavigateToTop),
        (Screen::Main, Key::End) => Some(AppCommand::NavigateToBottom),

        (Screen::Main, _) => match state.focus {
            Focus::Comments => handle_comments_pane_keys(key, state),
            _ => handle_posts_pane_keys(key, state),
        },
    }
}

fn handle_posts_pane_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    match key {
        Key::Char('n') => Some(AppCommand::NewPost),
        Key::Char('.') => Some(AppCommand::ToggleShowDeletedPosts),
        Key::Char('s') | Key::Enter => state.cursor_post().map(|p| AppCommand::SelectPost {
            post_id: p.id.clone(),
        }),
        Key::Char('e') => state.cursor_post().map(|p| AppCommand::EditPost {
            post_id: p.id.clone(),
        }),
        Key::Char('d') => state.cursor_post().map(|p| AppCommand::SoftDeletePost {
            post_id: p.id.clone(),
        }),
        Key::Char('u') => state.cursor_post().map(|p| AppCommand::RestorePost {
            post_id: p.id.clone(),
        }),
        _ => None,
    }
}

fn handle_comments_pane_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    match key {
        Key::Char('n') => Some(AppCommand::NewComment),
        Key::Char('.') => Some(AppCommand::ToggleShowDeletedComments),
        Key::Char('o') => Some(AppCommand::ToggleOnlySelectedPost),
        Key::Char('e') => state.cursor_comment().map(|c| AppCommand::EditComment {
            comment_id: c.id.clone(),
        }),
        Key::Char('d') => state.cursor_comment().map(|c| AppCommand::SoftDeleteComment {
            comment_id: c.id.clone(),
        }),
        Key::Char('u') => state.cursor_comment().map(|c| AppCommand::RestoreComment {
            comment_id: c.id.clone(),
        }),
        _ => None,
    }
}

fn handle_post_form_keys(event: KeyEvent) -> Option<AppCommand> {
    match event.key {
        Key::Esc => Some(AppCommand::CancelPostForm),
        Key::Enter => Some(AppCommand::SubmitPostForm),
        _ => handle_field_editing(event),
    }
}

fn handle_comment_form_keys(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    use crate::state::forms::CommentField;

    match event.key {
        Key::Esc => Some(AppCommand::CancelCommentForm),
        Key::Enter => Some(AppCommand::SubmitCommentForm),
        Key::Left | Key::Right if state.comment_form.field == CommentField::PostId => {
            Some(AppCommand::CyclePostReference {
                forward: event.key == Key::Right,
            })
        }
        _ => handle_field_editing(event),
    }
}

fn handle_field_editing(event: KeyEvent) -> Option<AppCommand> {
    match event.key {
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        _ => event
            .text_char()
            .map(|c| AppCommand::AppendFormFieldChar { c }),
    }
}
