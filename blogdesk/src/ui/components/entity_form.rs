use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::events::Control;
use crate::state::forms::{CommentField, CommentFormState, FormMode, PostField};
use crate::state::view::{escape_text, post_option_label};
use crate::state::AppState;
use crate::ui::theme;
use blog_api::endpoints::posts::Post;

/// Enabled state of a form's Create / Update / Cancel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormButtons {
    pub create: bool,
    pub update: bool,
    pub cancel: bool,
}

/// A button whose request is in flight stays disabled until it finishes.
pub fn form_buttons(mode: &FormMode, create_busy: bool, update_busy: bool) -> FormButtons {
    FormButtons {
        create: mode.can_create() && !create_busy,
        update: mode.can_update() && !update_busy,
        cancel: mode.can_cancel(),
    }
}

pub fn render_post_form(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let form = &state.post_form;
    let buttons = form_buttons(
        &form.mode,
        state.is_busy(&Control::PostCreate),
        state.is_busy(&Control::PostUpdate),
    );

    let lines = vec![
        field_line("Title", &form.title, focused && form.field == PostField::Title),
        field_line("Views", &form.views, focused && form.field == PostField::Views),
        buttons_line(buttons),
    ];

    render_form_block(f, area, form_title("post", &form.mode), lines, focused);
}

pub fn render_comment_form(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let form = &state.comment_form;
    let buttons = form_buttons(
        &form.mode,
        state.is_busy(&Control::CommentCreate),
        state.is_busy(&Control::CommentUpdate),
    );

    let lines = vec![
        field_line("Text", &form.text, focused && form.field == CommentField::Text),
        field_line(
            "Post ID",
            &post_reference_label(form, &state.posts),
            focused && form.field == CommentField::PostId,
        ),
        buttons_line(buttons),
    ];

    render_form_block(f, area, form_title("comment", &form.mode), lines, focused);
}

fn post_reference_label(form: &CommentFormState, posts: &[Post]) -> String {
    post_option_label(posts, &form.post_id)
}

fn form_title(entity: &str, mode: &FormMode) -> String {
    match mode {
        FormMode::Idle => format!(" New {entity} (n) "),
        FormMode::Create => format!(" New {entity} "),
        FormMode::Edit(id) => format!(" Edit {entity} {} ", escape_text(id.as_str())),
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let (value_style, cursor) = if focused {
        (theme::form_field_focused_style(), "▏")
    } else {
        (theme::form_field_style(), "")
    };

    Line::from(vec![
        Span::styled(format!("{:8}", label), theme::header_style()),
        Span::styled(format!("{}{}", escape_text(value), cursor), value_style),
    ])
}

fn buttons_line(buttons: FormButtons) -> Line<'static> {
    Line::from(vec![
        Span::styled("[Create]", theme::action_style(buttons.create)),
        Span::raw(" "),
        Span::styled("[Update]", theme::action_style(buttons.update)),
        Span::raw(" "),
        Span::styled("[Cancel]", theme::action_style(buttons.cancel)),
    ])
}

fn render_form_block(
    f: &mut Frame,
    area: Rect,
    title: String,
    lines: Vec<Line<'static>>,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            theme::accent_border_style()
        } else {
            Style::default()
        });

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_form_only_allows_create() {
        let buttons = form_buttons(&FormMode::Idle, false, false);
        assert_eq!(
            buttons,
            FormButtons {
                create: true,
                update: false,
                cancel: false
            }
        );
    }

    #[test]
    fn test_edit_form_disables_create() {
        let buttons = form_buttons(&FormMode::Edit("5".into()), false, false);
        assert!(!buttons.create);
        assert!(buttons.update);
        assert!(buttons.cancel);
    }

    #[test]
    fn test_busy_button_is_disabled() {
        let buttons = form_buttons(&FormMode::Create, true, false);
        assert!(!buttons.create);
        assert!(buttons.cancel);
    }

    #[test]
    fn test_form_title_escapes_id() {
        assert_eq!(
            form_title("post", &FormMode::Edit("a\u{1b}b".into())),
            " Edit post a\u{241b}b "
        );
        assert_eq!(form_title("comment", &FormMode::Idle), " New comment (n) ");
    }

    #[test]
    fn test_post_reference_shows_option_label() {
        let mut form = CommentFormState::default();
        let posts = vec![Post::new("3", "hello", 0)];
        assert_eq!(post_reference_label(&form, &posts), "-- Select Post ID --");

        form.post_id = "3".to_string();
        assert_eq!(post_reference_label(&form, &posts), "3 - hello");
    }
}
