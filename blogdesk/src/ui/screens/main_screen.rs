use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::view::{
    self, comment_row_actions, escape_text, post_row_actions, CommentsView, RowActions,
};
use crate::state::{AppState, Focus, LoadingState};
use crate::ui::{
    components::{empty_state, entity_form, help_bar, screen_title},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &AppState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());
    let panes = layouts::panes_layout(content_area);

    render_title(f, title_area, state);

    render_posts(f, panes.posts, state);
    entity_form::render_post_form(f, panes.post_form, state, state.focus == Focus::PostForm);

    let comments = state.visible_comments();
    render_comment_count(f, panes.comment_count, &comments);
    render_comments(f, panes.comments, state, &comments);
    entity_form::render_comment_form(
        f,
        panes.comment_form,
        state,
        state.focus == Focus::CommentForm,
    );

    help_bar::render_help_bar(f, help_area, help_bar::main_help_text(state.focus));
}

fn render_title(f: &mut Frame, area: Rect, state: &AppState) {
    let selection = view::selection_label(state.selected_post_id.as_ref(), &state.posts);
    let selection_style = if state.selected_post_id.is_some() {
        theme::active_post_style()
    } else {
        theme::help_text_style()
    };

    let detail = Line::from(vec![
        Span::styled(escape_text(&selection), selection_style),
        Span::styled(" • ", theme::help_text_style()),
        Span::styled(escape_text(&state.api_base.raw()), theme::help_text_style()),
    ]);

    screen_title::render_screen_title(f, area, "blogdesk", Some(detail), &state.load_status);
}

fn render_posts(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Posts;
    let posts = state.visible_posts();

    if posts.is_empty() {
        if is_first_load(state) {
            empty_state::render_loading_state(f, area, " Posts ", "Loading posts...");
        } else {
            empty_state::render_empty_state(
                f,
                area,
                " Posts ",
                view::NO_POSTS,
                theme::pane_border_style(focused),
            );
        }
        return;
    }

    let rows: Vec<Row> = posts
        .iter()
        .map(|post| {
            let is_active = state.selected_post_id.as_ref() == Some(&post.id);
            let style = if post.is_deleted {
                theme::deleted_row_style()
            } else if is_active {
                theme::active_post_style()
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(escape_text(&view::post_row_label(post))),
                Cell::from(escape_text(&view::post_row_meta(post))),
                Cell::from(actions_line(post_row_actions(post, &state.busy))),
            ])
            .style(style)
        })
        .collect();

    let title = if state.filters.show_deleted_posts {
        format!(" Posts ({}, incl. deleted) ", posts.len())
    } else {
        format!(" Posts ({}) ", posts.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(24),
            Constraint::Length(7),
        ],
    )
    .header(header(["Post", "Details", "Actions"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::pane_border_style(focused))
            .title(title),
    )
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.posts_table.borrow_mut());
}

fn render_comment_count(f: &mut Frame, area: Rect, comments: &CommentsView<'_>) {
    let count = Paragraph::new(comments.count_label()).style(theme::help_text_style());
    f.render_widget(count, area);
}

fn render_comments(f: &mut Frame, area: Rect, state: &AppState, comments: &CommentsView<'_>) {
    let focused = state.focus == Focus::Comments;
    let border_style = theme::pane_border_style(focused);

    let rows = match comments {
        CommentsView::NeedsSelection => {
            empty_state::render_empty_state(
                f,
                area,
                " Comments ",
                view::SELECT_POST_PROMPT,
                border_style,
            );
            return;
        }
        CommentsView::Rows(rows) if rows.is_empty() => {
            if is_first_load(state) {
                empty_state::render_loading_state(f, area, " Comments ", "Loading comments...");
            } else {
                empty_state::render_empty_state(
                    f,
                    area,
                    " Comments ",
                    view::NO_COMMENTS,
                    border_style,
                );
            }
            return;
        }
        CommentsView::Rows(rows) => rows,
    };

    let rows: Vec<Row> = rows
        .iter()
        .map(|comment| {
            let style = if comment.is_deleted {
                theme::deleted_row_style()
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(escape_text(&view::comment_row_label(comment))),
                Cell::from(escape_text(&view::comment_row_meta(comment))),
                Cell::from(actions_line(comment_row_actions(comment, &state.busy))),
            ])
            .style(style)
        })
        .collect();

    let title = if state.filters.only_selected_post {
        " Comments (active post) "
    } else {
        " Comments "
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(24),
            Constraint::Length(7),
        ],
    )
    .header(header(["Comment", "Details", "Actions"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    )
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.comments_table.borrow_mut());
}

fn header(titles: [&'static str; 3]) -> Row<'static> {
    Row::new(titles.map(Cell::from))
        .style(theme::header_style())
        .underlined()
}

/// Key hints for a row, dimmed when the action is disabled.
fn actions_line(actions: RowActions) -> Line<'static> {
    let mut spans = Vec::new();
    if actions.select {
        spans.push(Span::styled("s", theme::action_style(true)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("e", theme::action_style(actions.edit)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled("d", theme::action_style(actions.delete)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled("u", theme::action_style(actions.restore)));
    Line::from(spans)
}

fn is_first_load(state: &AppState) -> bool {
    matches!(state.load_status, LoadingState::Loading(..))
        && state.posts.is_empty()
        && state.comments.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_api::endpoints::{comments::Comment, posts::Post};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_collections_show_placeholders() {
        let mut state = AppState::new();
        state.load_status = LoadingState::Loaded;
        let screen = draw(&state);
        assert!(screen.contains(view::NO_POSTS));
        assert!(screen.contains(view::NO_COMMENTS));
        assert!(screen.contains("No post selected"));
        assert!(screen.contains("Total comments: 0"));
    }

    #[test]
    fn test_only_selected_without_selection_prompts() {
        let mut state = AppState::new();
        state.load_status = LoadingState::Loaded;
        state.filters.only_selected_post = true;
        let screen = draw(&state);
        assert!(screen.contains(view::SELECT_POST_PROMPT));
        assert!(screen.contains(view::NO_SELECTION_COUNT));
    }

    #[test]
    fn test_rows_are_escaped() {
        let mut state = AppState::new();
        state.posts = vec![Post::new("1", "evil\u{1b}[31m", 3)];
        state.comments = vec![Comment::new("2", "<b>hi</b>", "1")];
        state.clamp_cursors();

        let screen = draw(&state);
        assert!(screen.contains("1 — evil\u{241b}[31m"));
        assert!(screen.contains("2 — <b>hi</b>"));
        assert!(screen.contains("views: 3"));
        assert!(screen.contains("postId: 1"));
    }
}
