//! Pure view model: which rows are visible, what they say, and which row
//! actions are enabled. Everything here is recomputed on every draw.

use super::Filters;
use crate::events::{Control, RowAction};
use blog_api::endpoints::{comments::Comment, posts::Post, EntityId};
use std::collections::HashSet;

pub const NO_POSTS: &str = "No posts available.";
pub const NO_COMMENTS: &str = "No comments available.";
pub const SELECT_POST_PROMPT: &str = "Please select a post in the posts list.";
pub const NO_SELECTION_COUNT: &str = "No post selected to filter comments.";
pub const POST_OPTION_PLACEHOLDER: &str = "-- Select Post ID --";

pub fn visible_posts<'a>(posts: &'a [Post], filters: &Filters) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| filters.show_deleted_posts || !p.is_deleted)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentsView<'a> {
    /// Only-selected-post filter is on but nothing is selected.
    NeedsSelection,
    Rows(Vec<&'a Comment>),
}

impl<'a> CommentsView<'a> {
    pub fn rows(&self) -> &[&'a Comment] {
        match self {
            CommentsView::NeedsSelection => &[],
            CommentsView::Rows(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn count_label(&self) -> String {
        match self {
            CommentsView::NeedsSelection => NO_SELECTION_COUNT.to_string(),
            CommentsView::Rows(rows) => format!("Total comments: {}", rows.len()),
        }
    }
}

pub fn visible_comments<'a>(
    comments: &'a [Comment],
    filters: &Filters,
    selected: Option<&EntityId>,
) -> CommentsView<'a> {
    let visible = comments
        .iter()
        .filter(|c| filters.show_deleted_comments || !c.is_deleted);

    if !filters.only_selected_post {
        return CommentsView::Rows(visible.collect());
    }

    match selected {
        None => CommentsView::NeedsSelection,
        Some(post_id) => CommentsView::Rows(visible.filter(|c| c.post_id == *post_id).collect()),
    }
}

/// Enabled state of the buttons on one row.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub select: bool,
    pub edit: bool,
    pub delete: bool,
    pub restore: bool,
}

pub fn post_row_actions(post: &Post, busy: &HashSet<Control>) -> RowActions {
    let control = |action| Control::PostRow {
        post_id: post.id.clone(),
        action,
    };

    RowActions {
        select: true,
        edit: !post.is_deleted,
        delete: !post.is_deleted && !busy.contains(&control(RowAction::Delete)),
        restore: post.is_deleted && !busy.contains(&control(RowAction::Restore)),
    }
}

pub fn comment_row_actions(comment: &Comment, busy: &HashSet<Control>) -> RowActions {
    let control = |action| Control::CommentRow {
        comment_id: comment.id.clone(),
        action,
    };

    RowActions {
        select: false,
        edit: !comment.is_deleted,
        delete: !comment.is_deleted && !busy.contains(&control(RowAction::Delete)),
        restore: comment.is_deleted && !busy.contains(&control(RowAction::Restore)),
    }
}

pub fn selection_label(selected: Option<&EntityId>, posts: &[Post]) -> String {
    let Some(post_id) = selected else {
        return "No post selected".to_string();
    };

    match posts.iter().find(|p| p.id == *post_id) {
        Some(post) if post.is_deleted => format!("Selected post {} (deleted)", post.id),
        Some(post) => format!("Selected post {}", post.id),
        None => format!("Selected post {post_id}"),
    }
}

/// One entry of the comment form's post picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOption {
    pub value: String,
    pub label: String,
}

pub fn post_options(posts: &[Post]) -> Vec<PostOption> {
    std::iter::once(PostOption {
        value: String::new(),
        label: POST_OPTION_PLACEHOLDER.to_string(),
    })
    .chain(posts.iter().map(|p| PostOption {
        value: p.id.to_string(),
        label: format!(
            "{} - {}{}",
            p.id,
            p.title,
            if p.is_deleted { " (Deleted)" } else { "" }
        ),
    }))
    .collect()
}

/// Label of the option matching the form's current post reference.
pub fn post_option_label(posts: &[Post], value: &str) -> String {
    post_options(posts)
        .into_iter()
        .find(|o| o.value == value.trim())
        .map(|o| o.label)
        .unwrap_or_else(|| value.to_string())
}

pub fn post_row_label(post: &Post) -> String {
    format!("{} — {}", post.id, post.title)
}

pub fn post_row_meta(post: &Post) -> String {
    if post.is_deleted {
        format!("views: {} • deleted", post.views)
    } else {
        format!("views: {}", post.views)
    }
}

pub fn comment_row_label(comment: &Comment) -> String {
    format!("{} — {}", comment.id, comment.text)
}

pub fn comment_row_meta(comment: &Comment) -> String {
    if comment.is_deleted {
        format!("postId: {} • deleted", comment.post_id)
    } else {
        format!("postId: {}", comment.post_id)
    }
}

/// Make backend text safe to print: control characters, including the ESC
/// that starts terminal escape sequences, become visible symbols.
pub fn escape_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{0}'..='\u{1f}' => char::from_u32(0x2400 + c as u32).unwrap_or('\u{fffd}'),
            '\u{7f}' => '\u{2421}',
            c if c.is_control() => '\u{fffd}',
            c => c,
        })
        .collect()
}
