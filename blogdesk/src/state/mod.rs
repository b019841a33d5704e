pub mod forms;
pub mod reducer;
pub mod validators;
pub mod view;

use crate::events::Control;
use crate::ui::screens::Screen;
use blog_api::endpoints::{comments::Comment, posts::Post, EntityId};
use blog_api::BaseUrl;
use forms::{CommentFormState, PostFormState};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Which part of the main screen receives keys.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Posts,
    Comments,
    PostForm,
    CommentForm,
}

/// Client-side visibility toggles. All off by default.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub show_deleted_posts: bool,
    pub show_deleted_comments: bool,
    pub only_selected_post: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // Data, replaced wholesale on every reload
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,

    // Selection and forms
    pub selected_post_id: Option<EntityId>,
    pub post_form: PostFormState,
    pub comment_form: CommentFormState,

    // UI state
    pub filters: Filters,
    pub focus: Focus,
    pub posts_table: RefCell<TableState>,
    pub comments_table: RefCell<TableState>,
    pub busy: HashSet<Control>,
    pub notifications: VecDeque<String>,
    pub load_status: LoadingState,
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // Backend location, shared with the API client
    pub api_base: BaseUrl,
    pub base_url_input: Option<String>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_base_url(BaseUrl::default())
    }

    pub fn with_base_url(api_base: BaseUrl) -> Self {
        Self {
            history: vec![Screen::Main],

            posts: Vec::new(),
            comments: Vec::new(),

            selected_post_id: None,
            post_form: PostFormState::default(),
            comment_form: CommentFormState::default(),

            filters: Filters::default(),
            focus: Focus::default(),
            posts_table: RefCell::default(),
            comments_table: RefCell::default(),
            busy: HashSet::new(),
            notifications: VecDeque::new(),
            load_status: LoadingState::default(),
            help_visible: false,
            pending_key: None,

            api_base,
            base_url_input: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.load_status {
            LoadingState::Loading(ref mut throbber_state) => Some(throbber_state),
            _ => None,
        }
    }

    /// Set or clear the active post. A new selection becomes the comment
    /// form's post reference unless a comment is being edited; clearing the
    /// selection leaves the reference as it is.
    pub fn set_selection(&mut self, post_id: Option<EntityId>) {
        tracing::debug!("Selected post: {:?}", post_id);
        self.selected_post_id = post_id;
        if let Some(id) = &self.selected_post_id {
            if !self.comment_form.mode.is_editing() {
                self.comment_form.post_id = id.to_string();
            }
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        let id = self.selected_post_id.as_ref()?;
        self.posts.iter().find(|p| p.id == *id)
    }

    pub fn find_post(&self, post_id: &EntityId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == *post_id)
    }

    pub fn find_comment(&self, comment_id: &EntityId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *comment_id)
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.busy.contains(control)
    }

    /// Mark a control busy. Returns false if it already was.
    pub fn claim(&mut self, control: Control) -> bool {
        self.busy.insert(control)
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.notifications.push_back(message);
    }

    pub fn visible_posts(&self) -> Vec<&Post> {
        view::visible_posts(&self.posts, &self.filters)
    }

    pub fn visible_comments(&self) -> view::CommentsView<'_> {
        view::visible_comments(
            &self.comments,
            &self.filters,
            self.selected_post_id.as_ref(),
        )
    }

    /// Post under the cursor in the posts pane.
    pub fn cursor_post(&self) -> Option<&Post> {
        let index = self.posts_table.borrow().selected()?;
        let rows = self.visible_posts();
        rows.get(index.min(rows.len().saturating_sub(1))).copied()
    }

    /// Comment under the cursor in the comments pane.
    pub fn cursor_comment(&self) -> Option<&Comment> {
        let index = self.comments_table.borrow().selected()?;
        let view = self.visible_comments();
        let rows = view.rows();
        rows.get(index.min(rows.len().saturating_sub(1))).copied()
    }

    /// Keep both cursors on a visible row after the row sets change.
    pub fn clamp_cursors(&self) {
        clamp(&self.posts_table, self.visible_posts().len());
        clamp(&self.comments_table, self.visible_comments().len());
    }
}

fn clamp(table: &RefCell<TableState>, len: usize) {
    let mut table = table.borrow_mut();
    match table.selected() {
        _ if len == 0 => table.select(None),
        Some(i) if i >= len => table.select(Some(len - 1)),
        None => table.select(Some(0)),
        Some(_) => {}
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            match table_state.selected() {
                None | Some(0) => table_state.select(Some(num_items - 1)),
                Some(i) => table_state.select(Some(i.min(num_items) - 1)),
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

/// Scrolling applies to whichever list pane has focus.
impl Scrollable for AppState {
    fn num_items(&self) -> usize {
        match self.focus {
            Focus::Comments => self.visible_comments().len(),
            _ => self.visible_posts().len(),
        }
    }

    fn table_state(&self) -> &RefCell<TableState> {
        match self.focus {
            Focus::Comments => &self.comments_table,
            _ => &self.posts_table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms::FormMode;

    #[test]
    fn test_selection_syncs_comment_post_reference() {
        let mut state = AppState::new();
        state.set_selection(Some("3".into()));
        assert_eq!(state.comment_form.post_id, "3");

        state.set_selection(None);
        assert_eq!(state.selected_post_id, None);
        assert_eq!(state.comment_form.post_id, "3");
    }

    #[test]
    fn test_selection_leaves_edited_comment_alone() {
        let mut state = AppState::new();
        state.comment_form.start_edit(&Comment::new("5", "hey", "2"));
        state.set_selection(Some("3".into()));
        assert_eq!(state.comment_form.mode, FormMode::Edit("5".into()));
        assert_eq!(state.comment_form.post_id, "2");
    }

    #[test]
    fn test_claim_is_exclusive_per_control() {
        let mut state = AppState::new();
        assert!(state.claim(Control::Reload));
        assert!(!state.claim(Control::Reload));
        assert!(state.claim(Control::PostCreate));
        assert!(state.is_busy(&Control::Reload));
    }

    #[test]
    fn test_scrolling_wraps_in_focused_pane() {
        let mut state = AppState::new();
        state.posts = vec![Post::new("1", "a", 0), Post::new("2", "b", 0)];
        state.clamp_cursors();
        assert_eq!(state.posts_table.borrow().selected(), Some(0));

        state.select_next();
        assert_eq!(state.cursor_post().map(|p| p.id.as_str()), Some("2"));
        state.select_next();
        assert_eq!(state.cursor_post().map(|p| p.id.as_str()), Some("1"));
        state.select_prev();
        assert_eq!(state.cursor_post().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_clamp_cursors_after_rows_disappear() {
        let state = AppState::new();
        state.posts_table.borrow_mut().select(Some(4));
        state.clamp_cursors();
        assert_eq!(state.posts_table.borrow().selected(), None);
    }
}
