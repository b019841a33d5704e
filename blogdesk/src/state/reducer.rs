use super::{AppState, Focus, LoadingState};
use crate::events::{Control, DataEvent};

pub const BOOTSTRAP_FAILURE: &str = "Failed to load data. Please ensure JSON Server is running.";

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::DataLoaded { posts, comments } => {
            tracing::info!(
                "Loaded {} posts and {} comments",
                posts.len(),
                comments.len()
            );
            state.posts = posts;
            state.comments = comments;
            state.load_status = LoadingState::Loaded;

            // The selected post may have disappeared on the server.
            let vanished = state
                .selected_post_id
                .clone()
                .filter(|id| state.posts.iter().all(|p| p.id != *id));
            match vanished {
                Some(id) => {
                    tracing::debug!("Selected post {} no longer exists, clearing selection", id);
                    state.set_selection(None);
                    state.comment_form.forget_post(&id);
                }
                None => state.set_selection(state.selected_post_id.clone()),
            }

            state.clamp_cursors();
        }

        DataEvent::MutationApplied { control } => match control {
            Control::PostCreate | Control::PostUpdate => {
                state.post_form.reset();
                if state.focus == Focus::PostForm {
                    state.focus = Focus::Posts;
                }
            }
            Control::CommentCreate | Control::CommentUpdate => {
                state.comment_form.reset(state.selected_post_id.as_ref());
                if state.focus == Focus::CommentForm {
                    state.focus = Focus::Comments;
                }
            }
            _ => {
                tracing::debug!("{:?} applied", control);
            }
        },

        DataEvent::RequestFailed { control, error } => {
            tracing::error!("{:?} failed: {}", control, error);
            state.load_status = LoadingState::Error(error.to_string());
            let message = match control {
                Control::Bootstrap => format!("{BOOTSTRAP_FAILURE}\n{error}"),
                _ => error.to_string(),
            };
            state.notify(message);
        }

        DataEvent::ControlReleased { control } => {
            if !state.busy.remove(&control) {
                tracing::warn!("Released {:?} which was not busy", control);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormMode;
    use blog_api::endpoints::{comments::Comment, posts::Post};
    use blog_api::RequestError;

    fn loaded(posts: Vec<Post>, comments: Vec<Comment>) -> DataEvent {
        DataEvent::DataLoaded { posts, comments }
    }

    #[test]
    fn test_data_loaded_replaces_collections() {
        let mut state = AppState::new();
        state.posts = vec![Post::new("9", "old", 0)];

        reduce_data_event(
            &mut state,
            loaded(
                vec![Post::new("1", "a", 0), Post::new("2", "b", 0)],
                vec![Comment::new("1", "c", "1")],
            ),
        );

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.comments.len(), 1);
        assert_eq!(state.load_status, LoadingState::Loaded);
        assert_eq!(state.posts_table.borrow().selected(), Some(0));
    }

    #[test]
    fn test_vanished_selection_is_cleared() {
        let mut state = AppState::new();
        state.set_selection(Some("7".into()));

        reduce_data_event(&mut state, loaded(vec![Post::new("1", "a", 0)], vec![]));

        assert_eq!(state.selected_post_id, None);
        assert_eq!(state.comment_form.post_id, "");
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_reload_without_selection_keeps_post_reference() {
        let mut state = AppState::new();
        state.comment_form.start_create();
        state.comment_form.post_id = "1".to_string();

        reduce_data_event(&mut state, loaded(vec![Post::new("1", "a", 0)], vec![]));

        assert_eq!(state.selected_post_id, None);
        assert_eq!(state.comment_form.post_id, "1");
    }

    #[test]
    fn test_surviving_selection_is_kept() {
        let mut state = AppState::new();
        state.set_selection(Some("1".into()));
        state.comment_form.post_id = "typed".to_string();

        reduce_data_event(&mut state, loaded(vec![Post::new("1", "a", 0)], vec![]));

        assert_eq!(state.selected_post_id, Some("1".into()));
        assert_eq!(state.comment_form.post_id, "1");
    }

    #[test]
    fn test_mutation_applied_resets_matching_form() {
        let mut state = AppState::new();
        state.post_form.start_edit(&Post::new("3", "x", 5));
        state.focus = Focus::PostForm;
        state.comment_form.start_create();
        state.comment_form.text = "draft".to_string();

        reduce_data_event(
            &mut state,
            DataEvent::MutationApplied {
                control: Control::PostUpdate,
            },
        );

        assert_eq!(state.post_form.mode, FormMode::Idle);
        assert_eq!(state.post_form.views, "0");
        assert_eq!(state.focus, Focus::Posts);
        assert_eq!(state.comment_form.text, "draft");
    }

    #[test]
    fn test_bootstrap_failure_message() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::RequestFailed {
                control: Control::Bootstrap,
                error: RequestError::new("GET", "/posts", Some(404)),
            },
        );

        assert_eq!(
            state.notifications.front().map(String::as_str),
            Some("Failed to load data. Please ensure JSON Server is running.\nGET /posts fail: 404")
        );
        assert!(matches!(state.load_status, LoadingState::Error(_)));
    }

    #[test]
    fn test_request_failure_keeps_form() {
        let mut state = AppState::new();
        state.post_form.start_create();
        state.post_form.title = "Hello".to_string();

        reduce_data_event(
            &mut state,
            DataEvent::RequestFailed {
                control: Control::PostCreate,
                error: RequestError::new("POST", "/posts", Some(500)),
            },
        );

        assert_eq!(state.post_form.mode, FormMode::Create);
        assert_eq!(state.post_form.title, "Hello");
        assert_eq!(
            state.notifications.front().map(String::as_str),
            Some("POST /posts fail: 500")
        );
    }

    #[test]
    fn test_control_released() {
        let mut state = AppState::new();
        state.claim(Control::Reload);
        reduce_data_event(
            &mut state,
            DataEvent::ControlReleased {
                control: Control::Reload,
            },
        );
        assert!(state.busy.is_empty());
    }
}
