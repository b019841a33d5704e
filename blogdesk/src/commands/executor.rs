use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::config;
use crate::events::{AppCommand, ApiJob, Control, Mutation, RowAction};
use crate::state::forms::FormMode;
use crate::state::validators::{validate_comment_form, validate_post_form};
use crate::state::view::{comment_row_actions, post_row_actions};
use crate::state::*;
use crate::ui::screens::Screen;
use crate::utils::ids::next_id;
use blog_api::endpoints::{comments::Comment, posts::Post, EntityId};
use blog_api::Request;
use throbber_widgets_tui::ThrobberState;

const LOGS_PAGE_SIZE: usize = 20;

/// Execute a command, spawning a background task for any resulting network job
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if let Some(job) = execute_command_sync(command, state) {
        tracing::debug!("Spawning {:?}", job.control);
        let data_loader = data_loader.clone();
        task_manager.spawn_load_task(async move {
            data_loader.run_job(job).await;
        });
    }
}

/// Apply a command to the state without side effects.
///
/// Returns the job to run when the command triggers a network call. The
/// job's control is already marked busy; the caller must make sure it is
/// eventually released with `DataEvent::ControlReleased`.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<ApiJob> {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let job = match command {
        // Simple state updates
        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
            None
        }
        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
            None
        }
        AppCommand::ClearPendingKey => {
            state.pending_key = None;
            None
        }
        AppCommand::DismissNotification => {
            state.notifications.pop_front();
            None
        }

        // List movement
        AppCommand::SelectNext => {
            if matches!(state.current_screen(), Screen::Main) {
                state.select_next();
            }
            None
        }
        AppCommand::SelectPrevious => {
            if matches!(state.current_screen(), Screen::Main) {
                state.select_prev();
            }
            None
        }
        AppCommand::NavigateToTop => {
            match state.current_screen_mut() {
                Screen::Logs(logs_state) => {
                    logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
                }
                Screen::Main => {
                    if state.num_items() > 0 {
                        state.table_state().borrow_mut().select(Some(0));
                    }
                }
            }
            None
        }
        AppCommand::NavigateToBottom => {
            match state.current_screen_mut() {
                Screen::Logs(logs_state) => logs_state.scroll_offset = 0,
                Screen::Main => {
                    let num_items = state.num_items();
                    if num_items > 0 {
                        state
                            .table_state()
                            .borrow_mut()
                            .select(Some(num_items - 1));
                    }
                }
            }
            None
        }
        AppCommand::SwitchPane => {
            state.focus = match state.focus {
                Focus::Posts => Focus::Comments,
                _ => Focus::Posts,
            };
            state.clamp_cursors();
            None
        }

        // Loading
        AppCommand::LoadAll { control } => claim_job(state, ApiJob::reload(control)),

        // Selection
        AppCommand::SelectPost { post_id } => {
            if state.find_post(&post_id).is_some() {
                state.set_selection(Some(post_id));
                state.clamp_cursors();
            } else {
                tracing::warn!("Cannot select unknown post {}", post_id);
            }
            None
        }

        // View toggles
        AppCommand::ToggleShowDeletedPosts => {
            state.filters.show_deleted_posts = !state.filters.show_deleted_posts;
            state.clamp_cursors();
            None
        }
        AppCommand::ToggleShowDeletedComments => {
            state.filters.show_deleted_comments = !state.filters.show_deleted_comments;
            state.clamp_cursors();
            None
        }
        AppCommand::ToggleOnlySelectedPost => {
            state.filters.only_selected_post = !state.filters.only_selected_post;
            state.clamp_cursors();
            None
        }

        // Post form
        AppCommand::NewPost => {
            state.post_form.start_create();
            state.focus = Focus::PostForm;
            None
        }
        AppCommand::EditPost { post_id } => {
            if let Some(post) = state.find_post(&post_id).cloned() {
                if post_row_actions(&post, &state.busy).edit {
                    state.post_form.start_edit(&post);
                    state.focus = Focus::PostForm;
                }
            }
            None
        }
        AppCommand::CancelPostForm => {
            state.post_form.reset();
            state.focus = Focus::Posts;
            None
        }
        AppCommand::SubmitPostForm => submit_post_form(state),

        // Comment form
        AppCommand::NewComment => {
            state.comment_form.start_create();
            state.focus = Focus::CommentForm;
            None
        }
        AppCommand::EditComment { comment_id } => {
            if let Some(comment) = state.find_comment(&comment_id).cloned() {
                if comment_row_actions(&comment, &state.busy).edit {
                    state.comment_form.start_edit(&comment);
                    state.focus = Focus::CommentForm;
                }
            }
            None
        }
        AppCommand::CyclePostReference { forward } => {
            state.comment_form.cycle_post_reference(&state.posts, forward);
            None
        }
        AppCommand::CancelCommentForm => {
            state.comment_form.reset(state.selected_post_id.as_ref());
            state.focus = Focus::Comments;
            None
        }
        AppCommand::SubmitCommentForm => submit_comment_form(state),

        // Field editing, routed to the focused form
        AppCommand::NavigateFormField { .. } => {
            // Both forms have two fields, so either direction toggles.
            match state.focus {
                Focus::PostForm => state.post_form.next_field(),
                Focus::CommentForm => state.comment_form.next_field(),
                Focus::Posts | Focus::Comments => {}
            }
            None
        }
        AppCommand::AppendFormFieldChar { c } => {
            match state.focus {
                Focus::PostForm => state.post_form.push_char(c),
                Focus::CommentForm => state.comment_form.push_char(c),
                Focus::Posts | Focus::Comments => {}
            }
            None
        }
        AppCommand::DeleteFormFieldChar => {
            match state.focus {
                Focus::PostForm => state.post_form.pop_char(),
                Focus::CommentForm => state.comment_form.pop_char(),
                Focus::Posts | Focus::Comments => {}
            }
            None
        }

        // Row actions
        AppCommand::SoftDeletePost { post_id } => post_row_job(state, post_id, RowAction::Delete),
        AppCommand::RestorePost { post_id } => post_row_job(state, post_id, RowAction::Restore),
        AppCommand::SoftDeleteComment { comment_id } => {
            comment_row_job(state, comment_id, RowAction::Delete)
        }
        AppCommand::RestoreComment { comment_id } => {
            comment_row_job(state, comment_id, RowAction::Restore)
        }

        // Base URL editing
        AppCommand::EditBaseUrl => {
            state.base_url_input = Some(state.api_base.raw());
            None
        }
        AppCommand::AppendBaseUrlChar(c) => {
            if let Some(input) = state.base_url_input.as_mut() {
                input.push(c);
            }
            None
        }
        AppCommand::DeleteBaseUrlChar => {
            if let Some(input) = state.base_url_input.as_mut() {
                input.pop();
            }
            None
        }
        AppCommand::CommitBaseUrl => {
            if let Some(input) = state.base_url_input.take() {
                match config::validate_base_url(&input) {
                    Ok(()) => {
                        tracing::info!("API base set to {}", input.trim());
                        state.api_base.set(input.trim());
                    }
                    Err(e) => {
                        // Keep the editor open so the value can be fixed.
                        state.base_url_input = Some(input);
                        state.notify(e.to_string());
                    }
                }
            }
            None
        }
        AppCommand::CancelBaseUrl => {
            state.base_url_input = None;
            None
        }

        // Logs screen
        AppCommand::NavigateToLogs => {
            // No logging here to avoid a feedback loop on the logs screen
            state.navigate_to(Screen::Logs(LogsState::default()));
            None
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
            None
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = (logs_state.scroll_offset + LOGS_PAGE_SIZE)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
            None
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(LOGS_PAGE_SIZE);
            }
            None
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
            }
            None
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = 0;
            }
            None
        }
        AppCommand::NavigateBack => {
            state.navigate_back();
            None
        }
    };

    // Clear pending key after any command except SetPendingKey
    // This ensures multi-key sequences are properly reset after completion
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    job
}

/// Mark the job's control busy and hand the job out, unless the control is
/// already in flight.
fn claim_job(state: &mut AppState, job: ApiJob) -> Option<ApiJob> {
    if !state.claim(job.control.clone()) {
        tracing::debug!("{:?} is busy, ignoring", job.control);
        return None;
    }
    state.load_status = LoadingState::Loading(ThrobberState::default());
    Some(job)
}

fn submit_post_form(state: &mut AppState) -> Option<ApiJob> {
    let control = match state.post_form.mode {
        FormMode::Idle => return None,
        FormMode::Create => Control::PostCreate,
        FormMode::Edit(_) => Control::PostUpdate,
    };
    if state.is_busy(&control) {
        return None;
    }

    let input = match validate_post_form(&state.post_form) {
        Ok(input) => input,
        Err(e) => {
            state.notify(e.to_string());
            return None;
        }
    };

    let mutation = match state.post_form.mode.editing_id() {
        Some(id) => Mutation::UpdatePost(
            Request::posts()
                .update(id.clone())
                .title(input.title)
                .views(input.views),
        ),
        None => {
            let id = next_id(state.posts.iter().map(|p| &p.id));
            Mutation::CreatePost(
                Request::posts().create(Post::new(id, input.title, input.views)),
            )
        }
    };

    claim_job(state, ApiJob::mutate(control, mutation))
}

fn submit_comment_form(state: &mut AppState) -> Option<ApiJob> {
    let control = match state.comment_form.mode {
        FormMode::Idle => return None,
        FormMode::Create => Control::CommentCreate,
        FormMode::Edit(_) => Control::CommentUpdate,
    };
    if state.is_busy(&control) {
        return None;
    }

    let input = match validate_comment_form(&state.comment_form) {
        Ok(input) => input,
        Err(e) => {
            state.notify(e.to_string());
            return None;
        }
    };

    let mutation = match state.comment_form.mode.editing_id() {
        Some(id) => Mutation::ReplaceComment(Request::comments().replace(
            id.clone(),
            input.text,
            input.post_id,
        )),
        None => {
            let id = next_id(state.comments.iter().map(|c| &c.id));
            Mutation::CreateComment(
                Request::comments().create(Comment::new(id, input.text, input.post_id)),
            )
        }
    };

    claim_job(state, ApiJob::mutate(control, mutation))
}

fn post_row_job(
    state: &mut AppState,
    post_id: EntityId,
    action: RowAction,
) -> Option<ApiJob> {
    let actions = post_row_actions(state.find_post(&post_id)?, &state.busy);
    let posts = Request::posts();
    let mutation = match action {
        RowAction::Delete if actions.delete => posts.soft_delete(post_id.clone()),
        RowAction::Restore if actions.restore => posts.restore(post_id.clone()),
        _ => return None,
    };

    claim_job(
        state,
        ApiJob::mutate(
            Control::PostRow { post_id, action },
            Mutation::UpdatePost(mutation),
        ),
    )
}

fn comment_row_job(
    state: &mut AppState,
    comment_id: EntityId,
    action: RowAction,
) -> Option<ApiJob> {
    let actions = comment_row_actions(state.find_comment(&comment_id)?, &state.busy);
    let comments = Request::comments();
    let mutation = match action {
        RowAction::Delete if actions.delete => comments.soft_delete(comment_id.clone()),
        RowAction::Restore if actions.restore => comments.restore(comment_id.clone()),
        _ => return None,
    };

    claim_job(
        state,
        ApiJob::mutate(
            Control::CommentRow { comment_id, action },
            Mutation::PatchComment(mutation),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str, deleted: bool) -> Post {
        Post {
            is_deleted: deleted,
            ..Post::new(id, format!("title {id}"), 0)
        }
    }

    fn comment(id: &str, post_id: &str, deleted: bool) -> Comment {
        Comment {
            is_deleted: deleted,
            ..Comment::new(id, format!("text {id}"), post_id)
        }
    }

    fn run(state: &mut AppState, commands: Vec<AppCommand>) -> Vec<ApiJob> {
        commands
            .into_iter()
            .filter_map(|c| execute_command_sync(c, state))
            .collect()
    }

    #[test]
    fn test_reload_claims_control_once() {
        let mut state = AppState::new();
        let first = execute_command_sync(
            AppCommand::LoadAll {
                control: Control::Reload,
            },
            &mut state,
        );
        assert!(first.is_some());
        assert!(state.is_busy(&Control::Reload));
        assert!(matches!(state.load_status, LoadingState::Loading(_)));

        let second = execute_command_sync(
            AppCommand::LoadAll {
                control: Control::Reload,
            },
            &mut state,
        );
        assert!(second.is_none());
    }

    #[test]
    fn test_empty_title_is_rejected_without_job() {
        let mut state = AppState::new();
        let jobs = run(&mut state, vec![AppCommand::NewPost, AppCommand::SubmitPostForm]);

        assert!(jobs.is_empty());
        assert_eq!(
            state.notifications.front().map(String::as_str),
            Some("Please enter Title")
        );
        assert!(state.busy.is_empty());
    }

    #[test]
    fn test_invalid_views_are_rejected() {
        let mut state = AppState::new();
        state.post_form.start_create();
        state.post_form.title = "t".to_string();
        state.post_form.views = "lots".to_string();

        assert!(execute_command_sync(AppCommand::SubmitPostForm, &mut state).is_none());
        assert_eq!(
            state.notifications.front().map(String::as_str),
            Some("Views must be a number")
        );
    }

    #[test]
    fn test_post_create_uses_next_id() {
        let mut state = AppState::new();
        state.posts = vec![post("2", false), post("9", true)];
        state.post_form.start_create();
        state.post_form.title = "  hello ".to_string();
        state.post_form.views = "".to_string();

        let job = execute_command_sync(AppCommand::SubmitPostForm, &mut state).unwrap();
        assert_eq!(job.control, Control::PostCreate);

        let mutation = job.mutation.unwrap();
        assert_eq!(mutation.method(), "POST");
        assert_eq!(mutation.path(), "/posts");
        assert_eq!(
            mutation.body(),
            json!({"id": "10", "title": "hello", "views": 0, "isDeleted": false})
        );
    }

    #[test]
    fn test_post_update_patches_title_and_views_only() {
        let mut state = AppState::new();
        state.posts = vec![post("4", false)];
        run(
            &mut state,
            vec![AppCommand::EditPost {
                post_id: "4".into(),
            }],
        );
        state.post_form.views = "12".to_string();

        let job = execute_command_sync(AppCommand::SubmitPostForm, &mut state).unwrap();
        assert_eq!(job.control, Control::PostUpdate);

        let mutation = job.mutation.unwrap();
        assert_eq!(mutation.method(), "PATCH");
        assert_eq!(mutation.path(), "/posts/4");
        assert_eq!(mutation.body(), json!({"title": "title 4", "views": 12}));
    }

    #[test]
    fn test_submit_while_idle_does_nothing() {
        let mut state = AppState::new();
        assert!(execute_command_sync(AppCommand::SubmitPostForm, &mut state).is_none());
        assert!(execute_command_sync(AppCommand::SubmitCommentForm, &mut state).is_none());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_comment_create_payload() {
        let mut state = AppState::new();
        state.posts = vec![post("3", false)];
        run(
            &mut state,
            vec![
                AppCommand::SelectPost {
                    post_id: "3".into(),
                },
                AppCommand::NewComment,
                AppCommand::AppendFormFieldChar { c: 'h' },
                AppCommand::AppendFormFieldChar { c: 'i' },
            ],
        );

        let job = execute_command_sync(AppCommand::SubmitCommentForm, &mut state).unwrap();
        let mutation = job.mutation.unwrap();
        assert_eq!(mutation.method(), "POST");
        assert_eq!(mutation.path(), "/comments");
        assert_eq!(
            mutation.body(),
            json!({"id": "1", "text": "hi", "postId": "3", "isDeleted": false})
        );
    }

    #[test]
    fn test_comment_without_post_reference_is_rejected() {
        let mut state = AppState::new();
        state.comment_form.start_create();
        state.comment_form.text = "hi".to_string();

        assert!(execute_command_sync(AppCommand::SubmitCommentForm, &mut state).is_none());
        assert_eq!(
            state.notifications.front().map(String::as_str),
            Some("Please select Post ID")
        );
    }

    #[test]
    fn test_comment_update_replaces_whole_record() {
        let mut state = AppState::new();
        state.comments = vec![comment("5", "2", false)];
        run(
            &mut state,
            vec![AppCommand::EditComment {
                comment_id: "5".into(),
            }],
        );
        state.comment_form.text = "edited".to_string();

        let job = execute_command_sync(AppCommand::SubmitCommentForm, &mut state).unwrap();
        assert_eq!(job.control, Control::CommentUpdate);

        let mutation = job.mutation.unwrap();
        assert_eq!(mutation.method(), "PUT");
        assert_eq!(mutation.path(), "/comments/5");
        assert_eq!(
            mutation.body(),
            json!({"id": "5", "text": "edited", "postId": "2"})
        );
    }

    #[test]
    fn test_deleted_rows_cannot_be_edited_or_deleted() {
        let mut state = AppState::new();
        state.posts = vec![post("1", true)];

        let jobs = run(
            &mut state,
            vec![
                AppCommand::EditPost {
                    post_id: "1".into(),
                },
                AppCommand::SoftDeletePost {
                    post_id: "1".into(),
                },
            ],
        );
        assert!(jobs.is_empty());
        assert_eq!(state.post_form.mode, FormMode::Idle);

        let job = execute_command_sync(
            AppCommand::RestorePost {
                post_id: "1".into(),
            },
            &mut state,
        )
        .unwrap();
        assert_eq!(job.mutation.unwrap().body(), json!({"isDeleted": false}));
    }

    #[test]
    fn test_soft_delete_comment_patches_flag() {
        let mut state = AppState::new();
        state.comments = vec![comment("8", "1", false)];

        let job = execute_command_sync(
            AppCommand::SoftDeleteComment {
                comment_id: "8".into(),
            },
            &mut state,
        )
        .unwrap();
        assert_eq!(
            job.control,
            Control::CommentRow {
                comment_id: "8".into(),
                action: RowAction::Delete
            }
        );

        let mutation = job.mutation.unwrap();
        assert_eq!(mutation.method(), "PATCH");
        assert_eq!(mutation.path(), "/comments/8");
        assert_eq!(mutation.body(), json!({"isDeleted": true}));

        // The same row button is disabled until the control is released.
        assert!(execute_command_sync(
            AppCommand::SoftDeleteComment {
                comment_id: "8".into(),
            },
            &mut state,
        )
        .is_none());
    }

    #[test]
    fn test_cancel_resets_form_and_returns_focus() {
        let mut state = AppState::new();
        run(
            &mut state,
            vec![
                AppCommand::NewPost,
                AppCommand::AppendFormFieldChar { c: 'x' },
                AppCommand::CancelPostForm,
            ],
        );
        assert_eq!(state.post_form, Default::default());
        assert_eq!(state.focus, Focus::Posts);
    }

    #[test]
    fn test_base_url_commit_validates() {
        let mut state = AppState::new();
        run(&mut state, vec![AppCommand::EditBaseUrl]);
        assert_eq!(
            state.base_url_input.as_deref(),
            Some("http://localhost:3000")
        );

        state.base_url_input = Some("nope".to_string());
        run(&mut state, vec![AppCommand::CommitBaseUrl]);
        assert_eq!(state.api_base.raw(), "http://localhost:3000");
        assert!(state.base_url_input.is_some());
        assert_eq!(state.notifications.len(), 1);

        state.base_url_input = Some("http://10.0.0.2:3000/".to_string());
        run(&mut state, vec![AppCommand::CommitBaseUrl]);
        assert_eq!(state.api_base.resolve(), "http://10.0.0.2:3000");
        assert!(state.base_url_input.is_none());
    }

    #[test]
    fn test_pending_key_cleared_after_other_command() {
        let mut state = AppState::new();
        run(&mut state, vec![AppCommand::SetPendingKey('g')]);
        assert_eq!(state.pending_key, Some('g'));
        run(&mut state, vec![AppCommand::ToggleHelp]);
        assert_eq!(state.pending_key, None);
    }

    #[test]
    fn test_logs_scrolling_is_bounded() {
        let mut state = AppState::new();
        run(&mut state, vec![AppCommand::NavigateToLogs]);
        if let Screen::Logs(logs_state) = state.current_screen_mut() {
            logs_state.total_entries = 5;
        }
        run(
            &mut state,
            vec![AppCommand::ScrollLogsPageUp, AppCommand::ScrollLogsUp],
        );
        match state.current_screen() {
            Screen::Logs(logs_state) => assert_eq!(logs_state.scroll_offset, 4),
            other => panic!("expected logs screen, got {:?}", other),
        }
    }
}
