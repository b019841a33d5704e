use blog_api::endpoints::{
    comments::{Comment, CreateComment, PatchComment, ReplaceComment},
    posts::{CreatePost, Post, UpdatePost},
    EntityId,
};
use blog_api::{ApiRequest, RequestData, RequestError};
use serde_json::Value;

/// Row-level actions that talk to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Delete,
    Restore,
}

/// A network-triggering control. While a control is busy it is disabled and
/// re-triggering it does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    Bootstrap,
    Reload,
    PostCreate,
    PostUpdate,
    CommentCreate,
    CommentUpdate,
    PostRow {
        post_id: EntityId,
        action: RowAction,
    },
    CommentRow {
        comment_id: EntityId,
        action: RowAction,
    },
}

/// Commands to execute (user actions → state changes and background jobs)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,
    SwitchPane,

    // Navigation
    NavigateBack,

    // Data loading
    LoadAll {
        control: Control,
    },

    // Selection
    SelectPost {
        post_id: EntityId,
    },

    // View toggles
    ToggleShowDeletedPosts,
    ToggleShowDeletedComments,
    ToggleOnlySelectedPost,
    ToggleHelp,

    // Post form
    NewPost,
    EditPost {
        post_id: EntityId,
    },
    SubmitPostForm,
    CancelPostForm,

    // Comment form
    NewComment,
    EditComment {
        comment_id: EntityId,
    },
    CyclePostReference {
        forward: bool,
    },
    SubmitCommentForm,
    CancelCommentForm,

    // Shared form editing (applies to the focused form)
    NavigateFormField {
        forward: bool,
    },
    AppendFormFieldChar {
        c: char,
    },
    DeleteFormFieldChar,

    // Row actions
    SoftDeletePost {
        post_id: EntityId,
    },
    RestorePost {
        post_id: EntityId,
    },
    SoftDeleteComment {
        comment_id: EntityId,
    },
    RestoreComment {
        comment_id: EntityId,
    },

    // Base URL editing
    EditBaseUrl,
    AppendBaseUrlChar(char),
    DeleteBaseUrlChar,
    CommitBaseUrl,
    CancelBaseUrl,

    DismissNotification,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// A write request issued before the collections are reloaded.
#[derive(Debug, Clone)]
pub enum Mutation {
    CreatePost(CreatePost),
    UpdatePost(UpdatePost),
    CreateComment(CreateComment),
    PatchComment(PatchComment),
    ReplaceComment(ReplaceComment),
}

impl Mutation {
    pub fn method(&self) -> String {
        match self {
            Mutation::CreatePost(_) => CreatePost::METHOD.to_string(),
            Mutation::UpdatePost(_) => UpdatePost::METHOD.to_string(),
            Mutation::CreateComment(_) => CreateComment::METHOD.to_string(),
            Mutation::PatchComment(_) => PatchComment::METHOD.to_string(),
            Mutation::ReplaceComment(_) => ReplaceComment::METHOD.to_string(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Mutation::CreatePost(r) => r.endpoint().into_owned(),
            Mutation::UpdatePost(r) => r.endpoint().into_owned(),
            Mutation::CreateComment(r) => r.endpoint().into_owned(),
            Mutation::PatchComment(r) => r.endpoint().into_owned(),
            Mutation::ReplaceComment(r) => r.endpoint().into_owned(),
        }
    }

    /// JSON body as it goes over the wire.
    pub fn body(&self) -> Value {
        match self {
            Mutation::CreatePost(r) => json_body(r),
            Mutation::UpdatePost(r) => json_body(r),
            Mutation::CreateComment(r) => json_body(r),
            Mutation::PatchComment(r) => json_body(r),
            Mutation::ReplaceComment(r) => json_body(r),
        }
    }
}

fn json_body<R: ApiRequest>(request: &R) -> Value {
    match request.data() {
        RequestData::Json(data) => serde_json::to_value(data).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Work handed to the background loader: an optional mutation followed by
/// a full reload of both collections.
#[derive(Debug, Clone)]
pub struct ApiJob {
    pub control: Control,
    pub mutation: Option<Mutation>,
}

impl ApiJob {
    pub fn reload(control: Control) -> Self {
        Self {
            control,
            mutation: None,
        }
    }

    pub fn mutate(control: Control, mutation: Mutation) -> Self {
        Self {
            control,
            mutation: Some(mutation),
        }
    }
}

/// Events from background tasks (responses to jobs)
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// Both collections fetched; they replace the in-memory copies.
    DataLoaded {
        posts: Vec<Post>,
        comments: Vec<Comment>,
    },

    /// The mutation behind `control` succeeded; the reload follows.
    MutationApplied {
        control: Control,
    },

    RequestFailed {
        control: Control,
        error: RequestError,
    },

    /// Always the last event of a job, success or failure.
    ControlReleased {
        control: Control,
    },
}
