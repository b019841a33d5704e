use super::{lenient, Collection, EntityId};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{EmptyResponse, Method, Request, RequestData};

// Common

/// A comment on a post. `post_id` is not checked against the posts
/// collection; comments on missing or deleted posts are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default)]
    pub post_id: EntityId,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_deleted: bool,
}

impl Comment {
    pub fn new(
        id: impl Into<EntityId>,
        text: impl Into<String>,
        post_id: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            post_id: post_id.into(),
            is_deleted: false,
        }
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListComments;

impl Request for ListComments {
    type Data = ();
    type Response = Collection<Comment>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/comments".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    #[serde(flatten)]
    comment: Comment,
}

impl CreateComment {
    pub fn new(comment: Comment) -> Self {
        Self { comment }
    }
}

impl Request for CreateComment {
    type Data = Comment;
    type Response = Comment;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/comments".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.comment)
    }
}

/// Partial update of a comment (PATCH).
#[derive(Debug, Clone, Serialize)]
pub struct PatchComment {
    #[serde(skip)]
    id: EntityId,
    #[serde(flatten)]
    comment: CommentUpdate,
}

impl PatchComment {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            comment: CommentUpdate::default(),
        }
    }

    setter!(opt comment.is_deleted: bool);
}

impl Request for PatchComment {
    type Data = CommentUpdate;
    type Response = Comment;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/comments/{}", self.id.encoded()).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.comment)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

/// Full replacement of a comment (PUT). The body always carries the
/// unchanged id and the post reference; the server overwrites everything
/// else.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceComment {
    #[serde(flatten)]
    comment: CommentReplacement,
}

impl ReplaceComment {
    pub fn new(id: EntityId, text: impl Into<String>, post_id: impl Into<EntityId>) -> Self {
        Self {
            comment: CommentReplacement {
                id,
                text: text.into(),
                post_id: post_id.into(),
            },
        }
    }
}

impl Request for ReplaceComment {
    type Data = CommentReplacement;
    type Response = Comment;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/comments/{}", self.comment.id.encoded()).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReplacement {
    pub id: EntityId,
    pub text: String,
    pub post_id: EntityId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteComment {
    id: EntityId,
}

impl DeleteComment {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl Request for DeleteComment {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/comments/{}", self.id.encoded()).into()
    }
}
