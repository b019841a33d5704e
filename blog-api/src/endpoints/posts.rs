use super::{lenient, Collection, EntityId};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{EmptyResponse, Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub views: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_deleted: bool,
}

impl Post {
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>, views: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            views,
            is_deleted: false,
        }
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListPosts;

impl Request for ListPosts {
    type Data = ();
    type Response = Collection<Post>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/posts".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePost {
    #[serde(flatten)]
    post: Post,
}

impl CreatePost {
    pub fn new(post: Post) -> Self {
        Self { post }
    }
}

impl Request for CreatePost {
    type Data = Post;
    type Response = Post;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/posts".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.post)
    }
}

/// Partial update: only the fields that were set are sent and the server
/// merges them into the stored record.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePost {
    #[serde(skip)]
    id: EntityId,
    #[serde(flatten)]
    post: PostUpdate,
}

impl UpdatePost {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            post: PostUpdate::default(),
        }
    }

    setter!(opt post.title: String);
    setter!(opt post.views: i64);
    setter!(opt post.is_deleted: bool);
}

impl Request for UpdatePost {
    type Data = PostUpdate;
    type Response = Post;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/posts/{}", self.id.encoded()).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.post)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletePost {
    id: EntityId,
}

impl DeletePost {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl Request for DeletePost {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/posts/{}", self.id.encoded()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body<R: Request>(request: &R) -> serde_json::Value {
        match request.data() {
            RequestData::Json(data) => serde_json::to_value(data).unwrap(),
            _ => panic!("expected a JSON body"),
        }
    }

    #[test]
    fn test_post_decodes_loose_fields() {
        let post: Post = serde_json::from_value(json!({"id": 3, "title": null})).unwrap();
        assert_eq!(post.id, "3");
        assert_eq!(post.title, "");
        assert_eq!(post.views, 0);
        assert!(!post.is_deleted);

        let post: Post =
            serde_json::from_value(json!({"id": "4", "title": "x", "views": "12", "isDeleted": 1}))
                .unwrap();
        assert_eq!(post.views, 12);
        assert!(post.is_deleted);
    }

    #[test]
    fn test_list_posts_is_get() {
        assert_eq!(ListPosts::METHOD, Method::GET);
        assert_eq!(ListPosts.endpoint(), "/posts");
    }

    #[test]
    fn test_create_post_sends_full_record() {
        let req = CreatePost::new(Post::new("1", "Hello", 0));
        assert_eq!(CreatePost::METHOD, Method::POST);
        assert_eq!(
            body(&req),
            json!({"id": "1", "title": "Hello", "views": 0, "isDeleted": false})
        );
    }

    #[test]
    fn test_update_post_sends_only_set_fields() {
        let req = UpdatePost::new("7".into()).title("New").views(5);
        assert_eq!(UpdatePost::METHOD, Method::PATCH);
        assert_eq!(req.endpoint(), "/posts/7");
        assert_eq!(body(&req), json!({"title": "New", "views": 5}));

        let req = UpdatePost::new("7".into()).is_deleted(true);
        assert_eq!(body(&req), json!({"isDeleted": true}));
    }

    #[test]
    fn test_delete_post_path_is_encoded() {
        let req = DeletePost::new("a/b".into());
        assert_eq!(DeletePost::METHOD, Method::DELETE);
        assert_eq!(req.endpoint(), "/posts/a%2Fb");
    }
}
