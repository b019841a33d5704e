use crate::endpoints::{
    EntityId,
    comments::{Comment, CreateComment, DeleteComment, ListComments, PatchComment, ReplaceComment},
    posts::{CreatePost, DeletePost, ListPosts, Post, UpdatePost},
};

#[derive(Default)]
pub struct PostRepository;

impl PostRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListPosts {
        ListPosts
    }

    pub fn create(&self, post: Post) -> CreatePost {
        CreatePost::new(post)
    }

    pub fn update(&self, id: EntityId) -> UpdatePost {
        UpdatePost::new(id)
    }

    pub fn soft_delete(&self, id: EntityId) -> UpdatePost {
        self.update(id).is_deleted(true)
    }

    pub fn restore(&self, id: EntityId) -> UpdatePost {
        self.update(id).is_deleted(false)
    }

    pub fn delete(&self, id: EntityId) -> DeletePost {
        DeletePost::new(id)
    }
}

#[derive(Default)]
pub struct CommentRepository;

impl CommentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListComments {
        ListComments
    }

    pub fn create(&self, comment: Comment) -> CreateComment {
        CreateComment::new(comment)
    }

    pub fn patch(&self, id: EntityId) -> PatchComment {
        PatchComment::new(id)
    }

    pub fn replace(
        &self,
        id: EntityId,
        text: impl Into<String>,
        post_id: impl Into<EntityId>,
    ) -> ReplaceComment {
        ReplaceComment::new(id, text, post_id)
    }

    pub fn soft_delete(&self, id: EntityId) -> PatchComment {
        self.patch(id).is_deleted(true)
    }

    pub fn restore(&self, id: EntityId) -> PatchComment {
        self.patch(id).is_deleted(false)
    }

    pub fn delete(&self, id: EntityId) -> DeleteComment {
        DeleteComment::new(id)
    }
}
