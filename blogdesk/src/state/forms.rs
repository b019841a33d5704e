use blog_api::endpoints::{comments::Comment, posts::Post, EntityId};

/// Lifecycle of an entity form.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Idle,
    Create,
    Edit(EntityId),
}

impl FormMode {
    pub fn can_create(&self) -> bool {
        matches!(self, FormMode::Idle | FormMode::Create)
    }

    pub fn can_update(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self, FormMode::Idle)
    }

    pub fn editing_id(&self) -> Option<&EntityId> {
        match self {
            FormMode::Edit(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    #[default]
    Title,
    Views,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentField {
    #[default]
    Text,
    PostId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFormState {
    pub mode: FormMode,
    pub field: PostField,
    pub title: String,
    pub views: String,
}

impl Default for PostFormState {
    fn default() -> Self {
        Self {
            mode: FormMode::Idle,
            field: PostField::Title,
            title: String::new(),
            views: "0".to_string(),
        }
    }
}

impl PostFormState {
    pub fn start_create(&mut self) {
        if self.mode == FormMode::Idle {
            self.mode = FormMode::Create;
            self.field = PostField::Title;
        }
    }

    pub fn start_edit(&mut self, post: &Post) {
        self.mode = FormMode::Edit(post.id.clone());
        self.field = PostField::Title;
        self.title = post.title.clone();
        self.views = post.views.to_string();
    }

    /// Back to idle with an empty title and zero views.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            PostField::Title => PostField::Views,
            PostField::Views => PostField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            PostField::Title => self.title.push(c),
            PostField::Views => self.views.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            PostField::Title => self.title.pop(),
            PostField::Views => self.views.pop(),
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CommentFormState {
    pub mode: FormMode,
    pub field: CommentField,
    pub text: String,
    /// Post reference, free text or picked from the post options.
    pub post_id: String,
}

impl CommentFormState {
    pub fn start_create(&mut self) {
        if self.mode == FormMode::Idle {
            self.mode = FormMode::Create;
            self.field = CommentField::Text;
        }
    }

    pub fn start_edit(&mut self, comment: &Comment) {
        self.mode = FormMode::Edit(comment.id.clone());
        self.field = CommentField::Text;
        self.text = comment.text.clone();
        self.post_id = comment.post_id.to_string();
    }

    /// Back to idle with empty text. The post reference moves to the
    /// current selection, or stays put when nothing is selected.
    pub fn reset(&mut self, selected_post: Option<&EntityId>) {
        let post_id = match selected_post {
            Some(id) => id.to_string(),
            None => std::mem::take(&mut self.post_id),
        };
        *self = Self {
            post_id,
            ..Self::default()
        };
    }

    /// Drop the post reference if it names `post_id`.
    pub fn forget_post(&mut self, post_id: &EntityId) {
        if !self.mode.is_editing() && self.post_id.trim() == post_id.as_str() {
            self.post_id.clear();
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            CommentField::Text => CommentField::PostId,
            CommentField::PostId => CommentField::Text,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            CommentField::Text => self.text.push(c),
            CommentField::PostId => self.post_id.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            CommentField::Text => self.text.pop(),
            CommentField::PostId => self.post_id.pop(),
        };
    }

    /// Step through the placeholder and every post id, wrapping around.
    /// A reference that matches no option restarts from the placeholder.
    pub fn cycle_post_reference(&mut self, posts: &[Post], forward: bool) {
        let options: Vec<&str> = std::iter::once("")
            .chain(posts.iter().map(|p| p.id.as_str()))
            .collect();
        let current = options
            .iter()
            .position(|id| *id == self.post_id.trim())
            .unwrap_or(0);

        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };

        self.post_id = options[next].to_string();
    }
}
