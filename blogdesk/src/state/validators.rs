use super::forms::{CommentFormState, PostFormState};
use blog_api::endpoints::EntityId;
use thiserror::Error;

/// Missing or malformed form input, reported before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter Title")]
    MissingTitle,

    #[error("Please enter Text")]
    MissingText,

    #[error("Please select Post ID")]
    MissingPostReference,

    #[error("Views must be a number")]
    InvalidViews,
}

/// Trimmed post form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub views: i64,
}

/// Trimmed comment form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInput {
    pub text: String,
    pub post_id: EntityId,
}

pub fn validate_post_form(form: &PostFormState) -> Result<PostInput, ValidationError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    Ok(PostInput {
        title: title.to_string(),
        views: parse_views(&form.views)?,
    })
}

pub fn validate_comment_form(form: &CommentFormState) -> Result<CommentInput, ValidationError> {
    let text = form.text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingText);
    }

    let post_id = form.post_id.trim();
    if post_id.is_empty() {
        return Err(ValidationError::MissingPostReference);
    }

    Ok(CommentInput {
        text: text.to_string(),
        post_id: post_id.into(),
    })
}

/// Blank means zero.
fn parse_views(input: &str) -> Result<i64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    input.parse().map_err(|_| ValidationError::InvalidViews)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_form(title: &str, views: &str) -> PostFormState {
        PostFormState {
            title: title.to_string(),
            views: views.to_string(),
            ..Default::default()
        }
    }

    fn comment_form(text: &str, post_id: &str) -> CommentFormState {
        CommentFormState {
            text: text.to_string(),
            post_id: post_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_post_title_is_required() {
        assert_eq!(
            validate_post_form(&post_form("   ", "1")),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(ValidationError::MissingTitle.to_string(), "Please enter Title");
    }

    #[test]
    fn test_post_input_is_trimmed() {
        let input = validate_post_form(&post_form("  Hello ", " 42 ")).unwrap();
        assert_eq!(input.title, "Hello");
        assert_eq!(input.views, 42);
    }

    #[test]
    fn test_blank_views_is_zero() {
        assert_eq!(validate_post_form(&post_form("a", "")).unwrap().views, 0);
        assert_eq!(validate_post_form(&post_form("a", "  ")).unwrap().views, 0);
    }

    #[test]
    fn test_non_numeric_views_rejected() {
        assert_eq!(
            validate_post_form(&post_form("a", "12x")),
            Err(ValidationError::InvalidViews)
        );
    }

    #[test]
    fn test_comment_text_checked_before_post_reference() {
        assert_eq!(
            validate_comment_form(&comment_form("", "")),
            Err(ValidationError::MissingText)
        );
        assert_eq!(
            validate_comment_form(&comment_form("hi", "  ")),
            Err(ValidationError::MissingPostReference)
        );
        assert_eq!(
            ValidationError::MissingPostReference.to_string(),
            "Please select Post ID"
        );
    }

    #[test]
    fn test_comment_input_is_trimmed() {
        let input = validate_comment_form(&comment_form(" hi ", " 3 ")).unwrap();
        assert_eq!(input.text, "hi");
        assert_eq!(input.post_id, "3");
    }
}
