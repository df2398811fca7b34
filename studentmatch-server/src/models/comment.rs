//! Comment payloads

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /posts/{pid}/comments/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreateCommentRequest {
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub description: String,
    pub timestamp: String,
}

impl CreateCommentRequest {
    pub fn validate(self) -> Result<NewComment, ValidationError> {
        Ok(NewComment {
            description: required(self.description, "Comment", "description")?,
            timestamp: required(self.timestamp, "Comment", "timestamp")?,
        })
    }
}

/// PUT /comments/{id}/ body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

impl UpdateCommentRequest {
    pub fn validate(self) -> Result<CommentChanges, ValidationError> {
        if self.description.is_none() && self.timestamp.is_none() {
            return Err(ValidationError::NoUpdatableField {
                resource: "comment",
                fields: "description or timestamp",
            });
        }

        Ok(CommentChanges {
            description: self.description,
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_message_lists_fields() {
        let err = UpdateCommentRequest::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of comment description or timestamp is required"
        );
    }
}
