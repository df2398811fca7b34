//! Post payloads

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /posts/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub post_name: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub post_name: String,
    pub description: String,
    pub timestamp: String,
}

impl CreatePostRequest {
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        Ok(NewPost {
            post_name: required(self.post_name, "Post", "name")?,
            description: required(self.description, "Post", "description")?,
            timestamp: required(self.timestamp, "Post", "timestamp")?,
        })
    }
}
