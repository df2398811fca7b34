//! Group payloads

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /groups/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreateGroupRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
}

impl CreateGroupRequest {
    pub fn validate(self) -> Result<NewGroup, ValidationError> {
        Ok(NewGroup {
            name: required(self.name, "Group", "name")?,
        })
    }
}
