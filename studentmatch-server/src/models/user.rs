//! User payloads

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /users/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub netid: Option<String>,
}

/// Validated user ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub netid: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            name: required(self.name, "User", "name")?,
            netid: required(self.netid, "User", "netid")?,
        })
    }
}

/// PUT /users/{id}/ body: moves the user into a group
#[derive(Debug, Default, Deserialize)]
pub struct AssignGroupRequest {
    pub group_id: Option<i64>,
}

impl AssignGroupRequest {
    /// Returns the target group id.
    pub fn validate(self) -> Result<i64, ValidationError> {
        required(self.group_id, "Group", "id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_checked_before_netid() {
        let err = CreateUserRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "User name is required");
    }

    #[test]
    fn missing_netid_is_named() {
        let req = CreateUserRequest {
            name: Some("Alice".into()),
            netid: None,
        };
        assert_eq!(req.validate().unwrap_err().to_string(), "User netid is required");
    }

    #[test]
    fn assign_requires_group_id() {
        let err = AssignGroupRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Group id is required");
        assert_eq!(AssignGroupRequest { group_id: Some(4) }.validate(), Ok(4));
    }
}
