//! Task payloads

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /groups/{gid}/tasks/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task_name: String,
    pub description: String,
    pub due_date: String,
}

impl CreateTaskRequest {
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        Ok(NewTask {
            task_name: required(self.task_name, "Task", "name")?,
            description: required(self.description, "Task", "description")?,
            due_date: required(self.due_date, "Task", "due date")?,
        })
    }
}

/// PUT /tasks/{id}/ body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<TaskChanges, ValidationError> {
        if self.task_name.is_none() && self.description.is_none() && self.due_date.is_none() {
            return Err(ValidationError::NoUpdatableField {
                resource: "task",
                fields: "name, description, or due date",
            });
        }

        Ok(TaskChanges {
            task_name: self.task_name,
            description: self.description,
            due_date: self.due_date,
        })
    }
}
