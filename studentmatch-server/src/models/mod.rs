//! Request payloads with validation at construction
//!
//! Handlers deserialize loosely (every field optional) and then call
//! `validate()`, so a missing field is reported by name instead of as a
//! generic deserialization failure.

pub mod validation;
pub mod user;
pub mod group;
pub mod task;
pub mod post;
pub mod comment;
pub mod rate;

pub use validation::ValidationError;
pub use user::{AssignGroupRequest, CreateUserRequest, NewUser};
pub use group::{CreateGroupRequest, NewGroup};
pub use task::{CreateTaskRequest, NewTask, TaskChanges, UpdateTaskRequest};
pub use post::{CreatePostRequest, NewPost};
pub use comment::{CommentChanges, CreateCommentRequest, NewComment, UpdateCommentRequest};
pub use rate::{CreateRateRequest, NewRate};
