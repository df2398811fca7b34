//! studentmatch-server: HTTP CRUD backend for student group matching
//!
//! Users, groups, tasks, posts, comments and ratings stored in SQLite and
//! exposed as JSON resources.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, open_in_memory, DbError};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
