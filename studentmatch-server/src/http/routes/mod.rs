//! Route handlers organized by resource
//!
//! Every resource path carries a trailing slash.

pub mod health;
pub mod users;
pub mod groups;
pub mod tasks;
pub mod posts;
pub mod comments;
pub mod rates;
