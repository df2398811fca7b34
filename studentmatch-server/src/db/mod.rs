//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Child collections are queried by parent id, never stored
//! - List operations batch child lookups, no N+1 queries
//! - Every mutation runs in one transaction

pub mod pool;
pub mod repos;

pub use pool::{create_pool, open_in_memory, run_migrations};
pub use repos::*;
