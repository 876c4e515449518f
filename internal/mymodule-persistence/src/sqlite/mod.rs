//! SQLite module.
//! This module provides a minimal yet useful Entity framework on top of SQLite
//! with ability to perform any SQL query possible and hydrate results in Rust
//! structs.

mod condition;
mod connection_builder;
mod connection_extensions;
mod connection_pool;
mod cursor;
mod entity;
mod projection;
mod query;
mod source_alias;
mod transaction;

pub use condition::WhereCondition;
pub use connection_builder::{ConnectionBuilder, ConnectionOptions, DEFAULT_BUSY_TIMEOUT};
pub use connection_extensions::ConnectionExtensions;
pub use connection_pool::{ConnectionPoolError, SqliteConnectionPool, SqlitePooledConnection};
pub use cursor::EntityCursor;
pub use entity::{HydrationError, SqLiteEntity};
pub use projection::{Projection, ProjectionField};
pub use query::Query;
pub use source_alias::SourceAlias;
pub use transaction::Transaction;

/// Type of the connection used in the MyModule crates.
pub type SqliteConnection = sqlite::ConnectionThreadSafe;
