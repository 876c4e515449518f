//! Versioned schema migrations of a tenant database.
//!
//! A [SchemaMigration] is identified by a [MigrationId] and knows how to apply (`up`) and revert
//! (`down`) its changes. The [MigrationRunner] keeps the list of the applied migrations in an
//! history table of the tenant database, applies the pending ones in order and reverts them on
//! demand.

mod history;
mod migration_id;
mod runner;

pub use history::{AppliedMigration, MIGRATION_HISTORY_TABLE};
pub use migration_id::MigrationId;
pub use runner::{MigrationContext, MigrationError, MigrationRunner, SchemaMigration};
