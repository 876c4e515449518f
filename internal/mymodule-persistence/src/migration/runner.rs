use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use semver::Version;
use slog::{Logger, debug, error, info};
use thiserror::Error;

use mymodule_common::entities::Tenant;
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::{StdError, StdResult};

use crate::migration::history::{
    DeleteAppliedMigrationQuery, GetAppliedMigrationsQuery, InsertAppliedMigrationQuery,
    create_history_table_sql,
};
use crate::migration::{AppliedMigration, MIGRATION_HISTORY_TABLE, MigrationId};
use crate::naming::TableNamePolicy;
use crate::schema::{EntityBuilder, TableSchema};
use crate::sqlite::{ConnectionExtensions, SqliteConnection, Transaction};

/// Errors raised while applying or reverting migrations
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A migration failed, the ones applied before it are kept.
    #[error("migration '{id}' failed")]
    Failed {
        /// Identity of the failing migration
        id: MigrationId,

        /// Cause of the failure
        #[source]
        source: StdError,
    },

    /// The database was migrated by a newer version of the software.
    #[error(
        "database schema is at migration '{applied}' which is newer than the latest known migration '{latest}', aborting to prevent data corruption"
    )]
    DatabaseNewerThanSoftware {
        /// Newest applied migration of the package
        applied: MigrationId,

        /// Newest migration of the package known by this software
        latest: MigrationId,
    },

    /// The migration history could not be read or written.
    #[error("migration history error")]
    History(#[source] StdError),
}

/// What a migration works with
pub struct MigrationContext<'a> {
    /// Connection to the tenant database, inside the migration transaction
    pub connection: &'a SqliteConnection,

    /// Tenant whose database is migrated
    pub tenant: &'a Tenant,

    /// Naming policy of the tenant tables
    pub naming: &'a dyn TableNamePolicy,
}

impl MigrationContext<'_> {
    /// Builder of the given table in the tenant database
    pub fn entity_builder(&self, schema: TableSchema) -> EntityBuilder<'_> {
        EntityBuilder::new(schema, self.tenant, self.naming)
    }
}

/// A versioned change of a database schema
pub trait SchemaMigration: Send + Sync {
    /// Identity of the migration, unique across every package
    fn id(&self) -> MigrationId;

    /// Apply the change
    fn up(&self, context: &MigrationContext) -> StdResult<()>;

    /// Revert the change
    fn down(&self, context: &MigrationContext) -> StdResult<()>;
}

/// Applies and reverts [SchemaMigration]s on the database of a tenant.
pub struct MigrationRunner<'conn> {
    connection: &'conn SqliteConnection,
    tenant: Tenant,
    naming: Arc<dyn TableNamePolicy>,
    software_version: Version,
    migrations: BTreeMap<MigrationId, Arc<dyn SchemaMigration>>,
    logger: Logger,
}

impl<'conn> MigrationRunner<'conn> {
    /// `MigrationRunner` factory
    pub fn new(
        connection: &'conn SqliteConnection,
        tenant: Tenant,
        naming: Arc<dyn TableNamePolicy>,
        logger: Logger,
    ) -> Self {
        Self {
            connection,
            tenant,
            naming,
            software_version: Version::new(0, 0, 0),
            migrations: BTreeMap::new(),
            logger: logger.new_with_component_name::<Self>(),
        }
    }

    /// Set the software version written in the history of the applied migrations
    pub fn with_software_version(mut self, version: Version) -> Self {
        self.software_version = version;
        self
    }

    /// Register a migration.
    pub fn add_migration(&mut self, migration: Arc<dyn SchemaMigration>) -> &mut Self {
        self.migrations.insert(migration.id(), migration);
        self
    }

    /// Register several migrations.
    pub fn add_migrations(&mut self, migrations: Vec<Arc<dyn SchemaMigration>>) -> &mut Self {
        for migration in migrations {
            self.add_migration(migration);
        }
        self
    }

    fn history_table(&self) -> String {
        self.naming.physical_name(&self.tenant, MIGRATION_HISTORY_TABLE)
    }

    fn context(&self) -> MigrationContext<'_> {
        MigrationContext {
            connection: self.connection,
            tenant: &self.tenant,
            naming: self.naming.as_ref(),
        }
    }

    fn ensure_history_table(&self) -> Result<(), MigrationError> {
        self.connection
            .execute(create_history_table_sql(&self.history_table()))
            .with_context(|| format!("Could not create the migration history of tenant '{}'", self.tenant))
            .map_err(MigrationError::History)
    }

    /// Migrations recorded in the history, ordered by id
    pub fn applied_migrations(&self) -> Result<Vec<AppliedMigration>, MigrationError> {
        self.ensure_history_table()?;
        self.connection
            .fetch_collection(GetAppliedMigrationsQuery::all(&self.history_table()))
            .with_context(|| format!("Could not read the migration history of tenant '{}'", self.tenant))
            .map_err(MigrationError::History)
    }

    fn check_database_not_newer(&self, applied: &[AppliedMigration]) -> Result<(), MigrationError> {
        let mut latest_per_package: BTreeMap<&str, &MigrationId> = BTreeMap::new();
        for id in self.migrations.keys() {
            latest_per_package.insert(id.package(), id);
        }

        for applied_migration in applied {
            let id = &applied_migration.migration_id;
            let newer_than_latest = latest_per_package
                .get(id.package())
                .filter(|latest| id > **latest);
            if let Some(latest) = newer_than_latest {
                error!(
                    self.logger, "Database schema is newer than this software";
                    "tenant" => %self.tenant, "applied" => %id, "latest" => %latest
                );
                return Err(MigrationError::DatabaseNewerThanSoftware {
                    applied: id.clone(),
                    latest: (*latest).clone(),
                });
            }
        }

        Ok(())
    }

    /// Apply the pending migrations in id order, each one in its own transaction along with its
    /// history row.
    ///
    /// Returns the ids of the applied migrations.
    pub fn apply(&self) -> Result<Vec<MigrationId>, MigrationError> {
        debug!(self.logger, "Check database migrations"; "tenant" => %self.tenant);
        let applied = self.applied_migrations()?;
        self.check_database_not_newer(&applied)?;

        let pending: Vec<&Arc<dyn SchemaMigration>> = self
            .migrations
            .iter()
            .filter(|(id, _)| !applied.iter().any(|a| &a.migration_id == *id))
            .map(|(_, migration)| migration)
            .collect();
        if pending.is_empty() {
            debug!(self.logger, "Database up to date"; "tenant" => %self.tenant);
            return Ok(vec![]);
        }

        let mut newly_applied = vec![];
        for migration in pending {
            let id = migration.id();
            debug!(self.logger, "Applying migration"; "tenant" => %self.tenant, "migration" => %id);
            self.apply_one(migration.as_ref(), &id).map_err(|source| {
                error!(
                    self.logger, "Migration failed";
                    "tenant" => %self.tenant, "migration" => %id, "error" => ?source
                );
                MigrationError::Failed {
                    id: id.clone(),
                    source,
                }
            })?;
            newly_applied.push(id);
        }

        info!(
            self.logger, "Database migrated";
            "tenant" => %self.tenant, "applied_migrations" => newly_applied.len()
        );

        Ok(newly_applied)
    }

    fn apply_one(&self, migration: &dyn SchemaMigration, id: &MigrationId) -> StdResult<()> {
        let transaction = Transaction::begin(self.connection)?;
        migration.up(&self.context())?;
        self.connection.apply(InsertAppliedMigrationQuery::one(
            &self.history_table(),
            AppliedMigration {
                migration_id: id.clone(),
                applied_version: self.software_version.to_string(),
                applied_on: Utc::now(),
            },
        ))?;
        transaction.commit()?;

        Ok(())
    }

    /// Revert, newest first, the applied migrations greater than the given target, or all of
    /// them if there is no target.
    ///
    /// Only registered migrations can be reverted. Returns the ids of the reverted migrations.
    pub fn rollback(&self, target: Option<&MigrationId>) -> Result<Vec<MigrationId>, MigrationError> {
        let applied = self.applied_migrations()?;
        let to_revert: Vec<&Arc<dyn SchemaMigration>> = self
            .migrations
            .iter()
            .rev()
            .filter(|(id, _)| target.is_none_or(|target| *id > target))
            .filter(|(id, _)| applied.iter().any(|a| &a.migration_id == *id))
            .map(|(_, migration)| migration)
            .collect();

        let mut reverted = vec![];
        for migration in to_revert {
            let id = migration.id();
            debug!(self.logger, "Reverting migration"; "tenant" => %self.tenant, "migration" => %id);
            self.revert_one(migration.as_ref(), &id)
                .map_err(|source| MigrationError::Failed {
                    id: id.clone(),
                    source,
                })?;
            reverted.push(id);
        }

        info!(
            self.logger, "Database migrations reverted";
            "tenant" => %self.tenant, "reverted_migrations" => reverted.len()
        );

        Ok(reverted)
    }

    fn revert_one(&self, migration: &dyn SchemaMigration, id: &MigrationId) -> StdResult<()> {
        let transaction = Transaction::begin(self.connection)?;
        migration.down(&self.context())?;
        self.connection
            .apply(DeleteAppliedMigrationQuery::by_id(&self.history_table(), id))?;
        transaction.commit()?;

        Ok(())
    }
}
