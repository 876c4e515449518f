//! Installation of the module in the tenant databases.

use std::sync::Arc;

use anyhow::Context;
use slog::{Logger, info};

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::module_info::{ModuleInfo, MyModuleInfo};
use mymodule_persistence::migration::{MigrationId, MigrationRunner};
use mymodule_persistence::naming::TableNamePolicy;
use mymodule_persistence::sqlite::SqliteConnection;

use crate::TenantDatabases;
use crate::database::migration::{get_host_migrations, get_module_migrations};

/// Server manager of the module: installs and uninstalls its schema in a tenant database.
pub struct MyModuleManager {
    databases: Arc<TenantDatabases>,
    naming: Arc<dyn TableNamePolicy>,
    logger: Logger,
}

impl MyModuleManager {
    /// `MyModuleManager` factory
    pub fn new(
        databases: Arc<TenantDatabases>,
        naming: Arc<dyn TableNamePolicy>,
        logger: Logger,
    ) -> Self {
        Self {
            databases,
            naming,
            logger: logger.new_with_component_name::<Self>(),
        }
    }

    fn module_runner<'conn>(
        &self,
        connection: &'conn SqliteConnection,
        tenant: &Tenant,
    ) -> StdResult<MigrationRunner<'conn>> {
        let version = MyModuleInfo.module_definition().parsed_version()?;
        let mut runner = MigrationRunner::new(
            connection,
            tenant.clone(),
            self.naming.clone(),
            self.logger.clone(),
        )
        .with_software_version(version);
        runner.add_migrations(get_module_migrations()?);

        Ok(runner)
    }

    /// Apply the pending migrations of the host tables then of the module in the database of
    /// the given tenant.
    ///
    /// Returns the ids of the applied module migrations.
    pub fn install(&self, tenant: &Tenant) -> StdResult<Vec<MigrationId>> {
        let pool = self.databases.pool(tenant)?;
        let connection = pool.connection()?;

        let mut host_runner = MigrationRunner::new(
            &connection,
            tenant.clone(),
            self.naming.clone(),
            self.logger.clone(),
        );
        host_runner.add_migrations(get_host_migrations()?);
        host_runner
            .apply()
            .with_context(|| format!("Could not install the host tables for tenant '{tenant}'"))?;

        let applied = self
            .module_runner(&connection, tenant)?
            .apply()
            .with_context(|| format!("Could not install the module for tenant '{tenant}'"))?;
        info!(self.logger, "Module installed"; "tenant" => %tenant, "applied_migrations" => applied.len());

        Ok(applied)
    }

    /// Install the module for every served tenant
    pub fn install_all(&self) -> StdResult<()> {
        for tenant in self.databases.tenants() {
            self.install(&tenant)?;
        }

        Ok(())
    }

    /// Revert every applied migration of the module in the database of the given tenant, the
    /// module table and its rows are dropped.
    ///
    /// The host tables are left untouched. Returns the ids of the reverted migrations.
    pub fn uninstall(&self, tenant: &Tenant) -> StdResult<Vec<MigrationId>> {
        let pool = self.databases.pool(tenant)?;
        let connection = pool.connection()?;

        let reverted = self
            .module_runner(&connection, tenant)?
            .rollback(None)
            .with_context(|| format!("Could not uninstall the module for tenant '{tenant}'"))?;
        info!(self.logger, "Module uninstalled"; "tenant" => %tenant, "reverted_migrations" => reverted.len());

        Ok(reverted)
    }
}
