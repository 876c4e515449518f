//! Schema migrations of the module, and of the host tables it relies on.

use std::sync::Arc;

use mymodule_common::StdResult;
use mymodule_common::module_info::MY_MODULE_PACKAGE_NAME;
use mymodule_persistence::migration::{MigrationContext, MigrationId, SchemaMigration};

use crate::database::schema::{container_schema, my_module_schema};

/// Package of the host framework migrations
pub const HOST_FRAMEWORK_PACKAGE: &str = "Oqtane.Framework";

/// Creates the module table.
pub struct InitializeModule {
    id: MigrationId,
}

impl InitializeModule {
    /// `InitializeModule` factory
    pub fn new() -> StdResult<Self> {
        Ok(Self {
            id: MigrationId::new(MY_MODULE_PACKAGE_NAME, 1, 0, 0, 0)?,
        })
    }
}

impl SchemaMigration for InitializeModule {
    fn id(&self) -> MigrationId {
        self.id.clone()
    }

    fn up(&self, context: &MigrationContext) -> StdResult<()> {
        context
            .entity_builder(my_module_schema())
            .create(context.connection)
    }

    fn down(&self, context: &MigrationContext) -> StdResult<()> {
        context
            .entity_builder(my_module_schema())
            .drop(context.connection)
    }
}

/// Creates the host container table referenced by the module table.
///
/// Stands for the host framework own migrations in a standalone deployment.
pub struct HostFrameworkMigration {
    id: MigrationId,
}

impl HostFrameworkMigration {
    /// `HostFrameworkMigration` factory
    pub fn new() -> StdResult<Self> {
        Ok(Self {
            id: MigrationId::new(HOST_FRAMEWORK_PACKAGE, 1, 0, 0, 0)?,
        })
    }
}

impl SchemaMigration for HostFrameworkMigration {
    fn id(&self) -> MigrationId {
        self.id.clone()
    }

    fn up(&self, context: &MigrationContext) -> StdResult<()> {
        context
            .entity_builder(container_schema())
            .create(context.connection)
    }

    fn down(&self, context: &MigrationContext) -> StdResult<()> {
        context
            .entity_builder(container_schema())
            .drop(context.connection)
    }
}

/// Migrations of the module, in order
pub fn get_module_migrations() -> StdResult<Vec<Arc<dyn SchemaMigration>>> {
    Ok(vec![Arc::new(InitializeModule::new()?)])
}

/// Migrations of the host tables the module relies on, in order
pub fn get_host_migrations() -> StdResult<Vec<Arc<dyn SchemaMigration>>> {
    Ok(vec![Arc::new(HostFrameworkMigration::new()?)])
}
