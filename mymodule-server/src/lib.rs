#![warn(missing_docs)]

//! Server side of the MyModule module.
//!
//! This crate provides:
//! - The tenant databases and the data-access [context][crate::context] over the module table.
//! - The [direct service][crate::services::ServerMyModuleService] implementing the module
//!   service contract in process.
//! - The schema migrations and the [manager][crate::manager::MyModuleManager] installing them.
//! - An HTTP API exposing the service to the remote implementation.
//! - The `mymodule-server` command line.

pub mod commands;
mod configuration;
pub mod context;
pub mod database;
pub mod dependency_injection;
pub mod http_server;
pub mod manager;
pub mod services;
pub mod startup;
mod tenant_databases;

pub use commands::{MainCommand, MainOpts};
pub use configuration::{Configuration, DefaultConfiguration, ExecutionEnvironment};
pub use dependency_injection::{DependenciesBuilder, DependencyContainer};
pub use tenant_databases::{TenantDatabaseError, TenantDatabases};

#[cfg(test)]
pub(crate) mod test_tools {
    use std::sync::Arc;

    use mymodule_common::entities::Tenant;
    use mymodule_common::test_utils::TestLogger;
    use mymodule_persistence::naming::{TableNamePolicy, VerbatimTableNames};
    use mymodule_persistence::sqlite::{
        ConnectionBuilder, ConnectionOptions, SqliteConnectionPool,
    };

    use crate::TenantDatabases;
    use crate::context::MyModuleContextFactory;
    use crate::manager::MyModuleManager;

    /// Tenant used by the unit tests
    pub fn main_tenant() -> Tenant {
        Tenant::new("main")
    }

    /// Tenant databases held in memory, one single connection pool per tenant
    pub fn memory_tenant_databases(tenants: &[Tenant]) -> Arc<TenantDatabases> {
        let mut databases = TenantDatabases::new();
        for tenant in tenants {
            let connection = ConnectionBuilder::open_memory()
                .with_options(&[ConnectionOptions::EnableForeignKeys])
                .build()
                .unwrap();
            databases = databases.with_pool(
                tenant.clone(),
                Arc::new(SqliteConnectionPool::build_from_connection(connection)),
            );
        }

        Arc::new(databases)
    }

    /// Context factory over in-memory databases where the module is installed for every tenant
    pub fn installed_context_factory(
        tenants: &[Tenant],
        naming: Arc<dyn TableNamePolicy>,
    ) -> Arc<MyModuleContextFactory> {
        let databases = memory_tenant_databases(tenants);
        let manager = MyModuleManager::new(databases.clone(), naming.clone(), TestLogger::stdout());
        for tenant in tenants {
            manager.install(tenant).unwrap();
        }

        Arc::new(MyModuleContextFactory::new(
            databases,
            naming,
            TestLogger::stdout(),
        ))
    }

    /// Context factory over in-memory databases for the main tenant, verbatim table names
    pub fn main_context_factory() -> Arc<MyModuleContextFactory> {
        installed_context_factory(&[main_tenant()], Arc::new(VerbatimTableNames))
    }
}
