use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use anyhow::Context;
use slog::{Logger, debug};
use thiserror::Error;

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;
use mymodule_common::logging::LoggerExtensions;
use mymodule_persistence::sqlite::{ConnectionBuilder, ConnectionOptions, SqliteConnectionPool};

use crate::Configuration;

/// Error raised when selecting a tenant database
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TenantDatabaseError {
    /// The tenant is not served by this host
    #[error("unknown tenant '{0}'")]
    UnknownTenant(Tenant),
}

/// Connection pools of the tenant databases, one per served tenant.
#[derive(Default)]
pub struct TenantDatabases {
    pools: BTreeMap<Tenant, Arc<SqliteConnectionPool>>,
}

impl TenantDatabases {
    /// Create an empty set of tenant databases
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the database file of every configured tenant, creating missing files.
    pub fn open(configuration: &Configuration, logger: &Logger) -> StdResult<Self> {
        let logger = logger.new_with_component_name::<Self>();
        fs::create_dir_all(&configuration.data_stores_directory).with_context(|| {
            format!(
                "Could not create data stores directory: {}",
                configuration.data_stores_directory.display()
            )
        })?;

        let mut databases = Self::new();
        for tenant in configuration.list_tenants()? {
            let path = configuration.tenant_database_path(&tenant);
            debug!(logger, "Opening tenant database"; "tenant" => %tenant, "path" => %path.display());

            let pool = SqliteConnectionPool::build(configuration.connection_pool_size, || {
                ConnectionBuilder::open_file(&path)
                    .with_options(&[
                        ConnectionOptions::EnableWriteAheadLog,
                        ConnectionOptions::EnableForeignKeys,
                    ])
                    .with_logger(logger.clone())
                    .build()
            })
            .with_context(|| format!("Could not open the database of tenant '{tenant}'"))?;
            databases = databases.with_pool(tenant, Arc::new(pool));
        }

        Ok(databases)
    }

    /// Serve the given tenant with the given pool
    pub fn with_pool(mut self, tenant: Tenant, pool: Arc<SqliteConnectionPool>) -> Self {
        self.pools.insert(tenant, pool);
        self
    }

    /// Connection pool of the given tenant
    pub fn pool(&self, tenant: &Tenant) -> Result<Arc<SqliteConnectionPool>, TenantDatabaseError> {
        self.pools
            .get(tenant)
            .cloned()
            .ok_or_else(|| TenantDatabaseError::UnknownTenant(tenant.clone()))
    }

    /// Served tenants, ordered by name
    pub fn tenants(&self) -> Vec<Tenant> {
        self.pools.keys().cloned().collect()
    }
}
