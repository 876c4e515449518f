//! Tenant aware data-access context of the module.
//!
//! A [MyModuleContext] is the unit of work of the module storage: it owns a connection acquired
//! from the pool of one tenant database and gives it back when dropped. The physical names of
//! the tables it accesses are computed through the naming policy each time a table handle is
//! created.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use slog::{Logger, trace};

use mymodule_common::StdResult;
use mymodule_common::entities::{
    AuditInfo, ContainerId, ModuleRecord, NewModuleRecord, RecordId, Tenant,
};
use mymodule_common::logging::LoggerExtensions;
use mymodule_persistence::naming::TableNamePolicy;
use mymodule_persistence::sqlite::{
    ConnectionExtensions, SqliteConnection, SqlitePooledConnection, Transaction,
};

use crate::TenantDatabases;
use crate::database::query::{
    DeleteContainerRecordQuery, DeleteMyModuleRecordQuery, GetContainerRecordQuery,
    GetMyModuleRecordQuery, InsertContainerRecordQuery, InsertMyModuleRecordQuery,
    UpdateMyModuleRecordQuery,
};
use crate::database::record::{ContainerRecord, MyModuleRecord};
use crate::database::schema::{CONTAINER_TABLE, MY_MODULE_TABLE};

/// Creates [MyModuleContext]s bound to a tenant.
pub struct MyModuleContextFactory {
    databases: Arc<TenantDatabases>,
    naming: Arc<dyn TableNamePolicy>,
    logger: Logger,
}

impl MyModuleContextFactory {
    /// `MyModuleContextFactory` factory
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

    /// Acquire a connection to the database of the given tenant and wrap it in a context.
    pub fn create_context(&self, tenant: &Tenant) -> StdResult<MyModuleContext> {
        let pool = self.databases.pool(tenant)?;
        let connection = pool
            .connection()
            .with_context(|| format!("Could not acquire a connection for tenant '{tenant}'"))?;
        trace!(self.logger, "Context created"; "tenant" => %tenant);

        Ok(MyModuleContext {
            tenant: tenant.clone(),
            naming: self.naming.clone(),
            connection,
        })
    }
}

/// Data-access context of one tenant, owning a pooled connection.
pub struct MyModuleContext {
    tenant: Tenant,
    naming: Arc<dyn TableNamePolicy>,
    connection: SqlitePooledConnection,
}

impl MyModuleContext {
    /// Tenant this context works on
    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    /// Handle on the module records of the tenant
    pub fn my_module(&self) -> MyModuleTable<'_> {
        MyModuleTable {
            connection: &self.connection,
            table: self.naming.physical_name(&self.tenant, MY_MODULE_TABLE),
        }
    }

    /// Handle on the host containers of the tenant
    pub fn containers(&self) -> ContainerTable<'_> {
        ContainerTable {
            connection: &self.connection,
            table: self.naming.physical_name(&self.tenant, CONTAINER_TABLE),
        }
    }

    /// Start a transaction, rolled back unless committed
    pub fn begin_transaction(&self) -> StdResult<Transaction<'_>> {
        Transaction::begin(&self.connection).with_context(|| "Could not begin a transaction")
    }

    /// Start a transaction holding the write lock of the database, rolled back unless committed
    pub fn begin_write_transaction(&self) -> StdResult<Transaction<'_>> {
        Transaction::begin_immediate(&self.connection)
            .with_context(|| "Could not begin a write transaction")
    }
}

/// Typed access to the module table of a tenant.
pub struct MyModuleTable<'a> {
    connection: &'a SqliteConnection,
    table: String,
}

impl MyModuleTable<'_> {
    /// Physical name of the table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Records of the given container, ordered by id
    pub fn by_container(&self, container_id: ContainerId) -> StdResult<Vec<ModuleRecord>> {
        let records: Vec<MyModuleRecord> = self
            .connection
            .fetch_collection(GetMyModuleRecordQuery::by_container(&self.table, container_id))
            .with_context(|| format!("Could not list the records of container {container_id}"))?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Record with the given id
    pub fn find(&self, id: RecordId) -> StdResult<Option<ModuleRecord>> {
        let record = self
            .connection
            .fetch_first(GetMyModuleRecordQuery::by_id(&self.table, id))
            .with_context(|| format!("Could not get record {id}"))?;

        Ok(record.map(Into::into))
    }

    /// Store a new record with the given audit attributes, returning it with its assigned id
    pub fn insert(&self, record: NewModuleRecord, audit: AuditInfo) -> StdResult<ModuleRecord> {
        let container_id = record.container_id;
        let to_insert = MyModuleRecord::from(ModuleRecord {
            id: 0,
            container_id: record.container_id,
            name: record.name,
            audit,
        });

        let inserted = self
            .connection
            .fetch_first(InsertMyModuleRecordQuery::one(&self.table, to_insert))
            .with_context(|| format!("Could not insert a record in container {container_id}"))?
            .with_context(|| "Insertion did not return the inserted record")?;

        Ok(inserted.into())
    }

    /// Rewrite the mutable fields of the given record, `None` if it does not exist
    pub fn update(&self, record: ModuleRecord) -> StdResult<Option<ModuleRecord>> {
        let id = record.id;
        let updated = self
            .connection
            .fetch_first(UpdateMyModuleRecordQuery::one(&self.table, record.into()))
            .with_context(|| format!("Could not update record {id}"))?;

        Ok(updated.map(Into::into))
    }

    /// Delete the record with the given id, returning it, `None` if it does not exist
    pub fn delete(&self, id: RecordId) -> StdResult<Option<ModuleRecord>> {
        let deleted = self
            .connection
            .fetch_first(DeleteMyModuleRecordQuery::by_id(&self.table, id))
            .with_context(|| format!("Could not delete record {id}"))?;

        Ok(deleted.map(Into::into))
    }
}

/// Typed access to the host container table of a tenant.
pub struct ContainerTable<'a> {
    connection: &'a SqliteConnection,
    table: String,
}

impl ContainerTable<'_> {
    /// Check if the given container exists
    pub fn exists(&self, container_id: ContainerId) -> StdResult<bool> {
        let container = self
            .connection
            .fetch_first(GetContainerRecordQuery::by_id(&self.table, container_id))
            .with_context(|| format!("Could not get container {container_id}"))?;

        Ok(container.is_some())
    }

    /// Create a container instance of the given module definition, returning its id
    pub fn insert(
        &self,
        module_definition_name: &str,
        user: Option<String>,
        now: DateTime<Utc>,
    ) -> StdResult<ContainerId> {
        let container = self
            .connection
            .fetch_first(InsertContainerRecordQuery::one(
                &self.table,
                ContainerRecord::new(module_definition_name, user, now),
            ))
            .with_context(|| "Could not insert a container")?
            .with_context(|| "Insertion did not return the inserted container")?;

        Ok(container.module_id)
    }

    /// Delete the given container and, in cascade, its records. Returns `false` if it did not
    /// exist.
    pub fn delete(&self, container_id: ContainerId) -> StdResult<bool> {
        let deleted = self
            .connection
            .fetch_first(DeleteContainerRecordQuery::by_id(&self.table, container_id))
            .with_context(|| format!("Could not delete container {container_id}"))?;

        Ok(deleted.is_some())
    }
}
