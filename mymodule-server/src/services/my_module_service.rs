use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use slog::{Logger, debug, warn};

use mymodule_common::entities::{
    AuditInfo, ContainerId, ModuleRecord, NewModuleRecord, RecordId, ServiceScope,
};
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::services::{MyModuleService, MyModuleServiceError, ServiceResult};
use mymodule_common::StdError;

use crate::TenantDatabaseError;
use crate::context::{MyModuleContext, MyModuleContextFactory};

const SQLITE_NO_SUCH_TABLE: &str = "no such table";
const SQLITE_FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

/// Check if an error of the given type in the chain of the given error satisfies the predicate
fn chain_contains<E: std::error::Error + 'static>(
    error: &StdError,
    predicate: impl Fn(&E) -> bool,
) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<E>())
        .any(predicate)
}

fn sqlite_message_contains(error: &StdError, needle: &str) -> bool {
    chain_contains::<sqlite::Error>(error, |e| {
        e.message.as_deref().is_some_and(|message| message.contains(needle))
    })
}

/// Map a storage failure to the error taxonomy of the service
fn storage_error(error: StdError) -> MyModuleServiceError {
    if chain_contains::<TenantDatabaseError>(&error, |_| true) {
        MyModuleServiceError::Validation(format!("{error:#}"))
    } else if sqlite_message_contains(&error, SQLITE_FOREIGN_KEY_FAILED) {
        MyModuleServiceError::Validation(format!("{error:#}"))
    } else if sqlite_message_contains(&error, SQLITE_NO_SUCH_TABLE) {
        MyModuleServiceError::Schema(error)
    } else {
        MyModuleServiceError::Internal(error)
    }
}

/// Implementation of the module service working in process on the tenant database.
///
/// An instance serves one [ServiceScope] and creates one context per operation.
pub struct ServerMyModuleService {
    scope: ServiceScope,
    context_factory: Arc<MyModuleContextFactory>,
    logger: Logger,
}

impl ServerMyModuleService {
    /// `ServerMyModuleService` factory
    pub fn new(
        scope: ServiceScope,
        context_factory: Arc<MyModuleContextFactory>,
        logger: Logger,
    ) -> Self {
        Self {
            scope,
            context_factory,
            logger: logger.new_with_component_name::<Self>(),
        }
    }

    fn create_context(&self) -> ServiceResult<MyModuleContext> {
        self.context_factory
            .create_context(&self.scope.tenant)
            .map_err(|e| self.report(e))
    }

    fn report(&self, error: StdError) -> MyModuleServiceError {
        let error = storage_error(error);
        warn!(
            self.logger, "Storage operation failed";
            "tenant" => %self.scope.tenant, "error" => ?error
        );
        error
    }
}

#[async_trait]
impl MyModuleService for ServerMyModuleService {
    async fn get_records(&self, container_id: ContainerId) -> ServiceResult<Vec<ModuleRecord>> {
        debug!(self.logger, ">> get_records"; "tenant" => %self.scope.tenant, "container_id" => container_id);
        let context = self.create_context()?;

        context
            .my_module()
            .by_container(container_id)
            .map_err(|e| self.report(e))
    }

    async fn get_record(&self, id: RecordId) -> ServiceResult<Option<ModuleRecord>> {
        debug!(self.logger, ">> get_record"; "tenant" => %self.scope.tenant, "id" => id);
        let context = self.create_context()?;

        context.my_module().find(id).map_err(|e| self.report(e))
    }

    async fn add_record(&self, record: NewModuleRecord) -> ServiceResult<ModuleRecord> {
        debug!(self.logger, ">> add_record"; "tenant" => %self.scope.tenant, "container_id" => record.container_id);
        let context = self.create_context()?;
        let transaction = context.begin_write_transaction().map_err(|e| self.report(e))?;

        let container_exists = context
            .containers()
            .exists(record.container_id)
            .map_err(|e| self.report(e))?;
        if !container_exists {
            return Err(MyModuleServiceError::Validation(format!(
                "container {} does not exist",
                record.container_id
            )));
        }

        let audit = AuditInfo::created_by(self.scope.user.clone(), Utc::now());
        let stored = context
            .my_module()
            .insert(record, audit)
            .map_err(|e| self.report(e))?;
        transaction
            .commit()
            .map_err(|e| self.report(e.into()))?;

        Ok(stored)
    }

    async fn update_record(&self, record: ModuleRecord) -> ServiceResult<ModuleRecord> {
        debug!(self.logger, ">> update_record"; "tenant" => %self.scope.tenant, "id" => record.id);
        let context = self.create_context()?;
        let transaction = context.begin_write_transaction().map_err(|e| self.report(e))?;

        let stored = context
            .my_module()
            .find(record.id)
            .map_err(|e| self.report(e))?
            .ok_or(MyModuleServiceError::NotFound(record.id))?;
        if stored.container_id != record.container_id {
            return Err(MyModuleServiceError::Validation(format!(
                "record {} belongs to container {} and can not be moved to container {}",
                stored.id, stored.container_id, record.container_id
            )));
        }

        let to_update = ModuleRecord {
            id: stored.id,
            container_id: stored.container_id,
            name: record.name,
            audit: AuditInfo {
                created_by: stored.audit.created_by,
                created_on: stored.audit.created_on,
                modified_by: self.scope.user.clone(),
                modified_on: Utc::now(),
                is_deleted: record.audit.is_deleted,
            },
        };
        let updated = context
            .my_module()
            .update(to_update)
            .map_err(|e| self.report(e))?
            .ok_or(MyModuleServiceError::NotFound(record.id))?;
        transaction
            .commit()
            .map_err(|e| self.report(e.into()))?;

        Ok(updated)
    }

    async fn delete_record(&self, id: RecordId) -> ServiceResult<()> {
        debug!(self.logger, ">> delete_record"; "tenant" => %self.scope.tenant, "id" => id);
        let context = self.create_context()?;

        context
            .my_module()
            .delete(id)
            .map_err(|e| self.report(e))?
            .map(|_| ())
            .ok_or(MyModuleServiceError::NotFound(id))
    }
}
