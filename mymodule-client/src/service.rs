use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use slog::{Logger, warn};

use mymodule_common::entities::{
    ContainerId, ModuleRecord, NewModuleRecord, RecordId, ServiceScope,
};
use mymodule_common::logging::LoggerExtensions;
use mymodule_common::messages::{ErrorMessage, ModuleRecordMessage};
use mymodule_common::services::{MyModuleService, MyModuleServiceError, ServiceResult};

use crate::query::{
    DeleteModuleRecordQuery, GetModuleRecordQuery, GetModuleRecordsQuery, PostModuleRecordQuery,
    PutModuleRecordQuery,
};
use crate::{MyModuleClient, MyModuleHttpClientError};

/// Implementation of the module service contract over the HTTP API of a `mymodule-server`.
///
/// An instance sends every operation on behalf of its scope.
pub struct RemoteMyModuleService {
    client: Arc<MyModuleClient>,
    scope: ServiceScope,
    logger: Logger,
}

impl RemoteMyModuleService {
    /// `RemoteMyModuleService` factory
    pub fn new(client: Arc<MyModuleClient>, scope: ServiceScope, logger: Logger) -> Self {
        Self {
            client,
            scope,
            logger: logger.new_with_component_name::<Self>(),
        }
    }

    fn report(&self, operation: &str, error: MyModuleHttpClientError) -> MyModuleHttpClientError {
        warn!(
            self.logger, "{operation} failed";
            "tenant" => %self.scope.tenant, "error" => ?error
        );
        error
    }
}

/// Map a client error to the error the direct service reports for the same failure.
///
/// `record_id` is the id a `record_not_found` reply refers to.
fn to_service_error(
    error: MyModuleHttpClientError,
    record_id: Option<RecordId>,
) -> MyModuleServiceError {
    match (error, record_id) {
        (MyModuleHttpClientError::RemoteServerUnreachable(source), _) => {
            MyModuleServiceError::Unreachable(source)
        }
        (MyModuleHttpClientError::RemoteServerLogical(message), _)
            if message.label == ErrorMessage::INVALID_RECORD =>
        {
            MyModuleServiceError::Validation(message.message)
        }
        (MyModuleHttpClientError::RemoteServerLogical(message), Some(id))
            if message.label == ErrorMessage::RECORD_NOT_FOUND =>
        {
            MyModuleServiceError::NotFound(id)
        }
        (MyModuleHttpClientError::RemoteServerTechnical(message), _)
            if message.label == ErrorMessage::SCHEMA_ERROR =>
        {
            MyModuleServiceError::Schema(anyhow!(message.message))
        }
        (error, _) => MyModuleServiceError::Internal(anyhow!(error)),
    }
}

#[async_trait]
impl MyModuleService for RemoteMyModuleService {
    async fn get_records(&self, container_id: ContainerId) -> ServiceResult<Vec<ModuleRecord>> {
        let messages = self
            .client
            .send(&self.scope, GetModuleRecordsQuery::of_container(container_id))
            .await
            .map_err(|e| to_service_error(self.report("get_records", e), None))?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    async fn get_record(&self, id: RecordId) -> ServiceResult<Option<ModuleRecord>> {
        let message = self
            .client
            .send(&self.scope, GetModuleRecordQuery::by_id(id))
            .await
            .map_err(|e| to_service_error(self.report("get_record", e), Some(id)))?;

        Ok(message.map(Into::into))
    }

    async fn add_record(&self, record: NewModuleRecord) -> ServiceResult<ModuleRecord> {
        let message = self
            .client
            .send(&self.scope, PostModuleRecordQuery::new(record.into()))
            .await
            .map_err(|e| to_service_error(self.report("add_record", e), None))?;

        Ok(message.into())
    }

    async fn update_record(&self, record: ModuleRecord) -> ServiceResult<ModuleRecord> {
        let id = record.id;
        let message = self
            .client
            .send(
                &self.scope,
                PutModuleRecordQuery::new(ModuleRecordMessage::from(record)),
            )
            .await
            .map_err(|e| to_service_error(self.report("update_record", e), Some(id)))?;

        Ok(message.into())
    }

    async fn delete_record(&self, id: RecordId) -> ServiceResult<()> {
        self.client
            .send(&self.scope, DeleteModuleRecordQuery::by_id(id))
            .await
            .map_err(|e| to_service_error(self.report("delete_record", e), Some(id)))
    }
}
