use async_trait::async_trait;

use crate::entities::{ContainerId, ModuleRecord, NewModuleRecord, RecordId};
use crate::services::ServiceResult;

/// CRUD operations on the module records.
///
/// An instance is bound to one [ServiceScope][crate::entities::ServiceScope]: the tenant it
/// reads and writes and the user stamped in the audit fields.
#[cfg_attr(any(test, feature = "test_tools"), mockall::automock)]
#[async_trait]
pub trait MyModuleService: Send + Sync {
    /// Every record of the given container, ordered by ascending id.
    async fn get_records(&self, container_id: ContainerId) -> ServiceResult<Vec<ModuleRecord>>;

    /// The record with the given id, `None` if there is none.
    async fn get_record(&self, id: RecordId) -> ServiceResult<Option<ModuleRecord>>;

    /// Store a new record and return it with its assigned id and audit fields.
    ///
    /// Fails with a validation error if the container does not exist.
    async fn add_record(&self, record: NewModuleRecord) -> ServiceResult<ModuleRecord>;

    /// Rewrite the name and the soft-delete flag of an existing record and re-stamp its
    /// modification audit fields.
    ///
    /// The owning container of a record can not change.
    async fn update_record(&self, record: ModuleRecord) -> ServiceResult<ModuleRecord>;

    /// Remove the record with the given id, fails with a not found error if there is none.
    async fn delete_record(&self, id: RecordId) -> ServiceResult<()>;
}
