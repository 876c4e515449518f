use thiserror::Error;

use crate::StdError;
use crate::entities::RecordId;

/// Result type of the [MyModuleService][crate::services::MyModuleService] operations
pub type ServiceResult<T> = Result<T, MyModuleServiceError>;

/// Errors raised by every implementation of the module service.
///
/// Direct and remote implementations report the same variant for the same failure, so callers
/// can not tell which one is active.
#[derive(Error, Debug)]
pub enum MyModuleServiceError {
    /// The module table is missing or does not match the expected schema.
    #[error("module schema error")]
    Schema(#[source] StdError),

    /// The record breaks a storage rule (unknown container, container change, unknown tenant).
    #[error("invalid record: {0}")]
    Validation(String),

    /// No record has the given id.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// The remote service could not be reached.
    #[error("service unreachable")]
    Unreachable(#[source] StdError),

    /// Any other storage or protocol failure.
    #[error("internal error")]
    Internal(#[source] StdError),
}

impl MyModuleServiceError {
    /// Check if this error is a [MyModuleServiceError::NotFound] for the given id
    pub fn is_not_found(&self, id: RecordId) -> bool {
        matches!(self, Self::NotFound(not_found_id) if *not_found_id == id)
    }
}
