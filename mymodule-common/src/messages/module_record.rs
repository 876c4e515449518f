use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{AuditInfo, ContainerId, ModuleRecord, NewModuleRecord, RecordId};

/// Message representation of a [ModuleRecord]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecordMessage {
    /// Record identifier
    pub my_module_id: RecordId,

    /// Identifier of the owning container
    pub module_id: ContainerId,

    /// Free text name
    pub name: Option<String>,

    /// Creator identity
    pub created_by: Option<String>,

    /// Creation date
    pub created_on: DateTime<Utc>,

    /// Last modifier identity
    pub modified_by: Option<String>,

    /// Last modification date
    pub modified_on: DateTime<Utc>,

    /// Soft-delete flag
    #[serde(default)]
    pub is_deleted: bool,
}

/// List of [ModuleRecordMessage]
pub type ModuleRecordListMessage = Vec<ModuleRecordMessage>;

impl From<ModuleRecord> for ModuleRecordMessage {
    fn from(record: ModuleRecord) -> Self {
        Self {
            my_module_id: record.id,
            module_id: record.container_id,
            name: record.name,
            created_by: record.audit.created_by,
            created_on: record.audit.created_on,
            modified_by: record.audit.modified_by,
            modified_on: record.audit.modified_on,
            is_deleted: record.audit.is_deleted,
        }
    }
}

impl From<ModuleRecordMessage> for ModuleRecord {
    fn from(message: ModuleRecordMessage) -> Self {
        Self {
            id: message.my_module_id,
            container_id: message.module_id,
            name: message.name,
            audit: AuditInfo {
                created_by: message.created_by,
                created_on: message.created_on,
                modified_by: message.modified_by,
                modified_on: message.modified_on,
                is_deleted: message.is_deleted,
            },
        }
    }
}

/// Message sent to create a record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModuleRecordMessage {
    /// Identifier of the owning container
    pub module_id: ContainerId,

    /// Free text name
    #[serde(default)]
    pub name: Option<String>,
}

impl From<NewModuleRecord> for NewModuleRecordMessage {
    fn from(record: NewModuleRecord) -> Self {
        Self {
            module_id: record.container_id,
            name: record.name,
        }
    }
}

impl From<NewModuleRecordMessage> for NewModuleRecord {
    fn from(message: NewModuleRecordMessage) -> Self {
        Self {
            container_id: message.module_id,
            name: message.name,
        }
    }
}
