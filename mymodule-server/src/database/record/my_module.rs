use chrono::{DateTime, Utc};
use sqlite::Row;

use mymodule_common::entities::{AuditInfo, ContainerId, ModuleRecord, RecordId};
use mymodule_persistence::sqlite::{HydrationError, Projection, SqLiteEntity};

use super::{read_bool, read_datetime};

/// A row of the `TheCompanyMyModule` table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MyModuleRecord {
    /// Record id, assigned by the database.
    pub my_module_id: RecordId,

    /// Id of the owning container.
    pub module_id: ContainerId,

    /// Free text name.
    pub name: Option<String>,

    /// Creator identity.
    pub created_by: Option<String>,

    /// Date and time when the record was created.
    pub created_on: DateTime<Utc>,

    /// Last modifier identity.
    pub modified_by: Option<String>,

    /// Date and time when the record was last modified.
    pub modified_on: DateTime<Utc>,

    /// Soft-delete flag.
    pub is_deleted: bool,
}

impl SqLiteEntity for MyModuleRecord {
    fn hydrate(row: Row) -> Result<Self, HydrationError>
    where
        Self: Sized,
    {
        let created_on = row.read::<&str, _>(4);
        let modified_on = row.read::<&str, _>(6);

        Ok(Self {
            my_module_id: row.read::<i64, _>(0),
            module_id: row.read::<i64, _>(1),
            name: row.read::<Option<&str>, _>(2).map(|s| s.to_owned()),
            created_by: row.read::<Option<&str>, _>(3).map(|s| s.to_owned()),
            created_on: read_datetime(created_on)?,
            modified_by: row.read::<Option<&str>, _>(5).map(|s| s.to_owned()),
            modified_on: read_datetime(modified_on)?,
            is_deleted: read_bool(row.read::<i64, _>(7), "IsDeleted")?,
        })
    }

    fn get_projection() -> Projection {
        Projection::from(&[
            ("my_module_id", "{:my_module:}.\"MyModuleId\"", "integer"),
            ("module_id", "{:my_module:}.\"ModuleId\"", "integer"),
            ("name", "{:my_module:}.\"Name\"", "text"),
            ("created_by", "{:my_module:}.\"CreatedBy\"", "text"),
            ("created_on", "{:my_module:}.\"CreatedOn\"", "text"),
            ("modified_by", "{:my_module:}.\"ModifiedBy\"", "text"),
            ("modified_on", "{:my_module:}.\"ModifiedOn\"", "text"),
            ("is_deleted", "{:my_module:}.\"IsDeleted\"", "integer"),
        ])
    }
}

impl From<MyModuleRecord> for ModuleRecord {
    fn from(other: MyModuleRecord) -> Self {
        Self {
            id: other.my_module_id,
            container_id: other.module_id,
            name: other.name,
            audit: AuditInfo {
                created_by: other.created_by,
                created_on: other.created_on,
                modified_by: other.modified_by,
                modified_on: other.modified_on,
                is_deleted: other.is_deleted,
            },
        }
    }
}

impl From<ModuleRecord> for MyModuleRecord {
    fn from(other: ModuleRecord) -> Self {
        Self {
            my_module_id: other.id,
            module_id: other.container_id,
            name: other.name,
            created_by: other.audit.created_by,
            created_on: other.audit.created_on,
            modified_by: other.audit.modified_by,
            modified_on: other.audit.modified_on,
            is_deleted: other.audit.is_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn convert_to_and_from_module_record_keeps_every_field() {
        let record = MyModuleRecord {
            my_module_id: 3,
            module_id: 7,
            name: Some("Alpha".to_string()),
            created_by: Some("admin".to_string()),
            created_on: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            modified_by: Some("editor".to_string()),
            modified_on: Utc.timestamp_opt(1_700_000_100, 0).unwrap(),
            is_deleted: true,
        };

        let module_record: ModuleRecord = record.clone().into();

        assert_eq!(3, module_record.id);
        assert_eq!(7, module_record.container_id);
        assert_eq!(Some("editor".to_string()), module_record.audit.modified_by);
        assert!(module_record.audit.is_deleted);
        assert_eq!(record, MyModuleRecord::from(module_record));
    }
}
