use chrono::{DateTime, Utc};
use sqlite::Row;

use mymodule_common::entities::ContainerId;
use mymodule_persistence::sqlite::{HydrationError, Projection, SqLiteEntity};

use super::{read_bool, read_datetime};

/// A row of the host `Module` table: a module instance placed by the host, owning records.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ContainerRecord {
    /// Container id, assigned by the database.
    pub module_id: ContainerId,

    /// Name of the module definition this container is an instance of.
    pub module_definition_name: String,

    /// Creator identity.
    pub created_by: Option<String>,

    /// Date and time when the container was created.
    pub created_on: DateTime<Utc>,

    /// Last modifier identity.
    pub modified_by: Option<String>,

    /// Date and time when the container was last modified.
    pub modified_on: DateTime<Utc>,

    /// Soft-delete flag.
    pub is_deleted: bool,
}

impl ContainerRecord {
    /// A container not stored yet, created now by the given user
    pub fn new<T: Into<String>>(
        module_definition_name: T,
        user: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            module_id: 0,
            module_definition_name: module_definition_name.into(),
            created_by: user.clone(),
            created_on: now,
            modified_by: user,
            modified_on: now,
            is_deleted: false,
        }
    }
}

impl SqLiteEntity for ContainerRecord {
    fn hydrate(row: Row) -> Result<Self, HydrationError>
    where
        Self: Sized,
    {
        let created_on = row.read::<&str, _>(3);
        let modified_on = row.read::<&str, _>(5);

        Ok(Self {
            module_id: row.read::<i64, _>(0),
            module_definition_name: row.read::<&str, _>(1).to_string(),
            created_by: row.read::<Option<&str>, _>(2).map(|s| s.to_owned()),
            created_on: read_datetime(created_on)?,
            modified_by: row.read::<Option<&str>, _>(4).map(|s| s.to_owned()),
            modified_on: read_datetime(modified_on)?,
            is_deleted: read_bool(row.read::<i64, _>(6), "IsDeleted")?,
        })
    }

    fn get_projection() -> Projection {
        Projection::from(&[
            ("module_id", "{:container:}.\"ModuleId\"", "integer"),
            (
                "module_definition_name",
                "{:container:}.\"ModuleDefinitionName\"",
                "text",
            ),
            ("created_by", "{:container:}.\"CreatedBy\"", "text"),
            ("created_on", "{:container:}.\"CreatedOn\"", "text"),
            ("modified_by", "{:container:}.\"ModifiedBy\"", "text"),
            ("modified_on", "{:container:}.\"ModifiedOn\"", "text"),
            ("is_deleted", "{:container:}.\"IsDeleted\"", "integer"),
        ])
    }
}
