use sqlite::Value;

use mymodule_common::entities::ContainerId;
use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::ContainerRecord;

use super::projection_on;

/// Query to delete a [ContainerRecord], the records it owns are deleted in cascade.
pub struct DeleteContainerRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl DeleteContainerRecordQuery {
    /// Delete the container with the given id
    pub fn by_id(table: &str, container_id: ContainerId) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new("\"ModuleId\" = ?*", vec![Value::Integer(container_id)]),
        }
    }
}

impl Query for DeleteContainerRecordQuery {
    type Entity = ContainerRecord;

    fn filters(&self) -> WhereCondition {
        self.condition.clone()
    }

    fn get_definition(&self, condition: &str) -> String {
        let projection = projection_on(&self.table);

        format!(
            "delete from {} where {condition} returning {projection}",
            quote_identifier(&self.table)
        )
    }
}
