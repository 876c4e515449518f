use sqlite::Value;

use mymodule_common::entities::ContainerId;
use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::ContainerRecord;

use super::projection_on;

/// Simple queries to retrieve [ContainerRecord] from the sqlite database.
pub struct GetContainerRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl GetContainerRecordQuery {
    /// Container with the given id
    pub fn by_id(table: &str, container_id: ContainerId) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new("\"ModuleId\" = ?*", vec![Value::Integer(container_id)]),
        }
    }
}

impl Query for GetContainerRecordQuery {
    type Entity = ContainerRecord;

    fn filters(&self) -> WhereCondition {
        self.condition.clone()
    }

    fn get_definition(&self, condition: &str) -> String {
        let projection = projection_on(&self.table);

        format!(
            "select {projection} from {} where {condition}",
            quote_identifier(&self.table)
        )
    }
}
