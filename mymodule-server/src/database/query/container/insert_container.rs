use sqlite::Value;

use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::ContainerRecord;

use super::projection_on;

/// Query to insert a [ContainerRecord], its id is assigned by the database.
pub struct InsertContainerRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl InsertContainerRecordQuery {
    /// Insert the given container, ignoring its id
    pub fn one(table: &str, record: ContainerRecord) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new(
                "(\"ModuleDefinitionName\", \"CreatedBy\", \"CreatedOn\", \"ModifiedBy\", \"ModifiedOn\", \"IsDeleted\") values (?*, ?*, ?*, ?*, ?*, ?*)",
                vec![
                    Value::String(record.module_definition_name),
                    record.created_by.map(Value::String).unwrap_or(Value::Null),
                    Value::String(record.created_on.to_rfc3339()),
                    record.modified_by.map(Value::String).unwrap_or(Value::Null),
                    Value::String(record.modified_on.to_rfc3339()),
                    Value::Integer(record.is_deleted as i64),
                ],
            ),
        }
    }
}

impl Query for InsertContainerRecordQuery {
    type Entity = ContainerRecord;

    fn filters(&self) -> WhereCondition {
        self.condition.clone()
    }

    fn get_definition(&self, condition: &str) -> String {
        let projection = projection_on(&self.table);

        format!(
            "insert into {} {condition} returning {projection}",
            quote_identifier(&self.table)
        )
    }
}
