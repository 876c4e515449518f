use sqlite::Value;

use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::MyModuleRecord;

use super::projection_on;

/// Columns rewritten by an update, in the order of their values
const UPDATED_COLUMNS: [&str; 4] = ["Name", "ModifiedBy", "ModifiedOn", "IsDeleted"];

/// Query to update the mutable fields of a [MyModuleRecord].
///
/// The id, the container and the creation audit fields are never rewritten.
pub struct UpdateMyModuleRecordQuery {
    table: String,
    my_module_id: i64,
    values: Vec<Value>,
}

impl UpdateMyModuleRecordQuery {
    /// Update the record with the id of the given one
    pub fn one(table: &str, record: MyModuleRecord) -> Self {
        Self {
            table: table.to_string(),
            my_module_id: record.my_module_id,
            values: vec![
                record.name.map(Value::String).unwrap_or(Value::Null),
                record.modified_by.map(Value::String).unwrap_or(Value::Null),
                Value::String(record.modified_on.to_rfc3339()),
                Value::Integer(record.is_deleted as i64),
            ],
        }
    }
}

impl Query for UpdateMyModuleRecordQuery {
    type Entity = MyModuleRecord;

    fn filters(&self) -> WhereCondition {
        WhereCondition::new(
            "\"MyModuleId\" = ?*",
            vec![Value::Integer(self.my_module_id)],
        )
    }

    fn get_definition(&self, condition: &str) -> String {
        let assignments = UPDATED_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{} = ?{}", quote_identifier(column), index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let projection = projection_on(&self.table);

        format!(
            "update {} set {assignments} where {condition} returning {projection}",
            quote_identifier(&self.table)
        )
    }

    fn definition_parameters(&self) -> Vec<Value> {
        self.values.clone()
    }
}
