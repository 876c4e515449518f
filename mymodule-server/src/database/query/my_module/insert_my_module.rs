use sqlite::Value;

use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::MyModuleRecord;

use super::projection_on;

/// Query to insert a [MyModuleRecord] in the sqlite database, its id is assigned by the database.
pub struct InsertMyModuleRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl InsertMyModuleRecordQuery {
    /// Insert the given record, ignoring its id
    pub fn one(table: &str, record: MyModuleRecord) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new(
                "(\"ModuleId\", \"Name\", \"CreatedBy\", \"CreatedOn\", \"ModifiedBy\", \"ModifiedOn\", \"IsDeleted\") values (?*, ?*, ?*, ?*, ?*, ?*, ?*)",
                vec![
                    Value::Integer(record.module_id),
                    record.name.map(Value::String).unwrap_or(Value::Null),
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

impl Query for InsertMyModuleRecordQuery {
    type Entity = MyModuleRecord;

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

#[cfg(test)]
mod tests {
    use mymodule_persistence::sqlite::ConnectionExtensions;

    use crate::database::schema::MY_MODULE_TABLE;
    use crate::database::test_helper::{fixed_date, insert_container, main_db_connection};

    use super::*;

    fn new_record(module_id: i64) -> MyModuleRecord {
        MyModuleRecord {
            my_module_id: 0,
            module_id,
            name: None,
            created_by: Some("admin".to_string()),
            created_on: fixed_date(0),
            modified_by: Some("admin".to_string()),
            modified_on: fixed_date(0),
            is_deleted: false,
        }
    }

    #[test]
    fn inserted_records_get_increasing_ids() {
        let connection = main_db_connection().unwrap();
        let container = insert_container(&connection);

        let first = connection
            .fetch_first(InsertMyModuleRecordQuery::one(MY_MODULE_TABLE, new_record(container)))
            .unwrap()
            .unwrap();
        let second = connection
            .fetch_first(InsertMyModuleRecordQuery::one(MY_MODULE_TABLE, new_record(container)))
            .unwrap()
            .unwrap();

        assert!(second.my_module_id > first.my_module_id);
        assert_eq!(
            MyModuleRecord {
                my_module_id: first.my_module_id,
                ..new_record(container)
            },
            first
        );
    }

    #[test]
    fn insert_with_unknown_container_is_rejected_by_the_foreign_key() {
        let connection = main_db_connection().unwrap();

        let error = connection
            .fetch_first(InsertMyModuleRecordQuery::one(MY_MODULE_TABLE, new_record(404)))
            .expect_err("Inserting a record of an unknown container should fail");

        assert!(
            format!("{error:?}").contains("FOREIGN KEY constraint failed"),
            "unexpected error: {error:?}"
        );
    }
}
