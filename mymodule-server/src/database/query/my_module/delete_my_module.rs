use sqlite::Value;

use mymodule_common::entities::RecordId;
use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::MyModuleRecord;

use super::projection_on;

/// Query to delete a [MyModuleRecord] from the sqlite database, returning the deleted record.
pub struct DeleteMyModuleRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl DeleteMyModuleRecordQuery {
    /// Delete the record with the given id
    pub fn by_id(table: &str, id: RecordId) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new("\"MyModuleId\" = ?*", vec![Value::Integer(id)]),
        }
    }
}

impl Query for DeleteMyModuleRecordQuery {
    type Entity = MyModuleRecord;

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

#[cfg(test)]
mod tests {
    use mymodule_persistence::sqlite::ConnectionExtensions;

    use crate::database::query::{GetMyModuleRecordQuery, InsertMyModuleRecordQuery};
    use crate::database::schema::MY_MODULE_TABLE;
    use crate::database::test_helper::{fixed_date, insert_container, main_db_connection};

    use super::*;

    #[test]
    fn delete_returns_the_deleted_record_once() {
        let connection = main_db_connection().unwrap();
        let container = insert_container(&connection);
        let stored = connection
            .fetch_first(InsertMyModuleRecordQuery::one(
                MY_MODULE_TABLE,
                MyModuleRecord {
                    my_module_id: 0,
                    module_id: container,
                    name: Some("doomed".to_string()),
                    created_by: None,
                    created_on: fixed_date(0),
                    modified_by: None,
                    modified_on: fixed_date(0),
                    is_deleted: false,
                },
            ))
            .unwrap()
            .unwrap();

        let deleted = connection
            .fetch_first(DeleteMyModuleRecordQuery::by_id(MY_MODULE_TABLE, stored.my_module_id))
            .unwrap();
        let deleted_again = connection
            .fetch_first(DeleteMyModuleRecordQuery::by_id(MY_MODULE_TABLE, stored.my_module_id))
            .unwrap();

        assert_eq!(Some(stored.clone()), deleted);
        assert_eq!(None, deleted_again);
        assert_eq!(
            None,
            connection
                .fetch_first(GetMyModuleRecordQuery::by_id(MY_MODULE_TABLE, stored.my_module_id))
                .unwrap()
        );
    }
}
