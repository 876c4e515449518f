use sqlite::Value;

use mymodule_common::entities::{ContainerId, RecordId};
use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{Query, WhereCondition};

use crate::database::record::MyModuleRecord;

use super::projection_on;

/// Simple queries to retrieve [MyModuleRecord] from the sqlite database.
pub struct GetMyModuleRecordQuery {
    table: String,
    condition: WhereCondition,
}

impl GetMyModuleRecordQuery {
    /// Records owned by the given container
    pub fn by_container(table: &str, container_id: ContainerId) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new("\"ModuleId\" = ?*", vec![Value::Integer(container_id)]),
        }
    }

    /// Record with the given id
    pub fn by_id(table: &str, id: RecordId) -> Self {
        Self {
            table: table.to_string(),
            condition: WhereCondition::new("\"MyModuleId\" = ?*", vec![Value::Integer(id)]),
        }
    }
}

impl Query for GetMyModuleRecordQuery {
    type Entity = MyModuleRecord;

    fn filters(&self) -> WhereCondition {
        self.condition.clone()
    }

    fn get_definition(&self, condition: &str) -> String {
        let projection = projection_on(&self.table);

        format!(
            "select {projection} from {} where {condition} order by \"MyModuleId\" asc",
            quote_identifier(&self.table)
        )
    }
}

#[cfg(test)]
mod tests {
    use mymodule_persistence::sqlite::ConnectionExtensions;

    use crate::database::query::InsertMyModuleRecordQuery;
    use crate::database::schema::MY_MODULE_TABLE;
    use crate::database::test_helper::{fixed_date, insert_container, main_db_connection};

    use super::*;

    fn insert_record(
        connection: &mymodule_persistence::sqlite::SqliteConnection,
        container_id: ContainerId,
        name: &str,
    ) -> MyModuleRecord {
        connection
            .fetch_first(InsertMyModuleRecordQuery::one(
                MY_MODULE_TABLE,
                MyModuleRecord {
                    my_module_id: 0,
                    module_id: container_id,
                    name: Some(name.to_string()),
                    created_by: None,
                    created_on: fixed_date(0),
                    modified_by: None,
                    modified_on: fixed_date(0),
                    is_deleted: false,
                },
            ))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn get_by_container_returns_only_the_container_records_ordered_by_id() {
        let connection = main_db_connection().unwrap();
        let container = insert_container(&connection);
        let other_container = insert_container(&connection);
        let first = insert_record(&connection, container, "first");
        insert_record(&connection, other_container, "other");
        let second = insert_record(&connection, container, "second");

        let records: Vec<MyModuleRecord> = connection
            .fetch_collection(GetMyModuleRecordQuery::by_container(MY_MODULE_TABLE, container))
            .unwrap();

        assert_eq!(vec![first, second], records);
    }

    #[test]
    fn get_by_id() {
        let connection = main_db_connection().unwrap();
        let container = insert_container(&connection);
        let record = insert_record(&connection, container, "first");

        let found = connection
            .fetch_first(GetMyModuleRecordQuery::by_id(MY_MODULE_TABLE, record.my_module_id))
            .unwrap();
        let absent = connection
            .fetch_first(GetMyModuleRecordQuery::by_id(MY_MODULE_TABLE, record.my_module_id + 1))
            .unwrap();

        assert_eq!(Some(record), found);
        assert_eq!(None, absent);
    }
}
