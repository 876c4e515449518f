use anyhow::Context;
use sqlite::{ReadableWithIndex, Statement, Value};

use mymodule_common::StdResult;

use crate::sqlite::{EntityCursor, Query, SqliteConnection};

/// Extension trait for the [SqliteConnection] type.
pub trait ConnectionExtensions {
    /// Execute the given sql query and return the value of the first cell read.
    fn query_single_cell<Q: AsRef<str>, T: ReadableWithIndex>(
        &self,
        sql: Q,
        params: &[Value],
    ) -> StdResult<T>;

    /// Execute the given query and return a cursor hydrating its entities.
    fn fetch<Q: Query>(&self, query: Q) -> StdResult<EntityCursor<'_, Q::Entity>>;

    /// Execute the given query and return the first entity, if any.
    fn fetch_first<Q: Query>(&self, query: Q) -> StdResult<Option<Q::Entity>> {
        self.fetch(query)?.next().transpose()
    }

    /// Execute the given query and collect every entity.
    fn fetch_collection<Q: Query, B: FromIterator<Q::Entity>>(&self, query: Q) -> StdResult<B> {
        self.fetch(query)?.collect()
    }

    /// Execute the given query, discarding its results.
    fn apply<Q: Query>(&self, query: Q) -> StdResult<()> {
        for entity in self.fetch(query)? {
            entity?;
        }

        Ok(())
    }
}

fn prepare_statement<'conn>(
    connection: &'conn SqliteConnection,
    sql: &str,
) -> StdResult<Statement<'conn>> {
    connection.prepare(sql).with_context(|| {
        format!("Prepare query error: SQL=`{}`", sql.replace('\n', " ").trim())
    })
}

impl ConnectionExtensions for SqliteConnection {
    fn query_single_cell<Q: AsRef<str>, T: ReadableWithIndex>(
        &self,
        sql: Q,
        params: &[Value],
    ) -> StdResult<T> {
        let mut statement = prepare_statement(self, sql.as_ref())?;
        statement.bind(params)?;
        statement.next()?;
        statement.read::<T, _>(0).with_context(|| "Read query error")
    }

    fn fetch<Q: Query>(&self, query: Q) -> StdResult<EntityCursor<'_, Q::Entity>> {
        let mut params = query.definition_parameters();
        let (condition, filter_params) = query.filters().expand_after(params.len());
        params.extend(filter_params);
        let sql = query.get_definition(&condition);
        let cursor = prepare_statement(self, &sql)?
            .into_iter()
            .bind(&params[..])
            .with_context(|| format!("Could not bind query parameters: SQL=`{sql}`"))?;

        Ok(EntityCursor::new(cursor))
    }
}

#[cfg(test)]
mod tests {
    use sqlite::Connection;

    use super::*;

    #[test]
    fn query_single_string_cell() {
        let connection = Connection::open_thread_safe(":memory:").unwrap();

        let value: String = connection.query_single_cell("select 'test'", &[]).unwrap();

        assert_eq!("test", value);
    }

    #[test]
    fn query_single_cell_with_params() {
        let connection = Connection::open_thread_safe(":memory:").unwrap();

        let value: i64 = connection
            .query_single_cell(
                "select max(a) from (select 10 a union select 45 a union select 90 a) \
                where a > ? and a < ?",
                &[Value::Integer(10), Value::Integer(90)],
            )
            .unwrap();

        assert_eq!(45, value);
    }

    #[test]
    fn query_single_cell_reports_invalid_sql() {
        let connection = Connection::open_thread_safe(":memory:").unwrap();

        let error = connection
            .query_single_cell::<_, i64>("select from nowhere", &[])
            .expect_err("Invalid SQL should fail");

        assert!(format!("{error:?}").contains("select from nowhere"));
    }
}
