use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;
use mymodule_common::test_utils::TestLogger;
use mymodule_persistence::migration::MigrationRunner;
use mymodule_persistence::naming::VerbatimTableNames;
use mymodule_persistence::sqlite::{
    ConnectionBuilder, ConnectionExtensions, ConnectionOptions, SqliteConnection,
};

use crate::database::migration::{get_host_migrations, get_module_migrations};
use crate::database::query::InsertContainerRecordQuery;
use crate::database::record::ContainerRecord;
use crate::database::schema::CONTAINER_TABLE;

/// In memory database of the main tenant, with verbatim table names and every migration applied
pub fn main_db_connection() -> StdResult<SqliteConnection> {
    let connection = ConnectionBuilder::open_memory()
        .with_options(&[ConnectionOptions::EnableForeignKeys])
        .build()?;
    let tenant = Tenant::new("main");

    for migrations in [get_host_migrations()?, get_module_migrations()?] {
        let mut runner = MigrationRunner::new(
            &connection,
            tenant.clone(),
            Arc::new(VerbatimTableNames),
            TestLogger::stdout(),
        );
        runner.add_migrations(migrations);
        runner.apply()?;
    }

    Ok(connection)
}

/// A fixed date, `offset_seconds` after 2023-11-14T22:13:20Z
pub fn fixed_date(offset_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset_seconds, 0).unwrap()
}

/// Insert a container and return its id
pub fn insert_container(connection: &SqliteConnection) -> i64 {
    connection
        .fetch_first(InsertContainerRecordQuery::one(
            CONTAINER_TABLE,
            ContainerRecord::new("MyModule", Some("host".to_string()), fixed_date(0)),
        ))
        .unwrap()
        .expect("The inserted container should be returned")
        .module_id
}
