use chrono::{DateTime, Utc};
use sqlite::{Row, Value};

use crate::migration::MigrationId;
use crate::naming::quote_identifier;
use crate::sqlite::{HydrationError, Projection, Query, SourceAlias, SqLiteEntity, WhereCondition};

/// Logical name of the table recording the applied migrations.
pub const MIGRATION_HISTORY_TABLE: &str = "__MigrationHistory";

/// A migration recorded in the history of a tenant database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Identity of the migration
    pub migration_id: MigrationId,

    /// Version of the software that applied it
    pub applied_version: String,

    /// When it was applied
    pub applied_on: DateTime<Utc>,
}

impl SqLiteEntity for AppliedMigration {
    fn hydrate(row: Row) -> Result<Self, HydrationError> {
        let migration_id = row.read::<&str, _>(0);
        let applied_on = row.read::<&str, _>(2);

        Ok(Self {
            migration_id: MigrationId::parse(migration_id).map_err(|e| {
                HydrationError::InvalidData(format!(
                    "Could not turn string '{migration_id}' to a MigrationId. Error: {e:?}"
                ))
            })?,
            applied_version: row.read::<&str, _>(1).to_string(),
            applied_on: DateTime::parse_from_rfc3339(applied_on)
                .map_err(|e| {
                    HydrationError::InconsistentType(format!(
                        "Could not turn string '{applied_on}' to rfc3339 Datetime. Error: {e}"
                    ))
                })?
                .with_timezone(&Utc),
        })
    }

    fn get_projection() -> Projection {
        Projection::from(&[
            ("migration_id", "{:history:}.\"MigrationId\"", "text"),
            ("applied_version", "{:history:}.\"AppliedVersion\"", "text"),
            ("applied_on", "{:history:}.\"AppliedDate\"", "text"),
        ])
    }
}

/// Statement creating the history table if it does not exist yet.
pub(crate) fn create_history_table_sql(history_table: &str) -> String {
    format!(
        r#"create table if not exists {} ("MigrationId" text not null primary key, "AppliedVersion" text not null, "AppliedDate" text not null);"#,
        quote_identifier(history_table)
    )
}

fn history_aliases(history_table: &str) -> SourceAlias {
    let source = quote_identifier(history_table);
    SourceAlias::new(&[("{:history:}", source.as_str())])
}

/// Query to list the applied migrations
pub(crate) struct GetAppliedMigrationsQuery {
    history_table: String,
}

impl GetAppliedMigrationsQuery {
    pub fn all(history_table: &str) -> Self {
        Self {
            history_table: history_table.to_string(),
        }
    }
}

impl Query for GetAppliedMigrationsQuery {
    type Entity = AppliedMigration;

    fn filters(&self) -> WhereCondition {
        WhereCondition::default()
    }

    fn get_definition(&self, condition: &str) -> String {
        let projection = Self::Entity::get_projection().expand(history_aliases(&self.history_table));

        format!(
            r#"select {projection} from {} where {condition} order by "MigrationId" asc"#,
            quote_identifier(&self.history_table)
        )
    }
}

/// Query to record an applied migration
pub(crate) struct InsertAppliedMigrationQuery {
    history_table: String,
    record: AppliedMigration,
}

impl InsertAppliedMigrationQuery {
    pub fn one(history_table: &str, record: AppliedMigration) -> Self {
        Self {
            history_table: history_table.to_string(),
            record,
        }
    }
}

impl Query for InsertAppliedMigrationQuery {
    type Entity = AppliedMigration;

    fn filters(&self) -> WhereCondition {
        WhereCondition::new(
            "(\"MigrationId\", \"AppliedVersion\", \"AppliedDate\") values (?*, ?*, ?*)",
            vec![
                Value::String(self.record.migration_id.to_string()),
                Value::String(self.record.applied_version.clone()),
                Value::String(self.record.applied_on.to_rfc3339()),
            ],
        )
    }

    fn get_definition(&self, condition: &str) -> String {
        let table = quote_identifier(&self.history_table);
        let projection = Self::Entity::get_projection().expand(history_aliases(&self.history_table));

        format!("insert into {table} {condition} returning {projection}")
    }
}

/// Query to remove a migration from the history
pub(crate) struct DeleteAppliedMigrationQuery {
    history_table: String,
    migration_id: MigrationId,
}

impl DeleteAppliedMigrationQuery {
    pub fn by_id(history_table: &str, migration_id: &MigrationId) -> Self {
        Self {
            history_table: history_table.to_string(),
            migration_id: migration_id.clone(),
        }
    }
}

impl Query for DeleteAppliedMigrationQuery {
    type Entity = AppliedMigration;

    fn filters(&self) -> WhereCondition {
        WhereCondition::new(
            "\"MigrationId\" = ?*",
            vec![Value::String(self.migration_id.to_string())],
        )
    }

    fn get_definition(&self, condition: &str) -> String {
        let table = quote_identifier(&self.history_table);
        let projection = Self::Entity::get_projection().expand(history_aliases(&self.history_table));

        format!("delete from {table} where {condition} returning {projection}")
    }
}
