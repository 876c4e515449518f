use anyhow::Context;

use mymodule_common::StdResult;
use mymodule_common::entities::Tenant;

use crate::naming::{TableNamePolicy, quote_identifier};
use crate::schema::{ColumnDefinition, ColumnType, TableSchema};
use crate::sqlite::SqliteConnection;

/// Creates and drops the table described by a [TableSchema] in the database of a tenant.
///
/// Every table name, including the ones referenced by foreign keys, goes through the naming
/// policy.
pub struct EntityBuilder<'a> {
    schema: TableSchema,
    tenant: &'a Tenant,
    naming: &'a dyn TableNamePolicy,
}

impl<'a> EntityBuilder<'a> {
    /// `EntityBuilder` factory
    pub fn new(schema: TableSchema, tenant: &'a Tenant, naming: &'a dyn TableNamePolicy) -> Self {
        Self {
            schema,
            tenant,
            naming,
        }
    }

    /// Physical name of the table in the tenant database
    pub fn physical_table_name(&self) -> String {
        self.naming.physical_name(self.tenant, &self.schema.name)
    }

    fn column_sql(&self, column: &ColumnDefinition) -> String {
        let mut sql = format!(
            "{} {} {}",
            quote_identifier(&column.name),
            column.column_type.sql_type(),
            if column.nullable { "null" } else { "not null" }
        );

        let inline_primary_key = self.schema.primary_key.as_ref().filter(|primary_key| {
            primary_key.column == column.name && column.column_type == ColumnType::AutoIncrement
        });
        if let Some(primary_key) = inline_primary_key {
            sql.push_str(&format!(
                " constraint {} primary key autoincrement",
                quote_identifier(&primary_key.name)
            ));
        }

        sql
    }

    /// Statements creating the table and one index per foreign key column
    pub fn create_table_sql(&self) -> String {
        let table = self.physical_table_name();
        let mut definitions: Vec<String> =
            self.schema.columns.iter().map(|column| self.column_sql(column)).collect();

        if let Some(primary_key) = &self.schema.primary_key {
            let is_inline = self
                .schema
                .column(&primary_key.column)
                .is_some_and(|column| column.column_type == ColumnType::AutoIncrement);
            if !is_inline {
                definitions.push(format!(
                    "constraint {} primary key ({})",
                    quote_identifier(&primary_key.name),
                    quote_identifier(&primary_key.column)
                ));
            }
        }

        for foreign_key in &self.schema.foreign_keys {
            let principal_table =
                self.naming.physical_name(self.tenant, &foreign_key.principal_table);
            definitions.push(format!(
                "constraint {} foreign key ({}) references {} ({}) on delete {}",
                quote_identifier(&foreign_key.name),
                quote_identifier(&foreign_key.column),
                quote_identifier(&principal_table),
                quote_identifier(&foreign_key.principal_column),
                foreign_key.on_delete
            ));
        }

        let mut statements = vec![format!(
            "create table {} ({});",
            quote_identifier(&table),
            definitions.join(", ")
        )];
        for foreign_key in &self.schema.foreign_keys {
            statements.push(format!(
                "create index {} on {} ({});",
                quote_identifier(&format!("IX_{table}_{}", foreign_key.column)),
                quote_identifier(&table),
                quote_identifier(&foreign_key.column)
            ));
        }

        statements.join("\n")
    }

    /// Statement dropping the table, its indexes are dropped with it
    pub fn drop_table_sql(&self) -> String {
        format!("drop table {};", quote_identifier(&self.physical_table_name()))
    }

    /// Create the table, fails if it already exists
    pub fn create(&self, connection: &SqliteConnection) -> StdResult<()> {
        self.schema.validate()?;
        connection.execute(self.create_table_sql()).with_context(|| {
            format!(
                "Could not create table '{}' for tenant '{}'",
                self.physical_table_name(),
                self.tenant
            )
        })
    }

    /// Drop the table with all the rows it still stores
    pub fn drop(&self, connection: &SqliteConnection) -> StdResult<()> {
        connection.execute(self.drop_table_sql()).with_context(|| {
            format!(
                "Could not drop table '{}' for tenant '{}'",
                self.physical_table_name(),
                self.tenant
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use sqlite::Connection;

    use crate::naming::{TenantPrefixedTableNames, VerbatimTableNames};
    use crate::schema::ReferentialAction;
    use crate::sqlite::{ConnectionBuilder, ConnectionExtensions, ConnectionOptions};

    use super::*;

    fn parent_schema() -> TableSchema {
        TableSchema::new("Parent")
            .add_auto_increment_column("ParentId")
            .with_primary_key("PK_Parent", "ParentId")
    }

    fn child_schema() -> TableSchema {
        TableSchema::new("Child")
            .add_auto_increment_column("ChildId")
            .add_integer_column("ParentId", false)
            .add_max_string_column("Name", true)
            .with_primary_key("PK_Child", "ChildId")
            .with_foreign_key(
                "FK_Child_Parent",
                "ParentId",
                "Parent",
                "ParentId",
                ReferentialAction::Cascade,
            )
    }

    fn connection() -> SqliteConnection {
        ConnectionBuilder::open_memory()
            .with_options(&[ConnectionOptions::EnableForeignKeys])
            .build()
            .unwrap()
    }

    fn table_exists(connection: &SqliteConnection, table: &str) -> bool {
        connection
            .query_single_cell::<_, i64>(
                "select count(*) from sqlite_master where type = 'table' and name = ?",
                &[table.into()],
            )
            .unwrap()
            == 1
    }

    #[test]
    fn create_table_sql_declares_keys_and_indexes() {
        let tenant = Tenant::new("main");
        let builder = EntityBuilder::new(child_schema(), &tenant, &VerbatimTableNames);

        assert_eq!(
            r#"create table "Child" ("ChildId" integer not null constraint "PK_Child" primary key autoincrement, "ParentId" integer not null, "Name" text null, constraint "FK_Child_Parent" foreign key ("ParentId") references "Parent" ("ParentId") on delete cascade);
create index "IX_Child_ParentId" on "Child" ("ParentId");"#,
            builder.create_table_sql()
        );
    }

    #[test]
    fn non_auto_increment_primary_key_is_a_table_constraint() {
        let tenant = Tenant::new("main");
        let schema = TableSchema::new("Setting")
            .add_string_column("Key", 64, false)
            .with_primary_key("PK_Setting", "Key");

        let sql = EntityBuilder::new(schema, &tenant, &VerbatimTableNames).create_table_sql();

        assert_eq!(
            r#"create table "Setting" ("Key" varchar(64) not null, constraint "PK_Setting" primary key ("Key"));"#,
            sql
        );
    }

    #[test]
    fn tables_are_named_through_the_policy() {
        let tenant = Tenant::new("alpha");
        let builder = EntityBuilder::new(child_schema(), &tenant, &TenantPrefixedTableNames);

        let sql = builder.create_table_sql();

        assert_eq!("alpha_Child", builder.physical_table_name());
        assert!(sql.contains(r#"create table "alpha_Child""#), "{sql}");
        assert!(sql.contains(r#"references "alpha_Parent" ("ParentId")"#), "{sql}");
    }

    #[test]
    fn create_then_drop() {
        let connection = connection();
        let tenant = Tenant::new("main");
        EntityBuilder::new(parent_schema(), &tenant, &VerbatimTableNames)
            .create(&connection)
            .unwrap();
        let builder = EntityBuilder::new(child_schema(), &tenant, &VerbatimTableNames);

        builder.create(&connection).unwrap();
        assert!(table_exists(&connection, "Child"));

        builder.drop(&connection).unwrap();
        assert!(!table_exists(&connection, "Child"));
    }

    #[test]
    fn create_fails_when_the_table_already_exists() {
        let connection = connection();
        let tenant = Tenant::new("main");
        let builder = EntityBuilder::new(parent_schema(), &tenant, &VerbatimTableNames);
        builder.create(&connection).unwrap();

        let error = builder.create(&connection).expect_err("Second create should fail");

        assert!(format!("{error:?}").contains("already exists"), "{error:?}");
    }

    #[test]
    fn drop_succeeds_while_rows_are_stored() {
        let connection = connection();
        let tenant = Tenant::new("main");
        EntityBuilder::new(parent_schema(), &tenant, &VerbatimTableNames)
            .create(&connection)
            .unwrap();
        let builder = EntityBuilder::new(child_schema(), &tenant, &VerbatimTableNames);
        builder.create(&connection).unwrap();
        connection
            .execute(
                r#"insert into "Parent" default values;
                insert into "Child" ("ParentId", "Name") values (1, 'Alpha'), (1, 'Beta');"#,
            )
            .unwrap();

        builder.drop(&connection).unwrap();

        assert!(!table_exists(&connection, "Child"));
    }

    #[test]
    fn cascade_deletes_children_with_their_parent() {
        let connection = connection();
        let tenant = Tenant::new("main");
        EntityBuilder::new(parent_schema(), &tenant, &VerbatimTableNames)
            .create(&connection)
            .unwrap();
        EntityBuilder::new(child_schema(), &tenant, &VerbatimTableNames)
            .create(&connection)
            .unwrap();
        connection
            .execute(
                r#"insert into "Parent" default values;
                insert into "Child" ("ParentId", "Name") values (1, 'Alpha');
                delete from "Parent" where "ParentId" = 1;"#,
            )
            .unwrap();

        let children: i64 =
            connection.query_single_cell(r#"select count(*) from "Child""#, &[]).unwrap();
        assert_eq!(0, children);
    }

    #[test]
    fn create_rejects_invalid_schema_without_touching_the_database() {
        let connection = Connection::open_thread_safe(":memory:").unwrap();
        let tenant = Tenant::new("main");
        let schema = TableSchema::new("Broken").with_primary_key("PK_Broken", "Missing");

        EntityBuilder::new(schema, &tenant, &VerbatimTableNames)
            .create(&connection)
            .expect_err("Invalid schema should be rejected");

        assert!(!table_exists(&connection, "Broken"));
    }
}
