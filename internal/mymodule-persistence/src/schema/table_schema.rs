use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use anyhow::anyhow;

use mymodule_common::StdResult;

/// Length of the user identity columns written by the host.
const USER_NAME_LENGTH: usize = 256;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer assigned by the database, must be the primary key
    AutoIncrement,

    /// 64 bits integer
    Integer,

    /// Text, with an optional maximum length
    Text {
        /// Maximum length, `None` for unbounded text
        max_length: Option<usize>,
    },

    /// UTC date and time, stored as RFC 3339 text
    DateTime,

    /// Boolean, stored as 0 or 1
    Boolean,
}

impl ColumnType {
    /// SQLite declared type of the column
    pub fn sql_type(&self) -> String {
        match self {
            Self::AutoIncrement | Self::Integer | Self::Boolean => "integer".to_string(),
            Self::Text { max_length: None } | Self::DateTime => "text".to_string(),
            Self::Text {
                max_length: Some(length),
            } => format!("varchar({length})"),
        }
    }
}

/// A column of a [TableSchema]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Storage type
    pub column_type: ColumnType,

    /// Whether the column accepts `null`
    pub nullable: bool,
}

/// Primary key constraint of a [TableSchema]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Constraint name
    pub name: String,

    /// Key column
    pub column: String,
}

/// What happens to the dependent rows when the referenced row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    /// Dependent rows are deleted
    Cascade,

    /// Deleting the referenced row fails
    Restrict,

    /// Dependent rows reference `null`
    SetNull,

    /// Checked at the end of the statement
    NoAction,
}

impl Display for ReferentialAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cascade => write!(f, "cascade"),
            Self::Restrict => write!(f, "restrict"),
            Self::SetNull => write!(f, "set null"),
            Self::NoAction => write!(f, "no action"),
        }
    }
}

/// Foreign key constraint of a [TableSchema]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name
    pub name: String,

    /// Referencing column
    pub column: String,

    /// Logical name of the referenced table
    pub principal_table: String,

    /// Referenced column
    pub principal_column: String,

    /// Action on delete of the referenced row
    pub on_delete: ReferentialAction,
}

/// Description of a table, independent of any tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Logical table name
    pub name: String,

    /// Columns, in declaration order
    pub columns: Vec<ColumnDefinition>,

    /// Primary key, if any
    pub primary_key: Option<PrimaryKey>,

    /// Foreign keys, in declaration order
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Schema of a table without any column
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            primary_key: None,
            foreign_keys: vec![],
        }
    }

    fn add_column(mut self, name: &str, column_type: ColumnType, nullable: bool) -> Self {
        self.columns.push(ColumnDefinition {
            name: name.to_string(),
            column_type,
            nullable,
        });
        self
    }

    /// Add a non nullable integer column assigned by the database
    pub fn add_auto_increment_column(self, name: &str) -> Self {
        self.add_column(name, ColumnType::AutoIncrement, false)
    }

    /// Add an integer column
    pub fn add_integer_column(self, name: &str, nullable: bool) -> Self {
        self.add_column(name, ColumnType::Integer, nullable)
    }

    /// Add an unbounded text column
    pub fn add_max_string_column(self, name: &str, nullable: bool) -> Self {
        self.add_column(name, ColumnType::Text { max_length: None }, nullable)
    }

    /// Add a text column of the given maximum length
    pub fn add_string_column(self, name: &str, length: usize, nullable: bool) -> Self {
        self.add_column(
            name,
            ColumnType::Text {
                max_length: Some(length),
            },
            nullable,
        )
    }

    /// Add a date time column
    pub fn add_date_time_column(self, name: &str, nullable: bool) -> Self {
        self.add_column(name, ColumnType::DateTime, nullable)
    }

    /// Add a boolean column
    pub fn add_boolean_column(self, name: &str, nullable: bool) -> Self {
        self.add_column(name, ColumnType::Boolean, nullable)
    }

    /// Add the audit columns every host entity carries
    pub fn add_auditable_columns(self) -> Self {
        self.add_string_column("CreatedBy", USER_NAME_LENGTH, true)
            .add_date_time_column("CreatedOn", false)
            .add_string_column("ModifiedBy", USER_NAME_LENGTH, true)
            .add_date_time_column("ModifiedOn", false)
            .add_boolean_column("IsDeleted", false)
    }

    /// Declare the primary key
    pub fn with_primary_key(mut self, name: &str, column: &str) -> Self {
        self.primary_key = Some(PrimaryKey {
            name: name.to_string(),
            column: column.to_string(),
        });
        self
    }

    /// Declare a foreign key
    pub fn with_foreign_key(
        mut self,
        name: &str,
        column: &str,
        principal_table: &str,
        principal_column: &str,
        on_delete: ReferentialAction,
    ) -> Self {
        self.foreign_keys.push(ForeignKey {
            name: name.to_string(),
            column: column.to_string(),
            principal_table: principal_table.to_string(),
            principal_column: principal_column.to_string(),
            on_delete,
        });
        self
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Names of the columns, in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Check that the constraints reference declared columns and that an auto increment column
    /// is the primary key.
    pub fn validate(&self) -> StdResult<()> {
        if self.columns.is_empty() {
            return Err(anyhow!("Table '{}' has no column", self.name));
        }

        let mut names = HashSet::new();
        if let Some(duplicate) = self.columns.iter().find(|c| !names.insert(c.name.as_str())) {
            return Err(anyhow!(
                "Column '{}' is declared twice in table '{}'",
                duplicate.name,
                self.name
            ));
        }

        if let Some(primary_key) = &self.primary_key {
            let column = self.column(&primary_key.column).ok_or_else(|| {
                anyhow!(
                    "Primary key '{}' of table '{}' references unknown column '{}'",
                    primary_key.name,
                    self.name,
                    primary_key.column
                )
            })?;
            if column.nullable {
                return Err(anyhow!(
                    "Primary key column '{}' of table '{}' must not be nullable",
                    column.name,
                    self.name
                ));
            }
        }

        for column in self.columns.iter().filter(|c| c.column_type == ColumnType::AutoIncrement) {
            let is_primary_key = self
                .primary_key
                .as_ref()
                .is_some_and(|primary_key| primary_key.column == column.name);
            if !is_primary_key {
                return Err(anyhow!(
                    "Auto increment column '{}' of table '{}' must be its primary key",
                    column.name,
                    self.name
                ));
            }
        }

        for foreign_key in &self.foreign_keys {
            if self.column(&foreign_key.column).is_none() {
                return Err(anyhow!(
                    "Foreign key '{}' of table '{}' references unknown column '{}'",
                    foreign_key.name,
                    self.name,
                    foreign_key.column
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_schema() -> TableSchema {
        TableSchema::new("Record")
            .add_auto_increment_column("RecordId")
            .add_integer_column("ParentId", false)
            .add_max_string_column("Name", true)
            .with_primary_key("PK_Record", "RecordId")
            .with_foreign_key(
                "FK_Record_Parent",
                "ParentId",
                "Parent",
                "ParentId",
                ReferentialAction::Cascade,
            )
    }

    #[test]
    fn auditable_columns_are_appended_in_host_order() {
        let schema = TableSchema::new("Record").add_auditable_columns();

        assert_eq!(
            vec!["CreatedBy", "CreatedOn", "ModifiedBy", "ModifiedOn", "IsDeleted"],
            schema.column_names()
        );
        assert_eq!(
            ColumnType::Text {
                max_length: Some(256)
            },
            schema.column("CreatedBy").unwrap().column_type
        );
    }

    #[test]
    fn column_sql_types() {
        assert_eq!("integer", ColumnType::AutoIncrement.sql_type());
        assert_eq!("integer", ColumnType::Boolean.sql_type());
        assert_eq!("text", ColumnType::Text { max_length: None }.sql_type());
        assert_eq!("varchar(50)", ColumnType::Text { max_length: Some(50) }.sql_type());
        assert_eq!("text", ColumnType::DateTime.sql_type());
    }

    #[test]
    fn valid_schema_passes_validation() {
        valid_schema().validate().unwrap();
    }

    #[test]
    fn validation_rejects_primary_key_on_unknown_column() {
        let schema = valid_schema().with_primary_key("PK_Record", "Unknown");

        schema.validate().expect_err("Unknown primary key column should be rejected");
    }

    #[test]
    fn validation_rejects_auto_increment_outside_primary_key() {
        let schema = TableSchema::new("Record")
            .add_integer_column("Id", false)
            .add_auto_increment_column("Counter")
            .with_primary_key("PK_Record", "Id");

        schema.validate().expect_err("Auto increment must be the primary key");
    }

    #[test]
    fn validation_rejects_foreign_key_on_unknown_column() {
        let schema = valid_schema().with_foreign_key(
            "FK_Record_Other",
            "OtherId",
            "Other",
            "OtherId",
            ReferentialAction::Restrict,
        );

        schema.validate().expect_err("Unknown foreign key column should be rejected");
    }

    #[test]
    fn validation_rejects_duplicated_columns() {
        let schema = valid_schema().add_integer_column("Name", false);

        schema.validate().expect_err("Duplicated column should be rejected");
    }
}
