//! Explicit description of a table and the builder creating or dropping it in a tenant database.

mod entity_builder;
mod table_schema;

pub use entity_builder::EntityBuilder;
pub use table_schema::{
    ColumnDefinition, ColumnType, ForeignKey, PrimaryKey, ReferentialAction, TableSchema,
};
