//! Logical schemas of the tables used by the module.

use mymodule_persistence::schema::{ReferentialAction, TableSchema};

/// Logical name of the module table
pub const MY_MODULE_TABLE: &str = "TheCompanyMyModule";

/// Logical name of the host container table
pub const CONTAINER_TABLE: &str = "Module";

const MODULE_DEFINITION_NAME_LENGTH: usize = 200;

/// Schema of the module table: records owned by a container, deleted with it.
pub fn my_module_schema() -> TableSchema {
    TableSchema::new(MY_MODULE_TABLE)
        .add_auto_increment_column("MyModuleId")
        .add_integer_column("ModuleId", false)
        .add_max_string_column("Name", true)
        .add_auditable_columns()
        .with_primary_key("PK_TheCompanyMyModule", "MyModuleId")
        .with_foreign_key(
            "FK_TheCompanyMyModule_Module",
            "ModuleId",
            CONTAINER_TABLE,
            "ModuleId",
            ReferentialAction::Cascade,
        )
}

/// Schema of the host container table, created by the host framework migration.
pub fn container_schema() -> TableSchema {
    TableSchema::new(CONTAINER_TABLE)
        .add_auto_increment_column("ModuleId")
        .add_string_column(
            "ModuleDefinitionName",
            MODULE_DEFINITION_NAME_LENGTH,
            false,
        )
        .add_auditable_columns()
        .with_primary_key("PK_Module", "ModuleId")
}
