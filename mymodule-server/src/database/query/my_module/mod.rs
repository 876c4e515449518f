mod delete_my_module;
mod get_my_module;
mod insert_my_module;
mod update_my_module;

pub use delete_my_module::*;
pub use get_my_module::*;
pub use insert_my_module::*;
pub use update_my_module::*;

use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{SourceAlias, SqLiteEntity};

use crate::database::record::MyModuleRecord;

/// Projection of the table addressed by its physical name, as a `RETURNING` clause can not use a
/// table alias.
fn projection_on(table: &str) -> String {
    let source = quote_identifier(table);

    MyModuleRecord::get_projection().expand(SourceAlias::new(&[("{:my_module:}", source.as_str())]))
}
