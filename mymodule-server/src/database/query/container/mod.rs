mod delete_container;
mod get_container;
mod insert_container;

pub use delete_container::*;
pub use get_container::*;
pub use insert_container::*;

use mymodule_persistence::naming::quote_identifier;
use mymodule_persistence::sqlite::{SourceAlias, SqLiteEntity};

use crate::database::record::ContainerRecord;

/// Projection of the table addressed by its physical name, as a `RETURNING` clause can not use a
/// table alias.
fn projection_on(table: &str) -> String {
    let source = quote_identifier(table);

    ContainerRecord::get_projection().expand(SourceAlias::new(&[("{:container:}", source.as_str())]))
}
